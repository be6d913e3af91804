use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use libfmquery_parser::QueryParseError;
use libfmquery_parser::QueryParser;
use libfmquery_parser::QueryParserOptions;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use tokio::task::JoinSet;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct CheckCmd {
    #[arg(
        help="Paths to query files, or directories containing query files, \
             to validate. Each non-empty line of a query file is one find \
             expression.",
        long="file",
        name="PATH",
    )]
    file_or_dir_paths: Vec<PathBuf>,

    #[arg(
        default_values_t=["fmq".to_string()],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    query_file_exts: Vec<String>,

    #[arg(
        help="Find expressions to validate.",
        name="QUERY",
        required_unless_present="PATH",
    )]
    queries: Vec<String>,
}

/// One rejected find expression.
#[derive(Debug)]
struct Failure {
    /// Where the expression came from, e.g. `argument 2` or `a.fmq:7`.
    origin: String,
    source: String,
    error: QueryParseError,
}

/// Outcome of validating every expression in one query file.
#[derive(Debug)]
struct FileReport {
    path: PathBuf,
    num_queries: usize,
    failures: Vec<Failure>,
}

#[inherent::inherent]
impl RunnableCommand for CheckCmd {
    pub async fn run(self, cli: Cli) -> CommandResult {
        let options = cli.parser_options();
        let mut failures: Vec<Failure> = vec![];

        for (i, query) in self.queries.iter().enumerate() {
            if let Err(error) = QueryParser::with_options(query, options).parse() {
                failures.push(Failure {
                    origin: format!("argument {}", i + 1),
                    source: query.to_owned(),
                    error,
                });
            }
        }

        let file_paths = match self.find_query_files() {
            Ok(file_paths) => file_paths,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} Failed to collect query files: {e:#}",
                output_utils::RED_X,
            )),
        };
        log::debug!("Found {} query files to be validated.", file_paths.len());

        let mut tasks = JoinSet::new();
        for path in file_paths.iter().cloned() {
            tasks.spawn(check_query_file(path, options));
        }
        let mut reports = vec![];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(report)) => reports.push(report),
                Ok(Err(e)) => return CommandResult::stderr(format_args!(
                    "{} {e:#}",
                    output_utils::RED_X,
                )),
                Err(e) => return CommandResult::stderr(format_args!(
                    "{} Query file task failed: {e}",
                    output_utils::RED_X,
                )),
            }
        }

        // Tasks finish in any order; report files in path order.
        reports.sort_by(|a, b| a.path.cmp(&b.path));
        let mut num_file_queries = 0;
        for report in reports {
            num_file_queries += report.num_queries;
            failures.extend(report.failures);
        }

        let num_queries = self.queries.len() + num_file_queries;
        if failures.is_empty() {
            return CommandResult::stdout(format_args!(
                concat!(
                    "{} All find expressions validated successfully:\n",
                    "  * Validated {} inline expressions.\n",
                    "  * Validated {} expressions from {} query files.",
                ),
                output_utils::GREEN_CHECK,
                self.queries.len(),
                num_file_queries,
                file_paths.len(),
            ));
        }

        let diagnostics: Vec<String> = failures
            .iter()
            .map(|failure| {
                format!(
                    "{}:\n{}",
                    failure.origin,
                    output_utils::indent(&failure.error.format_detailed(Some(&failure.source)), 2),
                )
            })
            .collect();
        CommandResult::stderr(format_args!(
            "{} {} of {num_queries} find expressions are invalid:\n\n{}",
            output_utils::RED_X,
            failures.len(),
            diagnostics.join("\n\n"),
        ))
    }
}

impl CheckCmd {
    /// Finds all query files recursively located at or under each path
    /// passed as an arg.
    fn find_query_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        // Normalize the set of file extensions to filter with
        let query_file_exts: HashSet<String> =
            self.query_file_exts.iter()
                .map(|ext| ext.trim_start_matches('.').to_owned())
                .collect();

        log::debug!(
            "Scanning {} input paths...",
            self.file_or_dir_paths.len(),
        );
        let mut file_paths = vec![];
        for path in &self.file_or_dir_paths {
            for entry in WalkDir::new(path.as_path()).follow_links(true) {
                let entry = entry.with_context(|| {
                    format!("Failed to scan {}", path.display())
                })?;
                let path = entry.path();
                if !entry.file_type().is_file() {
                    log::trace!("Skipping non-file: {path:#?}.");
                    continue;
                }
                log::trace!("Found file at {path:#?}.");
                if let Some(ext) = path.extension().map(|s| s.to_string_lossy())
                    && query_file_exts.contains(&*ext) {
                    file_paths.push(canonicalize(path)?);
                }
            }
        }

        // A single file path given explicitly is validated even if its
        // extension doesn't match `--query-file-exts`.
        if file_paths.is_empty()
            && self.file_or_dir_paths.len() == 1
            && let Some(first_arg_path) = self.file_or_dir_paths.first()
            && first_arg_path.is_file() {
            let canonicalized_first_arg_path = canonicalize(first_arg_path)?;
            log::warn!(
                "Proceeding to validate {canonicalized_first_arg_path:#?} even \
                though it doesn't match any of the --query-file-exts ({}).",
                query_file_exts.iter()
                    .map(|ext| format!("`.{ext}`"))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            file_paths.push(canonicalized_first_arg_path);
        }

        file_paths.sort();
        Ok(file_paths)
    }
}

fn canonicalize(path: &Path) -> anyhow::Result<PathBuf> {
    std::fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))
}

/// Validates each non-empty line of the file at `path` as a find expression.
async fn check_query_file(
    path: PathBuf,
    options: QueryParserOptions,
) -> anyhow::Result<FileReport> {
    let contents = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut report = FileReport {
        path: path.clone(),
        num_queries: 0,
        failures: vec![],
    };
    for (line_idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        report.num_queries += 1;
        if let Err(error) = QueryParser::with_options(line, options).parse() {
            report.failures.push(Failure {
                origin: format!("{}:{}", path.display(), line_idx + 1),
                source: line.to_owned(),
                error,
            });
        }
    }
    log::debug!(
        "Checked {} find expressions in {}.",
        report.num_queries,
        path.display(),
    );
    Ok(report)
}
