use crate::output_utils;
use libfmquery_parser::QueryParseError;
use std::process::ExitCode;

/// What a command prints, and how the process exits.
#[derive(Debug)]
pub(crate) struct CommandResult {
    pub exit_code: ExitCode,
    pub stderr: Option<String>,
    pub stdout: Option<String>,
}

impl CommandResult {
    pub fn stderr(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self {
            exit_code: ExitCode::FAILURE,
            stderr: Some(format!("{fmt_args}")),
            stdout: None,
        }
    }

    pub fn stdout(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self {
            exit_code: ExitCode::SUCCESS,
            stderr: None,
            stdout: Some(format!("{fmt_args}")),
        }
    }

    /// A failure rendering `error` as a caret diagnostic against `source`,
    /// after any `preamble` output.
    pub fn query_error(
        headline: &str,
        error: &QueryParseError,
        source: &str,
        preamble: Option<String>,
    ) -> Self {
        let mut stderr = preamble.map(|p| format!("{p}\n")).unwrap_or_default();
        stderr.push_str(&format!("{} {headline}:\n", output_utils::RED_X));
        stderr.push_str(error.format_detailed(Some(source)).trim_end());
        Self {
            exit_code: ExitCode::FAILURE,
            stderr: Some(stderr),
            stdout: None,
        }
    }
}
