mod cli;
mod command;
mod command_result;
mod commands;
mod output_utils;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command::RunnableCommand;
pub(crate) use command_result::CommandResult;
use std::process::ExitCode;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();
    let env_log_level = std::env::var("LOG_LEVEL").ok();
    let (log_level, log_level_warning) =
        resolve_log_level(cli.verbose, env_log_level.as_deref());
    setup_logger(log_level, log_level_warning);
    log::debug!("Parser options: {:?}", cli.parser_options());

    let Some(command) = cli.cmd.take() else {
        return match cli.run_default().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{} {e:#}", output_utils::RED_X);
                ExitCode::FAILURE
            },
        };
    };

    let result = command.run(cli).await;
    if let Some(stdout) = result.stdout {
        println!("{stdout}");
    }
    if let Some(stderr) = result.stderr {
        eprintln!("{stderr}");
    }
    result.exit_code
}

/// Picks the log level from `--verbose`, then `LOG_LEVEL`, then the
/// default. An unusable `LOG_LEVEL` falls back to the default and yields a
/// warning to log once logging is up.
fn resolve_log_level(
    verbose: bool,
    env_value: Option<&str>,
) -> (tracing::Level, Option<String>) {
    if verbose {
        return (tracing::Level::DEBUG, None);
    }
    match env_value.map(str::trim) {
        None | Some("") => (DEFAULT_LOG_LEVEL, None),
        Some(value) if value.eq_ignore_ascii_case("verbose") => (tracing::Level::DEBUG, None),
        Some(value) => match value.parse::<tracing::Level>() {
            Ok(level) => (level, None),
            Err(_) => (
                DEFAULT_LOG_LEVEL,
                Some(format!(
                    "Invalid `LOG_LEVEL` environment variable value: `{value}`"
                )),
            ),
        },
    }
}

fn setup_logger(log_level: tracing::Level, warning: Option<String>) {
    // stdout carries command output only.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    log::trace!("Initial logging level set to `{log_level}`.");

    if let Some(warning) = warning {
        log::warn!("{warning}");
    }
}
