use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libfmquery_parser::FindQuery;

#[derive(Debug, clap::Args)]
pub(crate) struct ParseCmd {
    #[arg(
        help="Pretty-print the JSON output.",
        long,
    )]
    pretty: bool,

    #[arg(
        help="The find expression to parse.",
        name="QUERY",
    )]
    query: String,
}

#[inherent::inherent]
impl RunnableCommand for ParseCmd {
    pub async fn run(self, cli: Cli) -> CommandResult {
        let query = match FindQuery::parse_with_options(&self.query, cli.parser_options()) {
            Ok(query) => query,
            Err(e) => return CommandResult::query_error(
                "Invalid find expression",
                &e,
                &self.query,
                None,
            ),
        };
        log::debug!("Captured find query: {query}");

        let json = if self.pretty {
            serde_json::to_string_pretty(&query)
        } else {
            serde_json::to_string(&query)
        };
        match json {
            Ok(json) => CommandResult::stdout(format_args!("{json}")),
            Err(e) => CommandResult::stderr(format_args!(
                "{} Failed to serialize find query: {e}",
                output_utils::RED_X,
            )),
        }
    }
}
