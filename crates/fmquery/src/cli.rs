use clap::CommandFactory;
use crate::commands;
use libfmquery_parser::QueryParserOptions;

#[derive(clap::Parser, Debug)]
#[command(name = "fmquery", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        help="Enable verbose output.",
        long,
        short='v',
        global=true,
    )]
    pub verbose: bool,

    #[arg(
        default_value_t=QueryParserOptions::DEFAULT_MAX_NESTING_DEPTH,
        help="Maximum nesting depth of parenthesized groups in a WHERE \
             condition.",
        long,
        global=true,
    )]
    pub max_nesting_depth: usize,
}
impl Cli {
    pub(crate) fn parser_options(&self) -> QueryParserOptions {
        QueryParserOptions::default().with_max_nesting_depth(self.max_nesting_depth)
    }

    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        Self::command().print_help()?;
        Ok(())
    }
}
