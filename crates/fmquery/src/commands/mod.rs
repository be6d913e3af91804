mod check;
mod parse;
mod tokens;

use crate::Cli;
use crate::CommandResult;
use check::CheckCmd;
use parse::ParseCmd;
use tokens::TokensCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "fmquery")]
pub(crate) enum CommandEnum {
    /// Validate find expressions given inline or in query files.
    Check(Box<CheckCmd>),

    /// Print the directives captured from a find expression as JSON.
    Parse(Box<ParseCmd>),

    /// Print the tokens of a find expression.
    Tokens(Box<TokensCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Check(cmd) => cmd.run(cli).await,
            Self::Parse(cmd) => cmd.run(cli).await,
            Self::Tokens(cmd) => cmd.run(cli).await,
        }
    }
}
