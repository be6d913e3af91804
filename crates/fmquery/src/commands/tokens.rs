use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libfmquery_parser::token_source::StrQueryTokenSource;

#[derive(Debug, clap::Args)]
pub(crate) struct TokensCmd {
    #[arg(
        help="The find expression to tokenize.",
        name="QUERY",
    )]
    query: String,
}

#[inherent::inherent]
impl RunnableCommand for TokensCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let mut lines = vec![format!("{:>5}  {:<12} VALUE", "POS", "KIND")];
        for token in StrQueryTokenSource::new(&self.query) {
            match token {
                Ok(token) => {
                    let kind = format!("{:?}", token.kind);
                    let value = match token.quote_style {
                        Some(style) => {
                            let quote = style.quote_char();
                            format!("{quote}{}{quote}", token.value)
                        },
                        None => token.value.to_string(),
                    };
                    lines.push(format!("{:>5}  {kind:<12} {value}", token.position.index()));
                },
                Err(e) => return CommandResult::query_error(
                    "Lexical error",
                    &e,
                    &self.query,
                    Some(lines.join("\n")),
                ),
            }
        }
        CommandResult::stdout(format_args!("{}", lines.join("\n")))
    }
}
