//! Token source trait and implementations.

mod query_token_source;
mod str_query_token_source;

pub use query_token_source::QueryTokenSource;
pub use str_query_token_source::StrQueryTokenSource;
pub(crate) use str_query_token_source::is_bare_string_char;
