//! This module provides the core token types produced by the find-expression
//! lexer and consumed by the parser.

mod query_token;
mod query_token_kind;

pub use query_token::QueryToken;
pub use query_token::QuoteStyle;
pub(crate) use query_token::unescape;
pub use query_token_kind::QueryTokenKind;
