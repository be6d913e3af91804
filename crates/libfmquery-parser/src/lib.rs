//! A parsing library for the SQL-like find expressions accepted by the
//! FileMaker REST gateway.
//!
//! A find expression packs field selection, filtering, sorting and paging
//! directives into a single request parameter:
//!
//! ```text
//! SELECT Locality, "First Name"
//! WHERE (Locality="New York" AND Zip<3000) OR ("First Name" LIKE John*)
//!   OMIT Points=0
//! ORDER BY Age DESC, Points ASC
//! LIMIT 10 OFFSET 2
//! ```
//!
//! The crate provides a lexer ([`token_source::StrQueryTokenSource`]), a
//! recursive-descent [`QueryParser`] that validates the grammar fail-fast,
//! and a [`QueryHooks`] seam through which callers capture the values they
//! care about. [`FindQuery`] is a ready-made capturing consumer.
//!
//! ```
//! use libfmquery_parser::FindQuery;
//!
//! let query = FindQuery::parse("SELECT Name WHERE Age>=30 LIMIT 5").unwrap();
//! assert_eq!(query.fields, vec!["Name".to_string()]);
//! assert_eq!(query.limit, Some(5));
//! ```

mod find_query;
mod query_error_note;
mod query_parse_error;
mod query_parse_error_kind;
mod query_parser;
mod query_parser_options;
mod query_token_stream;
mod source_position;
pub mod hooks;
pub mod token;
pub mod token_source;

pub use find_query::Condition;
pub use find_query::FindQuery;
pub use find_query::FindQueryBuilder;
pub use find_query::SortKey;
pub use hooks::QueryHooks;
pub use query_error_note::QueryErrorNote;
pub use query_error_note::QueryErrorNoteKind;
pub use query_error_note::QueryErrorNotes;
pub use query_parse_error::QueryParseError;
pub use query_parse_error_kind::QueryErrorCategory;
pub use query_parse_error_kind::QueryParseErrorKind;
pub use query_parser::QueryParser;
pub use query_parser::invalid_value;
pub use query_parser_options::QueryParserOptions;
pub use query_token_stream::QueryTokenStream;
pub use smallvec::smallvec;
pub use smallvec::SmallVec;
pub use source_position::SourcePosition;

#[cfg(test)]
mod tests;
