//! Tests for `QueryTokenStream`.

use crate::QueryParseError;
use crate::QueryParseErrorKind;
use crate::QueryTokenStream;
use crate::SourcePosition;
use crate::tests::utils::MockTokenSource;
use crate::tests::utils::mock_token;
use crate::token::QueryTokenKind;
use crate::token_source::StrQueryTokenSource;

/// Verifies that `current()` does not consume and `advance()` does.
#[test]
fn current_then_advance() {
    let mut stream = QueryTokenStream::new(StrQueryTokenSource::new("SELECT a"));

    assert_eq!(stream.current_kind().ok(), Some(QueryTokenKind::Select));
    assert_eq!(stream.current_kind().ok(), Some(QueryTokenKind::Select));

    let select = stream.advance().expect("SELECT token");
    assert_eq!(select.kind, QueryTokenKind::Select);
    assert_eq!(stream.current().map(|t| t.value.to_string()).ok(), Some("a".to_string()));

    stream.advance().expect("string token");
    assert!(stream.is_at_end().is_ok_and(|at_end| at_end));
}

/// Verifies that `advance()` lexes on demand when nothing was peeked.
#[test]
fn advance_without_current() {
    let mut stream = QueryTokenStream::new(StrQueryTokenSource::new("a = b"));
    let kinds: Vec<_> = (0..4)
        .map(|_| stream.advance().map(|t| t.kind).ok())
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(QueryTokenKind::String),
            Some(QueryTokenKind::Eq),
            Some(QueryTokenKind::String),
            Some(QueryTokenKind::Null),
        ],
    );
}

/// Verifies that an exhausted source yields a synthesized `Null` token at
/// the end of the last consumed token, repeatedly.
#[test]
fn synthesized_null_after_exhaustion() {
    let mut stream = QueryTokenStream::new(MockTokenSource::new(vec![mock_token(
        QueryTokenKind::String,
        "abc",
        1,
    )]));
    stream.advance().expect("string token");

    for _ in 0..3 {
        let token = stream.advance().expect("null token");
        assert!(token.is_null());
        assert_eq!(token.position, SourcePosition::new(4, 3));
    }
}

/// Verifies that a lexer error surfaces from `current()`.
#[test]
fn lexer_error_from_current() {
    let mut stream = QueryTokenStream::new(MockTokenSource::with_results(vec![Err(
        QueryParseError::new(
            "runaway string",
            SourcePosition::START,
            QueryParseErrorKind::UnterminatedString,
        ),
    )]));
    let error = stream.current().expect_err("expected the lexer error");
    assert_eq!(error.message(), "runaway string");
}
