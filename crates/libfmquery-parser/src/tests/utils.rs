//! Various test utils.

use crate::QueryParseError;
use crate::QueryParser;
use crate::QueryParserOptions;
use crate::SourcePosition;
use crate::hooks::BooleanOperator;
use crate::hooks::Comparator;
use crate::hooks::HookResult;
use crate::hooks::QueryHooks;
use crate::hooks::QueryLiteral;
use crate::hooks::SortDirection;
use crate::token::QueryToken;
use crate::token::QueryTokenKind;

/// Creates a mock token of `kind` spanning `index..index + value.len()`.
///
/// Uses `'static` lifetime since test tokens use owned strings. Assumes
/// ASCII values.
pub fn mock_token(kind: QueryTokenKind, value: &str, index: usize) -> QueryToken<'static> {
    let len = value.len();
    QueryToken::new(
        kind,
        value.to_string(),
        SourcePosition::new(index, index - 1),
        SourcePosition::new(index + len, index + len - 1),
    )
}

/// A mock token source that produces tokens from a Vec.
///
/// Unlike the string lexer it does not have to end with a `Null` token.
pub struct MockTokenSource {
    tokens: std::vec::IntoIter<Result<QueryToken<'static>, QueryParseError>>,
}

impl MockTokenSource {
    pub fn new(tokens: Vec<QueryToken<'static>>) -> Self {
        Self::with_results(tokens.into_iter().map(Ok).collect())
    }

    pub fn with_results(tokens: Vec<Result<QueryToken<'static>, QueryParseError>>) -> Self {
        Self {
            tokens: tokens.into_iter(),
        }
    }
}

impl Iterator for MockTokenSource {
    type Item = Result<QueryToken<'static>, QueryParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next()
    }
}

/// Helper to validate `source` with default options.
pub(super) fn parse(source: &str) -> Result<(), QueryParseError> {
    QueryParser::new(source).parse()
}

/// Helper to validate `source`, panicking with the one-line error if it is
/// rejected.
pub(super) fn assert_accepts(source: &str) {
    if let Err(error) = parse(source) {
        panic!("expected {source:?} to parse, got: {error}");
    }
}

/// Helper to validate `source`, returning the error it must produce.
pub(super) fn parse_err(source: &str) -> QueryParseError {
    match parse(source) {
        Ok(()) => panic!("expected {source:?} to be rejected"),
        Err(error) => error,
    }
}

/// Helper to parse `source` and return the hook events it produced.
pub(super) fn hook_events(source: &str) -> Vec<String> {
    let mut hooks = RecordingHooks::default();
    if let Err(error) = QueryParser::with_options(source, QueryParserOptions::default())
        .parse_with(&mut hooks)
    {
        panic!("expected {source:?} to parse, got: {error}");
    }
    hooks.events
}

/// Hooks that record every event as a compact string.
#[derive(Default)]
pub struct RecordingHooks {
    pub events: Vec<String>,
}

impl<'src> QueryHooks<'src> for RecordingHooks {
    fn select_field(&mut self, field: QueryLiteral<'src>) -> HookResult {
        self.events.push(format!("select({})", field.unescaped()));
        Ok(())
    }

    fn where_clause(&mut self, omit: bool, _position: SourcePosition) -> HookResult {
        self.events.push(format!("where(omit={omit})"));
        Ok(())
    }

    fn condition_start(&mut self) -> HookResult {
        self.events.push("condition_start".to_string());
        Ok(())
    }

    fn condition_end(&mut self) -> HookResult {
        self.events.push("condition_end".to_string());
        Ok(())
    }

    fn and_expr_start(&mut self) -> HookResult {
        self.events.push("and_expr_start".to_string());
        Ok(())
    }

    fn and_expr_end(&mut self) -> HookResult {
        self.events.push("and_expr_end".to_string());
        Ok(())
    }

    fn boolean_operator(
        &mut self,
        operator: BooleanOperator,
        _position: SourcePosition,
    ) -> HookResult {
        self.events.push(operator.to_string());
        Ok(())
    }

    fn group_start(&mut self, _position: SourcePosition) -> HookResult {
        self.events.push("(".to_string());
        Ok(())
    }

    fn group_end(&mut self, _position: SourcePosition) -> HookResult {
        self.events.push(")".to_string());
        Ok(())
    }

    fn comparison(
        &mut self,
        field: QueryLiteral<'src>,
        comparator: Comparator,
        value: QueryLiteral<'src>,
    ) -> HookResult {
        self.events.push(format!(
            "{}{comparator}{}",
            field.unescaped(),
            value.unescaped(),
        ));
        Ok(())
    }

    fn sort_key(
        &mut self,
        field: QueryLiteral<'src>,
        direction: Option<SortDirection>,
    ) -> HookResult {
        self.events.push(format!("sort({} {direction:?})", field.unescaped()));
        Ok(())
    }

    fn limit(&mut self, value: QueryLiteral<'src>) -> HookResult {
        self.events.push(format!("limit({})", value.as_str()));
        Ok(())
    }

    fn offset(&mut self, value: QueryLiteral<'src>) -> HookResult {
        self.events.push(format!("offset({})", value.as_str()));
        Ok(())
    }
}
