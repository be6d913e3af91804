//! Tests for the `QueryHooks` seam and the types it passes to hooks.

use crate::QueryParseError;
use crate::QueryParser;
use crate::SourcePosition;
use crate::hooks::BooleanOperator;
use crate::hooks::Comparator;
use crate::hooks::HookResult;
use crate::hooks::NoopHooks;
use crate::hooks::QueryHooks;
use crate::hooks::QueryLiteral;
use crate::invalid_value;
use crate::token::QueryTokenKind;
use crate::token_source::StrQueryTokenSource;

/// Hooks that reject any field named `secret` and count the comparisons
/// they saw.
#[derive(Default)]
struct RejectSecretFields {
    comparisons: usize,
}

impl<'src> QueryHooks<'src> for RejectSecretFields {
    fn comparison(
        &mut self,
        field: QueryLiteral<'src>,
        _comparator: Comparator,
        _value: QueryLiteral<'src>,
    ) -> HookResult {
        if field.unescaped() == "secret" {
            return Err(invalid_value(&field, "field is not searchable"));
        }
        self.comparisons += 1;
        Ok(())
    }
}

/// Verifies that a hook error aborts the parse immediately and is returned
/// unchanged.
#[test]
fn hook_error_aborts_parse() {
    let mut hooks = RejectSecretFields::default();
    let error = QueryParser::new("WHERE a=1 OR secret=2 OR b=3 )")
        .parse_with(&mut hooks)
        .expect_err("expected the hook error");
    assert_eq!(
        error.message(),
        "Syntax error: invalid value `secret`: field is not searchable",
    );
    assert_eq!(error.position().index(), 14);
    assert_eq!(hooks.comparisons, 1);
}

/// Verifies that hooks do not change which inputs are valid.
#[test]
fn hooks_do_not_affect_validity() {
    let source = "SELECT a WHERE (b=1 OR c=2) AND d LIKE e* ORDER BY a LIMIT x";
    let mut hooks = RejectSecretFields::default();
    assert!(QueryParser::new(source).parse_with(&mut hooks).is_ok());
    assert!(QueryParser::new(source).parse_with(&mut NoopHooks).is_ok());
    assert!(QueryParser::new(source).parse().is_ok());
    assert_eq!(hooks.comparisons, 3);
}

/// Verifies that literals handed to hooks carry raw and unescaped values
/// and their positions.
#[test]
fn query_literal_values() {
    let mut lexer = StrQueryTokenSource::new(r#"  "a\"b" "#);
    let token = lexer.next_token().expect("string token");
    let literal = QueryLiteral::from(token);
    assert_eq!(literal.as_str(), r#"a\"b"#);
    assert_eq!(literal.unescaped(), "a\"b");
    assert_eq!(literal.position, SourcePosition::START);
    assert_eq!(literal.end.index(), 10);
}

/// Verifies the comparator mapping from token kinds.
#[test]
fn comparator_from_token_kind() {
    assert_eq!(Comparator::from_token_kind(QueryTokenKind::LtEq), Some(Comparator::LtEq));
    assert_eq!(Comparator::from_token_kind(QueryTokenKind::Like), Some(Comparator::Like));
    assert_eq!(Comparator::from_token_kind(QueryTokenKind::And), None);
    assert_eq!(Comparator::GtEq.to_string(), ">=");
    assert_eq!(BooleanOperator::Omit.to_string(), "OMIT");
}

/// Verifies `invalid_value()` errors.
#[test]
fn invalid_value_error() {
    let mut lexer = StrQueryTokenSource::new("LIMIT ten");
    lexer.next_token().expect("LIMIT token");
    let literal = QueryLiteral::from(lexer.next_token().expect("string token"));
    let error: QueryParseError = invalid_value(&literal, "expected a non-negative integer");
    assert_eq!(error.position().index(), 7);
    assert_eq!(error.end().index(), 10);
}
