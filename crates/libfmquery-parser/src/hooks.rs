//! Extension points for capturing semantic values during a parse.
//!
//! [`QueryParser`](crate::QueryParser) validates syntax on its own. A
//! [`QueryHooks`] implementation is notified as each grammar rule is
//! recognized and can record whatever it needs (selected fields, the
//! condition tree, sort keys, paging) without taking part in token
//! consumption. A hook that returns `Err` aborts the parse immediately.

use crate::QueryParseError;
use crate::SourcePosition;
use crate::token::QueryToken;
use crate::token::QueryTokenKind;
use crate::token::QuoteStyle;
use crate::token::unescape;
use std::borrow::Cow;

/// Result type returned by every hook.
pub type HookResult = Result<(), QueryParseError>;

/// A string literal handed to a hook.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryLiteral<'src> {
    /// The raw token value (quotes stripped, escapes intact).
    pub value: Cow<'src, str>,
    pub quote_style: Option<QuoteStyle>,
    pub position: SourcePosition,
    pub end: SourcePosition,
}

impl<'src> QueryLiteral<'src> {
    /// Returns the raw literal text.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the literal with backslash escapes resolved.
    pub fn unescaped(&self) -> Cow<'src, str> {
        match self.quote_style {
            Some(_) => unescape(&self.value),
            None => self.value.clone(),
        }
    }
}

impl<'src> From<QueryToken<'src>> for QueryLiteral<'src> {
    fn from(token: QueryToken<'src>) -> Self {
        Self {
            value: token.value,
            quote_style: token.quote_style,
            position: token.position,
            end: token.end,
        }
    }
}

/// The comparator of a `field op value` term.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub enum Comparator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "LIKE")]
    Like,
}

impl Comparator {
    /// Maps a comparator token kind to its `Comparator`.
    pub fn from_token_kind(kind: QueryTokenKind) -> Option<Self> {
        match kind {
            QueryTokenKind::Eq => Some(Comparator::Eq),
            QueryTokenKind::Lt => Some(Comparator::Lt),
            QueryTokenKind::Gt => Some(Comparator::Gt),
            QueryTokenKind::LtEq => Some(Comparator::LtEq),
            QueryTokenKind::GtEq => Some(Comparator::GtEq),
            QueryTokenKind::Like => Some(Comparator::Like),
            _ => None,
        }
    }

    /// Canonical spelling of this comparator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Lt => "<",
            Comparator::Gt => ">",
            Comparator::LtEq => "<=",
            Comparator::GtEq => ">=",
            Comparator::Like => "LIKE",
        }
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An infix boolean operator inside a `WHERE` condition.
///
/// `And` binds tighter than `Or` and `Omit`, which share a precedence
/// level and associate to the left.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BooleanOperator {
    And,
    Or,
    Omit,
}

impl BooleanOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BooleanOperator::And => "AND",
            BooleanOperator::Or => "OR",
            BooleanOperator::Omit => "OMIT",
        }
    }
}

impl std::fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of an `ORDER BY` key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Semantic-capture hooks invoked by [`QueryParser`](crate::QueryParser).
///
/// Every method has a no-op default, so implementors override only the
/// events they care about. Hooks fire after the tokens they describe have
/// been validated and consumed, in source order:
///
/// ```text
/// WHERE (A=1 OR B=2) AND C=3
///
/// where_clause(omit: false)
/// condition_start
///   and_expr_start
///     group_start
///       condition_start
///         and_expr_start  comparison(A = 1)  and_expr_end
///         boolean_operator(OR)
///         and_expr_start  comparison(B = 2)  and_expr_end
///       condition_end
///     group_end
///     boolean_operator(AND)
///     comparison(C = 3)
///   and_expr_end
/// condition_end
/// ```
pub trait QueryHooks<'src> {
    /// A field named in the `SELECT` clause.
    fn select_field(&mut self, _field: QueryLiteral<'src>) -> HookResult {
        Ok(())
    }

    /// The `WHERE` keyword, and whether it was followed by a leading `OMIT`
    /// that negates the whole result set.
    fn where_clause(&mut self, _omit: bool, _position: SourcePosition) -> HookResult {
        Ok(())
    }

    /// Start of a `condition` (the top-level `WHERE` condition or the
    /// contents of a parenthesized group).
    fn condition_start(&mut self) -> HookResult {
        Ok(())
    }

    fn condition_end(&mut self) -> HookResult {
        Ok(())
    }

    /// Start of an `and_expr` (a run of terms joined by `AND`).
    fn and_expr_start(&mut self) -> HookResult {
        Ok(())
    }

    fn and_expr_end(&mut self) -> HookResult {
        Ok(())
    }

    /// An infix `AND`, `OR` or `OMIT` between two operands.
    fn boolean_operator(
        &mut self,
        _operator: BooleanOperator,
        _position: SourcePosition,
    ) -> HookResult {
        Ok(())
    }

    /// An opening `(` of a parenthesized term.
    fn group_start(&mut self, _position: SourcePosition) -> HookResult {
        Ok(())
    }

    /// The closing `)` of a parenthesized term.
    fn group_end(&mut self, _position: SourcePosition) -> HookResult {
        Ok(())
    }

    /// A complete `field comparator value` term.
    fn comparison(
        &mut self,
        _field: QueryLiteral<'src>,
        _comparator: Comparator,
        _value: QueryLiteral<'src>,
    ) -> HookResult {
        Ok(())
    }

    /// One `ORDER BY` key with its direction, if one was given.
    fn sort_key(
        &mut self,
        _field: QueryLiteral<'src>,
        _direction: Option<SortDirection>,
    ) -> HookResult {
        Ok(())
    }

    /// The literal following `LIMIT`. The grammar does not require it to be
    /// numeric; hooks may.
    fn limit(&mut self, _value: QueryLiteral<'src>) -> HookResult {
        Ok(())
    }

    /// The literal following `OFFSET`.
    fn offset(&mut self, _value: QueryLiteral<'src>) -> HookResult {
        Ok(())
    }
}

/// Hooks that capture nothing; used for plain syntax validation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl<'src> QueryHooks<'src> for NoopHooks {}
