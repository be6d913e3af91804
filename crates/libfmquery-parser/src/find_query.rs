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
use crate::invalid_value;
use crate::token_source::is_bare_string_char;
use inherent::inherent;

/// Words that would lex as keywords if written bare.
const RESERVED_WORDS: [&str; 12] = [
    "SELECT", "WHERE", "ORDER", "BY", "LIKE", "AND", "OR", "OMIT", "ASC", "DESC", "LIMIT",
    "OFFSET",
];

/// The directives captured from a find expression.
///
/// ```
/// use libfmquery_parser::Condition;
/// use libfmquery_parser::FindQuery;
/// use libfmquery_parser::hooks::BooleanOperator;
///
/// let query = FindQuery::parse("WHERE A=1 OR B=2 AND C=3").unwrap();
/// let Some(Condition::Binary { operator, rhs, .. }) = &query.condition else {
///     panic!("expected a binary condition");
/// };
/// assert_eq!(*operator, BooleanOperator::Or);
/// assert!(matches!(
///     **rhs,
///     Condition::Binary { operator: BooleanOperator::And, .. },
/// ));
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FindQuery {
    /// Fields named in `SELECT`, in order. Empty when there is no `SELECT`.
    pub fields: Vec<String>,

    /// `true` when the condition was introduced by `WHERE OMIT`, negating
    /// membership of the whole result set.
    pub omit: bool,

    pub condition: Option<Condition>,
    pub sort: Vec<SortKey>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl FindQuery {
    /// Parses `source` with default options and captures its directives.
    pub fn parse(source: &str) -> Result<Self, QueryParseError> {
        Self::parse_with_options(source, QueryParserOptions::default())
    }

    /// Parses `source` and captures its directives.
    pub fn parse_with_options(
        source: &str,
        options: QueryParserOptions,
    ) -> Result<Self, QueryParseError> {
        let mut builder = FindQueryBuilder::new();
        QueryParser::with_options(source, options).parse_with(&mut builder)?;
        Ok(builder.build())
    }
}

/// Renders the query back into find-expression syntax, quoting literals
/// where needed. Conditions are parenthesized only where the tree's grouping
/// differs from what left-to-right parsing would produce.
impl std::fmt::Display for FindQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut clauses: Vec<String> = vec![];
        if !self.fields.is_empty() {
            let fields: Vec<String> = self.fields.iter().map(|s| quote_literal(s)).collect();
            clauses.push(format!("SELECT {}", fields.join(", ")));
        }
        if let Some(condition) = &self.condition {
            let omit = if self.omit { "OMIT " } else { "" };
            clauses.push(format!("WHERE {omit}{condition}"));
        }
        if !self.sort.is_empty() {
            let keys: Vec<String> = self.sort.iter().map(|k| k.to_string()).collect();
            clauses.push(format!("ORDER BY {}", keys.join(", ")));
        }
        if let Some(limit) = self.limit {
            clauses.push(format!("LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            clauses.push(format!("OFFSET {offset}"));
        }
        f.write_str(&clauses.join(" "))
    }
}

/// A boolean condition tree.
///
/// Operators fold to the left, so `A OR B OMIT C` is
/// `Binary(Omit, Binary(Or, A, B), C)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    Comparison {
        field: String,
        comparator: Comparator,
        value: String,
    },
    Binary {
        operator: BooleanOperator,
        lhs: Box<Condition>,
        rhs: Box<Condition>,
    },
}

impl Condition {
    /// Returns every comparison in the tree, left to right.
    pub fn comparisons(&self) -> Vec<(&str, Comparator, &str)> {
        let mut found = vec![];
        let mut pending = vec![self];
        while let Some(condition) = pending.pop() {
            match condition {
                Condition::Comparison { field, comparator, value } => {
                    found.push((field.as_str(), *comparator, value.as_str()));
                },
                Condition::Binary { lhs, rhs, .. } => {
                    pending.push(rhs);
                    pending.push(lhs);
                },
            }
        }
        found
    }

    /// How tightly this node binds when rendered: comparisons bind tightest,
    /// then `AND`, then `OR`/`OMIT`.
    fn precedence(&self) -> u8 {
        match self {
            Condition::Comparison { .. } => 2,
            Condition::Binary { operator: BooleanOperator::And, .. } => 1,
            Condition::Binary { .. } => 0,
        }
    }

    fn fold(operator: BooleanOperator, lhs: Condition, rhs: Condition) -> Condition {
        Condition::Binary {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Comparison { field, comparator, value } => {
                let spacer = if *comparator == Comparator::Like { " " } else { "" };
                write!(
                    f,
                    "{}{spacer}{comparator}{spacer}{}",
                    quote_literal(field),
                    quote_literal(value),
                )
            },
            Condition::Binary { operator, lhs, rhs } => {
                // Operators fold to the left, so only a right operand at the
                // same level needs grouping to keep its shape.
                let level = self.precedence();
                write_operand(f, lhs, lhs.precedence() < level)?;
                write!(f, " {operator} ")?;
                write_operand(f, rhs, rhs.precedence() <= level)
            },
        }
    }
}

fn write_operand(
    f: &mut std::fmt::Formatter<'_>,
    operand: &Condition,
    grouped: bool,
) -> std::fmt::Result {
    if grouped {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

/// One `ORDER BY` key.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct SortKey {
    pub field: String,

    /// `None` when no direction was written; the backend default applies.
    pub direction: Option<SortDirection>,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&quote_literal(&self.field))?;
        match self.direction {
            Some(SortDirection::Asc) => f.write_str(" ASC"),
            Some(SortDirection::Desc) => f.write_str(" DESC"),
            None => Ok(()),
        }
    }
}

/// Writes `value` bare when it would lex back as the same single string,
/// otherwise double-quoted with `"` and `\` escaped.
fn quote_literal(value: &str) -> String {
    let is_bare = !value.is_empty()
        && value.chars().all(is_bare_string_char)
        && !RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(value));
    if is_bare {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

// =============================================================================
// Builder
// =============================================================================

/// A partially built condition level.
#[derive(Debug)]
enum Frame {
    /// Operands of a `condition`, with the `OR`/`OMIT` operator that joins
    /// each operand after the first to what precedes it.
    Condition {
        lhs: Option<Condition>,
        pending_operator: Option<BooleanOperator>,
    },

    /// Operands of an `and_expr`, folded with `AND` as they arrive.
    AndExpr { lhs: Option<Condition> },
}

/// [`QueryHooks`] implementation that captures a [`FindQuery`].
///
/// Literal values are stored unescaped. `LIMIT` and `OFFSET` must be
/// non-negative integers; anything else aborts the parse with an
/// `InvalidValue` error.
#[derive(Debug, Default)]
pub struct FindQueryBuilder {
    query: FindQuery,
    frames: Vec<Frame>,
}

impl FindQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the captured query.
    pub fn build(self) -> FindQuery {
        self.query
    }

    /// Adds a finished operand to the innermost open `and_expr`.
    fn push_operand(&mut self, operand: Condition) {
        if let Some(Frame::AndExpr { lhs }) = self.frames.last_mut() {
            *lhs = Some(match lhs.take() {
                Some(prev) => Condition::fold(BooleanOperator::And, prev, operand),
                None => operand,
            });
        }
    }

    fn parse_count(value: &QueryLiteral<'_>) -> Result<u64, QueryParseError> {
        value
            .unescaped()
            .parse::<u64>()
            .map_err(|_| invalid_value(value, "expected a non-negative integer"))
    }
}

#[inherent]
impl<'src> QueryHooks<'src> for FindQueryBuilder {
    pub fn select_field(&mut self, field: QueryLiteral<'src>) -> HookResult {
        self.query.fields.push(field.unescaped().into_owned());
        Ok(())
    }

    pub fn where_clause(&mut self, omit: bool, _position: SourcePosition) -> HookResult {
        self.query.omit = omit;
        Ok(())
    }

    pub fn condition_start(&mut self) -> HookResult {
        self.frames.push(Frame::Condition {
            lhs: None,
            pending_operator: None,
        });
        Ok(())
    }

    pub fn condition_end(&mut self) -> HookResult {
        let Some(Frame::Condition { lhs: Some(condition), .. }) = self.frames.pop() else {
            return Ok(());
        };
        if self.frames.is_empty() {
            self.query.condition = Some(condition);
        } else {
            // A parenthesized group is an operand of the enclosing and_expr.
            self.push_operand(condition);
        }
        Ok(())
    }

    pub fn and_expr_start(&mut self) -> HookResult {
        self.frames.push(Frame::AndExpr { lhs: None });
        Ok(())
    }

    pub fn and_expr_end(&mut self) -> HookResult {
        let Some(Frame::AndExpr { lhs: Some(operand) }) = self.frames.pop() else {
            return Ok(());
        };
        if let Some(Frame::Condition { lhs, pending_operator }) = self.frames.last_mut() {
            *lhs = Some(match (lhs.take(), pending_operator.take()) {
                (Some(prev), Some(operator)) => Condition::fold(operator, prev, operand),
                (_, _) => operand,
            });
        }
        Ok(())
    }

    pub fn boolean_operator(
        &mut self,
        operator: BooleanOperator,
        _position: SourcePosition,
    ) -> HookResult {
        // `AND` operands fold as they arrive; only OR/OMIT need remembering.
        if operator != BooleanOperator::And
            && let Some(Frame::Condition { pending_operator, .. }) = self.frames.last_mut()
        {
            *pending_operator = Some(operator);
        }
        Ok(())
    }

    pub fn group_start(&mut self, _position: SourcePosition) -> HookResult {
        Ok(())
    }

    pub fn group_end(&mut self, _position: SourcePosition) -> HookResult {
        Ok(())
    }

    pub fn comparison(
        &mut self,
        field: QueryLiteral<'src>,
        comparator: Comparator,
        value: QueryLiteral<'src>,
    ) -> HookResult {
        self.push_operand(Condition::Comparison {
            field: field.unescaped().into_owned(),
            comparator,
            value: value.unescaped().into_owned(),
        });
        Ok(())
    }

    pub fn sort_key(
        &mut self,
        field: QueryLiteral<'src>,
        direction: Option<SortDirection>,
    ) -> HookResult {
        self.query.sort.push(SortKey {
            field: field.unescaped().into_owned(),
            direction,
        });
        Ok(())
    }

    pub fn limit(&mut self, value: QueryLiteral<'src>) -> HookResult {
        self.query.limit = Some(Self::parse_count(&value)?);
        Ok(())
    }

    pub fn offset(&mut self, value: QueryLiteral<'src>) -> HookResult {
        self.query.offset = Some(Self::parse_count(&value)?);
        Ok(())
    }
}
