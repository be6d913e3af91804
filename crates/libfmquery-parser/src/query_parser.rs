//! Recursive descent parser for find expressions.
//!
//! This module provides [`QueryParser`], a parser that works with any token
//! source implementing [`QueryTokenSource`]. Each grammar production has a
//! corresponding `parse_*` method:
//!
//! ```text
//! query        := select? where? order_by? limit? offset? END
//! select       := SELECT STRING (COMMA STRING)*
//! where        := WHERE OMIT? condition
//! condition    := and_expr ((OR | OMIT) and_expr)*
//! and_expr     := term (AND term)*
//! term         := LPAREN condition RPAREN
//!               | STRING comparator STRING
//! comparator   := EQ | LT | GT | LTEQ | GTEQ | LIKE
//! order_by     := ORDERBY STRING (ASC|DESC)? (COMMA STRING (ASC|DESC)?)*
//! limit        := LIMIT STRING
//! offset       := OFFSET STRING
//! ```
//!
//! # Error Handling
//!
//! Parsing is fail-fast: the first lexical or syntactic error is returned
//! and nothing further is consumed. There are no partial results.
//!
//! # Semantic Capture
//!
//! The parser itself only validates. Each `parse_*` method reports what it
//! recognized to a [`QueryHooks`] implementation after consuming the
//! relevant tokens, so capture never influences control flow.

use crate::QueryParseError;
use crate::QueryParseErrorKind;
use crate::QueryParserOptions;
use crate::QueryTokenStream;
use crate::hooks::BooleanOperator;
use crate::hooks::Comparator;
use crate::hooks::NoopHooks;
use crate::hooks::QueryHooks;
use crate::hooks::QueryLiteral;
use crate::hooks::SortDirection;
use crate::token::QueryToken;
use crate::token::QueryTokenKind;
use crate::token_source::QueryTokenSource;
use crate::token_source::StrQueryTokenSource;

/// Clause keywords in their fixed order, for diagnostics.
const CLAUSE_ORDER: &str = "SELECT, WHERE, ORDER BY, LIMIT, OFFSET";

/// A recursive descent parser for find expressions.
///
/// Generic over the token source. A parser is single-use: `parse()` and
/// `parse_with()` take `self` by value.
///
/// # Usage
///
/// ```
/// use libfmquery_parser::QueryParser;
///
/// let parser = QueryParser::new("SELECT Name WHERE Age>=30 ORDER BY Name");
/// assert!(parser.parse().is_ok());
///
/// let parser = QueryParser::new("ORDER BY Age WHERE Age>5");
/// assert!(parser.parse().is_err());
/// ```
pub struct QueryParser<'src, TTokenSource: QueryTokenSource<'src>> {
    /// The underlying token stream with one token of lookahead.
    token_stream: QueryTokenStream<'src, TTokenSource>,

    options: QueryParserOptions,

    /// Current parenthesis nesting depth inside the `WHERE` condition.
    nesting_depth: usize,
}

impl<'src> QueryParser<'src, StrQueryTokenSource<'src>> {
    /// Creates a new parser over a string-like source with default options.
    ///
    /// Accepts any type that can be referenced as a `str`, including `&str`,
    /// `&String`, and `&Cow<str>`.
    pub fn new<S: AsRef<str> + ?Sized>(source: &'src S) -> Self {
        Self::with_options(source, QueryParserOptions::default())
    }

    /// Creates a new parser over a string-like source.
    pub fn with_options<S: AsRef<str> + ?Sized>(
        source: &'src S,
        options: QueryParserOptions,
    ) -> Self {
        let token_source = StrQueryTokenSource::new(source.as_ref());
        Self::from_token_source(token_source, options)
    }
}

impl<'src, TTokenSource: QueryTokenSource<'src>> QueryParser<'src, TTokenSource> {
    /// Creates a new parser from a token source.
    pub fn from_token_source(token_source: TTokenSource, options: QueryParserOptions) -> Self {
        Self {
            token_stream: QueryTokenStream::new(token_source),
            options,
            nesting_depth: 0,
        }
    }

    /// Validates the entire input without capturing anything.
    pub fn parse(self) -> Result<(), QueryParseError> {
        self.parse_with(&mut NoopHooks)
    }

    /// Validates the entire input, reporting recognized constructs to
    /// `hooks` along the way.
    ///
    /// Succeeds only if the whole input is consumed. On error, hooks may
    /// have observed a prefix of the input; callers should discard whatever
    /// they captured.
    pub fn parse_with<THooks: QueryHooks<'src>>(
        mut self,
        hooks: &mut THooks,
    ) -> Result<(), QueryParseError> {
        tracing::trace!("parsing find expression");
        let result = self.parse_query(hooks);
        match &result {
            Ok(()) => tracing::trace!("find expression accepted"),
            Err(error) => tracing::debug!(
                position = error.position().index(),
                category = ?error.category(),
                "find expression rejected: {}",
                error.message(),
            ),
        }
        result
    }

    // =========================================================================
    // Token primitives
    // =========================================================================

    /// Consumes the current token if it is of `kind`.
    ///
    /// Returns `Ok(false)` (consuming nothing) on a mismatch.
    fn accept(&mut self, kind: QueryTokenKind) -> Result<bool, QueryParseError> {
        Ok(self.accept_token(kind)?.is_some())
    }

    /// Consumes and returns the current token if it is of `kind`.
    fn accept_token(
        &mut self,
        kind: QueryTokenKind,
    ) -> Result<Option<QueryToken<'src>>, QueryParseError> {
        if self.token_stream.current_kind()? == kind {
            Ok(Some(self.token_stream.advance()?))
        } else {
            Ok(None)
        }
    }

    /// Consumes the current token if it is of `kind` and returns its value.
    fn accept_value(
        &mut self,
        kind: QueryTokenKind,
    ) -> Result<Option<QueryLiteral<'src>>, QueryParseError> {
        Ok(self.accept_token(kind)?.map(QueryLiteral::from))
    }

    /// Consumes the current token, which must be of `kind`.
    fn expect(&mut self, kind: QueryTokenKind) -> Result<QueryToken<'src>, QueryParseError> {
        match self.accept_token(kind)? {
            Some(token) => Ok(token),
            None => Err(self.unexpected(&[kind.display_name()])?),
        }
    }

    /// Consumes the current token, which must be of `kind`, and returns its
    /// value.
    fn expect_value(
        &mut self,
        kind: QueryTokenKind,
    ) -> Result<QueryLiteral<'src>, QueryParseError> {
        Ok(QueryLiteral::from(self.expect(kind)?))
    }

    /// Builds the error for a current token that does not fit the grammar.
    ///
    /// The outer `Result` carries a lexer error raised while looking at the
    /// current token; the inner error is the syntax error itself.
    fn unexpected(&mut self, expected: &[&str]) -> Result<QueryParseError, QueryParseError> {
        let token = self.token_stream.current()?;
        let expected_display = Self::describe_expected(expected);
        let wants_string = expected.contains(&QueryTokenKind::String.display_name());
        let expected = expected.iter().map(|e| e.to_string()).collect();

        if token.is_null() {
            return Ok(QueryParseError::new(
                format!("Syntax error: expected {expected_display}, no more symbols"),
                token.position,
                QueryParseErrorKind::UnexpectedEof { expected },
            ));
        }

        let found = Self::describe_token(token);
        let mut error = QueryParseError::new(
            format!("Syntax error: expected {expected_display}, found {found}"),
            token.position,
            QueryParseErrorKind::UnexpectedToken {
                expected,
                found,
            },
        )
        .spanning_to(token.end);
        if wants_string && token.kind.is_keyword() {
            error.add_help(format!(
                "`{0}` is a keyword; quote it to use it as a value, e.g. \"{0}\"",
                token.value,
            ));
        }
        Ok(error)
    }

    /// Renders a list of expected token descriptions for an error message.
    fn describe_expected(expected: &[&str]) -> String {
        let quoted: Vec<String> = expected
            .iter()
            .map(|e| {
                if *e == QueryTokenKind::String.display_name() {
                    e.to_string()
                } else {
                    format!("`{e}`")
                }
            })
            .collect();
        match quoted.as_slice() {
            [] => "more input".to_string(),
            [single] => single.clone(),
            [init @ .., last] => format!("{} or {last}", init.join(", ")),
        }
    }

    /// Returns a human-readable display string for a token as written.
    fn describe_token(token: &QueryToken<'_>) -> String {
        match (token.kind, token.quote_style) {
            (QueryTokenKind::Null, _) => "end of input".to_string(),
            (QueryTokenKind::String, Some(style)) => {
                let quote = style.quote_char();
                format!("string {quote}{}{quote}", token.value)
            },
            (QueryTokenKind::String, None) => format!("string `{}`", token.value),
            _ => format!("`{}`", token.value),
        }
    }

    // =========================================================================
    // Clauses
    // =========================================================================

    /// `query := select? where? order_by? limit? offset? END`
    ///
    /// Each clause is entered only if its keyword is the current token, and
    /// the stages are visited strictly in order, so a clause that appears
    /// after a later one is left unconsumed and reported as trailing input.
    fn parse_query<THooks: QueryHooks<'src>>(
        &mut self,
        hooks: &mut THooks,
    ) -> Result<(), QueryParseError> {
        if self.accept(QueryTokenKind::Select)? {
            self.parse_select(hooks)?;
        }
        if let Some(where_token) = self.accept_token(QueryTokenKind::Where)? {
            self.parse_where(hooks, where_token)?;
        }
        if self.accept(QueryTokenKind::OrderBy)? {
            self.parse_order_by(hooks)?;
        }
        if self.accept(QueryTokenKind::Limit)? {
            let value = self.expect_value(QueryTokenKind::String)?;
            hooks.limit(value)?;
        }
        if self.accept(QueryTokenKind::Offset)? {
            let value = self.expect_value(QueryTokenKind::String)?;
            hooks.offset(value)?;
        }
        self.expect_end()
    }

    /// Fails unless the whole input has been consumed.
    fn expect_end(&mut self) -> Result<(), QueryParseError> {
        let token = self.token_stream.current()?;
        if token.is_null() {
            return Ok(());
        }

        let found = Self::describe_token(token);
        let is_clause_keyword = matches!(
            token.kind,
            QueryTokenKind::Select
                | QueryTokenKind::Where
                | QueryTokenKind::OrderBy
                | QueryTokenKind::Limit
                | QueryTokenKind::Offset
        );
        let mut error = QueryParseError::new(
            format!("Syntax error: unexpected {found}"),
            token.position,
            QueryParseErrorKind::TrailingInput {
                found,
            },
        )
        .spanning_to(token.end);
        if is_clause_keyword {
            error.add_help(format!(
                "clauses may each appear at most once, in the order {CLAUSE_ORDER}"
            ));
        }
        Err(error)
    }

    /// `select := SELECT STRING (COMMA STRING)*` (after `SELECT`)
    fn parse_select<THooks: QueryHooks<'src>>(
        &mut self,
        hooks: &mut THooks,
    ) -> Result<(), QueryParseError> {
        loop {
            let field = self.expect_value(QueryTokenKind::String)?;
            hooks.select_field(field)?;
            if !self.accept(QueryTokenKind::Comma)? {
                return Ok(());
            }
        }
    }

    /// `where := WHERE OMIT? condition` (after `WHERE`)
    fn parse_where<THooks: QueryHooks<'src>>(
        &mut self,
        hooks: &mut THooks,
        where_token: QueryToken<'src>,
    ) -> Result<(), QueryParseError> {
        let omit = self.accept(QueryTokenKind::Omit)?;
        hooks.where_clause(omit, where_token.position)?;
        self.parse_condition(hooks)
    }

    // =========================================================================
    // Conditions
    // =========================================================================

    /// `condition := and_expr ((OR | OMIT) and_expr)*`
    ///
    /// Iterative so that long flat chains do not deepen the stack.
    fn parse_condition<THooks: QueryHooks<'src>>(
        &mut self,
        hooks: &mut THooks,
    ) -> Result<(), QueryParseError> {
        hooks.condition_start()?;
        self.parse_and_expr(hooks)?;
        loop {
            let operator = match self.token_stream.current_kind()? {
                QueryTokenKind::Or => BooleanOperator::Or,
                QueryTokenKind::Omit => BooleanOperator::Omit,
                _ => break,
            };
            let operator_token = self.token_stream.advance()?;
            hooks.boolean_operator(operator, operator_token.position)?;
            self.parse_and_expr(hooks)?;
        }
        hooks.condition_end()
    }

    /// `and_expr := term (AND term)*`
    fn parse_and_expr<THooks: QueryHooks<'src>>(
        &mut self,
        hooks: &mut THooks,
    ) -> Result<(), QueryParseError> {
        hooks.and_expr_start()?;
        self.parse_term(hooks)?;
        while let Some(and_token) = self.accept_token(QueryTokenKind::And)? {
            hooks.boolean_operator(BooleanOperator::And, and_token.position)?;
            self.parse_term(hooks)?;
        }
        hooks.and_expr_end()
    }

    /// `term := LPAREN condition RPAREN | STRING comparator STRING`
    fn parse_term<THooks: QueryHooks<'src>>(
        &mut self,
        hooks: &mut THooks,
    ) -> Result<(), QueryParseError> {
        if let Some(field) = self.accept_value(QueryTokenKind::String)? {
            let comparator = self.parse_comparator()?;
            let value = self.expect_value(QueryTokenKind::String)?;
            return hooks.comparison(field, comparator, value);
        }

        if let Some(lparen) = self.accept_token(QueryTokenKind::LParen)? {
            return self.parse_group(hooks, lparen);
        }

        Err(self.unexpected(&[
            QueryTokenKind::LParen.display_name(),
            QueryTokenKind::String.display_name(),
        ])?)
    }

    /// The parenthesized alternative of `term` (after `(`).
    fn parse_group<THooks: QueryHooks<'src>>(
        &mut self,
        hooks: &mut THooks,
        lparen: QueryToken<'src>,
    ) -> Result<(), QueryParseError> {
        let max = self.options.max_nesting_depth();
        if self.nesting_depth >= max {
            return Err(QueryParseError::new(
                format!("Syntax error: parentheses nested deeper than {max} levels"),
                lparen.position,
                QueryParseErrorKind::NestingTooDeep { max },
            )
            .spanning_to(lparen.end));
        }

        self.nesting_depth += 1;
        hooks.group_start(lparen.position)?;
        self.parse_condition(hooks)?;

        let rparen = match self.accept_token(QueryTokenKind::RParen)? {
            Some(rparen) => rparen,
            None => {
                let mut error = self.unexpected(&[QueryTokenKind::RParen.display_name()])?;
                error.add_note_at("unmatched `(` opened here", lparen.position);
                return Err(error);
            },
        };
        self.nesting_depth -= 1;
        hooks.group_end(rparen.position)
    }

    /// `comparator := EQ | LT | GT | LTEQ | GTEQ | LIKE`
    fn parse_comparator(&mut self) -> Result<Comparator, QueryParseError> {
        let kind = self.token_stream.current_kind()?;
        match Comparator::from_token_kind(kind) {
            Some(comparator) => {
                self.token_stream.advance()?;
                Ok(comparator)
            },
            None => {
                let mut error = self.unexpected(&[
                    QueryTokenKind::Eq.display_name(),
                    QueryTokenKind::Lt.display_name(),
                    QueryTokenKind::Gt.display_name(),
                    QueryTokenKind::LtEq.display_name(),
                    QueryTokenKind::GtEq.display_name(),
                    QueryTokenKind::Like.display_name(),
                ])?;
                if kind == QueryTokenKind::String {
                    error.add_help(
                        "a field name containing spaces must be quoted, e.g. \"First Name\"",
                    );
                }
                Err(error)
            },
        }
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// `order_by := ORDERBY STRING (ASC|DESC)? (COMMA STRING (ASC|DESC)?)*`
    /// (after `ORDER BY`)
    fn parse_order_by<THooks: QueryHooks<'src>>(
        &mut self,
        hooks: &mut THooks,
    ) -> Result<(), QueryParseError> {
        loop {
            let field = self.expect_value(QueryTokenKind::String)?;
            let direction = if self.accept(QueryTokenKind::Asc)? {
                Some(SortDirection::Asc)
            } else if self.accept(QueryTokenKind::Desc)? {
                Some(SortDirection::Desc)
            } else {
                None
            };
            hooks.sort_key(field, direction)?;
            if !self.accept(QueryTokenKind::Comma)? {
                return Ok(());
            }
        }
    }
}

/// Creates the error a hook returns to reject a syntactically valid literal.
///
/// ```
/// use libfmquery_parser::hooks::QueryLiteral;
/// use libfmquery_parser::QueryParseErrorKind;
/// # use libfmquery_parser::token::QueryToken;
/// # use libfmquery_parser::token::QueryTokenKind;
/// # use libfmquery_parser::SourcePosition;
/// # let literal = QueryLiteral::from(QueryToken::new(
/// #     QueryTokenKind::String, "ten", SourcePosition::START, SourcePosition::new(4, 3),
/// # ));
/// let error = libfmquery_parser::invalid_value(&literal, "expected a non-negative integer");
/// assert!(matches!(error.kind(), QueryParseErrorKind::InvalidValue { .. }));
/// ```
pub fn invalid_value(literal: &QueryLiteral<'_>, reason: impl Into<String>) -> QueryParseError {
    let reason = reason.into();
    let value: &str = &literal.value;
    QueryParseError::new(
        format!("Syntax error: invalid value `{value}`: {reason}"),
        literal.position,
        QueryParseErrorKind::InvalidValue {
            value: value.to_string(),
            reason,
        },
    )
    .spanning_to(literal.end)
}
