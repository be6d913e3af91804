/// The two broad classes of find-expression errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCategory {
    /// The input could not be split into tokens (e.g. an unterminated quoted
    /// string).
    Lexical,

    /// The token stream is well-formed but violates the grammar.
    Syntactic,
}

/// Categorizes parse errors for programmatic handling.
///
/// Each variant contains minimal data needed for programmatic decisions.
/// The full human-readable message lives in `QueryParseError.message`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryParseErrorKind {
    /// A quoted string was opened but never closed.
    ///
    /// ```text
    /// SELECT "abc
    ///       ^ runaway string
    /// ```
    #[error("runaway string")]
    UnterminatedString,

    /// No token pattern matched the remaining input.
    #[error("no matching symbol")]
    UnrecognizedInput,

    /// Expected specific token(s) but found something else.
    ///
    /// ```text
    /// WHERE Age 30
    ///           ^^ expected comparator, found string
    /// ```
    #[error("unexpected token: `{found}`")]
    UnexpectedToken {
        /// What was expected (e.g. `["comparator"]`).
        expected: Vec<String>,
        /// Description of what was found.
        found: String,
    },

    /// Input ended while the grammar still required more tokens.
    #[error("unexpected end of input")]
    UnexpectedEof {
        /// What was expected when the input ran out.
        expected: Vec<String>,
    },

    /// A structurally complete query was followed by more tokens, including
    /// clauses given out of their fixed order.
    ///
    /// ```text
    /// ORDER BY Age LIMIT 10 WHERE Age>5
    ///                       ^^^^^ unexpected `WHERE`
    /// ```
    #[error("trailing input: `{found}`")]
    TrailingInput {
        /// Description of the first unconsumed token.
        found: String,
    },

    /// Parentheses nested deeper than the configured maximum.
    #[error("nesting deeper than {max} levels")]
    NestingTooDeep {
        /// The configured maximum nesting depth.
        max: usize,
    },

    /// A hook rejected a syntactically valid literal (e.g. a non-numeric
    /// `LIMIT`).
    #[error("invalid value `{value}`: {reason}")]
    InvalidValue {
        /// The rejected literal.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl QueryParseErrorKind {
    /// Maps this kind onto its lexical/syntactic category.
    pub fn category(&self) -> QueryErrorCategory {
        match self {
            QueryParseErrorKind::UnterminatedString
            | QueryParseErrorKind::UnrecognizedInput => QueryErrorCategory::Lexical,

            QueryParseErrorKind::UnexpectedToken { .. }
            | QueryParseErrorKind::UnexpectedEof { .. }
            | QueryParseErrorKind::TrailingInput { .. }
            | QueryParseErrorKind::NestingTooDeep { .. }
            | QueryParseErrorKind::InvalidValue { .. } => QueryErrorCategory::Syntactic,
        }
    }
}
