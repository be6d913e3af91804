/// Immutable configuration for a [`QueryParser`](crate::QueryParser).
///
/// Options are constructed explicitly and passed in; the parser holds no
/// process-wide state.
///
/// ```
/// use libfmquery_parser::QueryParserOptions;
///
/// let options = QueryParserOptions::default().with_max_nesting_depth(8);
/// assert_eq!(options.max_nesting_depth(), 8);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QueryParserOptions {
    max_nesting_depth: usize,
}

impl QueryParserOptions {
    /// Default maximum parenthesis nesting depth.
    ///
    /// Each level of `(` recurses through the condition grammar, so this
    /// bounds stack use for adversarial inputs like `((((((...`. Real find
    /// expressions rarely nest more than a handful of levels.
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

    /// Returns a copy of these options with a different maximum nesting
    /// depth.
    pub fn with_max_nesting_depth(self, max_nesting_depth: usize) -> Self {
        Self { max_nesting_depth }
    }

    /// Maximum number of nested parenthesized groups accepted in a `WHERE`
    /// condition.
    pub fn max_nesting_depth(&self) -> usize {
        self.max_nesting_depth
    }
}

impl Default for QueryParserOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}
