/// The lexical category of a [`QueryToken`](crate::token::QueryToken).
///
/// Keyword kinds are matched case-insensitively by the lexer. The token's
/// literal text is stored on the token itself, not on the kind, so kinds can
/// be compared with `==` without caring about payloads.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QueryTokenKind {
    /// End of input. Produced once the input is exhausted; never an error.
    Null,

    // =========================================================================
    // Clause keywords
    // =========================================================================
    /// `SELECT`
    Select,
    /// `WHERE`
    Where,
    /// `ORDER BY` (a single two-word keyword)
    OrderBy,
    /// `LIMIT`
    Limit,
    /// `OFFSET`
    Offset,

    // =========================================================================
    // Punctuators and comparators
    // =========================================================================
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `=`
    Eq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `,`
    Comma,

    // =========================================================================
    // Operator keywords
    // =========================================================================
    /// `LIKE`
    Like,
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `OMIT`
    Omit,
    /// `ASC`
    Asc,
    /// `DESC`
    Desc,

    // =========================================================================
    // Literals
    // =========================================================================
    /// A quoted or bare string literal.
    String,
}

impl QueryTokenKind {
    /// Returns a human-readable name for this kind, used in diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            QueryTokenKind::Null => "end of input",
            QueryTokenKind::Select => "SELECT",
            QueryTokenKind::Where => "WHERE",
            QueryTokenKind::OrderBy => "ORDER BY",
            QueryTokenKind::Limit => "LIMIT",
            QueryTokenKind::Offset => "OFFSET",
            QueryTokenKind::LParen => "(",
            QueryTokenKind::RParen => ")",
            QueryTokenKind::Eq => "=",
            QueryTokenKind::Lt => "<",
            QueryTokenKind::Gt => ">",
            QueryTokenKind::LtEq => "<=",
            QueryTokenKind::GtEq => ">=",
            QueryTokenKind::Comma => ",",
            QueryTokenKind::Like => "LIKE",
            QueryTokenKind::And => "AND",
            QueryTokenKind::Or => "OR",
            QueryTokenKind::Omit => "OMIT",
            QueryTokenKind::Asc => "ASC",
            QueryTokenKind::Desc => "DESC",
            QueryTokenKind::String => "string",
        }
    }

    /// Returns `true` if this kind is one of the keyword kinds.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            QueryTokenKind::Select
                | QueryTokenKind::Where
                | QueryTokenKind::OrderBy
                | QueryTokenKind::Limit
                | QueryTokenKind::Offset
                | QueryTokenKind::Like
                | QueryTokenKind::And
                | QueryTokenKind::Or
                | QueryTokenKind::Omit
                | QueryTokenKind::Asc
                | QueryTokenKind::Desc
        )
    }
}

impl std::fmt::Display for QueryTokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
