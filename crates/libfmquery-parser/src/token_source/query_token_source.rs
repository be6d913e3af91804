use crate::QueryParseError;
use crate::token::QueryToken;

/// Marker trait for [`QueryToken`] lexers (iterators that generate
/// [`QueryToken`]s or fail with a lexical [`QueryParseError`]).
///
/// [`StrQueryTokenSource`](crate::token_source::StrQueryTokenSource) lexes a
/// `&str`; tests and tools may supply pre-built token sequences instead.
///
/// Token sources are responsible for:
/// - Attaching whitespace to the token that follows (or precedes) it so
///   that every input character belongs to exactly one token
/// - Emitting a final token with
///   [`QueryTokenKind::Null`](crate::token::QueryTokenKind::Null)
/// - Yielding `Err` for the first lexical failure and nothing after it
///
/// All lookahead is handled by [`QueryTokenStream`](crate::QueryTokenStream).
pub trait QueryTokenSource<'src>:
    Iterator<Item = Result<QueryToken<'src>, QueryParseError>>
{
}

impl<'src, T> QueryTokenSource<'src> for T where
    T: Iterator<Item = Result<QueryToken<'src>, QueryParseError>>
{
}
