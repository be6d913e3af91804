//! One-token lookahead over a [`QueryTokenSource`].

use crate::QueryParseError;
use crate::SourcePosition;
use crate::token::QueryToken;
use crate::token::QueryTokenKind;
use crate::token_source::QueryTokenSource;

/// Holds exactly one "current" token pulled lazily from a
/// [`QueryTokenSource`].
///
/// The find-expression grammar needs a single token of lookahead, so unlike
/// a general buffered stream there is no peeking past the current token and
/// no pushback. Lexer errors surface from [`current()`](Self::current) the
/// first time the failing token is needed.
///
/// # Type Parameters
///
/// * `'src` - The lifetime of the source text that tokens are lexed from.
/// * `TTokenSource` - The underlying token source.
pub struct QueryTokenStream<'src, TTokenSource: QueryTokenSource<'src>> {
    token_source: TTokenSource,

    /// The unconsumed lookahead token, if it has been lexed yet.
    current: Option<QueryToken<'src>>,

    /// End position of the most recently consumed token. Used to place a
    /// synthesized `Null` token if the source stops without emitting one.
    last_end_position: SourcePosition,
}

impl<'src, TTokenSource: QueryTokenSource<'src>> QueryTokenStream<'src, TTokenSource> {
    /// Creates a new token stream from a token source.
    pub fn new(token_source: TTokenSource) -> Self {
        Self {
            token_source,
            current: None,
            last_end_position: SourcePosition::START,
        }
    }

    /// Returns the current (unconsumed) token, lexing it if necessary.
    pub fn current(&mut self) -> Result<&QueryToken<'src>, QueryParseError> {
        let token = match self.current.take() {
            Some(token) => token,
            None => self.lex_next()?,
        };
        Ok(self.current.insert(token))
    }

    /// Returns the kind of the current token.
    pub fn current_kind(&mut self) -> Result<QueryTokenKind, QueryParseError> {
        Ok(self.current()?.kind)
    }

    /// Consumes the current token and returns it as an owned value.
    ///
    /// The next token is not lexed until it is asked for.
    pub fn advance(&mut self) -> Result<QueryToken<'src>, QueryParseError> {
        let token = match self.current.take() {
            Some(token) => token,
            None => self.lex_next()?,
        };
        self.last_end_position = token.end;
        Ok(token)
    }

    /// Pulls the next token from the source, synthesizing a `Null` token
    /// once the source is exhausted.
    fn lex_next(&mut self) -> Result<QueryToken<'src>, QueryParseError> {
        match self.token_source.next() {
            Some(result) => result,
            None => Ok(QueryToken::new(
                QueryTokenKind::Null,
                "",
                self.last_end_position,
                self.last_end_position,
            )),
        }
    }

    /// Returns `true` if the current token is the end-of-input token.
    pub fn is_at_end(&mut self) -> Result<bool, QueryParseError> {
        Ok(self.current()?.is_null())
    }
}
