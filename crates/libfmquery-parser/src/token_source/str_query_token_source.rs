//! A [`QueryTokenSource`](crate::token_source::QueryTokenSource) that lexes
//! from a `&str` input.
//!
//! Token values borrow directly from the source string using
//! `Cow::Borrowed`; the lexer never allocates for a successful token.
//!
//! # Matching order
//!
//! At each step the lexer tries, in this fixed order:
//!
//! 1. punctuators and comparators: `(`, `)`, `<=`, `>=`, `=`, `<`, `>`
//! 2. keywords (case-insensitive): `ORDER BY`, `SELECT`, `WHERE`, `LIKE`,
//!    `AND`, `OR`, `OMIT`, `ASC`, `DESC`, `LIMIT`, `OFFSET`
//! 3. the comma
//! 4. strings: `"..."`, then `'...'` (both with backslash escapes kept
//!    verbatim), then a bare run of characters containing no whitespace and
//!    none of `( ) = < > , " '`
//!
//! Because keywords are tried before strings, a bare value spelled like a
//! keyword (`and`, `Desc`) is a keyword; such values must be quoted.
//!
//! # Usage
//!
//! ```rust
//! use libfmquery_parser::token_source::StrQueryTokenSource;
//!
//! let lexer = StrQueryTokenSource::new("WHERE Age>=30");
//! for token in lexer {
//!     println!("{:?}", token.unwrap().kind);
//! }
//! // Output:
//! // Where
//! // String
//! // GtEq
//! // String
//! // Null
//! ```

use crate::QueryErrorNote;
use crate::QueryParseError;
use crate::QueryParseErrorKind;
use crate::SourcePosition;
use crate::smallvec;
use crate::token::QueryToken;
use crate::token::QueryTokenKind;
use crate::token::QuoteStyle;
use std::borrow::Cow;

/// Single-word keywords in matching order. `ORDER BY` is handled separately
/// because of its inner whitespace.
const KEYWORDS: [(&str, QueryTokenKind); 10] = [
    ("SELECT", QueryTokenKind::Select),
    ("WHERE", QueryTokenKind::Where),
    ("LIKE", QueryTokenKind::Like),
    ("AND", QueryTokenKind::And),
    ("OR", QueryTokenKind::Or),
    ("OMIT", QueryTokenKind::Omit),
    ("ASC", QueryTokenKind::Asc),
    ("DESC", QueryTokenKind::Desc),
    ("LIMIT", QueryTokenKind::Limit),
    ("OFFSET", QueryTokenKind::Offset),
];

/// A matched token body: kind, trimmed value, and quoting (strings only).
type Lexed<'src> = (QueryTokenKind, Cow<'src, str>, Option<QuoteStyle>);

/// A lexer over a `&str` find expression.
///
/// See module documentation for details.
pub struct StrQueryTokenSource<'src> {
    /// The full source text being lexed.
    source: &'src str,

    /// Current byte offset from the start of `source`.
    ///
    /// The remaining text to lex is `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,

    /// Current 1-based character index.
    curr_index: usize,

    /// Whether the `Null` token (or an error) has been emitted.
    finished: bool,
}

impl<'src> StrQueryTokenSource<'src> {
    /// Creates a new token source from a string slice.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_index: 1,
            finished: false,
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    /// Returns the remaining source text to be lexed.
    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    /// Returns the current source position.
    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(self.curr_index, self.curr_byte_offset)
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consumes the next character and updates position tracking.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.curr_byte_offset += ch.len_utf8();
        self.curr_index += 1;
        Some(ch)
    }

    /// Consumes `byte_len` bytes, which must end on a char boundary.
    fn consume_bytes(&mut self, byte_len: usize) {
        let consumed = &self.remaining()[..byte_len];
        self.curr_index += consumed.chars().count();
        self.curr_byte_offset += byte_len;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.consume();
        }
    }

    // =========================================================================
    // Lexer main entry point
    // =========================================================================

    /// Lexes the next token, advancing past it and any whitespace on either
    /// side of it.
    ///
    /// Returns a [`QueryTokenKind::Null`] token once the input is exhausted;
    /// calling again after that keeps returning `Null`.
    pub fn next_token(&mut self) -> Result<QueryToken<'src>, QueryParseError> {
        let start = self.curr_position();
        self.skip_whitespace();

        if self.peek_char().is_none() {
            let end = self.curr_position();
            return Ok(QueryToken::new(QueryTokenKind::Null, "", start, end));
        }

        let Some((kind, value, quote_style)) = self.lex_any() else {
            return Err(self.no_match_error(start));
        };

        self.skip_whitespace();
        Ok(QueryToken {
            kind,
            value,
            position: start,
            end: self.curr_position(),
            quote_style,
        })
    }

    /// Tries every token pattern in matching order.
    fn lex_any(&mut self) -> Option<Lexed<'src>> {
        if let Some(lexed) = self.lex_punctuator() {
            return Some(lexed);
        }
        if let Some(lexed) = self.lex_keyword() {
            return Some(lexed);
        }
        if let Some(lexed) = self.lex_comma() {
            return Some(lexed);
        }
        self.lex_string()
    }

    // =========================================================================
    // Punctuators
    // =========================================================================

    fn lex_punctuator(&mut self) -> Option<Lexed<'src>> {
        let rest = self.remaining();
        let (kind, len) = if rest.starts_with("<=") {
            (QueryTokenKind::LtEq, 2)
        } else if rest.starts_with(">=") {
            (QueryTokenKind::GtEq, 2)
        } else {
            match rest.as_bytes().first()? {
                b'(' => (QueryTokenKind::LParen, 1),
                b')' => (QueryTokenKind::RParen, 1),
                b'=' => (QueryTokenKind::Eq, 1),
                b'<' => (QueryTokenKind::Lt, 1),
                b'>' => (QueryTokenKind::Gt, 1),
                _ => return None,
            }
        };
        self.consume_bytes(len);
        Some((kind, Cow::Borrowed(&rest[..len]), None))
    }

    // =========================================================================
    // Keywords
    // =========================================================================

    fn lex_keyword(&mut self) -> Option<Lexed<'src>> {
        let rest = self.remaining();

        if let Some(len) = match_order_by(rest) {
            self.consume_bytes(len);
            return Some((QueryTokenKind::OrderBy, Cow::Borrowed(&rest[..len]), None));
        }

        for (keyword, kind) in KEYWORDS {
            if starts_with_keyword(rest, keyword) {
                let len = keyword.len();
                self.consume_bytes(len);
                return Some((kind, Cow::Borrowed(&rest[..len]), None));
            }
        }
        None
    }

    fn lex_comma(&mut self) -> Option<Lexed<'src>> {
        let rest = self.remaining();
        if rest.starts_with(',') {
            self.consume_bytes(1);
            return Some((QueryTokenKind::Comma, Cow::Borrowed(&rest[..1]), None));
        }
        None
    }

    // =========================================================================
    // Strings
    // =========================================================================

    fn lex_string(&mut self) -> Option<Lexed<'src>> {
        let rest = self.remaining();

        for style in [QuoteStyle::Double, QuoteStyle::Single] {
            if let Some(body_len) = scan_quoted(rest, style) {
                let body = &rest[1..1 + body_len];
                // opening quote + body + closing quote
                self.consume_bytes(body_len + 2);
                return Some((QueryTokenKind::String, Cow::Borrowed(body), Some(style)));
            }
        }

        let bare_len = rest
            .find(|ch: char| !is_bare_string_char(ch))
            .unwrap_or(rest.len());
        if bare_len == 0 {
            return None;
        }
        self.consume_bytes(bare_len);
        Some((QueryTokenKind::String, Cow::Borrowed(&rest[..bare_len]), None))
    }

    // =========================================================================
    // Failure
    // =========================================================================

    /// Builds the error for input where no token pattern matched.
    ///
    /// Marks this source as finished so iteration stops after the error.
    fn no_match_error(&mut self, start: SourcePosition) -> QueryParseError {
        self.finished = true;
        let rest = self.remaining();
        match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => QueryParseError::with_notes(
                "runaway string",
                start,
                QueryParseErrorKind::UnterminatedString,
                smallvec![
                    QueryErrorNote::general_at("string started here", self.curr_position()),
                    QueryErrorNote::help(format!("add a closing `{quote}`")),
                ],
            )
            .spanning_to(SourcePosition::new(
                self.curr_index + rest.chars().count(),
                self.source.len(),
            )),
            _ => QueryParseError::new(
                "no matching symbol",
                start,
                QueryParseErrorKind::UnrecognizedInput,
            ),
        }
    }
}

// =============================================================================
// Iterator implementation
// =============================================================================

impl<'src> Iterator for StrQueryTokenSource<'src> {
    type Item = Result<QueryToken<'src>, QueryParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if matches!(&token, Ok(t) if t.is_null()) || token.is_err() {
            self.finished = true;
        }
        Some(token)
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Returns `true` if `ch` may appear in an unquoted string.
pub(crate) fn is_bare_string_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, '(' | ')' | '=' | '<' | '>' | ',' | '"' | '\'')
}

/// Returns `true` if `rest` starts with `keyword` (ASCII case-insensitive)
/// and the keyword is not merely the prefix of a longer bare string.
fn starts_with_keyword(rest: &str, keyword: &str) -> bool {
    let Some(candidate) = rest.get(..keyword.len()) else {
        return false;
    };
    candidate.eq_ignore_ascii_case(keyword) && at_word_boundary(&rest[keyword.len()..])
}

fn at_word_boundary(after: &str) -> bool {
    after.chars().next().is_none_or(|ch| !is_bare_string_char(ch))
}

/// Matches `ORDER<whitespace>BY` and returns the matched byte length.
fn match_order_by(rest: &str) -> Option<usize> {
    if !rest.get(..5)?.eq_ignore_ascii_case("ORDER") {
        return None;
    }
    let after_order = &rest[5..];
    let ws_len = after_order
        .find(|ch: char| !ch.is_whitespace())
        .unwrap_or(after_order.len());
    if ws_len == 0 {
        return None;
    }
    let len = 5 + ws_len;
    if starts_with_keyword(&rest[len..], "BY") {
        Some(len + 2)
    } else {
        None
    }
}

/// Scans a quoted string at the start of `rest` and returns the byte length
/// of its body (excluding both quotes), or `None` if `rest` does not start
/// with the style's quote or the string is unterminated.
///
/// A backslash escapes whatever character follows it, including the quote.
fn scan_quoted(rest: &str, style: QuoteStyle) -> Option<usize> {
    let quote = style.quote_char() as u8;
    let bytes = rest.as_bytes();
    if bytes.first() != Some(&quote) {
        return None;
    }

    let mut i = 1;
    loop {
        let found = memchr::memchr2(quote, b'\\', &bytes[i..])?;
        let at = i + found;
        if bytes[at] == quote {
            return Some(at - 1);
        }
        // Skip the backslash and the (possibly multi-byte) escaped character.
        let escaped_len = rest[at + 1..].chars().next()?.len_utf8();
        i = at + 1 + escaped_len;
    }
}
