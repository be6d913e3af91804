use crate::SourcePosition;
use crate::token::QueryTokenKind;
use std::borrow::Cow;

/// The quoting used by a `String` token in the source text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// `"..."`
    Double,
    /// `'...'`
    Single,
}

impl QuoteStyle {
    /// The quote character that opens and closes this style.
    pub fn quote_char(&self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }
}

/// A find-expression token with its literal text and source position.
///
/// Tokens are immutable once produced by the lexer.
///
/// - `value` has surrounding whitespace removed and, for quoted strings, the
///   surrounding quotes removed. Backslash escapes inside quoted strings are
///   kept verbatim; see [`unescaped_value()`](Self::unescaped_value).
/// - `position` is where the consumed span starts, which includes any
///   leading whitespace that was consumed together with the token.
/// - `end` is the position immediately after the consumed span (trailing
///   whitespace included), i.e. where the next token starts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryToken<'src> {
    pub kind: QueryTokenKind,
    pub value: Cow<'src, str>,
    pub position: SourcePosition,
    pub end: SourcePosition,
    /// `Some` only for quoted `String` tokens.
    pub quote_style: Option<QuoteStyle>,
}

impl<'src> QueryToken<'src> {
    /// Convenience constructor for an unquoted token.
    pub fn new(
        kind: QueryTokenKind,
        value: impl Into<Cow<'src, str>>,
        position: SourcePosition,
        end: SourcePosition,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
            end,
            quote_style: None,
        }
    }

    /// Returns `true` if this is the end-of-input token.
    pub fn is_null(&self) -> bool {
        self.kind == QueryTokenKind::Null
    }

    /// Returns the token value with backslash escapes resolved.
    ///
    /// Each `\x` pair becomes `x`; a trailing lone backslash is kept. Bare
    /// (unquoted) strings have no escape syntax and are returned as-is.
    /// Borrows when there is nothing to unescape.
    pub fn unescaped_value(&self) -> Cow<'src, str> {
        if self.quote_style.is_none() {
            return self.value.clone();
        }
        unescape(&self.value)
    }

    /// Converts into an owned `'static` token.
    pub fn into_owned(self) -> QueryToken<'static> {
        QueryToken {
            kind: self.kind,
            value: Cow::Owned(self.value.into_owned()),
            position: self.position,
            end: self.end,
            quote_style: self.quote_style,
        }
    }
}

/// Resolves backslash escapes in the body of a quoted string.
pub(crate) fn unescape<'a>(raw: &Cow<'a, str>) -> Cow<'a, str> {
    if memchr::memchr(b'\\', raw.as_bytes()).is_none() {
        return raw.clone();
    }

    let mut cooked = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(escaped) => cooked.push(escaped),
                None => cooked.push('\\'),
            }
        } else {
            cooked.push(ch);
        }
    }
    Cow::Owned(cooked)
}
