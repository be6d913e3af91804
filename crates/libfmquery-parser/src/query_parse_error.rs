use crate::QueryErrorCategory;
use crate::QueryErrorNote;
use crate::QueryErrorNoteKind;
use crate::QueryErrorNotes;
use crate::QueryParseErrorKind;
use crate::SourcePosition;

/// A find-expression error with location information and contextual notes.
///
/// Lexical and syntactic failures share this one type; use
/// [`category()`](Self::category) to tell them apart. Parsing is fail-fast,
/// so a parse produces at most one of these.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct QueryParseError {
    /// Human-readable primary error message.
    ///
    /// Examples: "runaway string", "Syntax error: expected `)`, no more symbols"
    message: String,

    /// Where the error was detected. For token errors this is the offending
    /// token's position; at end of input it is the position just past the
    /// last character.
    position: SourcePosition,

    /// Position just past the offending text. Equal to `position` when the
    /// error is not tied to a token.
    end: SourcePosition,

    /// Categorized error kind for programmatic handling.
    kind: QueryParseErrorKind,

    /// Additional notes providing context and suggestions.
    notes: QueryErrorNotes,
}

impl QueryParseError {
    /// Creates a new error with no notes.
    pub fn new(
        message: impl Into<String>,
        position: SourcePosition,
        kind: QueryParseErrorKind,
    ) -> Self {
        Self {
            message: message.into(),
            position,
            end: position,
            kind,
            notes: QueryErrorNotes::new(),
        }
    }

    /// Creates a new error with notes.
    pub fn with_notes(
        message: impl Into<String>,
        position: SourcePosition,
        kind: QueryParseErrorKind,
        notes: QueryErrorNotes,
    ) -> Self {
        Self {
            message: message.into(),
            position,
            end: position,
            kind,
            notes,
        }
    }

    /// Extends the highlighted region of this error up to `end`.
    pub fn spanning_to(mut self, end: SourcePosition) -> Self {
        if end > self.position {
            self.end = end;
        }
        self
    }

    /// Returns the human-readable error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the position where the error was detected.
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// Returns the position just past the offending text.
    pub fn end(&self) -> SourcePosition {
        self.end
    }

    /// Returns the categorized error kind.
    pub fn kind(&self) -> &QueryParseErrorKind {
        &self.kind
    }

    /// Returns whether this is a lexical or a syntactic error.
    pub fn category(&self) -> QueryErrorCategory {
        self.kind.category()
    }

    /// Returns the additional notes for this error.
    pub fn notes(&self) -> &QueryErrorNotes {
        &self.notes
    }

    /// Adds a general note without a position.
    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(QueryErrorNote::general(message));
    }

    /// Adds a general note pointing at a related position.
    pub fn add_note_at(&mut self, message: impl Into<String>, position: SourcePosition) {
        self.notes.push(QueryErrorNote::general_at(message, position));
    }

    /// Adds a help note.
    pub fn add_help(&mut self, message: impl Into<String>) {
        self.notes.push(QueryErrorNote::help(message));
    }

    /// Formats this error as a diagnostic string for CLI output.
    ///
    /// Produces output like:
    /// ```text
    /// error: Syntax error: expected `)`, no more symbols
    ///   --> <query>:1:26
    ///    |
    ///  1 | WHERE (A=1 AND B=2 OR C=3
    ///    |                          ^
    ///    = note: unmatched `(` opened here
    ///       1 | WHERE (A=1 AND B=2 OR C=3
    ///         |       -
    /// ```
    ///
    /// # Arguments
    /// - `source`: Optional source text for snippet extraction. If `None`,
    ///   snippets are omitted but the position is still shown.
    pub fn format_detailed(&self, source: Option<&str>) -> String {
        let mut output = String::new();

        output.push_str("error: ");
        output.push_str(&self.message);
        output.push('\n');

        match source.map(|src| line_and_column(src, self.caret_offset(src))) {
            Some((line, column)) => {
                output.push_str(&format!("  --> <query>:{}:{}\n", line + 1, column + 1));
            },
            None => {
                output.push_str(&format!("  --> <query>:{}\n", self.position));
            },
        }

        if let Some(src) = source
            && let Some(snippet) = self.format_source_snippet(src)
        {
            output.push_str(&snippet);
        }

        for note in &self.notes {
            let prefix = match note.kind {
                QueryErrorNoteKind::General => "note",
                QueryErrorNoteKind::Help => "help",
            };
            output.push_str(&format!("   = {prefix}: {}\n", note.message));

            if let (Some(note_position), Some(src)) = (note.position, source) {
                output.push_str(&format_note_snippet(src, note_position));
            }
        }

        output
    }

    /// Formats this error as a single-line summary.
    ///
    /// ```text
    /// position 8: error: runaway string
    /// ```
    pub fn format_oneline(&self) -> String {
        format!("position {}: error: {}", self.position, self.message)
    }

    /// Returns the byte offset of the first non-whitespace character in this
    /// error's span, or the span start when the span is only whitespace.
    ///
    /// Tokens own the whitespace around them, so the span may begin on an
    /// earlier line than the offending text.
    fn caret_offset(&self, source: &str) -> usize {
        let start = self.position.byte_offset().min(source.len());
        let end = self.end.byte_offset().clamp(start, source.len());
        source
            .get(start..end)
            .and_then(|span| span.find(|c: char| !c.is_whitespace()))
            .map_or(start, |leading| start + leading)
    }

    /// Formats the source snippet for the primary error position.
    fn format_source_snippet(&self, source: &str) -> Option<String> {
        let caret = self.caret_offset(source);
        let (line_num, col_start) = line_and_column(source, caret);
        let line_content = source.lines().nth(line_num).unwrap_or("");
        let display_line_num = line_num + 1;
        let line_num_width = display_line_num.to_string().len().max(2);

        let end = self.end.byte_offset().clamp(caret, source.len());
        let highlighted = source.get(caret..end).unwrap_or("").trim_end();
        let underline_len = highlighted.chars().count().max(1);

        let mut output = String::new();
        output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
        output.push_str(&format!(
            "{display_line_num:>line_num_width$} | {line_content}\n"
        ));
        output.push_str(&format!(
            "{:>width$} | {:>padding$}{}\n",
            "",
            "",
            "^".repeat(underline_len),
            width = line_num_width,
            padding = col_start,
        ));

        Some(output)
    }
}

/// Formats a source snippet for a note's position.
fn format_note_snippet(source: &str, position: SourcePosition) -> String {
    let (line_num, col_start) = line_and_column(source, position.byte_offset());
    let line_content = source.lines().nth(line_num).unwrap_or("");
    let display_line_num = line_num + 1;
    let line_num_width = display_line_num.to_string().len().max(2);

    let mut output = String::new();
    output.push_str(&format!(
        "     {display_line_num:>line_num_width$} | {line_content}\n"
    ));
    output.push_str(&format!(
        "     {:>width$} | {:>padding$}-\n",
        "",
        "",
        width = line_num_width,
        padding = col_start,
    ));
    output
}

/// Returns the 0-based (line, character column) of `byte_offset` in
/// `source`.
///
/// Find expressions are usually a single line, but whitespace between
/// tokens may include line breaks.
fn line_and_column(source: &str, byte_offset: usize) -> (usize, usize) {
    let offset = byte_offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count();
    (line, column)
}
