use crate::SmallVec;
use crate::SourcePosition;

/// The kind of an error note (determines how the note is rendered).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorNoteKind {
    /// General context or explanation about the error.
    ///
    /// Rendered as `= note: ...` in CLI output.
    /// Example: "unmatched `(` opened here" (positioned at the opener)
    General,

    /// Actionable suggestion for fixing the error.
    ///
    /// Rendered as `= help: ...` in CLI output.
    Help,
}

/// An error note providing additional context about an error.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryErrorNote {
    pub kind: QueryErrorNoteKind,
    pub message: String,

    /// Optional position of a related location in the input.
    pub position: Option<SourcePosition>,
}

impl QueryErrorNote {
    /// Creates a general note without a position.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorNoteKind::General,
            message: message.into(),
            position: None,
        }
    }

    /// Creates a general note pointing at a related position.
    pub fn general_at(message: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            kind: QueryErrorNoteKind::General,
            message: message.into(),
            position: Some(position),
        }
    }

    /// Creates a help note without a position.
    pub fn help(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorNoteKind::Help,
            message: message.into(),
            position: None,
        }
    }
}

/// Type alias for error notes.
///
/// Uses SmallVec since most errors have 0-2 notes.
pub type QueryErrorNotes = SmallVec<[QueryErrorNote; 2]>;
