/// Location of a character within a find expression.
///
/// This is a pure data struct with no mutation methods. The lexer computes
/// position values as it scans input.
///
/// # Indexing Convention
///
/// - `index`: 1-based character index (the first character of the input is
///   at index 1). This is the position reported to clients.
/// - `byte_offset`: 0-based byte offset into the input, for slicing.
///
/// For ASCII input `index == byte_offset + 1`. Multi-byte characters advance
/// `index` by 1 and `byte_offset` by their UTF-8 length.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SourcePosition {
    /// 1-based character index within the input
    index: usize,

    /// byte offset from start of input (0-based)
    byte_offset: usize,
}

impl SourcePosition {
    /// The position of the first character of any input.
    pub const START: SourcePosition = SourcePosition {
        index: 1,
        byte_offset: 0,
    };

    /// Create a new SourcePosition.
    ///
    /// # Arguments
    /// - `index`: 1-based character index
    /// - `byte_offset`: 0-based byte offset from the start of the input
    pub fn new(index: usize, byte_offset: usize) -> Self {
        debug_assert!(index >= 1, "character indices are 1-based");
        Self { index, byte_offset }
    }

    /// Returns the 1-based character index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the 0-based byte offset.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Returns the 0-based character column, convenient for drawing carets
    /// under a single-line source snippet.
    pub fn column(&self) -> usize {
        self.index - 1
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::START
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index)
    }
}
