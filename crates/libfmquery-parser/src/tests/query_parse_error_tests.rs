//! Tests for `QueryParseError` construction and formatting.

use crate::QueryErrorCategory;
use crate::QueryErrorNote;
use crate::QueryErrorNoteKind;
use crate::QueryParseError;
use crate::QueryParseErrorKind;
use crate::SourcePosition;
use crate::smallvec;
use crate::tests::utils::parse_err;

fn eof_kind() -> QueryParseErrorKind {
    QueryParseErrorKind::UnexpectedEof {
        expected: vec![")".to_string()],
    }
}

// =============================================================================
// Construction
// =============================================================================

/// Verifies that `new()` creates an error with no notes and an empty span.
#[test]
fn new_creates_empty_notes() {
    let position = SourcePosition::new(5, 4);
    let error = QueryParseError::new("Syntax error: x", position, eof_kind());
    assert_eq!(error.message(), "Syntax error: x");
    assert_eq!(error.position(), position);
    assert_eq!(error.end(), position);
    assert!(error.notes().is_empty());
}

/// Verifies that `with_notes()` keeps the given notes in order.
#[test]
fn with_notes_keeps_order() {
    let error = QueryParseError::with_notes(
        "runaway string",
        SourcePosition::START,
        QueryParseErrorKind::UnterminatedString,
        smallvec![
            QueryErrorNote::general("first"),
            QueryErrorNote::help("second"),
        ],
    );
    let messages: Vec<_> = error.notes().iter().map(|n| n.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second"]);
    assert_eq!(error.notes()[1].kind, QueryErrorNoteKind::Help);
}

/// Verifies that `spanning_to()` never moves the end before the start.
#[test]
fn spanning_to_ignores_earlier_end() {
    let error = QueryParseError::new("x", SourcePosition::new(5, 4), eof_kind())
        .spanning_to(SourcePosition::new(3, 2));
    assert_eq!(error.end(), SourcePosition::new(5, 4));

    let error = QueryParseError::new("x", SourcePosition::new(5, 4), eof_kind())
        .spanning_to(SourcePosition::new(9, 8));
    assert_eq!(error.end(), SourcePosition::new(9, 8));
}

/// Verifies the note helpers.
#[test]
fn add_note_helpers() {
    let mut error = QueryParseError::new("x", SourcePosition::START, eof_kind());
    error.add_note("plain");
    error.add_note_at("located", SourcePosition::new(3, 2));
    error.add_help("do this");

    let notes = error.notes();
    assert_eq!(notes.len(), 3);
    assert_eq!(notes[0].position, None);
    assert_eq!(notes[1].position, Some(SourcePosition::new(3, 2)));
    assert_eq!(notes[2].kind, QueryErrorNoteKind::Help);
}

/// Verifies the lexical/syntactic split across error kinds.
#[test]
fn kind_categories() {
    assert_eq!(
        QueryParseErrorKind::UnterminatedString.category(),
        QueryErrorCategory::Lexical,
    );
    assert_eq!(
        QueryParseErrorKind::UnrecognizedInput.category(),
        QueryErrorCategory::Lexical,
    );
    for kind in [
        eof_kind(),
        QueryParseErrorKind::UnexpectedToken {
            expected: vec!["string".to_string()],
            found: "`,`".to_string(),
        },
        QueryParseErrorKind::TrailingInput {
            found: "`)`".to_string(),
        },
        QueryParseErrorKind::NestingTooDeep { max: 4 },
        QueryParseErrorKind::InvalidValue {
            value: "ten".to_string(),
            reason: "expected a non-negative integer".to_string(),
        },
    ] {
        assert_eq!(kind.category(), QueryErrorCategory::Syntactic, "{kind:?}");
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Verifies the one-line format, which is also the `Display` output.
#[test]
fn format_oneline() {
    let error = parse_err("WHERE (A=1 AND B=2 OR C=3");
    let expected = "position 26: error: Syntax error: expected `)`, no more symbols";
    assert_eq!(error.format_oneline(), expected);
    assert_eq!(error.to_string(), expected);
}

/// Verifies the detailed format with a source snippet and a located note.
#[test]
fn format_detailed_with_source() {
    let source = "WHERE (A=1 AND B=2 OR C=3";
    let error = parse_err(source);
    let expected = [
        "error: Syntax error: expected `)`, no more symbols\n",
        "  --> <query>:1:26\n",
        "   |\n",
        " 1 | WHERE (A=1 AND B=2 OR C=3\n",
        "   |                          ^\n",
        "   = note: unmatched `(` opened here\n",
        "      1 | WHERE (A=1 AND B=2 OR C=3\n",
        "        |       -\n",
    ]
    .concat();
    assert_eq!(error.format_detailed(Some(source)), expected);
}

/// Verifies that without a source the position is still shown.
#[test]
fn format_detailed_without_source() {
    let error = parse_err("WHERE (A=1 AND B=2 OR C=3");
    assert_eq!(
        error.format_detailed(None),
        [
            "error: Syntax error: expected `)`, no more symbols\n",
            "  --> <query>:26\n",
            "   = note: unmatched `(` opened here\n",
        ]
        .concat(),
    );
}

/// Verifies that the underline covers the offending token and skips the
/// whitespace consumed with it.
#[test]
fn format_detailed_underlines_token() {
    let source = "  ) x";
    let error = parse_err(source);
    let detailed = error.format_detailed(Some(source));
    assert!(detailed.contains(" 1 |   ) x\n"), "{detailed}");
    assert!(detailed.contains("   |   ^\n"), "{detailed}");

    let source = "WHERE First Name=x";
    let error = parse_err(source);
    let detailed = error.format_detailed(Some(source));
    assert!(detailed.contains("   |             ^^^^\n"), "{detailed}");
    assert!(detailed.contains("   = help: "), "{detailed}");
}

/// Verifies line and column for an error past a line break.
#[test]
fn format_detailed_multiline_source() {
    let source = "SELECT a\nWHERE";
    let error = parse_err(source);
    let detailed = error.format_detailed(Some(source));
    assert!(detailed.contains("  --> <query>:2:6\n"), "{detailed}");
    assert!(detailed.contains(" 2 | WHERE\n"), "{detailed}");
}

/// Verifies that the caret lands on the offending text when the whitespace
/// in front of it spans a line break.
#[test]
fn format_detailed_leading_line_break() {
    let source = "\n  ) x";
    let error = parse_err(source);
    assert_eq!(error.position().index(), 1);
    let detailed = error.format_detailed(Some(source));
    assert!(detailed.contains("  --> <query>:2:3\n"), "{detailed}");
    assert!(detailed.contains(" 2 |   ) x\n   |   ^\n"), "{detailed}");
}
