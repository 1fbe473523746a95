//! Cross-check the first-strong heuristic against the UAX-9 reference.
//!
//! `primary_direction` only knows Hebrew and ASCII Latin, so the samples
//! here stay inside that vocabulary (plus neutrals). Within it, the
//! heuristic must agree with the paragraph level the full bidi algorithm
//! assigns under auto detection.

use bidifix_text::{Direction, primary_direction};
use unicode_bidi::BidiInfo;

fn uax9_paragraph_direction(text: &str) -> Direction {
    let info = BidiInfo::new(text, None);
    match info.paragraphs.first() {
        Some(paragraph) if paragraph.level.is_rtl() => Direction::Rtl,
        _ => Direction::Ltr,
    }
}

#[test]
fn agrees_with_uax9_on_chat_samples() {
    let samples = [
        "שלום עולם",
        "hello world",
        "שלום, how are you?",
        "The word שלום means peace",
        "123: שלום",
        "42 is the answer",
        "?! מה קורה",
        "code() ואז הסבר בעברית",
        "א",
        "a",
    ];
    for sample in samples {
        assert_eq!(
            primary_direction(sample),
            uax9_paragraph_direction(sample),
            "classification diverged for {sample:?}"
        );
    }
}

#[test]
fn agrees_with_uax9_on_neutral_only_text() {
    for sample in ["", "   ", "1234", "...!?"] {
        assert_eq!(
            primary_direction(sample),
            uax9_paragraph_direction(sample),
            "classification diverged for {sample:?}"
        );
    }
}
