//! First-strong-character direction inference.

use crate::script::{is_ltr_char, is_rtl_char};

/// Resolved reading direction for a text sample.
///
/// There is no neutral variant: samples without any strong character
/// resolve to `Ltr`, matching how chat pages render untagged content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Ltr
    }
}

impl Direction {
    /// The value written to the CSS `direction` property.
    pub fn css_value(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Direction::Rtl)
    }
}

/// Infer the primary direction of `text` from its first strong character.
///
/// The sample is trimmed and scanned once left to right, recording the
/// position of the first Hebrew and the first Latin character; the scan
/// stops as soon as both are known. Whichever class appears first wins.
/// A sample with a single strong class resolves to that class, and a
/// sample with none resolves to `Ltr`. Neutral characters are skipped
/// over and never decide the outcome.
pub fn primary_direction(text: &str) -> Direction {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Direction::Ltr;
    }

    let mut first_rtl: Option<usize> = None;
    let mut first_ltr: Option<usize> = None;
    for (index, ch) in trimmed.char_indices() {
        if first_rtl.is_none() && is_rtl_char(ch) {
            first_rtl = Some(index);
        }
        if first_ltr.is_none() && is_ltr_char(ch) {
            first_ltr = Some(index);
        }
        if first_rtl.is_some() && first_ltr.is_some() {
            break;
        }
    }

    match (first_rtl, first_ltr) {
        (Some(rtl), Some(ltr)) => {
            if rtl < ltr {
                Direction::Rtl
            } else {
                Direction::Ltr
            }
        }
        (Some(_), None) => Direction::Rtl,
        (None, _) => Direction::Ltr,
    }
}
