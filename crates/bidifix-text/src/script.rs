//! Script-class membership tests.
//!
//! Hebrew covers the base block (U+0590..=U+05FF) plus the Hebrew subset of
//! Alphabetic Presentation Forms (U+FB1D..=U+FB4F), which ligature-aware
//! pages occasionally emit. Latin is ASCII letters only; the chat pages this
//! targets write English with plain ASCII, and a wider Latin class would not
//! change any classification the annotator makes.
//!
//! Digits, punctuation, whitespace and every other script are neutral: they
//! belong to neither class and never influence a direction decision.

/// Returns `true` for strong right-to-left characters (Hebrew).
pub fn is_rtl_char(ch: char) -> bool {
    matches!(ch, '\u{0590}'..='\u{05FF}' | '\u{FB1D}'..='\u{FB4F}')
}

/// Returns `true` for strong left-to-right characters (ASCII Latin letters).
pub fn is_ltr_char(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Does `text` contain at least one Hebrew character?
pub fn has_rtl(text: &str) -> bool {
    text.chars().any(is_rtl_char)
}

/// Does `text` contain at least one Latin letter?
pub fn has_ltr(text: &str) -> bool {
    text.chars().any(is_ltr_char)
}

/// Which strong script classes occur in a text sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptPresence {
    /// A Hebrew character occurs somewhere in the sample.
    pub rtl: bool,
    /// A Latin letter occurs somewhere in the sample.
    pub ltr: bool,
}

impl ScriptPresence {
    /// Scan the whole sample, stopping early once both classes are seen.
    pub fn scan(text: &str) -> Self {
        let mut presence = Self::default();
        for ch in text.chars() {
            if is_rtl_char(ch) {
                presence.rtl = true;
            } else if is_ltr_char(ch) {
                presence.ltr = true;
            }
            if presence.rtl && presence.ltr {
                break;
            }
        }
        presence
    }

    /// Both scripts occur in the sample.
    pub fn is_mixed(self) -> bool {
        self.rtl && self.ltr
    }

    /// At least one strong character occurs.
    pub fn has_strong(self) -> bool {
        self.rtl || self.ltr
    }
}
