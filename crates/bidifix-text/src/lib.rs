//! bidifix-text: direction classification for Hebrew/English text.
//!
//! Building blocks for the DOM annotator:
//! - script-class membership for strong RTL (Hebrew) and strong LTR (Latin)
//! - whole-string presence scanning via [`ScriptPresence`]
//! - first-strong-character classification via [`primary_direction`]

pub mod direction;
pub mod script;

pub use direction::{Direction, primary_direction};
pub use script::{ScriptPresence, has_ltr, has_rtl, is_ltr_char, is_rtl_char};
