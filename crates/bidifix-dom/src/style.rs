//! Inline-style editing for direction annotations.
//!
//! The annotator only ever touches three CSS properties: `direction`,
//! `text-align` and `unicode-bidi`. Everything else in a `style` attribute
//! is preserved verbatim across merges, and reverting an element removes
//! exactly those three properties.

use bidifix_text::{Direction, ScriptPresence};

use crate::role::ElementRole;

/// The properties owned by the annotator, in the order they are written.
pub const DIRECTION_PROPERTIES: [&str; 3] = ["direction", "text-align", "unicode-bidi"];

/// Isolation mode written to `unicode-bidi`.
///
/// Mixed samples get `plaintext` so nested runs resolve per paragraph;
/// single-script samples get `embed`, which is enough to isolate them from
/// the surrounding page without re-resolving inner runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Isolation {
    Embed,
    Plaintext,
}

impl Isolation {
    pub fn css_value(self) -> &'static str {
        match self {
            Isolation::Embed => "embed",
            Isolation::Plaintext => "plaintext",
        }
    }
}

/// The direction declarations applied to one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionStyle {
    pub direction: Direction,
    pub text_align: &'static str,
    pub isolation: Isolation,
}

impl DirectionStyle {
    /// Decide the styling for a classified sample, or `None` when the
    /// element should be left untouched.
    ///
    /// RTL samples are always styled. LTR samples are styled when the text
    /// is mixed (so the Hebrew runs inside stay readable), when the element
    /// is an input field (typing must be able to flip a field back), or
    /// when `style_plain_ltr` asks for explicit LTR everywhere. A pure-LTR
    /// static sample otherwise stays untouched and unmarked, keeping the
    /// page's own layout in charge.
    pub fn for_sample(
        direction: Direction,
        presence: ScriptPresence,
        role: ElementRole,
        style_plain_ltr: bool,
    ) -> Option<Self> {
        let mixed = presence.is_mixed();
        let isolation = if mixed {
            Isolation::Plaintext
        } else {
            Isolation::Embed
        };
        let text_align = match (role, direction) {
            (ElementRole::InputField, _) => "start",
            (ElementRole::StaticText, Direction::Rtl) => "right",
            (ElementRole::StaticText, Direction::Ltr) => "left",
        };
        match direction {
            Direction::Rtl => Some(Self {
                direction,
                text_align,
                isolation,
            }),
            Direction::Ltr if mixed || role == ElementRole::InputField || style_plain_ltr => {
                Some(Self {
                    direction,
                    text_align,
                    isolation,
                })
            }
            Direction::Ltr => None,
        }
    }
}

/// Merge direction declarations into an existing `style` attribute value.
///
/// Foreign declarations keep their relative order; any previous values for
/// the three direction properties are dropped and the new ones appended.
pub fn merge_declarations(existing: Option<&str>, style: &DirectionStyle) -> String {
    let mut declarations: Vec<(String, String)> = existing
        .map(parse_declarations)
        .unwrap_or_default()
        .into_iter()
        .filter(|(name, _)| !DIRECTION_PROPERTIES.contains(&name.as_str()))
        .collect();
    declarations.push(("direction".to_string(), style.direction.css_value().to_string()));
    declarations.push(("text-align".to_string(), style.text_align.to_string()));
    declarations.push(("unicode-bidi".to_string(), style.isolation.css_value().to_string()));
    render_declarations(&declarations)
}

/// Remove the direction declarations from a `style` attribute value.
///
/// Returns the remaining declarations, or `None` when nothing is left and
/// the attribute should be dropped entirely.
pub fn strip_declarations(existing: &str) -> Option<String> {
    let kept: Vec<(String, String)> = parse_declarations(existing)
        .into_iter()
        .filter(|(name, _)| !DIRECTION_PROPERTIES.contains(&name.as_str()))
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(render_declarations(&kept))
    }
}

/// Look up a single property in a `style` attribute value.
pub fn declaration_value(source: &str, property: &str) -> Option<String> {
    parse_declarations(source)
        .into_iter()
        .find(|(name, _)| name == property)
        .map(|(_, value)| value)
}

fn parse_declarations(source: &str) -> Vec<(String, String)> {
    source
        .split(';')
        .filter_map(|declaration| {
            let (name, value) = declaration.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name, value.to_string()))
        })
        .collect()
}

fn render_declarations(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}
