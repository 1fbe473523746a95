//! Element classification for the annotator.

use scraper::ElementRef;

/// How an element participates in direction styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// Rendered text content; aligned left or right by direction.
    StaticText,
    /// Editable field; alignment uses `start` so the caret follows the text.
    InputField,
}

/// Classify an element by tag and attributes.
///
/// `input` elements count as fields only for free-text types; buttons,
/// checkboxes and machine-format inputs keep their layout. Any element
/// carrying `contenteditable` (other than `contenteditable="false"`) or
/// `role="textbox"` is a field, which covers the rich-text composers the
/// chat platforms use.
pub fn role_of(element: &ElementRef<'_>) -> ElementRole {
    let tag = element.value().name().to_ascii_lowercase();
    match tag.as_str() {
        "textarea" => ElementRole::InputField,
        "input" => {
            let input_type = element
                .value()
                .attr("type")
                .map(|value| value.trim().to_ascii_lowercase())
                .unwrap_or_else(|| "text".to_string());
            match input_type.as_str() {
                "text" | "search" => ElementRole::InputField,
                _ => ElementRole::StaticText,
            }
        }
        _ => {
            let editable = element
                .value()
                .attr("contenteditable")
                .is_some_and(|value| !value.eq_ignore_ascii_case("false"));
            let textbox = element
                .value()
                .attr("role")
                .is_some_and(|value| value.eq_ignore_ascii_case("textbox"));
            if editable || textbox {
                ElementRole::InputField
            } else {
                ElementRole::StaticText
            }
        }
    }
}

/// Tags whose text is never rendered; the walk prunes these subtrees.
pub fn is_non_rendered(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("script")
        || tag.eq_ignore_ascii_case("style")
        || tag.eq_ignore_ascii_case("noscript")
}

/// Code containers keep their own layout and never get direction overrides.
pub fn is_code_block(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("code") || tag.eq_ignore_ascii_case("pre")
}
