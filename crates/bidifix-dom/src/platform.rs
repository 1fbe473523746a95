//! Selector profiles for the supported chat platforms.
//!
//! Container discovery, field discovery and the standalone sweep are all
//! selector-driven. The builtin lists are a union over the platforms so a
//! single profile works everywhere; a config override can replace any of
//! the three lists. Unparseable selectors are logged and skipped, never
//! fatal: one bad entry must not take down the rest of the profile.

use scraper::Selector;
use tracing::warn;
use url::Url;

/// Chat-message containers. The `data-is-streaming` pair matches Claude
/// messages both mid-stream and settled; the rest covers the generic
/// patterns plus ChatGPT and Gemini transcripts.
pub const MESSAGE_SELECTORS: [&str; 9] = [
    "[data-testid*=\"message\"]",
    ".message-content",
    ".chat-message",
    "div[role=\"article\"]",
    "div[data-is-streaming=\"false\"]",
    "div[data-is-streaming=\"true\"]",
    "[data-message-author-role]",
    ".markdown.prose",
    ".model-response-text",
];

/// Editable composers and plain text inputs.
pub const FIELD_SELECTORS: [&str; 5] = [
    "textarea",
    "input[type=\"text\"]",
    "input[type=\"search\"]",
    "[contenteditable=\"true\"]",
    "[role=\"textbox\"]",
];

/// Tags examined by the standalone sweep for mixed-direction text that
/// lives outside any recognized container.
pub const SWEEP_SELECTORS: [&str; 6] = ["p", "div", "span", "td", "th", "li"];

/// CSS selector lists driving discovery and the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorProfile {
    pub messages: Vec<String>,
    pub fields: Vec<String>,
    pub sweep: Vec<String>,
}

impl Default for SelectorProfile {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SelectorProfile {
    /// The union profile covering every supported platform.
    pub fn builtin() -> Self {
        Self {
            messages: to_strings(&MESSAGE_SELECTORS),
            fields: to_strings(&FIELD_SELECTORS),
            sweep: to_strings(&SWEEP_SELECTORS),
        }
    }

    /// Replace lists with configured ones; an empty override keeps the
    /// builtin list.
    pub fn apply_overrides(&mut self, messages: &[String], fields: &[String], sweep: &[String]) {
        if !messages.is_empty() {
            self.messages = messages.to_vec();
        }
        if !fields.is_empty() {
            self.fields = fields.to_vec();
        }
        if !sweep.is_empty() {
            self.sweep = sweep.to_vec();
        }
    }

    /// Parse every list. Invalid entries are dropped with a warning.
    pub fn compile(&self) -> CompiledSelectors {
        CompiledSelectors {
            messages: compile_list(&self.messages),
            fields: compile_list(&self.fields),
            sweep: compile_list(&self.sweep),
        }
    }
}

/// Parsed selector sets ready for document queries.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub messages: Vec<Selector>,
    pub fields: Vec<Selector>,
    pub sweep: Vec<Selector>,
}

fn to_strings(sources: &[&str]) -> Vec<String> {
    sources.iter().map(|source| source.to_string()).collect()
}

fn compile_list(sources: &[String]) -> Vec<Selector> {
    sources
        .iter()
        .filter_map(|source| match Selector::parse(source) {
            Ok(selector) => Some(selector),
            Err(error) => {
                warn!(selector = %source, ?error, "skipping unparseable selector");
                None
            }
        })
        .collect()
}

/// Human label for a chat host, used in logs only. No annotation behavior
/// branches on the platform.
pub fn platform_label(host: &str) -> Option<&'static str> {
    let host = host.strip_prefix("www.").unwrap_or(host);
    match host {
        "claude.ai" => Some("Claude"),
        "chat.openai.com" | "chatgpt.com" => Some("ChatGPT"),
        "gemini.google.com" => Some("Gemini"),
        "copilot.microsoft.com" => Some("Copilot"),
        "poe.com" => Some("Poe"),
        _ => None,
    }
}

/// Platform label for a full page URL, if the host is a known chat site.
pub fn platform_for_url(url: &str) -> Option<&'static str> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().and_then(platform_label)
}

/// Path component used for client-side navigation comparisons.
pub fn page_path(url: &str) -> Option<String> {
    Url::parse(url).ok().map(|parsed| parsed.path().to_string())
}
