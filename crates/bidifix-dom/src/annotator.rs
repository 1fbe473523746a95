//! Incremental direction annotator.
//!
//! One pass over a document does three things, in order:
//! - container discovery: message containers the profile selectors match
//!   for the first time get a full subtree walk
//! - standalone sweep: common text tags anywhere in the document are
//!   restyled when they hold mixed Hebrew/Latin content
//! - field discovery: input-role elements are styled from their current
//!   value; later edits arrive as events through [`Annotator::field_input`]
//!
//! Idempotence comes from annotator-owned marker sets keyed by node id,
//! not from anything written into the page: a marked element is skipped by
//! every later pass until [`Annotator::invalidate`] or a field event drops
//! its marker. Running a pass twice in a row therefore changes nothing.
//!
//! Subtree walks collect nodes in document order, pruning script/style/
//! noscript regions, code blocks, already-marked elements and (when field
//! handling is on) input-role subtrees. Text nodes are styled first, each
//! applying to its parent element, then elements on their aggregate text.

use std::collections::HashSet;

use bidifix_text::{ScriptPresence, primary_direction};
use ego_tree::NodeRef;
use scraper::{ElementRef, Node};
use tracing::{debug, trace};

use crate::page::{NodeId, Page};
use crate::platform::CompiledSelectors;
use crate::role::{ElementRole, is_code_block, is_non_rendered, role_of};
use crate::style::{DirectionStyle, merge_declarations, strip_declarations};

/// Behavior switches for the annotator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatorOptions {
    /// Handle input fields: style their current value during discovery and
    /// reclassify live on [`Annotator::field_input`]. When off, fields are
    /// treated like any other element.
    pub input_fields: bool,
    /// Style pure-LTR samples explicitly instead of leaving them alone.
    pub style_plain_ltr: bool,
}

impl Default for AnnotatorOptions {
    fn default() -> Self {
        Self {
            input_fields: true,
            style_plain_ltr: false,
        }
    }
}

/// Counters for one annotation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Message containers discovered for the first time.
    pub containers: usize,
    /// Nodes examined.
    pub visited: usize,
    /// Elements that received direction styling.
    pub styled: usize,
}

impl PassReport {
    fn absorb(&mut self, other: PassReport) {
        self.containers += other.containers;
        self.visited += other.visited;
        self.styled += other.styled;
    }
}

/// Walks pages and applies direction styling. Owns all annotation state;
/// the page itself carries nothing but the final `style` attributes.
pub struct Annotator {
    options: AnnotatorOptions,
    processed: HashSet<NodeId>,
    seen_containers: HashSet<NodeId>,
}

impl Annotator {
    pub fn new(options: AnnotatorOptions) -> Self {
        Self {
            options,
            processed: HashSet::new(),
            seen_containers: HashSet::new(),
        }
    }

    /// Whether an element currently carries a processed marker.
    pub fn is_processed(&self, node: NodeId) -> bool {
        self.processed.contains(&node)
    }

    /// Drop an element's processed marker so the next pass can restyle it.
    /// Returns `true` if a marker was present.
    pub fn invalidate(&mut self, node: NodeId) -> bool {
        self.processed.remove(&node)
    }

    /// Forget all markers. Used when a new document replaces the old one;
    /// node ids from the previous page must not leak into the next.
    pub fn reset(&mut self) {
        self.processed.clear();
        self.seen_containers.clear();
    }

    /// Run one full pass: container discovery, standalone sweep, field
    /// discovery. Safe to call any number of times.
    pub fn annotate_document(
        &mut self,
        page: &mut Page,
        selectors: &CompiledSelectors,
    ) -> PassReport {
        let mut report = PassReport::default();

        for selector in &selectors.messages {
            for id in page.select_ids(selector) {
                if self.seen_containers.insert(id) {
                    report.containers += 1;
                    report.absorb(self.annotate_subtree(page, id));
                }
            }
        }

        // The sweep is what keeps long-lived pages current: text streamed
        // into an already-walked container still matches these selectors.
        for selector in &selectors.sweep {
            for id in page.select_ids(selector) {
                report.visited += 1;
                if self.processed.contains(&id) {
                    continue;
                }
                let text = page.text_of(id);
                let presence = ScriptPresence::scan(&text);
                if presence.is_mixed() && self.style_element(page, id, &text, presence) {
                    report.styled += 1;
                }
            }
        }

        if self.options.input_fields {
            for selector in &selectors.fields {
                for id in page.select_ids(selector) {
                    report.visited += 1;
                    if self.processed.contains(&id) {
                        continue;
                    }
                    let value = field_value(page, id);
                    let presence = ScriptPresence::scan(&value);
                    if presence.has_strong() && self.apply_field_style(page, id, &value, presence)
                    {
                        report.styled += 1;
                    }
                }
            }
        }

        debug!(
            containers = report.containers,
            visited = report.visited,
            styled = report.styled,
            "annotation pass finished"
        );
        report
    }

    /// Walk one subtree in document order and style everything with strong
    /// directional content. Text nodes go first, each styling its parent
    /// element, then elements on their aggregate descendant text.
    pub fn annotate_subtree(&mut self, page: &mut Page, root: NodeId) -> PassReport {
        let mut pending = Vec::new();
        if let Some(node) = page.node(root) {
            self.collect(node, &mut pending);
        }

        let mut report = PassReport {
            visited: pending.len(),
            ..PassReport::default()
        };

        for &id in &pending {
            let Some(node) = page.node(id) else { continue };
            if !node.value().is_text() {
                continue;
            }
            // A text node styles its parent element. Orphan text without an
            // element parent has nowhere to put styling and is skipped.
            let Some(parent) = node.parent().filter(|parent| parent.value().is_element()) else {
                continue;
            };
            let parent_id = parent.id();
            let text = page.text_of(id);
            let presence = ScriptPresence::scan(&text);
            if presence.has_strong() && self.style_element(page, parent_id, &text, presence) {
                report.styled += 1;
            }
        }

        for &id in &pending {
            let Some(node) = page.node(id) else { continue };
            if !node.value().is_element() || self.processed.contains(&id) {
                continue;
            }
            let text = page.text_of(id);
            let presence = ScriptPresence::scan(&text);
            if presence.has_strong() && self.style_element(page, id, &text, presence) {
                report.styled += 1;
            }
        }

        report
    }

    /// Reclassify an input-role element from its current value.
    ///
    /// The marker is dropped first so every event restyles from scratch.
    /// A value without strong characters reverts the element completely:
    /// direction properties removed, marker gone. Events on code
    /// containers are ignored.
    pub fn field_input(&mut self, page: &mut Page, id: NodeId, value: &str) -> bool {
        if !self.options.input_fields {
            return false;
        }
        let Some(element) = page.element(id) else {
            return false;
        };
        if styling_excluded(&element) {
            return false;
        }
        self.processed.remove(&id);
        let presence = ScriptPresence::scan(value);
        if !presence.has_strong() {
            self.clear_styling(page, id);
            return false;
        }
        self.apply_field_style(page, id, value, presence)
    }

    fn collect(&self, node: NodeRef<'_, Node>, pending: &mut Vec<NodeId>) {
        match node.value() {
            Node::Text(_) => pending.push(node.id()),
            Node::Element(element) => {
                let tag = element.name().to_ascii_lowercase();
                if is_non_rendered(&tag) || is_code_block(&tag) {
                    return;
                }
                if self.processed.contains(&node.id()) {
                    return;
                }
                if self.options.input_fields {
                    if let Some(element) = ElementRef::wrap(node) {
                        if role_of(&element) == ElementRole::InputField {
                            return;
                        }
                    }
                }
                pending.push(node.id());
                for child in node.children() {
                    self.collect(child, pending);
                }
            }
            _ => {}
        }
    }

    fn style_element(
        &mut self,
        page: &mut Page,
        id: NodeId,
        text: &str,
        presence: ScriptPresence,
    ) -> bool {
        let Some(element) = page.element(id) else {
            return false;
        };
        let tag = element.value().name().to_ascii_lowercase();
        if styling_excluded(&element) || self.processed.contains(&id) {
            return false;
        }
        let role = role_of(&element);
        let direction = primary_direction(text);
        let Some(style) =
            DirectionStyle::for_sample(direction, presence, role, self.options.style_plain_ltr)
        else {
            return false;
        };

        let merged = merge_declarations(page.style_attr(id).as_deref(), &style);
        page.set_style_attr(id, &merged);
        self.processed.insert(id);
        trace!(direction = direction.css_value(), tag = %tag, "styled element");
        true
    }

    fn apply_field_style(
        &mut self,
        page: &mut Page,
        id: NodeId,
        value: &str,
        presence: ScriptPresence,
    ) -> bool {
        let Some(element) = page.element(id) else {
            return false;
        };
        if styling_excluded(&element) {
            return false;
        }
        let direction = primary_direction(value);
        let Some(style) = DirectionStyle::for_sample(
            direction,
            presence,
            ElementRole::InputField,
            self.options.style_plain_ltr,
        ) else {
            return false;
        };
        let merged = merge_declarations(page.style_attr(id).as_deref(), &style);
        page.set_style_attr(id, &merged);
        self.processed.insert(id);
        trace!(direction = direction.css_value(), "styled field");
        true
    }

    fn clear_styling(&mut self, page: &mut Page, id: NodeId) {
        if let Some(existing) = page.style_attr(id) {
            match strip_declarations(&existing) {
                Some(rest) => page.set_style_attr(id, &rest),
                None => page.remove_style_attr(id),
            }
        }
    }
}

fn inside_code_block(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_code_block(ancestor.value().name()))
}

/// Non-rendered regions and code containers never take direction styling,
/// whichever path reaches them.
fn styling_excluded(element: &ElementRef<'_>) -> bool {
    let tag = element.value().name();
    is_non_rendered(tag) || is_code_block(tag) || inside_code_block(element)
}

fn field_value(page: &Page, id: NodeId) -> String {
    let Some(element) = page.element(id) else {
        return String::new();
    };
    if element.value().name().eq_ignore_ascii_case("input") {
        return element.value().attr("value").unwrap_or_default().to_string();
    }
    // textarea and contenteditable composers carry their value as text.
    page.text_of(id)
}
