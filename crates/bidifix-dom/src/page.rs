//! Owned HTML page wrapper.
//!
//! `Page` holds the parsed document and mediates every read and write the
//! annotator performs: selector queries, aggregate text collection and
//! inline-style edits. Only the `style` attribute is ever written; class
//! lists, ids and the node tree itself stay untouched, so repeated
//! annotation can never corrupt page structure.

use ego_tree::NodeRef;
use html5ever::tendril::StrTendril;
use html5ever::{LocalName, Namespace, QualName};
use scraper::{ElementRef, Html, Node, Selector};

pub use ego_tree::NodeId;

use crate::role::is_non_rendered;
use crate::style::declaration_value;

pub struct Page {
    document: Html,
}

impl Page {
    /// Parse a full document. The parser is lenient; malformed markup
    /// still yields a tree with `html`, `head` and `body` in place.
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Serialize the document back to HTML.
    pub fn html(&self) -> String {
        let body = self.document.root_element().html();
        let has_doctype = self
            .document
            .tree
            .root()
            .children()
            .any(|child| matches!(child.value(), Node::Doctype(_)));
        if has_doctype {
            format!("<!DOCTYPE html>{body}")
        } else {
            body
        }
    }

    /// The `body` element, falling back to the tree root for fragments
    /// that somehow lack one.
    pub fn body(&self) -> NodeId {
        if let Ok(selector) = Selector::parse("body") {
            if let Some(element) = self.document.select(&selector).next() {
                return element.id();
            }
        }
        self.document.tree.root().id()
    }

    /// Ids of every element matching `selector`, in document order.
    pub fn select_ids(&self, selector: &Selector) -> Vec<NodeId> {
        self.document
            .select(selector)
            .map(|element| element.id())
            .collect()
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.document.tree.get(id)
    }

    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.document.tree.get(id).and_then(ElementRef::wrap)
    }

    /// The nearest element parent, skipping nothing: text nodes hang
    /// directly off their element in html5ever's tree.
    pub fn parent_element_of(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id)?.parent()?;
        parent.value().is_element().then(|| parent.id())
    }

    /// Aggregate text of a node: a text node yields its own content, an
    /// element yields the concatenated text of its rendered descendants.
    /// Script, style and noscript subtrees contribute nothing.
    pub fn text_of(&self, id: NodeId) -> String {
        let mut content = String::new();
        if let Some(node) = self.node(id) {
            collect_text(node, &mut content);
        }
        content
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id)?.value().attr(name).map(str::to_string)
    }

    pub fn style_attr(&self, id: NodeId) -> Option<String> {
        self.attr(id, "style")
    }

    /// One property out of the element's `style` attribute, mostly for
    /// assertions and diagnostics.
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        declaration_value(&self.style_attr(id)?, property)
    }

    pub fn set_style_attr(&mut self, id: NodeId, value: &str) {
        if let Some(mut node) = self.document.tree.get_mut(id) {
            if let Node::Element(element) = node.value() {
                element.attrs.insert(style_name(), StrTendril::from(value));
            }
        }
    }

    pub fn remove_style_attr(&mut self, id: NodeId) {
        let style = style_name();
        if let Some(mut node) = self.document.tree.get_mut(id) {
            if let Node::Element(element) = node.value() {
                element.attrs.retain(|name, _| *name != style);
            }
        }
    }
}

fn style_name() -> QualName {
    QualName::new(None, Namespace::from(""), LocalName::from("style"))
}

fn collect_text(node: NodeRef<'_, Node>, output: &mut String) {
    match node.value() {
        Node::Text(text) => output.push_str(text),
        Node::Element(element) if is_non_rendered(element.name()) => {}
        _ => {
            for child in node.children() {
                collect_text(child, output);
            }
        }
    }
}
