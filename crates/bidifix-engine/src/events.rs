//! Event intake types delivered by the embedder.

use bidifix_dom::NodeId;
use bidifix_text::ScriptPresence;

/// Summary of a DOM mutation batch: the concatenated text of the nodes the
/// mutation added. The engine only schedules a pass when this text carries
/// strong directional characters; attribute churn and neutral-only inserts
/// stay invisible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationNotice {
    pub added_text: String,
}

impl MutationNotice {
    pub fn new(added_text: impl Into<String>) -> Self {
        Self {
            added_text: added_text.into(),
        }
    }

    /// Whether this mutation can change any classification.
    pub fn is_relevant(&self) -> bool {
        ScriptPresence::scan(&self.added_text).has_strong()
    }
}

/// An input notification for a field element, carrying the field's current
/// value after the edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEvent {
    pub node: NodeId,
    pub value: String,
}

impl FieldEvent {
    pub fn new(node: NodeId, value: impl Into<String>) -> Self {
        Self {
            node,
            value: value.into(),
        }
    }
}
