//! Ephemeral pending-input staging.
//!
//! The transient amount a user has typed but not yet applied lives here,
//! keyed by node id, outside the persisted forest. Staging never triggers
//! recomputation; a staged amount becomes effective only when the caller
//! feeds it into an edit.

use std::collections::HashMap;

use crate::domain::engine::{contains_id, LookupScope};
use crate::domain::entities::{Node, NodeId};

/// Pending per-node input amounts. Absent entries read as 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputStage {
    pending: HashMap<NodeId, f64>,
}

impl InputStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `amount` for `target` if the forest knows that id under the
    /// given scope. Unknown ids are silently ignored, like edits.
    pub fn stage(&mut self, forest: &[Node], target: &NodeId, amount: f64, scope: LookupScope) {
        if contains_id(forest, target, scope) {
            self.pending.insert(target.clone(), amount);
        }
    }

    /// The staged amount for `id`, 0 when nothing is staged.
    pub fn pending(&self, id: &NodeId) -> f64 {
        self.pending.get(id).copied().unwrap_or(0.0)
    }

    /// Removes and returns the staged amount for `id`.
    pub fn take(&mut self, id: &NodeId) -> Option<f64> {
        self.pending.remove(id)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
