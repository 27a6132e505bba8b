//! Hierarchical allocation tree engine.
//!
//! Normalizes a raw budget forest, applies percentage or absolute
//! allocations to single nodes, recomputes variance against immutable
//! baselines and propagates aggregates bottom-up. All engine operations are
//! pure functions over an owned forest; the caller serializes mutating
//! calls (single-writer discipline).

pub mod cli;
pub mod display;
pub mod domain;
pub mod errors;
pub mod forest;
pub mod util;

pub use domain::{
    apply_edit, apply_edit_scoped, contains_id, edit_and_propagate, find_node, grand_total,
    normalize, propagate_aggregates, EditMode, InputStage, LookupScope, Node, NodeId, RawNode,
};
pub use errors::{ForestError, ForestResult};
