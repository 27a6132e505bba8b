//! Domain layer: entities and engine logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no
//! payload loading).

pub mod engine;
pub mod entities;
pub mod stage;

pub use engine::{
    apply_edit, apply_edit_scoped, contains_id, edit_and_propagate, find_node, grand_total,
    normalize, propagate_aggregates, variance_pct, EditMode, LookupScope,
};
pub use entities::{Node, NodeId, RawNode};
pub use stage::InputStage;
