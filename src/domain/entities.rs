//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable node identifier, unique across a forest.
///
/// Source payloads use numeric ids, but string ids appear in hand-written
/// fixtures, so both are accepted. Serialized untagged: a JSON number or
/// string maps directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl NodeId {
    /// Parse a CLI argument: numeric if it looks numeric, string otherwise.
    pub fn parse(raw: &str) -> Self {
        raw.parse::<i64>().map(NodeId::Int).unwrap_or_else(|_| NodeId::Str(raw.to_string()))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{}", n),
            NodeId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Int(n)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Str(s.to_string())
    }
}

/// Raw allocation row as found in the source payload.
///
/// `children` may be absent in the payload; it deserializes to an empty
/// vector. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawNode {
    pub id: NodeId,
    pub label: String,
    pub value: f64,
    #[serde(default)]
    pub children: Vec<RawNode>,
}

/// Working allocation row, annotated at normalization time.
///
/// `baseline_value` is captured once when the forest is normalized and never
/// mutated afterwards; it is the fixed denominator for variance. For a node
/// with children, `value` is derived (sum of the children's values) after
/// every propagation pass.
///
/// Serialized with camelCase field names to match the reference payload
/// shape (`baselineValue`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub value: f64,
    pub baseline_value: f64,
    /// Percentage deviation of `value` from `baseline_value`.
    pub variance: f64,
    pub children: Vec<Node>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }
}
