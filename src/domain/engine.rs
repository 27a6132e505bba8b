//! Allocation engine: normalization, targeted edits, aggregate propagation.
//!
//! Every operation is a pure function over an owned forest: it consumes the
//! forest and returns a new one, leaving no aliasing between input and
//! output. Edits with an unknown target id are silent no-ops. Variance
//! against a zero baseline is a non-finite f64 and deliberately not
//! special-cased.

use tracing::instrument;

use crate::domain::entities::{Node, NodeId, RawNode};

/// How an allocation amount is applied to the target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// `new = old + old * amount / 100` (compounds on reapplication)
    Percent,
    /// `new = amount` (absolute replacement, idempotent)
    Value,
}

/// How deep the target lookup descends.
///
/// The reference implementation only checked root rows and their direct
/// children. `TwoLevel` reproduces that behavior for parity; `Recursive`
/// is the default and finds targets at any depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupScope {
    #[default]
    Recursive,
    TwoLevel,
}

impl LookupScope {
    /// Maximum child depth the lookup descends into (roots are depth 0).
    fn depth_limit(self) -> Option<usize> {
        match self {
            LookupScope::Recursive => None,
            LookupScope::TwoLevel => Some(1),
        }
    }
}

/// Percentage deviation of `value` from `baseline`.
///
/// Non-finite when `baseline == 0`: +/-inf, or NaN when `value` is also 0.
pub fn variance_pct(value: f64, baseline: f64) -> f64 {
    (value - baseline) / baseline * 100.0
}

/// Builds a working forest from raw rows.
///
/// Every node gains `baseline_value = value` and `variance = 0`; absent
/// children become an empty vector. The input is not mutated and node
/// order is preserved at every level.
#[instrument(level = "debug", skip(raw), fields(roots = raw.len()))]
pub fn normalize(raw: &[RawNode]) -> Vec<Node> {
    raw.iter().map(normalize_node).collect()
}

fn normalize_node(raw: &RawNode) -> Node {
    Node {
        id: raw.id.clone(),
        label: raw.label.clone(),
        value: raw.value,
        baseline_value: raw.value,
        variance: 0.0,
        children: raw.children.iter().map(normalize_node).collect(),
    }
}

/// Applies an allocation to the node matching `target`, searching the whole
/// forest recursively.
///
/// Only the target node changes; ancestor aggregates are stale until
/// [`propagate_aggregates`] runs. Unknown ids return the forest unchanged.
pub fn apply_edit(forest: Vec<Node>, target: &NodeId, amount: f64, mode: EditMode) -> Vec<Node> {
    apply_edit_scoped(forest, target, amount, mode, LookupScope::Recursive)
}

/// [`apply_edit`] with an explicit lookup scope.
#[instrument(level = "debug", skip(forest))]
pub fn apply_edit_scoped(
    forest: Vec<Node>,
    target: &NodeId,
    amount: f64,
    mode: EditMode,
    scope: LookupScope,
) -> Vec<Node> {
    forest
        .into_iter()
        .map(|node| edit_node(node, target, amount, mode, scope.depth_limit(), 0))
        .collect()
}

fn edit_node(
    mut node: Node,
    target: &NodeId,
    amount: f64,
    mode: EditMode,
    depth_limit: Option<usize>,
    depth: usize,
) -> Node {
    if node.id == *target {
        node.value = match mode {
            EditMode::Percent => node.value + node.value * amount / 100.0,
            EditMode::Value => amount,
        };
        node.variance = variance_pct(node.value, node.baseline_value);
        return node;
    }
    if depth_limit.map_or(true, |limit| depth < limit) {
        node.children = node
            .children
            .into_iter()
            .map(|child| edit_node(child, target, amount, mode, depth_limit, depth + 1))
            .collect();
    }
    node
}

/// Recomputes aggregates bottom-up for the whole forest.
///
/// Every node with children gets `value = sum(children.value)` and a fresh
/// variance against its own baseline; leaves are untouched. Recurses to
/// arbitrary depth and is idempotent on an already-consistent forest.
#[instrument(level = "debug", skip(forest), fields(roots = forest.len()))]
pub fn propagate_aggregates(forest: Vec<Node>) -> Vec<Node> {
    forest.into_iter().map(propagate_node).collect()
}

fn propagate_node(mut node: Node) -> Node {
    if node.children.is_empty() {
        return node;
    }
    node.children = node.children.into_iter().map(propagate_node).collect();
    node.value = node.children.iter().map(|child| child.value).sum();
    node.variance = variance_pct(node.value, node.baseline_value);
    node
}

/// The canonical edit pipeline: [`apply_edit`] followed by
/// [`propagate_aggregates`], so call sites cannot forget the propagation
/// half.
pub fn edit_and_propagate(
    forest: Vec<Node>,
    target: &NodeId,
    amount: f64,
    mode: EditMode,
) -> Vec<Node> {
    propagate_aggregates(apply_edit(forest, target, amount, mode))
}

/// Sum of root-level values only; children are already folded into their
/// parents, so summing all levels would double-count.
pub fn grand_total(forest: &[Node]) -> f64 {
    forest.iter().map(|node| node.value).sum()
}

/// Finds the node matching `target` under the given lookup scope.
pub fn find_node<'a>(forest: &'a [Node], target: &NodeId, scope: LookupScope) -> Option<&'a Node> {
    find_in(forest, target, scope.depth_limit(), 0)
}

fn find_in<'a>(
    nodes: &'a [Node],
    target: &NodeId,
    depth_limit: Option<usize>,
    depth: usize,
) -> Option<&'a Node> {
    for node in nodes {
        if node.id == *target {
            return Some(node);
        }
        if depth_limit.map_or(true, |limit| depth < limit) {
            if let Some(found) = find_in(&node.children, target, depth_limit, depth + 1) {
                return Some(found);
            }
        }
    }
    None
}

/// Whether the forest contains `target` under the given lookup scope.
pub fn contains_id(forest: &[Node], target: &NodeId, scope: LookupScope) -> bool {
    find_node(forest, target, scope).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: i64, value: f64) -> RawNode {
        RawNode {
            id: NodeId::Int(id),
            label: format!("n{}", id),
            value,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_variance_pct() {
        assert_eq!(variance_pct(130.0, 100.0), 30.0);
        assert_eq!(variance_pct(50.0, 100.0), -50.0);
        assert!(variance_pct(10.0, 0.0).is_infinite());
        assert!(variance_pct(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_find_node_scopes() {
        let raw = vec![RawNode {
            id: NodeId::Int(1),
            label: "root".to_string(),
            value: 10.0,
            children: vec![RawNode {
                id: NodeId::Int(2),
                label: "child".to_string(),
                value: 10.0,
                children: vec![leaf(3, 10.0)],
            }],
        }];
        let forest = normalize(&raw);

        assert!(find_node(&forest, &NodeId::Int(3), LookupScope::Recursive).is_some());
        assert!(find_node(&forest, &NodeId::Int(3), LookupScope::TwoLevel).is_none());
        assert!(find_node(&forest, &NodeId::Int(2), LookupScope::TwoLevel).is_some());
    }
}
