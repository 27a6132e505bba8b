//! Property tests for the engine invariants over randomly generated forests

use alloctree::domain::{
    apply_edit, edit_and_propagate, grand_total, normalize, propagate_aggregates, EditMode, Node,
    NodeId, RawNode,
};
use proptest::prelude::*;

fn arb_node() -> impl Strategy<Value = RawNode> {
    let leaf = (0.1f64..1000.0).prop_map(|value| RawNode {
        id: NodeId::Int(0),
        label: "n".to_string(),
        value,
        children: Vec::new(),
    });
    leaf.prop_recursive(3, 24, 4, |inner| {
        (0.1f64..1000.0, prop::collection::vec(inner, 0..4)).prop_map(|(value, children)| {
            RawNode {
                id: NodeId::Int(0),
                label: "n".to_string(),
                value,
                children,
            }
        })
    })
}

/// Forest with globally unique sequential ids (the id-uniqueness invariant
/// is a caller contract, so the generator upholds it).
fn arb_forest() -> impl Strategy<Value = Vec<RawNode>> {
    prop::collection::vec(arb_node(), 1..4).prop_map(|mut forest| {
        let mut next = 1;
        renumber(&mut forest, &mut next);
        forest
    })
}

fn renumber(nodes: &mut [RawNode], next: &mut i64) {
    for node in nodes {
        node.id = NodeId::Int(*next);
        *next += 1;
        renumber(&mut node.children, next);
    }
}

fn all_ids(nodes: &[Node]) -> Vec<NodeId> {
    let mut ids = Vec::new();
    collect_ids(nodes, &mut ids);
    ids
}

fn collect_ids(nodes: &[Node], ids: &mut Vec<NodeId>) {
    for node in nodes {
        ids.push(node.id.clone());
        collect_ids(&node.children, ids);
    }
}

fn assert_aggregate_invariant(nodes: &[Node]) {
    for node in nodes {
        if !node.children.is_empty() {
            let sum: f64 = node.children.iter().map(|c| c.value).sum();
            assert_eq!(node.value, sum, "non-leaf {} out of sync", node.id);
        }
        assert_aggregate_invariant(&node.children);
    }
}

fn collect_baselines(nodes: &[Node], out: &mut Vec<(NodeId, f64)>) {
    for node in nodes {
        out.push((node.id.clone(), node.baseline_value));
        collect_baselines(&node.children, out);
    }
}

proptest! {
    // P1: after propagation every non-leaf equals the sum of its children
    #[test]
    fn prop_propagation_restores_aggregate_invariant(
        raw in arb_forest(),
        target_idx in any::<prop::sample::Index>(),
        amount in -90.0f64..200.0,
    ) {
        let forest = normalize(&raw);
        let target = target_idx.get(&all_ids(&forest)).clone();

        let forest = edit_and_propagate(forest, &target, amount, EditMode::Percent);

        assert_aggregate_invariant(&forest);
    }

    // P2: no sequence of edits ever moves a baseline
    #[test]
    fn prop_baselines_never_change(
        raw in arb_forest(),
        edits in prop::collection::vec(
            (any::<prop::sample::Index>(), -90.0f64..500.0, any::<bool>()),
            1..8,
        ),
    ) {
        let mut forest = normalize(&raw);
        let mut expected = Vec::new();
        collect_baselines(&forest, &mut expected);

        for (idx, amount, absolute) in edits {
            let target = idx.get(&all_ids(&forest)).clone();
            let mode = if absolute { EditMode::Value } else { EditMode::Percent };
            forest = edit_and_propagate(forest, &target, amount, mode);
        }

        let mut actual = Vec::new();
        collect_baselines(&forest, &mut actual);
        prop_assert_eq!(actual, expected);
    }

    // P3: variance always matches the formula where the baseline is non-zero
    #[test]
    fn prop_variance_matches_formula(
        raw in arb_forest(),
        target_idx in any::<prop::sample::Index>(),
        amount in 0.1f64..1000.0,
    ) {
        let forest = normalize(&raw);
        let target = target_idx.get(&all_ids(&forest)).clone();

        let forest = edit_and_propagate(forest, &target, amount, EditMode::Value);

        let mut stack: Vec<&Node> = forest.iter().collect();
        while let Some(node) = stack.pop() {
            let expected = (node.value - node.baseline_value) / node.baseline_value * 100.0;
            prop_assert_eq!(node.variance, expected, "node {}", &node.id);
            stack.extend(node.children.iter());
        }
    }

    // P4: propagation is idempotent
    #[test]
    fn prop_propagation_is_idempotent(raw in arb_forest()) {
        let once = propagate_aggregates(normalize(&raw));
        let twice = propagate_aggregates(once.clone());

        prop_assert_eq!(once, twice);
    }

    // P5: editing an unknown id is a structural no-op
    #[test]
    fn prop_unknown_id_is_noop(
        raw in arb_forest(),
        amount in -90.0f64..500.0,
        absolute in any::<bool>(),
    ) {
        let forest = normalize(&raw);
        let before = forest.clone();
        let mode = if absolute { EditMode::Value } else { EditMode::Percent };

        // generator ids start at 1, so -1 never exists
        let forest = apply_edit(forest, &NodeId::Int(-1), amount, mode);

        prop_assert_eq!(forest, before);
    }

    // P6: grand total sums root values only
    #[test]
    fn prop_grand_total_sums_roots_only(raw in arb_forest()) {
        let forest = propagate_aggregates(normalize(&raw));
        let roots: f64 = forest.iter().map(|n| n.value).sum();

        prop_assert_eq!(grand_total(&forest), roots);
    }
}
