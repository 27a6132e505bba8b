//! Table and tree rendering of allocation forests.

use itertools::Itertools;
use termtree::Tree;

use crate::domain::{grand_total, Node};

pub trait NodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl NodeConvert for Node {
    fn to_tree_string(&self) -> Tree<String> {
        let root = format!("{} {:.2} ({:.2}%)", self.label, self.value, self.variance);

        let leaves = self
            .children
            .iter()
            .map(|child| child.to_tree_string())
            .collect_vec();

        Tree::new(root).with_leaves(leaves)
    }
}

/// Renders the forest as an indented table with a Grand Total row,
/// two decimals for values and variances.
pub fn render_table(forest: &[Node]) -> String {
    let mut rows: Vec<(String, f64, f64)> = Vec::new();
    collect_rows(forest, 0, &mut rows);

    let label_width = rows
        .iter()
        .map(|(label, _, _)| label.len())
        .chain(std::iter::once("Grand Total".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<label_width$}  {:>12}  {:>10}\n",
        "Label", "Value", "Variance"
    ));
    for (label, value, variance) in &rows {
        out.push_str(&format!(
            "{:<label_width$}  {:>12.2}  {:>9.2}%\n",
            label, value, variance
        ));
    }
    out.push_str(&format!(
        "{:<label_width$}  {:>12.2}\n",
        "Grand Total",
        grand_total(forest)
    ));
    out
}

fn collect_rows(nodes: &[Node], level: usize, rows: &mut Vec<(String, f64, f64)>) {
    for node in nodes {
        rows.push((
            format!("{}{}", "  ".repeat(level), node.label),
            node.value,
            node.variance,
        ));
        collect_rows(&node.children, level + 1, rows);
    }
}
