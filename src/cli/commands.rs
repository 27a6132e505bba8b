use std::path::Path;

use anyhow::Result;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ModeArg};
use crate::cli::output;
use crate::display::{render_table, NodeConvert};
use crate::domain::{
    apply_edit_scoped, contains_id, grand_total, propagate_aggregates, LookupScope, NodeId,
};
use crate::forest::{load_normalized, save_annotated};

pub fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Show { file }) => _show(file),
        Some(Commands::Tree { file }) => _tree(file),
        Some(Commands::Total { file }) => _total(file),
        Some(Commands::Apply {
            file,
            id,
            amount,
            mode,
            shallow,
            output,
        }) => _apply(file, id, *amount, *mode, *shallow, output.as_deref()),
        // Completion and bare invocation are handled in main
        Some(Commands::Completion { .. }) | None => Ok(()),
    }
}

#[instrument]
fn _show(file: &Path) -> Result<()> {
    let forest = load_normalized(file)?;
    print!("{}", render_table(&forest));
    Ok(())
}

#[instrument]
fn _tree(file: &Path) -> Result<()> {
    let forest = load_normalized(file)?;
    for root in &forest {
        output::info(&root.to_tree_string());
    }
    Ok(())
}

#[instrument]
fn _total(file: &Path) -> Result<()> {
    let forest = load_normalized(file)?;
    output::info(&format!("{:.2}", grand_total(&forest)));
    Ok(())
}

#[instrument]
fn _apply(
    file: &Path,
    id: &str,
    amount: f64,
    mode: ModeArg,
    shallow: bool,
    output_path: Option<&Path>,
) -> Result<()> {
    let forest = load_normalized(file)?;
    let target = NodeId::parse(id);
    let scope = if shallow {
        LookupScope::TwoLevel
    } else {
        LookupScope::Recursive
    };
    debug!("target: {}, amount: {}, mode: {:?}, scope: {:?}", target, amount, mode, scope);

    if !contains_id(&forest, &target, scope) {
        // Unknown ids are a no-op by policy, not an error
        output::warning(&format!("id {} not found, forest unchanged", target));
    }

    let forest = propagate_aggregates(apply_edit_scoped(
        forest,
        &target,
        amount,
        mode.into(),
        scope,
    ));

    match output_path {
        Some(path) => {
            save_annotated(path, &forest)?;
            output::success(&format!("wrote {}", path.display()));
        }
        None => print!("{}", render_table(&forest)),
    }
    Ok(())
}
