//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::EditMode;

/// Hierarchical allocation tree engine: baseline variance tracking and bottom-up aggregate propagation
#[derive(Parser, Debug)]
#[command(name = "alloctree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging, multiple flags (-d -d) increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<clap_complete::Shell>,

    /// Show author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the allocation table with grand total
    Show {
        /// Forest JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Render each root as a tree
    Tree {
        /// Forest JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print the grand total only
    Total {
        /// Forest JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Apply an allocation to one node and propagate aggregates
    Apply {
        /// Forest JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Target node id (numeric or string)
        #[arg(short, long)]
        id: String,

        /// Amount: percent increment or absolute value, depending on --mode
        #[arg(short, long, allow_hyphen_values = true)]
        amount: f64,

        /// How the amount is applied
        #[arg(short, long, value_enum, default_value = "percent")]
        mode: ModeArg,

        /// Restrict the lookup to roots and their direct children
        /// (reference-parity mode)
        #[arg(long)]
        shallow: bool,

        /// Write the annotated forest as JSON instead of printing the table
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// CLI-facing edit mode, mapped onto the domain's [`EditMode`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Percentage increment on the current value
    Percent,
    /// Absolute replacement
    Value,
}

impl From<ModeArg> for EditMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Percent => EditMode::Percent,
            ModeArg::Value => EditMode::Value,
        }
    }
}
