//! Loading and saving allocation forests as JSON payloads.
//!
//! The reference payload wraps its rows in an object (`{"rows": [...]}`);
//! bare arrays are accepted too.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::instrument;

use crate::domain::{normalize, Node, RawNode};
use crate::errors::{ForestError, ForestResult};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Wrapped { rows: Vec<RawNode> },
    Bare(Vec<RawNode>),
}

impl Payload {
    fn into_rows(self) -> Vec<RawNode> {
        match self {
            Payload::Wrapped { rows } => rows,
            Payload::Bare(rows) => rows,
        }
    }
}

/// Parses a raw forest from a JSON string (wrapped or bare payload).
pub fn parse_raw(content: &str) -> serde_json::Result<Vec<RawNode>> {
    serde_json::from_str::<Payload>(content).map(Payload::into_rows)
}

/// Reads a raw forest from a JSON file.
#[instrument(level = "debug")]
pub fn load_raw(path: &Path) -> ForestResult<Vec<RawNode>> {
    if !path.exists() {
        return Err(ForestError::FileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    parse_raw(&content).map_err(|source| ForestError::InvalidPayload {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a raw forest and normalizes it into a working forest.
#[instrument(level = "debug")]
pub fn load_normalized(path: &Path) -> ForestResult<Vec<Node>> {
    Ok(normalize(&load_raw(path)?))
}

/// Writes the annotated forest as pretty-printed JSON (camelCase fields,
/// children included recursively).
#[instrument(level = "debug", skip(forest))]
pub fn save_annotated(path: &Path, forest: &[Node]) -> ForestResult<()> {
    let json = serde_json::to_string_pretty(forest).map_err(ForestError::SerializeError)?;
    fs::write(path, json)?;
    Ok(())
}
