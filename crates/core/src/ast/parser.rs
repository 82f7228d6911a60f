use std::path::Path;

use anyhow::{Context, Result};

use super::node::AstNode;

/// Parse a compact JSON AST (as emitted by `solc --ast-compact-json`).
pub fn parse_ast(json: &str) -> Result<AstNode> {
    serde_json::from_str(json).context("Failed to parse solc JSON AST")
}

/// Parse a JSON AST stored on disk.
pub fn parse_ast_file(path: &Path) -> Result<AstNode> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read AST file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse AST file: {}", path.display()))
}
