use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::ast::AstNode;

/// Gives detectors read access to the parsed ASTs of a contract set and
/// the matching source text for snippets and line lookup.
pub struct AnalysisContext<'a> {
    asts: &'a [(PathBuf, AstNode)],
    source_files: &'a HashMap<PathBuf, String>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        asts: &'a [(PathBuf, AstNode)],
        source_files: &'a HashMap<PathBuf, String>,
    ) -> Self {
        Self { asts, source_files }
    }

    /// Parsed ASTs for pattern matching, one per source file.
    pub fn asts(&self) -> &[(PathBuf, AstNode)] {
        self.asts
    }

    pub fn source_code(&self, file: &Path) -> Option<&str> {
        self.source_files.get(file).map(|s| s.as_str())
    }

    /// Get source line by file + line number (1-indexed)
    pub fn get_line(&self, file: &Path, line: usize) -> Option<&str> {
        self.source_code(file)?.lines().nth(line.saturating_sub(1))
    }

    /// 1-based line containing the given byte offset (solc `src` spans are
    /// byte offsets into the compiled source).
    pub fn line_of_offset(&self, file: &Path, offset: usize) -> Option<usize> {
        let source = self.source_code(file)?;
        if offset > source.len() {
            return None;
        }
        Some(source[..offset].bytes().filter(|b| *b == b'\n').count() + 1)
    }

    /// Extract snippet from a file (start_line and end_line are 1-based inclusive)
    pub fn snippet(&self, file: &Path, start_line: usize, end_line: usize) -> Option<String> {
        let source = self.source_code(file)?;
        let lines: Vec<&str> = source.lines().collect();
        let start = start_line.saturating_sub(1);
        let end = end_line.min(lines.len());
        if start >= lines.len() {
            return None;
        }
        Some(lines[start..end].join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_of_offset() {
        let mut sources = HashMap::new();
        let file = PathBuf::from("a.sol");
        sources.insert(file.clone(), "pragma solidity ^0.8.0;\ncontract C {\n}\n".to_string());
        let asts = vec![];
        let ctx = AnalysisContext::new(&asts, &sources);

        assert_eq!(ctx.line_of_offset(&file, 0), Some(1));
        assert_eq!(ctx.line_of_offset(&file, 24), Some(2));
        assert_eq!(ctx.line_of_offset(&file, 10_000), None);
    }

    #[test]
    fn test_snippet_bounds() {
        let mut sources = HashMap::new();
        let file = PathBuf::from("a.sol");
        sources.insert(file.clone(), "one\ntwo\nthree".to_string());
        let asts = vec![];
        let ctx = AnalysisContext::new(&asts, &sources);

        assert_eq!(ctx.snippet(&file, 2, 3).as_deref(), Some("two\nthree"));
        assert_eq!(ctx.snippet(&file, 2, 99).as_deref(), Some("two\nthree"));
        assert!(ctx.snippet(&file, 10, 12).is_none());
    }
}
