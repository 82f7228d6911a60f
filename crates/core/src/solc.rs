use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::ast::{self, AstNode};

/// Output of a successful compile. The generate-validate loop only cares
/// that compilation succeeded; `analyze` consumes the AST payload.
#[derive(Debug, Clone, Default)]
pub struct CompileOutput {
    pub stdout: String,
}

#[derive(Debug, Error)]
pub enum CompileError {
    /// The compiler ran to completion and refused the source.
    #[error("solc rejected the source: {message}")]
    Rejected { message: String },
    /// The compiler itself could not be run or produced unusable output.
    #[error("solc toolchain failure: {0}")]
    Toolchain(String),
}

impl CompileError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, CompileError::Rejected { .. })
    }
}

/// Compile capability consumed by the generate-validate loop and by
/// `analyze`. Implementations may be slow; callers own any timeout.
pub trait Compile {
    fn compile(&self, source: &str) -> Result<CompileOutput, CompileError>;
}

/// Wrapper around a `solc` binary. Sources are fed on stdin; version
/// installation and pragma-based version selection stay outside this tool.
#[derive(Debug, Clone)]
pub struct SolcBinary {
    path: PathBuf,
}

impl SolcBinary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `solc` from `$PATH`.
    pub fn from_path_env() -> Self {
        Self::new("solc")
    }

    fn run(&self, args: &[&str], source: &str) -> Result<CompileOutput, CompileError> {
        let mut child = Command::new(&self.path)
            .args(args)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                CompileError::Toolchain(format!("failed to spawn {}: {e}", self.path.display()))
            })?;

        // stdin is piped above, so take() cannot fail.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CompileError::Toolchain("solc stdin unavailable".to_string()))?;
        stdin
            .write_all(source.as_bytes())
            .map_err(|e| CompileError::Toolchain(format!("failed to write to solc: {e}")))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .map_err(|e| CompileError::Toolchain(format!("failed to wait for solc: {e}")))?;

        if output.status.success() {
            Ok(CompileOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            })
        } else {
            Err(CompileError::Rejected {
                message: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }

    /// Compile with `--ast-compact-json` and parse the AST payload.
    pub fn ast_of(&self, source: &str) -> Result<AstNode, CompileError> {
        let output = self.run(&["--ast-compact-json"], source)?;
        let json = extract_json(&output.stdout).ok_or_else(|| {
            CompileError::Toolchain("no JSON AST found in solc output".to_string())
        })?;
        ast::parse_ast(json).map_err(|e| CompileError::Toolchain(format!("bad solc AST: {e:#}")))
    }
}

impl Compile for SolcBinary {
    fn compile(&self, source: &str) -> Result<CompileOutput, CompileError> {
        self.run(&["--bin", "--abi", "--metadata"], source)
    }
}

/// solc wraps the JSON payload in `=======` section headers; slice out the
/// outermost object.
fn extract_json(stdout: &str) -> Option<&str> {
    let start = stdout.find('{')?;
    let end = stdout.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&stdout[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_strips_headers() {
        let out = "JSON AST (compact format):\n\n======= <stdin> =======\n{\"nodeType\":\"SourceUnit\"}\n";
        assert_eq!(extract_json(out), Some("{\"nodeType\":\"SourceUnit\"}"));
        assert_eq!(extract_json("no json here"), None);
    }

    #[test]
    fn test_spawn_failure_is_toolchain_error() {
        let solc = SolcBinary::new("/nonexistent/solc-binary");
        let err = solc.compile("contract C {}").unwrap_err();
        assert!(!err.is_rejection());
        assert!(matches!(err, CompileError::Toolchain(_)));
    }
}
