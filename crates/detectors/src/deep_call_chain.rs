use std::path::Path;

use solbench::ast::{chained_call_sites, AstNode};
use solbench::detector::{AnalysisContext, Detector};
use solbench::finding::*;
use solbench::task::KnownVulnerability;

/// Flags function calls reached through a deep member-access chain
/// (`a.b.c(...)`) bottoming out on a plain identifier. Such chains show up
/// in low-level value-bearing calls (`target.call.value(x)()`) and in
/// unchecked external-call pipelines.
pub struct DeepCallChain {
    min_depth: usize,
}

impl Default for DeepCallChain {
    fn default() -> Self {
        Self { min_depth: 2 }
    }
}

impl DeepCallChain {
    pub fn with_min_depth(min_depth: usize) -> Self {
        Self { min_depth }
    }

    fn location_of(ctx: &AnalysisContext, file: &Path, node: &AstNode) -> SourceLocation {
        let line = node
            .src_offset()
            .and_then(|offset| ctx.line_of_offset(file, offset))
            .unwrap_or(1);
        SourceLocation {
            file: file.to_path_buf(),
            start_line: line,
            end_line: line,
            snippet: None,
        }
    }
}

impl Detector for DeepCallChain {
    fn name(&self) -> &str {
        "deep-call-chain"
    }

    fn description(&self) -> &str {
        "Detects calls fed by chained member access (a.b.c(...)), a shape common in gas-griefing and unchecked-call bugs"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn confidence(&self) -> Confidence {
        Confidence::Low
    }

    fn corroborates(&self) -> Option<KnownVulnerability> {
        Some(KnownVulnerability::GasGriefing)
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (file, ast) in ctx.asts() {
            for call in chained_call_sites(ast, self.min_depth) {
                let member = call
                    .expression
                    .as_deref()
                    .and_then(|m| m.member_name.as_deref())
                    .unwrap_or("<unknown>");
                findings.push(Finding {
                    detector_name: self.name().to_string(),
                    title: format!("Chained member access feeding `{member}(...)`"),
                    description: format!(
                        "A call to `{member}` sits at the end of a member-access chain of \
                         depth >= {}. Deep chains often wrap low-level calls whose return \
                         value and gas behavior go unchecked.",
                        self.min_depth
                    ),
                    severity: self.severity(),
                    confidence: self.confidence(),
                    vulnerability_class: self.corroborates(),
                    locations: vec![Self::location_of(ctx, file, call)],
                    recommendation: Some(
                        "Check the return value of low-level calls and avoid forwarding \
                         unbounded gas through nested members."
                            .to_string(),
                    ),
                });
            }
        }

        findings
    }
}
