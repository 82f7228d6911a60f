use solbench::ast::NodeKind;
use solbench::detector::{AnalysisContext, Detector};
use solbench::finding::*;
use solbench::task::KnownVulnerability;

/// Detects `tx.origin` reads. Authorization gated on `tx.origin` is
/// phishable: any contract the owner calls can pass the check.
pub struct TxOriginAuth;

impl Detector for TxOriginAuth {
    fn name(&self) -> &str {
        "tx-origin-auth"
    }

    fn description(&self) -> &str {
        "Detects tx.origin usage, which makes authorization checks phishable"
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn confidence(&self) -> Confidence {
        Confidence::High
    }

    fn corroborates(&self) -> Option<KnownVulnerability> {
        Some(KnownVulnerability::UnguardedFunction)
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (file, ast) in ctx.asts() {
            for access in ast.find_all(NodeKind::MemberAccess) {
                let is_tx_origin = access.member_name.as_deref() == Some("origin")
                    && access
                        .expression
                        .as_deref()
                        .is_some_and(|base| {
                            base.node_type == NodeKind::Identifier
                                && base.name.as_deref() == Some("tx")
                        });
                if !is_tx_origin {
                    continue;
                }

                let line = access
                    .src_offset()
                    .and_then(|offset| ctx.line_of_offset(file, offset))
                    .unwrap_or(1);
                findings.push(Finding {
                    detector_name: self.name().to_string(),
                    title: "tx.origin used for authorization".to_string(),
                    description: "`tx.origin` names the transaction sender, not the \
                                  immediate caller. Checks built on it can be satisfied \
                                  by any contract the expected account interacts with."
                        .to_string(),
                    severity: self.severity(),
                    confidence: self.confidence(),
                    vulnerability_class: self.corroborates(),
                    locations: vec![SourceLocation {
                        file: file.clone(),
                        start_line: line,
                        end_line: line,
                        snippet: None,
                    }],
                    recommendation: Some("Compare against `msg.sender` instead.".to_string()),
                });
            }
        }

        findings
    }
}
