use solbench::ast::NodeKind;
use solbench::detector::{AnalysisContext, Detector};
use solbench::finding::*;
use solbench::task::KnownVulnerability;

/// Detects `block.timestamp` (and the legacy `now` alias) reads. Miner-
/// influenced time is a weak entropy source and a manipulable trigger.
pub struct TimestampDependence;

impl Detector for TimestampDependence {
    fn name(&self) -> &str {
        "timestamp-dependence"
    }

    fn description(&self) -> &str {
        "Detects block.timestamp / now reads used as triggers or entropy"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn confidence(&self) -> Confidence {
        Confidence::Medium
    }

    fn corroborates(&self) -> Option<KnownVulnerability> {
        Some(KnownVulnerability::BadRandomness)
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (file, ast) in ctx.asts() {
            let mut hits: Vec<Option<usize>> = Vec::new();

            for access in ast.find_all(NodeKind::MemberAccess) {
                let is_block_timestamp = access.member_name.as_deref() == Some("timestamp")
                    && access.expression.as_deref().is_some_and(|base| {
                        base.node_type == NodeKind::Identifier
                            && base.name.as_deref() == Some("block")
                    });
                if is_block_timestamp {
                    hits.push(access.src_offset());
                }
            }
            // Solidity < 0.7 exposes the same value as a bare `now`.
            for ident in ast.find_all(NodeKind::Identifier) {
                if ident.name.as_deref() == Some("now") {
                    hits.push(ident.src_offset());
                }
            }

            for offset in hits {
                let line = offset
                    .and_then(|o| ctx.line_of_offset(file, o))
                    .unwrap_or(1);
                findings.push(Finding {
                    detector_name: self.name().to_string(),
                    title: "Block timestamp dependence".to_string(),
                    description: "The block timestamp is set by the miner within a \
                                  tolerance. Logic keyed on it is manipulable, and it \
                                  is predictable as a randomness source."
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
                    recommendation: Some(
                        "Use block numbers for coarse scheduling and a commit-reveal \
                         scheme or oracle for randomness."
                            .to_string(),
                    ),
                });
            }
        }

        findings
    }
}
