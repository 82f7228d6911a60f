use super::context::AnalysisContext;
use crate::finding::{Confidence, Finding, Severity};
use crate::task::KnownVulnerability;

/// Core trait for all structural detectors. Implementors walk the parsed
/// Solidity ASTs in the context and return findings.
pub trait Detector: Send + Sync {
    /// Unique identifier for this detector (e.g., "deep-call-chain")
    fn name(&self) -> &str;

    /// Human-readable description of what this detector checks
    fn description(&self) -> &str;

    /// Default severity of findings from this detector
    fn severity(&self) -> Severity;

    /// Default confidence level of findings from this detector
    fn confidence(&self) -> Confidence;

    /// Canonical vulnerability class this pattern corroborates, if any.
    /// Used by graders to match a detector hit against a claimed label.
    fn corroborates(&self) -> Option<KnownVulnerability> {
        None
    }

    /// Run detection on the given analysis context, return findings
    fn detect(&self, context: &AnalysisContext) -> Vec<Finding>;
}
