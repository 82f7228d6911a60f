use super::context::AnalysisContext;
use super::traits::Detector;
use crate::finding::{Finding, Severity};

/// Holds the registered detectors and runs them against a contract set.
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorRegistry {
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    pub fn register_all(&mut self, detectors: Vec<Box<dyn Detector>>) {
        self.detectors.extend(detectors);
    }

    /// Run all registered detectors, return aggregated findings sorted by
    /// severity (most severe first), then title for a stable order.
    pub fn run_all(&self, context: &AnalysisContext) -> Vec<Finding> {
        let mut findings: Vec<Finding> = self
            .detectors
            .iter()
            .flat_map(|d| d.detect(context))
            .collect();
        findings.sort_by(|a, b| a.severity.cmp(&b.severity).then_with(|| a.title.cmp(&b.title)));
        findings
    }

    /// Run only detectors matching the given names
    pub fn run_selected(&self, names: &[&str], context: &AnalysisContext) -> Vec<Finding> {
        let mut findings: Vec<Finding> = self
            .detectors
            .iter()
            .filter(|d| names.contains(&d.name()))
            .flat_map(|d| d.detect(context))
            .collect();
        findings.sort_by(|a, b| a.severity.cmp(&b.severity).then_with(|| a.title.cmp(&b.title)));
        findings
    }

    pub fn list_detectors(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Filter findings by minimum severity
    pub fn filter_by_severity(findings: Vec<Finding>, min: &Severity) -> Vec<Finding> {
        findings
            .into_iter()
            .filter(|f| f.severity <= *min)
            .collect()
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
