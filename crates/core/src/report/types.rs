use std::path::PathBuf;

use serde::Serialize;

use crate::finding::{Finding, Severity};

#[derive(Debug, Default, Serialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub informational: usize,
}

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub files_analyzed: Vec<PathBuf>,
    pub total_findings: usize,
    pub findings_by_severity: SeverityCounts,
    pub findings: Vec<Finding>,
}

impl AnalysisReport {
    pub fn from_findings(files: Vec<PathBuf>, findings: Vec<Finding>) -> Self {
        let mut counts = SeverityCounts::default();
        for finding in &findings {
            match finding.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Informational => counts.informational += 1,
            }
        }
        let total = findings.len();
        Self {
            files_analyzed: files,
            total_findings: total,
            findings_by_severity: counts,
            findings,
        }
    }
}
