use serde::{Deserialize, Serialize};

/// Canonical vulnerability classes used to tag benchmark tasks and to mark
/// which class a structural detector corroborates. Serialized forms are the
/// canonical labels of the synonym table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnownVulnerability {
    #[serde(rename = "invalid code")]
    InvalidCode,
    #[serde(rename = "reentrancy")]
    Reentrancy,
    #[serde(rename = "gas griefing")]
    GasGriefing,
    #[serde(rename = "unguarded function")]
    UnguardedFunction,
    #[serde(rename = "bad randomness")]
    BadRandomness,
    #[serde(rename = "arithmetic overflow")]
    ArithmeticOverflow,
    #[serde(rename = "forced reception")]
    ForcedReception,
    #[serde(rename = "signature replay")]
    SignatureReplay,
}

impl KnownVulnerability {
    /// Canonical label, suitable as the `expected` side of
    /// [`crate::synonyms::is_equivalent`].
    pub fn canonical_label(&self) -> &'static str {
        match self {
            KnownVulnerability::InvalidCode => "invalid code",
            KnownVulnerability::Reentrancy => "reentrancy",
            KnownVulnerability::GasGriefing => "gas griefing",
            KnownVulnerability::UnguardedFunction => "unguarded function",
            KnownVulnerability::BadRandomness => "bad randomness",
            KnownVulnerability::ArithmeticOverflow => "arithmetic overflow",
            KnownVulnerability::ForcedReception => "forced reception",
            KnownVulnerability::SignatureReplay => "signature replay",
        }
    }
}

impl std::fmt::Display for KnownVulnerability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_label())
    }
}

/// How a benchmark task was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "random text")]
    RandomText,
    #[serde(rename = "valid contract")]
    ValidContract,
}

/// A packaged benchmark task. Constructed once; not mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorTask {
    pub contract_code: String,
    /// 1-based inclusive line range spanning the whole source.
    pub from_line: usize,
    pub to_line: usize,
    pub vulnerability_class: KnownVulnerability,
    pub task_type: TaskType,
}

impl ValidatorTask {
    /// Package a source string the compiler has already rejected as a
    /// "detect that this does not compile" task.
    pub fn invalid_code(contract_code: String) -> Self {
        let to_line = contract_code.lines().count() + 1;
        Self {
            from_line: 1,
            to_line,
            vulnerability_class: KnownVulnerability::InvalidCode,
            task_type: TaskType::RandomText,
            contract_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_code_line_range() {
        let task = ValidatorTask::invalid_code("a\nb\nc".to_string());
        assert_eq!(task.from_line, 1);
        assert_eq!(task.to_line, 4);
        assert_eq!(task.vulnerability_class, KnownVulnerability::InvalidCode);
        assert_eq!(task.task_type, TaskType::RandomText);
    }

    #[test]
    fn test_serialized_tags() {
        let task = ValidatorTask::invalid_code("pragma".to_string());
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains(r#""vulnerability_class":"invalid code""#));
        assert!(json.contains(r#""task_type":"random text""#));
    }

    #[test]
    fn test_canonical_labels_are_synonym_keys() {
        // Every tag a detector can emit must resolve against itself.
        for class in [
            KnownVulnerability::Reentrancy,
            KnownVulnerability::GasGriefing,
            KnownVulnerability::BadRandomness,
            KnownVulnerability::InvalidCode,
        ] {
            assert!(crate::synonyms::is_equivalent(
                class.canonical_label(),
                class.canonical_label()
            ));
        }
    }
}
