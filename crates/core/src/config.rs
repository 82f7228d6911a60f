use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::finding::{Finding, Severity};
use crate::forge::DEFAULT_MAX_ATTEMPTS;

/// Project-level configuration loaded from `.solbench.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub global: GlobalConfig,
    pub forge: ForgeConfig,
    #[serde(default)]
    pub detectors: HashMap<String, DetectorConfig>,
    #[serde(default)]
    pub suppressions: SuppressionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub severity_threshold: String,
    pub output_format: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            severity_threshold: "low".to_string(),
            output_format: "text".to_string(),
        }
    }
}

/// Settings for the invalid-contract generate-validate loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Attempt budget; must be at least 1.
    pub max_attempts: u32,
    /// Path to the solc binary.
    pub solc_path: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            solc_path: "solc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub enabled: Option<bool>,
    pub severity: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SuppressionConfig {
    pub files: Vec<String>,
}

impl Config {
    /// Load config from a TOML file path. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check if a detector is enabled according to config.
    pub fn is_detector_enabled(&self, name: &str) -> bool {
        self.detectors
            .get(name)
            .and_then(|d| d.enabled)
            .unwrap_or(true)
    }

    /// Parse the global severity threshold into a Severity value.
    pub fn severity_threshold(&self) -> Severity {
        parse_severity(&self.global.severity_threshold).unwrap_or(Severity::Low)
    }

    /// Check if a file path should be excluded based on suppression glob patterns.
    pub fn is_file_excluded(&self, file_path: &Path) -> bool {
        let path_str = file_path.to_string_lossy();
        self.suppressions
            .files
            .iter()
            .any(|pattern| glob::Pattern::new(pattern).is_ok_and(|p| p.matches(&path_str)))
    }

    /// Generate default config file content.
    pub fn default_toml() -> &'static str {
        r#"# solbench configuration
# See: https://github.com/solbench/solbench

[global]
# Minimum severity to report: "high", "medium", "low", "informational"
severity_threshold = "low"
# Output format: "text", "json"
output_format = "text"

[forge]
# Attempts before forge-invalid gives up
max_attempts = 10
# solc binary used for validation
solc_path = "solc"

# Per-detector overrides
# [detectors.deep-call-chain]
# enabled = false

# [detectors.tx-origin-auth]
# severity = "low"

[suppressions]
# Glob patterns for files to skip entirely
files = ["node_modules/**", "lib/**"]
"#
    }
}

fn parse_severity(s: &str) -> Option<Severity> {
    match s.to_lowercase().as_str() {
        "high" => Some(Severity::High),
        "medium" => Some(Severity::Medium),
        "low" => Some(Severity::Low),
        "informational" | "info" => Some(Severity::Informational),
        _ => None,
    }
}

/// Inline suppression: parses source files for `// solbench-ignore` comments.
/// Returns a map of (file, line) → suppressed detector names.
/// A bare `// solbench-ignore` (no colon) suppresses all detectors for that line.
pub fn parse_inline_suppressions(
    source_map: &HashMap<PathBuf, String>,
) -> HashMap<(PathBuf, usize), Vec<String>> {
    let mut suppressions: HashMap<(PathBuf, usize), Vec<String>> = HashMap::new();

    for (path, source) in source_map {
        for (idx, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if let Some(rest) = extract_suppression_comment(trimmed) {
                // Suppression applies to the *next* line (idx is 0-based, lines are 1-based)
                let target_line = idx + 2;
                let detectors = if rest.is_empty() {
                    vec!["*".to_string()] // wildcard = suppress all
                } else {
                    rest.split(',').map(|s| s.trim().to_string()).collect()
                };
                suppressions.insert((path.clone(), target_line), detectors);
            }
        }
    }

    suppressions
}

/// Extract the detector list from a suppression comment.
/// Returns Some("") for bare ignore, Some("det1, det2") for specific, None if not a suppression.
fn extract_suppression_comment(line: &str) -> Option<&str> {
    // Match: // solbench-ignore or // solbench-ignore: det1, det2
    let comment = line.strip_prefix("//")?;
    let comment = comment.trim();
    let rest = comment.strip_prefix("solbench-ignore")?;
    let rest = rest.trim();
    if rest.is_empty() {
        Some("")
    } else {
        let rest = rest.strip_prefix(':')?;
        Some(rest.trim())
    }
}

/// Filter findings based on config and inline suppressions.
pub fn apply_suppressions(
    findings: Vec<Finding>,
    config: &Config,
    inline_suppressions: &HashMap<(PathBuf, usize), Vec<String>>,
) -> Vec<Finding> {
    findings
        .into_iter()
        .filter(|f| {
            if !config.is_detector_enabled(&f.detector_name) {
                return false;
            }

            for loc in &f.locations {
                if config.is_file_excluded(&loc.file) {
                    return false;
                }
            }

            for loc in &f.locations {
                let key = (loc.file.clone(), loc.start_line);
                if let Some(suppressed) = inline_suppressions.get(&key) {
                    if suppressed.iter().any(|s| s == "*" || *s == f.detector_name) {
                        return false;
                    }
                }
            }

            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::{Confidence, SourceLocation};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.global.severity_threshold, "low");
        assert_eq!(config.forge.max_attempts, 10);
        assert_eq!(config.forge.solc_path, "solc");
        assert!(config.is_detector_enabled("any-detector"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[global]
severity_threshold = "medium"

[forge]
max_attempts = 25
solc_path = "/usr/local/bin/solc"

[detectors.tx-origin-auth]
enabled = false

[suppressions]
files = ["lib/**"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.severity_threshold(), Severity::Medium);
        assert_eq!(config.forge.max_attempts, 25);
        assert_eq!(config.forge.solc_path, "/usr/local/bin/solc");
        assert!(!config.is_detector_enabled("tx-origin-auth"));
        assert!(config.is_detector_enabled("deep-call-chain"));
        assert!(config.is_file_excluded(Path::new("lib/forge-std/Test.sol")));
        assert!(!config.is_file_excluded(Path::new("src/Vault.sol")));
    }

    #[test]
    fn test_inline_suppression_parsing() {
        let mut source_map = HashMap::new();
        source_map.insert(
            PathBuf::from("Vault.sol"),
            "// solbench-ignore: tx-origin-auth\nrequire(tx.origin == owner);\n// solbench-ignore\nowner.vault.withdraw();\n".to_string(),
        );

        let suppressions = parse_inline_suppressions(&source_map);
        // Line 2 (1-based) should be suppressed for tx-origin-auth
        let key = (PathBuf::from("Vault.sol"), 2);
        assert!(suppressions.contains_key(&key));
        assert_eq!(suppressions[&key], vec!["tx-origin-auth"]);

        // Line 4 should be suppressed for all (wildcard)
        let key = (PathBuf::from("Vault.sol"), 4);
        assert!(suppressions.contains_key(&key));
        assert_eq!(suppressions[&key], vec!["*"]);
    }

    #[test]
    fn test_apply_suppressions() {
        let config = Config::default();
        let mut inline = HashMap::new();
        inline.insert(
            (PathBuf::from("Vault.sol"), 5),
            vec!["tx-origin-auth".to_string()],
        );

        let make_finding = |name: &str, line: usize| Finding {
            detector_name: name.to_string(),
            title: "test".to_string(),
            description: "test".to_string(),
            severity: Severity::Medium,
            confidence: Confidence::High,
            vulnerability_class: None,
            locations: vec![SourceLocation {
                file: PathBuf::from("Vault.sol"),
                start_line: line,
                end_line: line,
                snippet: None,
            }],
            recommendation: None,
        };

        let findings = vec![
            make_finding("tx-origin-auth", 5),
            make_finding("deep-call-chain", 10),
        ];

        let filtered = apply_suppressions(findings, &config, &inline);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].detector_name, "deep-call-chain");
    }
}
