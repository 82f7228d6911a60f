use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use solbench::ast::AstNode;
use solbench::cache::AstCache;
use solbench::config::{self, Config};
use solbench::detector::{AnalysisContext, DetectorRegistry};
use solbench::finding::Severity;
use solbench::report::AnalysisReport;
use solbench::solc::SolcBinary;

use crate::output;
use crate::{OutputFormat, SeverityFilter};

pub fn run(
    path: &Path,
    format: OutputFormat,
    severity: SeverityFilter,
    detectors: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    config_path: Option<PathBuf>,
    no_cache: bool,
    quiet: bool,
    no_color: bool,
) -> Result<()> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from(".solbench.toml"));
    let config = Config::load(&config_path)?;

    // 1. Discover sources and obtain an AST per file through solc,
    //    consulting the content-addressed cache first.
    let sol_files = discover_sol_files(path)?;
    let solc = SolcBinary::new(&config.forge.solc_path);
    let mut cache = if no_cache {
        None
    } else {
        AstCache::open(PathBuf::from(".solbench-cache")).ok()
    };

    let mut source_map: HashMap<PathBuf, String> = HashMap::new();
    let mut asts: Vec<(PathBuf, AstNode)> = Vec::new();

    for file in &sol_files {
        let source = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read: {}", file.display()))?;
        let hash = AstCache::hash_contents(&source);

        let ast = match cache.as_ref().and_then(|c| c.lookup(&hash)) {
            Some(cached) => cached,
            None => match solc.ast_of(&source) {
                Ok(ast) => {
                    if let Some(ref mut c) = cache {
                        // Non-fatal: an unwritable cache only costs time.
                        let _ = c.store(&hash, &ast);
                    }
                    ast
                }
                Err(err) => {
                    eprintln!("Skipping {}: {err}", file.display());
                    continue;
                }
            },
        };

        source_map.insert(file.clone(), source);
        asts.push((file.clone(), ast));
    }
    if let Some(c) = cache {
        let _ = c.flush();
    }

    if !quiet {
        eprintln!("Analyzing {} files...", asts.len());
    }

    // 2. Build detector registry
    let mut all_dets = solbench_detectors::all_detectors();

    if let Some(ref names) = detectors {
        all_dets.retain(|d| names.iter().any(|n| n == d.name()));
    }
    if let Some(ref names) = exclude {
        all_dets.retain(|d| !names.iter().any(|n| n == d.name()));
    }

    let mut registry = DetectorRegistry::new();
    registry.register_all(all_dets);

    // 3. Run detectors
    let ctx = AnalysisContext::new(&asts, &source_map);
    let mut all_findings = registry.run_all(&ctx);

    // Enrich findings with source snippets
    for finding in &mut all_findings {
        for loc in &mut finding.locations {
            if loc.snippet.is_none() {
                loc.snippet = ctx.snippet(&loc.file, loc.start_line, loc.end_line);
            }
        }
    }

    // 4. Apply config and inline suppressions, then the severity floor
    let inline = config::parse_inline_suppressions(&source_map);
    let mut all_findings = config::apply_suppressions(all_findings, &config, &inline);

    let min_severity = match severity {
        SeverityFilter::High => Severity::High,
        SeverityFilter::Medium => Severity::Medium,
        SeverityFilter::Low => Severity::Low,
        SeverityFilter::Info => Severity::Informational,
    };
    all_findings.retain(|f| f.severity <= min_severity);

    // 5. Build report
    let files: Vec<PathBuf> = source_map.keys().cloned().collect();
    let report = AnalysisReport::from_findings(files, all_findings);

    // 6. Output
    match format {
        OutputFormat::Json => output::json::print(&report)?,
        OutputFormat::Text => output::text::print(&report, quiet, no_color)?,
    }

    // 7. Exit code
    if report.total_findings > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Discover all .sol files under a path (or the path itself, for a file)
fn discover_sol_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "sol"))
        .filter(|e| !e.path().to_string_lossy().contains("/node_modules/"))
        .map(|e| e.path().to_path_buf())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No .sol files found in: {}", path.display());
    }

    Ok(files)
}
