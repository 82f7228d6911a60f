use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use solbench::config::Config;
use solbench::forge::produce_invalid_contract;
use solbench::solc::SolcBinary;

use crate::sampler::CorpusSampler;

pub fn run(
    corpus: &Path,
    max_attempts: Option<u32>,
    out: Option<PathBuf>,
    no_mutate: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from(".solbench.toml"));
    let config = Config::load(&config_path)?;
    let attempts = max_attempts.unwrap_or(config.forge.max_attempts).max(1);

    let mut generator = CorpusSampler::from_dir(corpus)?.with_mutation(!no_mutate);
    let compiler = SolcBinary::new(&config.forge.solc_path);

    let task = produce_invalid_contract(&mut generator, &compiler, attempts)?;

    let json = serde_json::to_string_pretty(&task)?;
    match out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write task: {}", path.display()))?;
            eprintln!("Wrote invalid-code task to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
