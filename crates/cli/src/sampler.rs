use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use solbench::forge::{ContractGenerator, GenerateError};

/// Generator that cycles through seed `.sol` files from a corpus directory,
/// optionally knocking a piece off each sample so that most candidates fail
/// to compile. Grammar-driven generation stays out of scope; seeds come
/// from real contracts.
pub struct CorpusSampler {
    sources: Vec<String>,
    next: usize,
    mutate: bool,
    rng_state: u64,
}

impl CorpusSampler {
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut sources = Vec::new();
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            if entry.path().extension().is_some_and(|ext| ext == "sol") {
                let content = std::fs::read_to_string(entry.path())
                    .with_context(|| format!("Failed to read: {}", entry.path().display()))?;
                sources.push(content);
            }
        }
        if sources.is_empty() {
            anyhow::bail!("No .sol seed files found in: {}", dir.display());
        }

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5eed)
            | 1; // xorshift state must be non-zero
        Ok(Self::from_sources(sources, seed))
    }

    pub fn from_sources(sources: Vec<String>, seed: u64) -> Self {
        Self {
            sources,
            next: 0,
            mutate: true,
            rng_state: seed | 1,
        }
    }

    pub fn with_mutation(mut self, mutate: bool) -> Self {
        self.mutate = mutate;
        self
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        x
    }

    /// Cut the source at a pseudo-random char boundary strictly inside the
    /// text. Truncated contracts are plausible-looking and rarely compile.
    fn truncate(&mut self, source: &str) -> String {
        let chars: Vec<char> = source.chars().collect();
        if chars.len() < 2 {
            return source.to_string();
        }
        let cut = 1 + (self.next_u64() as usize) % (chars.len() - 1);
        chars[..cut].iter().collect()
    }
}

impl ContractGenerator for CorpusSampler {
    fn generate(&mut self) -> Result<String, GenerateError> {
        let source = self.sources[self.next % self.sources.len()].clone();
        self.next += 1;
        if self.mutate {
            Ok(self.truncate(&source))
        } else {
            Ok(source)
        }
    }
}
