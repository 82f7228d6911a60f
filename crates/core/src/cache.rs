use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ast::AstNode;

/// Schema version — bump when cached struct layouts change
const SCHEMA_VERSION: u32 = 1;

/// Cached artifact for one source: its parsed solc AST. Keyed by content
/// hash, so a cache hit skips invoking solc for an unchanged contract.
#[derive(Serialize, Deserialize)]
pub struct CachedAst {
    pub ast: AstNode,
}

#[derive(Serialize, Deserialize)]
struct Manifest {
    schema_version: u32,
    /// source content hash → artifact file name
    entries: HashMap<String, String>,
}

impl Manifest {
    fn empty() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// Content-addressed cache of parsed solc ASTs.
pub struct AstCache {
    cache_dir: PathBuf,
    manifest: Manifest,
}

impl AstCache {
    /// Open or create a cache in the given directory
    pub fn open(cache_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache dir: {}", cache_dir.display()))?;

        let artifacts_dir = cache_dir.join("artifacts");
        fs::create_dir_all(&artifacts_dir)?;

        let manifest_path = cache_dir.join("manifest.json");
        let manifest = if manifest_path.exists() {
            let data = fs::read_to_string(&manifest_path)?;
            let m: Manifest = serde_json::from_str(&data).unwrap_or_else(|_| Manifest::empty());
            // Invalidate if schema version changed
            if m.schema_version != SCHEMA_VERSION {
                Manifest::empty()
            } else {
                m
            }
        } else {
            Manifest::empty()
        };

        Ok(Self {
            cache_dir,
            manifest,
        })
    }

    /// Compute SHA256 hash of source contents
    pub fn hash_contents(contents: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(contents.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Look up a cached AST by source hash. Returns None on miss or a
    /// corrupt artifact.
    pub fn lookup(&self, hash: &str) -> Option<AstNode> {
        let artifact_name = self.manifest.entries.get(hash)?;
        let artifact_path = self.cache_dir.join("artifacts").join(artifact_name);
        let data = fs::read(&artifact_path).ok()?;
        let cached: CachedAst = bincode::deserialize(&data).ok()?;
        Some(cached.ast)
    }

    /// Store a parsed AST under a source hash
    pub fn store(&mut self, hash: &str, ast: &AstNode) -> Result<()> {
        let artifact_name = format!("{}.bin", &hash[..16]);
        let artifact_path = self.cache_dir.join("artifacts").join(&artifact_name);
        let data = bincode::serialize(&CachedAst { ast: ast.clone() })?;
        fs::write(&artifact_path, data)?;

        self.manifest
            .entries
            .insert(hash.to_string(), artifact_name);
        Ok(())
    }

    /// Flush manifest to disk
    pub fn flush(&self) -> Result<()> {
        let manifest_path = self.cache_dir.join("manifest.json");
        let data = serde_json::to_string_pretty(&self.manifest)?;
        fs::write(manifest_path, data)?;
        Ok(())
    }

    /// Clear all cached artifacts
    pub fn clear(&mut self) -> Result<()> {
        let artifacts_dir = self.cache_dir.join("artifacts");
        if artifacts_dir.exists() {
            fs::remove_dir_all(&artifacts_dir)?;
            fs::create_dir_all(&artifacts_dir)?;
        }
        self.manifest.entries.clear();
        self.flush()
    }
}
