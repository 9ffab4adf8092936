use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use eyre::{bail, eyre, Result, WrapErr};
use log::{debug, info};
use serde::Deserialize;

/// Compiled contract artifact, Hardhat or Foundry layout
#[derive(Debug, Deserialize)]
struct RawArtifact {
    /// Present in Hardhat artifacts only
    #[serde(rename = "contractName")]
    contract_name: Option<String>,
    /// Required so that unrelated JSON files are not mistaken for artifacts
    #[allow(dead_code)]
    abi: serde_json::Value,
    bytecode: RawBytecode,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    /// Hardhat: `"bytecode": "0x..."`
    Hex(String),
    /// Foundry: `"bytecode": { "object": "0x..." }`
    Object { object: String },
}

impl RawBytecode {
    fn decode(&self) -> Result<Bytes> {
        let hex_str = match self {
            Self::Hex(s) | Self::Object { object: s } => s,
        };
        let bytes = hex::decode(hex_str.trim().trim_start_matches("0x"))
            .wrap_err("bytecode is not valid hex (unlinked libraries?)")?;
        Ok(Bytes::from(bytes))
    }
}

/// Creation bytecode of compiled contracts, indexed by contract name
#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    root: PathBuf,
    bytecode: HashMap<String, Bytes>,
}

impl ArtifactStore {
    /// Indexes every artifact JSON file below `root`.
    ///
    /// Files that are not artifacts (build info, debug files, caches) are skipped.
    ///
    /// # Errors
    /// * If `root` cannot be read
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut store = Self {
            root: root.clone(),
            bytecode: HashMap::new(),
        };

        let mut pending = vec![root.clone()];
        while let Some(dir) = pending.pop() {
            let entries = fs::read_dir(&dir)
                .wrap_err_with(|| format!("cannot read artifact directory {}", dir.display()))?;
            for entry in entries {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "json") {
                    store.index_file(&path);
                }
            }
        }

        info!(
            "chain::artifacts: Indexed {} artifacts under {}",
            store.bytecode.len(),
            root.display()
        );
        Ok(store)
    }

    fn index_file(&mut self, path: &Path) {
        if path.to_string_lossy().ends_with(".dbg.json") {
            return;
        }
        let artifact = match fs::read_to_string(path)
            .map_err(eyre::Report::from)
            .and_then(|raw| serde_json::from_str::<RawArtifact>(&raw).map_err(Into::into))
        {
            Ok(artifact) => artifact,
            Err(e) => {
                debug!("chain::artifacts: Skipping {}: {e}", path.display());
                return;
            }
        };

        let Some(name) = artifact.contract_name.clone().or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        }) else {
            return;
        };

        match artifact.bytecode.decode() {
            Ok(code) => {
                if self.bytecode.contains_key(&name) {
                    debug!("chain::artifacts: Duplicate artifact {name} at {}, keeping the first", path.display());
                } else {
                    self.bytecode.insert(name, code);
                }
            }
            Err(e) => debug!("chain::artifacts: Skipping {}: {e}", path.display()),
        }
    }

    /// Creation bytecode of the contract called `name`.
    ///
    /// # Errors
    /// * If no artifact with that name was indexed
    /// * If the artifact has no bytecode (interfaces, abstract contracts)
    pub fn bytecode(&self, name: &str) -> Result<&Bytes> {
        let code = self
            .bytecode
            .get(name)
            .ok_or_else(|| eyre!("artifact {name} not found under {}", self.root.display()))?;
        if code.is_empty() {
            bail!("artifact {name} has no creation bytecode");
        }
        Ok(code)
    }

    /// Checks that every named artifact is present and deployable.
    ///
    /// # Errors
    /// * Lists every missing or empty artifact
    pub fn require<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        let missing: Vec<&str> = names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| self.bytecode(name).is_err())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(eyre!(
                "missing artifacts under {}: {}",
                self.root.display(),
                missing.join(", ")
            ))
        }
    }

    /// Number of indexed artifacts
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytecode.len()
    }

    /// Whether no artifact was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytecode.is_empty()
    }
}
