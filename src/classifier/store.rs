//! Model artifact store
//!
//! Persists the fitted vectorizer and ensemble as two independent named JSON
//! artifacts under a model directory. Writes use write-then-rename so a
//! crashed training run never leaves a half-written artifact; loading is a
//! scoped acquisition (open, deserialize, drop).

use crate::domain::{Result, TriagemError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Artifact name for the fitted vectorizer
pub const VECTORIZER_ARTIFACT: &str = "vectorizer";

/// Artifact name for the fitted ensemble
pub const ENSEMBLE_ARTIFACT: &str = "ensemble";

/// Filesystem-backed artifact store
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Create a store rooted at the given model directory
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Model directory this store reads and writes
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a named artifact exists
    pub fn exists(&self, name: &str) -> bool {
        self.artifact_path(name).is_file()
    }

    /// Persist a named artifact atomically
    ///
    /// Serializes to a temporary file in the same directory, then renames
    /// over the final path so readers only ever observe a complete artifact.
    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            TriagemError::ArtifactIo(format!(
                "failed to create model directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.artifact_path(name);
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_vec(value)
            .map_err(|e| TriagemError::ArtifactIo(format!("failed to serialize '{name}': {e}")))?;

        std::fs::write(&tmp_path, json).map_err(|e| {
            TriagemError::ArtifactIo(format!("failed to write {}: {e}", tmp_path.display()))
        })?;

        std::fs::rename(&tmp_path, &path).map_err(|e| {
            // Leave no temp file behind on a failed rename.
            let _ = std::fs::remove_file(&tmp_path);
            TriagemError::ArtifactIo(format!("failed to commit {}: {e}", path.display()))
        })?;

        Ok(())
    }

    /// Load a named artifact
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.artifact_path(name);
        let bytes = std::fs::read(&path).map_err(|e| {
            TriagemError::ModelUnavailable(format!("cannot read {}: {e}", path.display()))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            TriagemError::ModelUnavailable(format!("corrupt artifact {}: {e}", path.display()))
        })
    }

    /// Remove a named artifact if present
    pub fn remove(&self, name: &str) -> Result<()> {
        let path = self.artifact_path(name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TriagemError::ArtifactIo(format!(
                "failed to remove {}: {e}",
                path.display()
            ))),
        }
    }

    fn artifact_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}
