//! Audit logger for detection events
//!
//! Records one JSONL entry per classification call. Matched evidence is
//! never written in plaintext: values are SHA-256 hashed before logging.

use crate::detection::models::DetectionResult;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditEntry {
    timestamp: String,
    contains_pii: bool,
    method: String,
    categories: Vec<String>,
    confidence: f64,
    /// SHA-256 hash per evidence value (never log plaintext PII)
    evidence_hashes: Vec<EvidenceHash>,
}

#[derive(Debug, Serialize)]
struct EvidenceHash {
    key: String,
    value_hash: String,
}

/// Append-only JSONL audit logger
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create an audit logger, ensuring the log directory exists
    pub fn new(log_path: PathBuf) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create audit log directory: {}", parent.display())
            })?;
        }

        Ok(Self { log_path })
    }

    /// Log a detection result
    pub fn log_detection(&self, result: &DetectionResult) -> Result<()> {
        let entry = AuditEntry {
            timestamp: Utc::now().to_rfc3339(),
            contains_pii: result.contains_pii,
            method: format!("{:?}", result.method).to_lowercase(),
            categories: result
                .categories
                .iter()
                .map(|c| c.label().to_string())
                .collect(),
            confidence: result.confidence,
            evidence_hashes: result
                .evidence
                .iter()
                .map(|(key, value)| EvidenceHash {
                    key: key.clone(),
                    value_hash: hash_value(value),
                })
                .collect(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        let json_line = serde_json::to_string(&entry).context("Failed to serialize audit entry")?;
        writeln!(file, "{json_line}").context("Failed to write audit entry")?;

        Ok(())
    }
}

/// Hash an evidence value using SHA-256
fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}
