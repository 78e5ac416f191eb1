//! Recap export.
//!
//! A finished session can be written out as JSON Lines, one recorded match
//! per line. Exports are write-only; nothing loads them back.

mod jsonl;

pub use jsonl::*;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::models::MatchRecord;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn recaps_dir(&self) -> PathBuf {
        self.data_dir.join("recaps")
    }

    /// Export file for a session finished at `at`.
    pub fn recap_path(&self, at: DateTime<Utc>) -> PathBuf {
        self.recaps_dir()
            .join(format!("recap-{}.jsonl", at.format("%Y%m%dT%H%M%SZ")))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Write a session's match history to a new recap file.
pub fn export_recap(
    config: &StorageConfig,
    matches: &[MatchRecord],
) -> Result<PathBuf, StorageError> {
    let path = config.recap_path(Utc::now());
    let count = JsonlWriter::new(path.clone()).write_all(matches)?;
    info!("Exported {} matches to {:?}", count, path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Roster, Score, Side};
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));
        assert_eq!(config.recaps_dir(), PathBuf::from("/data/recaps"));

        let at = Utc.with_ymd_and_hms(2025, 6, 15, 18, 30, 5).unwrap();
        assert_eq!(
            config.recap_path(at),
            PathBuf::from("/data/recaps/recap-20250615T183005Z.jsonl")
        );
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_export_recap_writes_one_line_per_match() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());

        let roster = Roster::new(["Aiko", "Ben", "Cara", "Dev", "Eli"]).unwrap();
        let lineup = roster.select(&[0, 1, 2, 4]).unwrap();
        let matches = vec![
            MatchRecord::new(1, &lineup, Side::One, Score::new(11, 6)),
            MatchRecord::new(2, &lineup, Side::Two, Score::new(11, 12)),
        ];

        let path = export_recap(&config, &matches).unwrap();
        assert!(path.starts_with(config.recaps_dir()));

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["round"], 1);
        assert_eq!(lines[0]["winner"], 1);
        assert_eq!(lines[1]["winner"], 2);
        assert_eq!(lines[1]["resting"], serde_json::json!(["Dev"]));
    }
}
