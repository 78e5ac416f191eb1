//! JSONL (JSON Lines) files.
//!
//! Each line is a valid JSON object representing one entity.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use super::StorageError;

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let mut writer = BufWriter::new(File::create(&self.path)?);
        for entity in entities {
            writeln!(writer, "{}", serde_json::to_string(entity)?)?;
        }
        writer.flush()?;

        debug!("Wrote {} entities to {:?}", entities.len(), self.path);
        Ok(entities.len())
    }
}
