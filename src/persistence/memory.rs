//! In-memory store, mostly for tests

use super::{SaveBlob, StateStore};
use crate::core::error::Result;

/// Holds the serialized blob so loads go through the same parser as files
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with arbitrary text
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<SaveBlob>> {
        self.raw.as_deref().map(SaveBlob::from_json).transpose()
    }

    fn save(&mut self, blob: &SaveBlob) -> Result<()> {
        self.raw = Some(blob.to_json()?);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.raw = None;
        Ok(())
    }
}
