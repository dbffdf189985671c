//! Persistence substrate. The engine only ever reads and writes whole
//! named collections, so any [`Backend`] that can store a JSON document
//! per collection name works: in-memory map, directory of files, or a
//! remote blob store.

pub mod file;
pub mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::domain::{Family, Member, Quest, Redemption, Reward};

/// Collection names, fixed for compatibility with existing installs.
pub mod collections {
    pub const FAMILY: &str = "questcards_family";
    pub const MEMBERS: &str = "questcards_members";
    pub const QUESTS: &str = "questcards_quests";
    pub const REWARDS: &str = "questcards_rewards";
    pub const REDEMPTIONS: &str = "questcards_redemptions";

    pub const ALL: &[&str] = &[FAMILY, MEMBERS, QUESTS, REWARDS, REDEMPTIONS];
}

/// Structured error type for all storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend failed to read or write a collection.
    #[error("backend error: {0}")]
    Backend(String),

    /// A collection payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Filesystem failure in a file-based backend.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A named-collection blob store. Each collection is read and written
/// as a whole; there is no partial update at this level.
pub trait Backend: Send + Sync {
    fn get(&self, collection: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, collection: &str, payload: &str) -> Result<(), StorageError>;
    fn remove(&self, collection: &str) -> Result<(), StorageError>;
}

/// Typed facade over a [`Backend`]. All engine components share one
/// `Store`; every mutation is a load-modify-save pass over a single
/// collection followed by a full write-back.
pub struct Store {
    backend: Box<dyn Backend>,
}

impl Store {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Store { backend }
    }

    /// Convenience constructor for tests and previews.
    pub fn in_memory() -> Self {
        Store::new(Box::new(memory::MemoryBackend::default()))
    }

    fn load<T: DeserializeOwned>(&self, collection: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get(collection)? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    fn save<T: Serialize>(&self, collection: &str, value: &T) -> Result<(), StorageError> {
        let payload = serde_json::to_string(value)?;
        trace!(collection, bytes = payload.len(), "persisting collection");
        self.backend.set(collection, &payload)
    }

    pub fn family(&self) -> Result<Option<Family>, StorageError> {
        self.load(collections::FAMILY)
    }

    pub fn set_family(&self, family: &Family) -> Result<(), StorageError> {
        self.save(collections::FAMILY, family)
    }

    pub fn members(&self) -> Result<Vec<Member>, StorageError> {
        Ok(self.load(collections::MEMBERS)?.unwrap_or_default())
    }

    pub fn set_members(&self, members: &[Member]) -> Result<(), StorageError> {
        self.save(collections::MEMBERS, &members)
    }

    pub fn quests(&self) -> Result<Vec<Quest>, StorageError> {
        Ok(self.load(collections::QUESTS)?.unwrap_or_default())
    }

    pub fn set_quests(&self, quests: &[Quest]) -> Result<(), StorageError> {
        self.save(collections::QUESTS, &quests)
    }

    pub fn rewards(&self) -> Result<Vec<Reward>, StorageError> {
        Ok(self.load(collections::REWARDS)?.unwrap_or_default())
    }

    pub fn set_rewards(&self, rewards: &[Reward]) -> Result<(), StorageError> {
        self.save(collections::REWARDS, &rewards)
    }

    pub fn redemptions(&self) -> Result<Vec<Redemption>, StorageError> {
        Ok(self.load(collections::REDEMPTIONS)?.unwrap_or_default())
    }

    pub fn set_redemptions(&self, redemptions: &[Redemption]) -> Result<(), StorageError> {
        self.save(collections::REDEMPTIONS, &redemptions)
    }

    /// Erase every persisted collection (support/testing use).
    pub fn reset_all(&self) -> Result<(), StorageError> {
        for name in collections::ALL {
            self.backend.remove(name)?;
        }
        Ok(())
    }
}
