//! # Storage Layer
//!
//! This module defines the persistence abstraction for folio. The
//! [`DataStore`] trait moves a whole [`Library`] in and out of a backend.
//!
//! ## Design Rationale
//!
//! The library is small and always held in memory, so the store never does
//! partial updates: it reads the full document once at startup and rewrites
//! it wholesale after every mutation.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - One JSON document (`notes.json` by default) in the data directory
//!   - Writes go to a temp file that is renamed over the target
//!   - Unreadable documents are moved aside, never overwritten
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - Keeps the encoded document as a string
//!   - Can simulate write failures
//!
//! ## Single Instance
//!
//! Only one process may use a given store at a time. Nothing enforces this;
//! two concurrent writers would overwrite each other's documents.

use crate::error::Result;
use crate::model::Library;

pub mod fs;
pub mod memory;

/// Abstract interface for library persistence.
pub trait DataStore {
    /// Load the full library.
    ///
    /// An absent document yields an empty library. A document that exists but
    /// cannot be parsed yields `CorruptedData`.
    fn load(&mut self) -> Result<Library>;

    /// Replace the stored document with `library`.
    fn save(&mut self, library: &Library) -> Result<()>;

    /// Human-readable location, used in messages.
    fn location(&self) -> String;
}
