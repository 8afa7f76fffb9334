//! # Folio Architecture
//!
//! Folio is a **UI-agnostic note organizer library**: folders hold notes, and
//! each note is a title, an ordered sequence of content blocks (text runs,
//! image references, links) and a list of tags. The command-line client is
//! one consumer of the library, not the library itself.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the in-memory Library and its DataStore             │
//! │  - Persists after every mutation, tracks selection          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Folder and note CRUD, search                             │
//! │  - Pure functions over the Library, no I/O                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/ + codec.rs)                          │
//! │  - DataStore trait: FileStore, InMemoryStore                │
//! │  - JSON document codec with legacy-field defaults           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Addressing Notes
//!
//! Notes have no identifiers; a note is its position in the folder's list.
//! Positions are resolved against the current list on every call. See
//! [`index`] for the 1-based form users type.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Folder, note and search logic
//! - [`codec`]: Note records and the stored document format
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `ContentBlock`, `Note`, `Folder`, `Library`
//! - [`index`]: Display indexes and search highlight segments
//! - [`editor`]: Editor buffer format and external editor launch
//! - [`preview`]: Block resolution for display (image availability, links)
//! - [`tags`]: Tag input parsing
//! - [`config`]: Configuration
//! - [`init`]: Context bootstrap (data directory, config, store)
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod index;
pub mod init;
pub mod model;
pub mod preview;
pub mod store;
pub mod tags;
