//! # Spots Core
//!
//! Core storage logic for the scenic spots backend.
//!
//! This crate contains pure data operations and file management:
//! - The schema-loose spot data model ([`SpotRecord`], [`DetailSection`], [`Document`])
//! - Lock-serialised CRUD over a single JSON document ([`SpotStore`])
//! - Startup configuration ([`CoreConfig`])
//!
//! **No API concerns**: HTTP routing, form parsing, HTML rendering and CORS belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod error;
pub mod spot;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use constants::DEFAULT_DATA_FILE;
pub use error::{StorageError, StorageResult};
pub use spot::{DetailSection, Document, SpotRecord};
pub use store::SpotStore;
