//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the opaque key/value contract stores persist through.
//! - Isolate SQLite details from store orchestration.
//!
//! # Invariants
//! - Repositories store strings verbatim; schema belongs to the stores.

pub mod blob_repo;
