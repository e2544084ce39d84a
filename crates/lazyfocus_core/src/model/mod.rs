//! Domain model for tasks, notifications and the user profile.
//!
//! # Responsibility
//! - Define canonical data structures used by the stores.
//! - Own the JSON wire shape written into blob storage.
//!
//! # Invariants
//! - Every task and notification is identified by a stable UUID.
//! - Deletion is a hard removal; there are no tombstones.

pub mod notification;
pub mod profile;
pub mod task;
mod wire_time;
