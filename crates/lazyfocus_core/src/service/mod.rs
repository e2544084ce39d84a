//! Core stores.
//!
//! # Responsibility
//! - Own in-memory task, notification and profile state.
//! - Orchestrate blob persistence and notification derivation.
//!
//! # Invariants
//! - Stores receive their collaborators by injection; none are global.

pub mod notification_service;
pub mod persist;
pub mod profile_service;
pub mod task_service;
