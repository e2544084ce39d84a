//! Two-phase "apply, then persist" contract shared by persisted stores.
//!
//! # Responsibility
//! - Serialize whole store snapshots into blob values and back.
//! - Report the persistence phase of every mutation as a value.
//!
//! # Invariants
//! - Persistence failures never roll back the in-memory change.
//! - Every failure is logged once here; callers may ignore the outcome.

use crate::repo::blob_repo::BlobRepository;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Result of the persistence phase of one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Full snapshot written to the blob store.
    Saved,
    /// Nothing changed, so no write was attempted.
    Skipped,
    /// Snapshot could not be encoded or written; in-memory state is kept.
    Failed(String),
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    /// True unless a write was attempted and failed.
    pub fn is_durable(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Output of a mutating store operation plus its persistence phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation<T> {
    pub output: T,
    pub persisted: PersistOutcome,
}

impl<T> Mutation<T> {
    pub fn new(output: T, persisted: PersistOutcome) -> Self {
        Self { output, persisted }
    }

    pub fn into_output(self) -> T {
        self.output
    }
}

/// Best-effort snapshot load outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// Key absent; defaults kept.
    Missing,
    /// Read or parse failed; defaults kept.
    Failed(String),
}

pub(crate) fn save_snapshot<T: Serialize + ?Sized>(
    repo: &dyn BlobRepository,
    key: &str,
    module: &str,
    snapshot: &T,
) -> PersistOutcome {
    let encoded = match serde_json::to_string(snapshot) {
        Ok(encoded) => encoded,
        Err(err) => {
            warn!("event=blob_save module={module} status=error key={key} error_code=encode_failed error={err}");
            return PersistOutcome::Failed(format!("encode `{key}` failed: {err}"));
        }
    };

    match repo.set(key, &encoded) {
        Ok(()) => {
            debug!(
                "event=blob_save module={module} status=ok key={key} bytes={}",
                encoded.len()
            );
            PersistOutcome::Saved
        }
        Err(err) => {
            warn!("event=blob_save module={module} status=error key={key} error_code=write_failed error={err}");
            PersistOutcome::Failed(format!("write `{key}` failed: {err}"))
        }
    }
}

pub(crate) fn load_snapshot<T: DeserializeOwned>(
    repo: &dyn BlobRepository,
    key: &str,
    module: &str,
) -> (Option<T>, LoadOutcome) {
    let raw = match repo.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=blob_load module={module} status=missing key={key}");
            return (None, LoadOutcome::Missing);
        }
        Err(err) => {
            warn!("event=blob_load module={module} status=error key={key} error_code=read_failed error={err}");
            return (None, LoadOutcome::Failed(format!("read `{key}` failed: {err}")));
        }
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(value) => {
            debug!(
                "event=blob_load module={module} status=ok key={key} bytes={}",
                raw.len()
            );
            (Some(value), LoadOutcome::Loaded)
        }
        Err(err) => {
            warn!("event=blob_load module={module} status=error key={key} error_code=decode_failed error={err}");
            (
                None,
                LoadOutcome::Failed(format!("decode `{key}` failed: {err}")),
            )
        }
    }
}
