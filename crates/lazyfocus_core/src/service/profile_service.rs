//! User profile store.
//!
//! # Responsibility
//! - Hold the singleton profile and persist it under `USER_DATA_KEY`.
//!
//! # Invariants
//! - Updates are shallow merges followed by a full rewrite of the blob.
//! - `update_user_data` returns only after the write attempt finished, so
//!   callers can navigate away once it returns.
//! - The store applies patches as given; validation happens in
//!   `RegistrationForm` before the call.

use crate::model::profile::{ProfilePatch, UserProfile};
use crate::repo::blob_repo::{BlobRepository, USER_DATA_KEY};
use crate::service::persist::{load_snapshot, save_snapshot, LoadOutcome, PersistOutcome};
use log::info;

const MODULE: &str = "profile_store";

pub struct ProfileStore<R: BlobRepository> {
    profile: UserProfile,
    repo: R,
}

impl<R: BlobRepository> ProfileStore<R> {
    /// Creates a store holding the default profile.
    pub fn new(repo: R) -> Self {
        Self {
            profile: UserProfile::default(),
            repo,
        }
    }

    /// Restores the persisted profile; absence or failure keeps defaults.
    pub fn load(&mut self) -> LoadOutcome {
        let (loaded, outcome) = load_snapshot::<UserProfile>(&self.repo, USER_DATA_KEY, MODULE);
        if let Some(profile) = loaded {
            info!(
                "event=profile_load module={MODULE} status=ok profile_completed={}",
                profile.profile_completed
            );
            self.profile = profile;
        }
        outcome
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Merges `patch` into the profile, then writes the whole profile.
    pub fn update_user_data(&mut self, patch: &ProfilePatch) -> PersistOutcome {
        self.profile.apply_patch(patch);
        info!(
            "event=profile_update module={MODULE} status=ok has_age={} profile_completed={}",
            self.profile.age.is_some(),
            self.profile.profile_completed
        );
        save_snapshot(&self.repo, USER_DATA_KEY, MODULE, &self.profile)
    }
}
