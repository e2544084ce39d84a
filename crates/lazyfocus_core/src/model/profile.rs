//! User profile model and registration-form validation.
//!
//! # Responsibility
//! - Define the singleton profile persisted under the `userData` blob key.
//! - Offer the caller-side validation the registration flow runs before
//!   handing a patch to the profile store.
//!
//! # Invariants
//! - `age`, when set through `RegistrationForm`, lies in `[MIN_AGE, MAX_AGE]`.
//! - The store never validates; `ProfilePatch` is applied as given.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_AGE: u32 = 13;
pub const MAX_AGE: u32 = 120;
const FALLBACK_DISPLAY_NAME: &str = "Usuario";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub profile_completed: bool,
}

impl UserProfile {
    /// Shallow-merges present patch fields.
    pub fn apply_patch(&mut self, patch: &ProfilePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(completed) = patch.profile_completed {
            self.profile_completed = completed;
        }
    }

    /// Greeting name, falling back to a generic label when unset.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            FALLBACK_DISPLAY_NAME
        } else {
            self.name.as_str()
        }
    }
}

/// Partial profile update. `age: Some(None)` clears the age.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub age: Option<Option<u32>>,
    pub profile_completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    /// Name or age input is blank after trimming.
    MissingField(&'static str),
    /// Age input is not an integer.
    InvalidAge(String),
    /// Age parses but lies outside the accepted range.
    AgeOutOfRange(i64),
}

impl Display for ProfileValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::InvalidAge(value) => write!(f, "age `{value}` is not a number"),
            Self::AgeOutOfRange(age) => {
                write!(f, "age {age} must be between {MIN_AGE} and {MAX_AGE}")
            }
        }
    }
}

impl Error for ProfileValidationError {}

/// Raw registration input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub age: String,
}

impl RegistrationForm {
    pub fn new(name: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
        }
    }

    /// Validates the form and returns the patch that completes the profile.
    pub fn validate(&self) -> Result<ProfilePatch, ProfileValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProfileValidationError::MissingField("name"));
        }
        let age_text = self.age.trim();
        if age_text.is_empty() {
            return Err(ProfileValidationError::MissingField("age"));
        }

        let age = age_text
            .parse::<i64>()
            .map_err(|_| ProfileValidationError::InvalidAge(age_text.to_string()))?;
        if age < i64::from(MIN_AGE) || age > i64::from(MAX_AGE) {
            return Err(ProfileValidationError::AgeOutOfRange(age));
        }

        Ok(ProfilePatch {
            name: Some(name.to_string()),
            // Range-checked above.
            age: Some(Some(age as u32)),
            profile_completed: Some(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ProfileValidationError, RegistrationForm, UserProfile};

    #[test]
    fn validate_trims_and_completes_profile() {
        let patch = RegistrationForm::new("  Ana ", " 30 ").validate().unwrap();
        assert_eq!(patch.name.as_deref(), Some("Ana"));
        assert_eq!(patch.age, Some(Some(30)));
        assert_eq!(patch.profile_completed, Some(true));
    }

    #[test]
    fn validate_rejects_blank_and_out_of_range_input() {
        assert_eq!(
            RegistrationForm::new(" ", "20").validate().unwrap_err(),
            ProfileValidationError::MissingField("name")
        );
        assert_eq!(
            RegistrationForm::new("Ana", "12").validate().unwrap_err(),
            ProfileValidationError::AgeOutOfRange(12)
        );
        assert_eq!(
            RegistrationForm::new("Ana", "121").validate().unwrap_err(),
            ProfileValidationError::AgeOutOfRange(121)
        );
        assert!(matches!(
            RegistrationForm::new("Ana", "abc").validate().unwrap_err(),
            ProfileValidationError::InvalidAge(_)
        ));
    }

    #[test]
    fn validate_accepts_range_bounds() {
        assert!(RegistrationForm::new("Ana", "13").validate().is_ok());
        assert!(RegistrationForm::new("Ana", "120").validate().is_ok());
    }

    #[test]
    fn display_name_falls_back_when_empty() {
        let mut profile = UserProfile::default();
        assert_eq!(profile.display_name(), "Usuario");
        profile.name = "Luis".to_string();
        assert_eq!(profile.display_name(), "Luis");
    }
}
