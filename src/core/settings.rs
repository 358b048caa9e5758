//! User settings slice.
//!
//! A non-empty `name` is the signal that onboarding has been completed.

use crate::{
    core::{
        onboarding::OnboardingProfile,
        store::{self, keys},
    },
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};

/// Profile and program metadata, one per installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    /// Empty until onboarding completes
    pub name: String,
    /// First launch; set once
    pub start_date: DateTime<Utc>,
    /// Kept for stored-format compatibility only. The active day is always
    /// derived from the completed days.
    pub current_day: u32,
    /// Never collected; preserved if a stored value has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<String>,
    /// Kilograms at onboarding, as typed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_weight: Option<String>,
    /// Centimeters, as typed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Stored identifier of an `ActivityLevel`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    /// Stored identifier of a `DietType`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_diet: Option<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_date: Utc::now(),
            current_day: 1,
            target_weight: None,
            starting_weight: None,
            height: None,
            activity_level: None,
            previous_diet: None,
        }
    }
}

impl UserSettings {
    /// Whether the onboarding flow has been completed.
    #[must_use]
    pub fn is_onboarded(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Merges the profile collected by onboarding. `start_date` is left untouched.
    pub fn apply_profile(&mut self, profile: OnboardingProfile) {
        self.name = profile.name;
        self.starting_weight = Some(profile.starting_weight);
        self.height = Some(profile.height);
        self.activity_level = Some(profile.activity_level.as_str().to_string());
        self.previous_diet = Some(profile.previous_diet.as_str().to_string());
    }
}

/// Reads the stored settings.
///
/// # Returns
/// `None` when nothing usable is stored, either because the row is absent
/// or because it no longer decodes. Callers decide whether to pin a default.
pub async fn load_settings<C: ConnectionTrait>(db: &C) -> Result<Option<UserSettings>> {
    store::load(db, keys::SETTINGS).await
}

/// Writes the settings slice, replacing any previous value.
pub async fn save_settings<C: ConnectionTrait>(db: &C, settings: &UserSettings) -> Result<()> {
    store::save(db, keys::SETTINGS, settings).await
}
