//! Unified error types for `KetoJourney`.

use thiserror::Error;

/// Every failure the core and the command surface can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment could not be used
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The plan/recipe catalog is malformed
    #[error("Content error: {message}")]
    Content {
        /// What went wrong
        message: String,
    },

    /// Any `SeaORM` failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A slice could not be encoded for storage
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A day outside the 21-day plan was referenced
    #[error("Day {day} is not part of the plan")]
    DayNotInPlan {
        /// The offending day number
        day: u32,
    },

    /// A log entry with the same id already exists
    #[error("A log entry with id '{id}' already exists")]
    DuplicateLogId {
        /// The duplicated id
        id: String,
    },

    /// Energy must be within 1..=10
    #[error("Invalid energy level: {energy} (expected 1-10)")]
    InvalidEnergy {
        /// The rejected value
        energy: u8,
    },

    /// Weight or sleep was not a usable number
    #[error("Invalid {field}: '{value}'")]
    InvalidMetric {
        /// Metric name
        field: String,
        /// Raw input
        value: String,
    },

    /// No recipe with that id in the catalog
    #[error("Recipe {id} not found")]
    RecipeNotFound {
        /// The requested id
        id: u32,
    },

    /// The analysis sequence was torn down before it finished
    #[error("Onboarding analysis was cancelled")]
    OnboardingCancelled,

    /// Terminal or file I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Building a text response failed
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
