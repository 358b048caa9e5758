//! Shared test utilities for `KetoJourney`.
//!
//! Helpers for setting up in-memory databases and building test data with
//! sensible defaults.

use crate::{
    config::{content, database},
    core::{App, metrics::DailyLog, plan::ContentCatalog},
    entities::storage,
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with the storage table.
/// This is the standard setup for every persistence test.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    database::create_tables(&db).await?;
    Ok(db)
}

/// Loads a fresh `App` over an empty in-memory database.
///
/// # Defaults
/// * catalog: the embedded content
/// * `prefers_dark`: false
pub async fn setup_test_app() -> Result<App> {
    let db = setup_test_db().await?;
    App::load(db, test_catalog(), false).await
}

/// The embedded plan and recipe catalog.
#[allow(clippy::expect_used)]
pub fn test_catalog() -> ContentCatalog {
    content::embedded_content().expect("embedded content must be valid")
}

/// Writes `value` under `key` verbatim, bypassing JSON encoding.
/// Use this to simulate corrupted or hand-edited slices.
pub async fn write_raw(db: &DatabaseConnection, key: &str, value: &str) -> Result<()> {
    storage::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value.to_string()),
        updated_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Creates a log entry with the given id and energy.
///
/// # Defaults
/// * weight: `"75"`
/// * sleep: `"8"`
/// * date: 2026-10-19
pub fn sample_log(id: &str, energy: u8) -> DailyLog {
    DailyLog {
        id: id.to_string(),
        date: "2026-10-19T08:30:00.000Z".to_string(),
        display_date: "19/10/2026, 08:30".to_string(),
        weight: "75".to_string(),
        energy,
        sleep: "8".to_string(),
        notes: None,
    }
}
