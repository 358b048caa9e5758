//! Persistent slice store.
//!
//! Each piece of application state lives in its own row of the `app_storage`
//! table, keyed by name and encoded as JSON. Slices are read once at start
//! and written back after every mutation. There is no transaction spanning
//! slices: each one is meaningful on its own.
//!
//! A row that no longer decodes into the expected type is treated as absent,
//! so a corrupted slice falls back to its default instead of blocking startup.

use crate::{
    entities::{Storage, storage},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

/// Storage keys, one per slice.
pub mod keys {
    /// `"dark"` or `"light"`
    pub const THEME: &str = "keto_theme";
    /// `UserSettings`
    pub const SETTINGS: &str = "keto_settings";
    /// Completed plan days
    pub const COMPLETED_DAYS: &str = "keto_completed_days";
    /// `DailyLog` history
    pub const LOGS: &str = "keto_daily_logs";
    /// `ShoppingItem` list
    pub const SHOPPING_LIST: &str = "keto_shopping_list";

    /// Every key the application writes.
    pub const ALL: [&str; 5] = [THEME, SETTINGS, COMPLETED_DAYS, LOGS, SHOPPING_LIST];
}

/// Reads and decodes the slice stored under `key`.
///
/// Returns `Ok(None)` when the key is absent or its value is malformed.
///
/// # Errors
/// Only database failures are reported.
pub async fn load<C, T>(db: &C, key: &str) -> Result<Option<T>>
where
    C: ConnectionTrait,
    T: DeserializeOwned,
{
    let Some(row) = Storage::find_by_id(key.to_string()).one(db).await? else {
        debug!("No stored value for '{key}'");
        return Ok(None);
    };

    match serde_json::from_str(&row.value) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Discarding malformed value stored under '{key}': {e}");
            Ok(None)
        }
    }
}

/// Like [`load`], substituting `T::default()` for an absent or malformed slice.
pub async fn load_or_default<C, T>(db: &C, key: &str) -> Result<T>
where
    C: ConnectionTrait,
    T: DeserializeOwned + Default,
{
    Ok(load(db, key).await?.unwrap_or_default())
}

/// Encodes `value` and writes it under `key`, replacing any previous value.
pub async fn save<C, T>(db: &C, key: &str, value: &T) -> Result<()>
where
    C: ConnectionTrait,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    let now = Utc::now().naive_utc();

    let existing = Storage::find_by_id(key.to_string()).one(db).await?;

    if let Some(row) = existing {
        let mut active_model: storage::ActiveModel = row.into();
        active_model.value = Set(json);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_row = storage::ActiveModel {
            key: Set(key.to_string()),
            value: Set(json),
            updated_at: Set(now),
        };
        new_row.insert(db).await?;
    }

    debug!("Saved '{key}'");
    Ok(())
}

/// Whether anything is stored under `key`, malformed or not.
pub async fn contains<C>(db: &C, key: &str) -> Result<bool>
where
    C: ConnectionTrait,
{
    Ok(Storage::find_by_id(key.to_string()).one(db).await?.is_some())
}

/// Removes every stored slice in a single statement.
///
/// Returns the number of rows deleted.
pub async fn clear<C>(db: &C) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Storage::delete_many().exec(db).await?;
    info!("Cleared {} stored slices", result.rows_affected);
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{setup_test_db, write_raw};

    #[tokio::test]
    async fn test_load_missing_key_is_none() -> Result<()> {
        let db = setup_test_db().await?;

        let value: Option<Vec<u32>> = load(&db, keys::COMPLETED_DAYS).await?;
        assert!(value.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load() -> Result<()> {
        let db = setup_test_db().await?;

        save(&db, keys::COMPLETED_DAYS, &vec![1_u32, 2, 3]).await?;
        let value: Option<Vec<u32>> = load(&db, keys::COMPLETED_DAYS).await?;

        assert_eq!(value, Some(vec![1, 2, 3]));
        Ok(())
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_value() -> Result<()> {
        let db = setup_test_db().await?;

        save(&db, keys::THEME, "dark").await?;
        save(&db, keys::THEME, "light").await?;

        let value: Option<String> = load(&db, keys::THEME).await?;
        assert_eq!(value.as_deref(), Some("light"));
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_value_falls_back_to_default() -> Result<()> {
        let db = setup_test_db().await?;
        write_raw(&db, keys::COMPLETED_DAYS, "[1, 2,").await?;

        let value: Option<Vec<u32>> = load(&db, keys::COMPLETED_DAYS).await?;
        assert!(value.is_none());

        let fallback: Vec<u32> = load_or_default(&db, keys::COMPLETED_DAYS).await?;
        assert!(fallback.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_shape_is_treated_as_absent() -> Result<()> {
        let db = setup_test_db().await?;
        write_raw(&db, keys::LOGS, r#"{"not": "a list"}"#).await?;

        let value: Option<Vec<String>> = load(&db, keys::LOGS).await?;
        assert!(value.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_removes_every_key() -> Result<()> {
        let db = setup_test_db().await?;
        for key in keys::ALL {
            save(&db, key, &0_u32).await?;
        }

        let removed = clear(&db).await?;

        assert_eq!(removed, 5);
        for key in keys::ALL {
            assert!(!contains(&db, key).await?, "{key} should be gone");
        }
        Ok(())
    }
}
