//! Theme preference slice.

use crate::{
    core::store::{self, keys},
    errors::Result,
};
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dark or light appearance, persisted as `"dark"` / `"light"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Dark background
    Dark,
    /// Light background
    Light,
}

impl ThemeMode {
    /// Theme used when nothing is stored, following the OS color-scheme signal.
    #[must_use]
    pub const fn from_os_preference(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    /// The opposite mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Whether this is the dark mode.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => f.write_str("dark"),
            Self::Light => f.write_str("light"),
        }
    }
}

/// Loads the stored theme, or derives it from `prefers_dark` when absent or malformed.
pub async fn load_theme<C: ConnectionTrait>(db: &C, prefers_dark: bool) -> Result<ThemeMode> {
    Ok(store::load(db, keys::THEME)
        .await?
        .unwrap_or_else(|| ThemeMode::from_os_preference(prefers_dark)))
}

/// Persists the theme preference.
pub async fn save_theme<C: ConnectionTrait>(db: &C, theme: ThemeMode) -> Result<()> {
    store::save(db, keys::THEME, &theme).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{setup_test_db, write_raw};

    #[tokio::test]
    async fn test_absent_theme_follows_os_signal() -> Result<()> {
        let db = setup_test_db().await?;

        assert_eq!(load_theme(&db, true).await?, ThemeMode::Dark);
        assert_eq!(load_theme(&db, false).await?, ThemeMode::Light);
        Ok(())
    }

    #[tokio::test]
    async fn test_stored_theme_wins_over_os_signal() -> Result<()> {
        let db = setup_test_db().await?;
        save_theme(&db, ThemeMode::Light).await?;

        assert_eq!(load_theme(&db, true).await?, ThemeMode::Light);
        Ok(())
    }

    #[tokio::test]
    async fn test_theme_is_stored_as_plain_string() -> Result<()> {
        let db = setup_test_db().await?;
        write_raw(&db, keys::THEME, "\"dark\"").await?;

        assert_eq!(load_theme(&db, false).await?, ThemeMode::Dark);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_theme_value_falls_back() -> Result<()> {
        let db = setup_test_db().await?;
        write_raw(&db, keys::THEME, "\"sepia\"").await?;

        assert_eq!(load_theme(&db, true).await?, ThemeMode::Dark);
        Ok(())
    }

    #[test]
    fn test_toggled() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }
}
