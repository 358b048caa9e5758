//! Application state container.
//!
//! `App` owns the database handle, the content catalog and the five loaded
//! slices. Each slice has exactly one way in: the methods below mutate one
//! slice and write that slice back before returning. Nothing else touches
//! the store while an `App` is alive.

use crate::{
    core::{
        metrics::{self, DailyLog, MetricLog},
        onboarding::OnboardingProfile,
        plan::ContentCatalog,
        progression::{self, CompletedDays, DashboardSummary, ToggleOutcome},
        settings::{self, UserSettings},
        shopping::{self, ShoppingList},
        store::{self, keys},
        theme::{self, ThemeMode},
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

/// A user-facing confirmation of something worth celebrating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Text shown to the user
    pub message: String,
    /// Whether the moment deserves confetti
    pub confetti: bool,
}

impl Notice {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            confetti: false,
        }
    }

    fn celebrate(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            confetti: true,
        }
    }
}

/// Loaded application state: the catalog plus every persisted slice.
///
/// Handlers never write to the store directly. They call the mutating
/// methods here, each of which saves the one slice it touched.
pub struct App {
    db: DatabaseConnection,
    catalog: ContentCatalog,
    prefers_dark: bool,
    theme: ThemeMode,
    settings: UserSettings,
    completed_days: CompletedDays,
    logs: MetricLog,
    shopping_list: ShoppingList,
}

impl App {
    /// Reads every slice once, substituting defaults for absent or malformed ones.
    ///
    /// Fresh settings are written straight away, whether the row was absent
    /// or unreadable, so the start date is fixed at first launch.
    #[instrument(skip_all)]
    pub async fn load(
        db: DatabaseConnection,
        catalog: ContentCatalog,
        prefers_dark: bool,
    ) -> Result<Self> {
        let theme = theme::load_theme(&db, prefers_dark).await?;
        let settings = if let Some(stored) = settings::load_settings(&db).await? {
            stored
        } else {
            let fresh = UserSettings::default();
            settings::save_settings(&db, &fresh).await?;
            info!("First launch, start date {}", fresh.start_date);
            fresh
        };
        let completed_days = progression::load_completed_days(&db, &catalog).await?;
        let logs = metrics::load_logs(&db).await?;
        let shopping_list = shopping::load_shopping_list(&db).await?;

        Ok(Self {
            db,
            catalog,
            prefers_dark,
            theme,
            settings,
            completed_days,
            logs,
            shopping_list,
        })
    }

    /// The underlying connection, shared with the store helpers.
    #[must_use]
    pub const fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// The validated plan, recipes, substitutions and guide.
    #[must_use]
    pub const fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// Current color theme.
    #[must_use]
    pub const fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Profile and start date.
    #[must_use]
    pub const fn settings(&self) -> &UserSettings {
        &self.settings
    }

    /// Days marked as done.
    #[must_use]
    pub const fn completed_days(&self) -> &CompletedDays {
        &self.completed_days
    }

    /// Daily records, oldest first.
    #[must_use]
    pub const fn logs(&self) -> &MetricLog {
        &self.logs
    }

    /// The shopping list, in insertion order.
    #[must_use]
    pub const fn shopping_list(&self) -> &ShoppingList {
        &self.shopping_list
    }

    /// Whether the main views are reachable.
    #[must_use]
    pub fn is_onboarded(&self) -> bool {
        self.settings.is_onboarded()
    }

    /// Progress summary derived from the completed days.
    #[must_use]
    pub fn dashboard(&self) -> DashboardSummary<'_> {
        progression::dashboard(&self.catalog, &self.completed_days)
    }

    /// Whether `day` is past the focus day and cannot be completed yet.
    #[must_use]
    pub fn is_locked(&self, day: u32) -> bool {
        progression::is_locked(&self.catalog, &self.completed_days, day)
    }

    /// Flips between light and dark and persists the choice.
    ///
    /// # Returns
    /// The theme now in effect
    pub async fn toggle_theme(&mut self) -> Result<ThemeMode> {
        self.theme = self.theme.toggled();
        theme::save_theme(&self.db, self.theme).await?;
        Ok(self.theme)
    }

    /// Stores the wizard's profile, which unlocks the main views.
    ///
    /// # Arguments
    /// * `profile` - Validated answers from the onboarding flow
    ///
    /// # Returns
    /// A celebration notice
    pub async fn complete_onboarding(&mut self, profile: OnboardingProfile) -> Result<Notice> {
        self.settings.apply_profile(profile);
        settings::save_settings(&self.db, &self.settings).await?;
        info!("Onboarding completed for {}", self.settings.name);
        Ok(Notice::celebrate("Perfil criado com sucesso!"))
    }

    /// Toggles a day and persists the completed set.
    ///
    /// Lock checks are the caller's job; only days outside the plan are
    /// rejected here.
    ///
    /// # Arguments
    /// * `day` - Plan day number
    ///
    /// # Returns
    /// What happened, plus a celebration notice when the day was completed
    ///
    /// # Errors
    /// `Error::DayNotInPlan` if the catalog has no such day. Nothing is
    /// written in that case.
    pub async fn toggle_day(&mut self, day: u32) -> Result<(ToggleOutcome, Option<Notice>)> {
        let outcome = progression::toggle_day(&self.catalog, &mut self.completed_days, day)?;
        progression::save_completed_days(&self.db, &self.completed_days).await?;

        let notice = match outcome {
            ToggleOutcome::Completed(day) => {
                Some(Notice::celebrate(format!("Dia {day} concluído!")))
            }
            ToggleOutcome::Uncompleted(_) => None,
        };
        Ok((outcome, notice))
    }

    /// Appends a daily record and persists the log.
    ///
    /// # Errors
    /// `Error::DuplicateLogId` if an entry with the same id already exists.
    pub async fn add_log(&mut self, entry: DailyLog) -> Result<Notice> {
        self.logs.append(entry)?;
        metrics::save_logs(&self.db, &self.logs).await?;
        Ok(Notice::new("Registro salvo!"))
    }

    /// Deletes a log entry. Confirmation belongs to the caller.
    ///
    /// # Returns
    /// `false` when no entry has that id; the store is left untouched
    pub async fn delete_log(&mut self, id: &str) -> Result<bool> {
        if !self.logs.remove(id) {
            return Ok(false);
        }
        metrics::save_logs(&self.db, &self.logs).await?;
        Ok(true)
    }

    /// Adds items by name, each as a new unchecked entry.
    pub async fn add_to_shopping_list<I, S>(&mut self, names: I) -> Result<Notice>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let added = self.shopping_list.add_many(names);
        shopping::save_shopping_list(&self.db, &self.shopping_list).await?;
        Ok(Notice::new(format!("{added} itens adicionados à lista!")))
    }

    /// Adds every ingredient of a recipe to the shopping list.
    ///
    /// # Errors
    /// `Error::RecipeNotFound` if the catalog has no recipe with that id.
    pub async fn add_recipe_to_shopping_list(&mut self, recipe_id: u32) -> Result<Notice> {
        let added = self.shopping_list.add_recipe(&self.catalog, recipe_id)?;
        shopping::save_shopping_list(&self.db, &self.shopping_list).await?;
        Ok(Notice::new(format!("{added} itens adicionados à lista!")))
    }

    /// Checks or unchecks an item.
    ///
    /// # Returns
    /// The new checked state, or `None` when no item has that id
    pub async fn toggle_shopping_item(&mut self, id: &str) -> Result<Option<bool>> {
        let Some(checked) = self.shopping_list.toggle(id) else {
            return Ok(None);
        };
        shopping::save_shopping_list(&self.db, &self.shopping_list).await?;
        Ok(Some(checked))
    }

    /// Removes an item. Returns `false` when no item has that id.
    pub async fn remove_shopping_item(&mut self, id: &str) -> Result<bool> {
        if !self.shopping_list.remove(id) {
            return Ok(false);
        }
        shopping::save_shopping_list(&self.db, &self.shopping_list).await?;
        Ok(true)
    }

    /// Empties the shopping list. Confirmation belongs to the caller.
    pub async fn clear_shopping_list(&mut self) -> Result<()> {
        self.shopping_list.clear();
        shopping::save_shopping_list(&self.db, &self.shopping_list).await
    }

    /// Erases every slice and re-initializes all state from defaults.
    ///
    /// Nothing is written back: the store stays empty until the next
    /// mutation or the next [`App::load`].
    pub async fn reset(&mut self) -> Result<()> {
        store::clear(&self.db).await?;

        self.theme = ThemeMode::from_os_preference(self.prefers_dark);
        self.settings = UserSettings::default();
        self.completed_days = CompletedDays::default();
        self.logs = MetricLog::default();
        self.shopping_list = ShoppingList::default();

        info!("Application reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::onboarding::{ActivityLevel, DietType, OnboardingFlow};
    use crate::core::progression::DayStatus;
    use crate::errors::Error;
    use crate::test_utils::{sample_log, setup_test_app, setup_test_db, test_catalog, write_raw};
    use std::time::Duration;

    #[tokio::test]
    async fn test_fresh_install_forces_onboarding_then_reaches_main_view() -> Result<()> {
        let mut app = setup_test_app().await?;
        assert!(!app.is_onboarded());
        assert!(app.settings().name.is_empty());

        let mut flow = OnboardingFlow::new();
        flow.form_mut().unwrap().name = "Ana".to_string();
        flow.advance();
        let form = flow.form_mut().unwrap();
        form.weight = "70".to_string();
        form.height = "165".to_string();
        flow.advance();
        flow.advance();
        flow.advance();

        let handle = flow.start_analysis(Duration::from_millis(1)).unwrap();
        let profile = handle.wait(|_| {}).await?;
        flow.finish();
        let notice = app.complete_onboarding(profile).await?;

        assert!(notice.confetti);
        assert_eq!(app.settings().name, "Ana");
        assert!(app.is_onboarded());

        let reloaded = App::load(app.db().clone(), test_catalog(), false).await?;
        assert_eq!(reloaded.settings().name, "Ana");
        assert_eq!(reloaded.settings().starting_weight.as_deref(), Some("70"));
        assert_eq!(reloaded.settings().height.as_deref(), Some("165"));
        Ok(())
    }

    #[tokio::test]
    async fn test_start_date_survives_reload() -> Result<()> {
        let app = setup_test_app().await?;
        let start = app.settings().start_date;

        let reloaded = App::load(app.db().clone(), test_catalog(), false).await?;
        assert_eq!(reloaded.settings().start_date, start);
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_settings_pin_a_single_start_date() -> Result<()> {
        let db = setup_test_db().await?;
        write_raw(&db, keys::SETTINGS, "{not json").await?;

        let first = App::load(db.clone(), test_catalog(), false).await?;
        let second = App::load(db, test_catalog(), false).await?;

        assert!(!first.is_onboarded());
        assert_eq!(second.settings().start_date, first.settings().start_date);
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_day_celebrates_only_completion() -> Result<()> {
        let mut app = setup_test_app().await?;

        let (outcome, notice) = app.toggle_day(1).await?;
        assert_eq!(outcome, ToggleOutcome::Completed(1));
        assert_eq!(notice.unwrap().message, "Dia 1 concluído!");

        let (outcome, notice) = app.toggle_day(1).await?;
        assert_eq!(outcome, ToggleOutcome::Uncompleted(1));
        assert!(notice.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_progress_survives_reload() -> Result<()> {
        let mut app = setup_test_app().await?;
        for day in 1..=3 {
            app.toggle_day(day).await?;
        }

        let reloaded = App::load(app.db().clone(), test_catalog(), false).await?;
        let summary = reloaded.dashboard();

        assert_eq!(summary.focus_day, 4);
        assert!(reloaded.is_locked(6));
        assert!(!reloaded.is_locked(4));
        assert_eq!(summary.days[1].status, DayStatus::Completed);
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_day_outside_plan_writes_nothing() -> Result<()> {
        let mut app = setup_test_app().await?;

        let result = app.toggle_day(30).await;
        assert!(matches!(result, Err(Error::DayNotInPlan { day: 30 })));
        assert!(!store::contains(app.db(), keys::COMPLETED_DAYS).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_logs_and_shopping_list_round_trip() -> Result<()> {
        let mut app = setup_test_app().await?;
        app.add_log(sample_log("a", 5)).await?;
        app.add_log(sample_log("b", 9)).await?;
        let notice = app.add_recipe_to_shopping_list(1).await?;
        assert_eq!(notice.message, "5 itens adicionados à lista!");

        let reloaded = App::load(app.db().clone(), test_catalog(), false).await?;
        assert_eq!(reloaded.logs().len(), 2);
        assert_eq!(reloaded.shopping_list().len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_log_is_noop() -> Result<()> {
        let mut app = setup_test_app().await?;
        app.add_log(sample_log("a", 5)).await?;

        assert!(!app.delete_log("zzz").await?);
        assert!(app.delete_log("a").await?);
        assert!(app.logs().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_theme_toggle_persists() -> Result<()> {
        let db = setup_test_db().await?;
        let mut app = App::load(db, test_catalog(), true).await?;
        assert_eq!(app.theme(), ThemeMode::Dark);

        assert_eq!(app.toggle_theme().await?, ThemeMode::Light);

        let reloaded = App::load(app.db().clone(), test_catalog(), true).await?;
        assert_eq!(reloaded.theme(), ThemeMode::Light);
        Ok(())
    }

    #[tokio::test]
    async fn test_reset_erases_every_key_and_restores_defaults() -> Result<()> {
        let mut app = setup_test_app().await?;
        app.complete_onboarding(OnboardingProfile {
            name: "Ana".to_string(),
            starting_weight: "70".to_string(),
            height: "165".to_string(),
            activity_level: ActivityLevel::Light,
            previous_diet: DietType::Carbs,
        })
        .await?;
        app.toggle_theme().await?;
        app.toggle_day(1).await?;
        app.add_log(sample_log("a", 5)).await?;
        app.add_to_shopping_list(["Ovos"]).await?;

        app.reset().await?;

        for key in keys::ALL {
            assert!(!store::contains(app.db(), key).await?, "{key} should be erased");
        }
        assert!(!app.is_onboarded());

        let reloaded = App::load(app.db().clone(), test_catalog(), false).await?;
        assert!(!reloaded.is_onboarded());
        assert_eq!(reloaded.theme(), ThemeMode::Light);
        assert!(reloaded.completed_days().is_empty());
        assert!(reloaded.logs().is_empty());
        assert!(reloaded.shopping_list().is_empty());
        assert_eq!(reloaded.dashboard().focus_day, 1);
        Ok(())
    }
}
