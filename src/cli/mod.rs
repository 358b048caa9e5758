//! Command-line interface - argument parsing, dispatch and the onboarding guard.
//!
//! Every subcommand is a thin handler over [`App`]: it reads or mutates one
//! slice through the container and renders the result as text.

/// Command handlers grouped by view
pub mod commands;
/// Line-oriented terminal I/O
pub mod prompt;

pub use prompt::Terminal;

use crate::{
    core::{App, metrics::MetricField, plan::RecipeCategory},
    errors::Result,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::{
    io::{BufRead, Write},
    time::Duration,
};
use tracing::debug;

/// Shared state available to every command.
pub struct CliContext {
    /// Loaded application state
    pub app: App,
    /// Pace of the onboarding analysis sequence
    pub analysis_tick: Duration,
}

impl CliContext {
    /// Wraps a loaded [`App`] for the command handlers.
    #[must_use]
    pub const fn new(app: App, analysis_tick: Duration) -> Self {
        Self { app, analysis_tick }
    }
}

/// Acompanhe sua jornada cetogênica de 21 dias.
#[derive(Debug, Parser)]
#[command(name = "keto-journey", version)]
pub struct Cli {
    /// Skip confirmation prompts for destructive actions
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Defaults to `dashboard`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create (or redo) your profile
    Onboard,
    /// Progress overview and today's mission
    Dashboard,
    /// All 21 days with their status
    Plan,
    /// Show a day and mark it done (or undo it)
    Day {
        /// Day number, 1-21
        day: u32,
        /// Only show the day, don't toggle it
        #[arg(long)]
        show: bool,
    },
    /// Daily weight, energy and sleep records
    Log {
        /// What to do with the records
        #[command(subcommand)]
        action: LogAction,
    },
    /// Chart one metric across all records
    Chart {
        /// weight, energy or sleep
        field: MetricField,
    },
    /// Browse keto recipes
    Recipes {
        /// Only show one meal slot
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },
    /// Low-carb swaps for common foods
    Substitutions,
    /// Read the keto guide: list its sections or open one
    Guide {
        /// Section id, e.g. ketoflu or plateau
        section: Option<String>,
    },
    /// Shopping list
    Shop {
        /// What to do with the list
        #[command(subcommand)]
        action: ShopAction,
    },
    /// Show or switch the color theme
    Theme {
        /// Leave empty to show the current theme
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Erase every stored record
    Reset,
    /// Terms of use and privacy policy
    Legal {
        /// Which document to show
        #[arg(value_enum)]
        document: LegalDocument,
    },
    /// How to reach support
    Support,
}

impl Command {
    /// Whether the main views must wait for a completed profile.
    #[must_use]
    pub const fn requires_onboarding(&self) -> bool {
        !matches!(
            self,
            Self::Onboard | Self::Theme { .. } | Self::Legal { .. } | Self::Support | Self::Reset
        )
    }
}

/// `log` subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum LogAction {
    /// Record how today went
    Add {
        /// Kilograms; defaults to the starting weight from your profile
        #[arg(long)]
        weight: Option<String>,
        /// 1-10
        #[arg(long)]
        energy: u8,
        /// Hours slept
        #[arg(long)]
        sleep: String,
        /// Anything worth remembering about the day
        #[arg(long)]
        notes: Option<String>,
    },
    /// List every record
    List,
    /// Delete one record by id (or unique id prefix)
    Delete {
        /// Record id or unique prefix
        id: String,
    },
}

/// `shop` subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShopAction {
    /// Add items by name
    Add {
        /// One or more item names
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Add every ingredient of a recipe
    AddRecipe {
        /// Recipe number, as shown by `recipes`
        id: u32,
    },
    /// Show the list
    List,
    /// Check or uncheck an item
    Toggle {
        /// Item id or unique prefix
        id: String,
    },
    /// Remove one item
    Remove {
        /// Item id or unique prefix
        id: String,
    },
    /// Empty the list
    Clear,
}

/// `theme` subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ThemeAction {
    /// Switch between dark and light
    Toggle,
}

/// Recipe category as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Café da manhã
    Breakfast,
    /// Almoço
    Lunch,
    /// Lanche
    Snack,
    /// Jantar
    Dinner,
}

impl From<CategoryArg> for RecipeCategory {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Breakfast => Self::Breakfast,
            CategoryArg::Lunch => Self::Lunch,
            CategoryArg::Snack => Self::Snack,
            CategoryArg::Dinner => Self::Dinner,
        }
    }
}

/// Documents available through `legal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LegalDocument {
    /// Termos de Uso
    Terms,
    /// Política de Privacidade
    Privacy,
}

/// Runs one command, onboarding first when the profile is missing.
pub async fn run<R: BufRead, W: Write>(
    ctx: &mut CliContext,
    command: Command,
    term: &mut Terminal<R, W>,
) -> Result<()> {
    debug!("Running {command:?}");

    if command.requires_onboarding() && !ctx.app.is_onboarded() {
        term.say("Antes de começar, vamos montar o seu perfil.")?;
        commands::onboarding::onboard(ctx, term).await?;
        term.say("")?;
    }

    match command {
        Command::Onboard => commands::onboarding::onboard(ctx, term).await,
        Command::Dashboard => commands::progress::dashboard(ctx, term),
        Command::Plan => commands::progress::plan(ctx, term),
        Command::Day { day, show } => commands::progress::day(ctx, term, day, show).await,
        Command::Log { action } => commands::tracker::log(ctx, term, action).await,
        Command::Chart { field } => commands::tracker::chart(ctx, term, field),
        Command::Recipes { category } => {
            commands::kitchen::recipes(ctx, term, category.map(RecipeCategory::from))
        }
        Command::Substitutions => commands::kitchen::substitutions(ctx, term),
        Command::Guide { section } => commands::guide::guide(ctx, term, section.as_deref()),
        Command::Shop { action } => commands::kitchen::shop(ctx, term, action).await,
        Command::Theme { action } => commands::general::theme(ctx, term, action).await,
        Command::Reset => commands::general::reset(ctx, term).await,
        Command::Legal { document } => commands::general::legal(term, document),
        Command::Support => commands::general::support(term),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_app;
    use std::io::Cursor;

    #[test]
    fn test_no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["keto-journey"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.yes);
    }

    #[test]
    fn test_parse_log_add() {
        let cli = Cli::try_parse_from([
            "keto-journey", "log", "add", "--energy", "7", "--sleep", "7,5", "--weight", "80",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Command::Log {
                action: LogAction::Add {
                    weight: Some("80".to_string()),
                    energy: 7,
                    sleep: "7,5".to_string(),
                    notes: None,
                }
            })
        );
    }

    #[test]
    fn test_yes_flag_is_global() {
        let cli = Cli::try_parse_from(["keto-journey", "shop", "clear", "--yes"]).unwrap();
        assert!(cli.yes);
        assert_eq!(
            cli.command,
            Some(Command::Shop {
                action: ShopAction::Clear,
            })
        );
    }

    #[test]
    fn test_chart_field_accepts_portuguese_names() {
        let cli = Cli::try_parse_from(["keto-journey", "chart", "sono"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Chart {
                field: MetricField::Sleep,
            })
        );
        assert!(Cli::try_parse_from(["keto-journey", "chart", "mood"]).is_err());
    }

    #[test]
    fn test_parse_guide_section_is_optional() {
        let cli = Cli::try_parse_from(["keto-journey", "guide"]).unwrap();
        assert_eq!(cli.command, Some(Command::Guide { section: None }));

        let cli = Cli::try_parse_from(["keto-journey", "guide", "ketoflu"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Guide {
                section: Some("ketoflu".to_string()),
            })
        );
    }

    #[test]
    fn test_shop_add_requires_items() {
        assert!(Cli::try_parse_from(["keto-journey", "shop", "add"]).is_err());
    }

    #[test]
    fn test_onboarding_guard_scope() {
        assert!(Command::Dashboard.requires_onboarding());
        let shop = Command::Shop {
            action: ShopAction::List,
        };
        assert!(shop.requires_onboarding());
        assert!(Command::Guide { section: None }.requires_onboarding());
        assert!(!Command::Support.requires_onboarding());
        assert!(!Command::Reset.requires_onboarding());
        assert!(!Command::Theme { action: None }.requires_onboarding());
        let legal = Command::Legal {
            document: LegalDocument::Privacy,
        };
        assert!(!legal.requires_onboarding());
    }

    #[tokio::test]
    async fn test_guarded_command_runs_onboarding_first() -> Result<()> {
        let app = setup_test_app().await?;
        let mut ctx = CliContext::new(app, Duration::from_millis(1));
        let input = "Ana\n70\n165\n\n\n";
        let mut term = Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false);

        run(&mut ctx, Command::Dashboard, &mut term).await?;

        let output = String::from_utf8(term.into_output()).unwrap();
        assert!(ctx.app.is_onboarded());
        assert!(output.contains("Perfil criado com sucesso!"));
        assert!(output.contains("Dia 1"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unguarded_command_skips_onboarding() -> Result<()> {
        let app = setup_test_app().await?;
        let mut ctx = CliContext::new(app, Duration::from_millis(1));
        let mut term = Terminal::new(Cursor::new(Vec::new()), Vec::new(), false);

        run(&mut ctx, Command::Support, &mut term).await?;

        assert!(!ctx.app.is_onboarded());
        let output = String::from_utf8(term.into_output()).unwrap();
        assert!(output.contains("mailto:suporte@ketocarnivora.com"));
        Ok(())
    }
}
