/// Runtime settings from `keto.toml` and the environment
pub mod app;

/// Plan and recipe catalog loading
pub mod content;

/// Database connection and table management
pub mod database;

pub use app::{AppConfig, load_app_configuration};
