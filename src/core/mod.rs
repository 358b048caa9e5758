//! Core business logic - framework-agnostic state, derivations and persistence.

/// Application state container with one update entry point per slice
pub mod app;
/// Self-reported metrics history and chart projection
pub mod metrics;
/// Onboarding wizard and simulated analysis sequence
pub mod onboarding;
/// Static plan, recipe, substitution and guide content
pub mod plan;
/// Current focus day and lock rule derivation
pub mod progression;
/// User settings slice
pub mod settings;
/// Shopping list aggregation
pub mod shopping;
/// Keyed JSON slice persistence
pub mod store;
/// Theme preference slice
pub mod theme;

pub use app::{App, Notice};
