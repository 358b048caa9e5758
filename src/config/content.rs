//! Plan and recipe catalog loading.
//!
//! The catalog ships embedded in the binary (`content.toml`). A file with the
//! same layout can replace it through `AppConfig::content_path`. Either way
//! the catalog is validated before use: the progression rules assume exactly
//! 21 contiguous days, and recipes and guide sections are addressed by id.

use crate::{
    core::plan::{ContentCatalog, PLAN_LENGTH},
    errors::{Error, Result},
};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

const EMBEDDED_CONTENT: &str = include_str!("content.toml");

/// Parses and validates a catalog from TOML text.
///
/// # Errors
/// Returns `Error::Content` if the TOML is malformed or the catalog breaks
/// one of the plan/recipe rules.
pub fn parse_content(source: &str) -> Result<ContentCatalog> {
    let catalog: ContentCatalog = toml::from_str(source).map_err(|e| Error::Content {
        message: format!("Failed to parse content catalog: {e}"),
    })?;
    validate(&catalog)?;
    Ok(catalog)
}

/// The catalog compiled into the binary.
///
/// # Errors
/// Only fails if the shipped `content.toml` is broken.
pub fn embedded_content() -> Result<ContentCatalog> {
    parse_content(EMBEDDED_CONTENT)
}

/// Loads the catalog from `path`, or the embedded one when `path` is `None`.
///
/// # Errors
/// Returns `Error::Content` if the file cannot be read or does not validate.
pub fn load_content(path: Option<&Path>) -> Result<ContentCatalog> {
    let Some(path) = path else {
        debug!("Using embedded content catalog");
        return embedded_content();
    };

    let source = std::fs::read_to_string(path).map_err(|e| Error::Content {
        message: format!("Failed to read content file {path:?}: {e}"),
    })?;
    let catalog = parse_content(&source)?;
    info!(
        "Loaded content catalog from {path:?} ({} days, {} recipes)",
        catalog.days.len(),
        catalog.recipes.len()
    );
    Ok(catalog)
}

fn validate(catalog: &ContentCatalog) -> Result<()> {
    if catalog.days.len() != PLAN_LENGTH as usize {
        return Err(Error::Content {
            message: format!(
                "Plan must have exactly {PLAN_LENGTH} days, found {}",
                catalog.days.len()
            ),
        });
    }

    for (expected, guidance) in (1..=PLAN_LENGTH).zip(&catalog.days) {
        if guidance.day != expected {
            return Err(Error::Content {
                message: format!(
                    "Plan days must run 1..={PLAN_LENGTH} in order: \
                     expected day {expected}, found day {}",
                    guidance.day
                ),
            });
        }
    }

    let mut seen = HashSet::new();
    for recipe in &catalog.recipes {
        if !seen.insert(recipe.id) {
            return Err(Error::Content {
                message: format!("Duplicate recipe id {}", recipe.id),
            });
        }
        if recipe.ingredients.is_empty() {
            return Err(Error::Content {
                message: format!("Recipe '{}' has no ingredients", recipe.title),
            });
        }
    }

    let mut guide_ids = HashSet::new();
    for section in &catalog.guide {
        if !guide_ids.insert(section.id.to_ascii_lowercase()) {
            return Err(Error::Content {
                message: format!("Duplicate guide section '{}'", section.id),
            });
        }
        if section.body.trim().is_empty() {
            return Err(Error::Content {
                message: format!("Guide section '{}' is empty", section.id),
            });
        }
    }

    Ok(())
}
