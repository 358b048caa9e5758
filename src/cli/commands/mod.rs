//! Command handlers organized by view.

/// Theme, reset, legal and support
pub mod general;
/// The educational guide
pub mod guide;
/// Recipes, substitutions and the shopping list
pub mod kitchen;
/// The onboarding wizard
pub mod onboarding;
/// Dashboard, plan overview and day completion
pub mod progress;
/// Daily records and charts
pub mod tracker;

use crate::{cli::Terminal, core::Notice, errors::Result};
use std::io::{BufRead, Write};

/// Characters of an id shown in listings.
const SHORT_ID_LEN: usize = 8;

/// Prints a notice, with a celebration line when it calls for confetti.
pub(crate) fn say_notice<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    notice: &Notice,
) -> Result<()> {
    term.say(&format!("✅ {}", notice.message))?;
    if notice.confetti {
        term.say("🎉 🎊 🎉 🎊 🎉")?;
    }
    Ok(())
}

/// The leading part of an id, as shown in listings.
pub(crate) fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

/// Resolves a typed id against `ids`: an exact match wins, otherwise a
/// prefix matching exactly one id.
pub(crate) fn resolve_id<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    query: &str,
) -> Option<&'a str> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let mut matches = Vec::new();
    for id in ids {
        if id == query {
            return Some(id);
        }
        if id.starts_with(query) {
            matches.push(id);
        }
    }

    match matches.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_id_exact_and_prefix() {
        let ids = ["abc123", "abd999", "x"];

        assert_eq!(resolve_id(ids, "abc"), Some("abc123"));
        assert_eq!(resolve_id(ids, "x"), Some("x"));
        assert_eq!(resolve_id(ids, "ab"), None);
        assert_eq!(resolve_id(ids, "zzz"), None);
        assert_eq!(resolve_id(ids, "  "), None);
    }

    #[test]
    fn test_short_id_handles_short_input() {
        assert_eq!(short_id("0123456789"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
