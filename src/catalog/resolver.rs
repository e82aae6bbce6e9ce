//! Active pool resolution
//!
//! The pool for a category is the union of tiers `0..=tier`, merged in
//! order. A later tier re-defining a character replaces its answer but keeps
//! the character's original position. Out-of-range tiers are clipped to the
//! catalog, so resolution never fails.

use indexmap::IndexMap;

use super::models::{ActiveCharset, Answer, Category, CharacterLevels};

/// Resolve the active pool of `category` up to and including `tier`
pub fn resolve_active_pool(catalog: &CharacterLevels, category: Category, tier: usize) -> ActiveCharset {
    let mut entries: IndexMap<String, Answer> = IndexMap::new();

    for level in catalog.tiers(category).iter().take(tier.saturating_add(1)) {
        for (character, raw) in &level.set {
            entries.insert(character.clone(), Answer::from(raw));
        }
    }

    ActiveCharset::new(Some(category), tier, entries)
}

/// Resolve by category name; unknown names yield an empty pool
pub fn resolve_by_name(catalog: &CharacterLevels, category: &str, tier: usize) -> ActiveCharset {
    match category.parse::<Category>() {
        Ok(category) => resolve_active_pool(catalog, category, tier),
        Err(_) => {
            log::debug!("No catalog entry for category '{}'", category);
            ActiveCharset::empty()
        }
    }
}

/// Characters of the tiers in `start..end` (clipped), merged in order.
///
/// `end = None` runs to the last tier.
pub fn characters_in_tiers(
    catalog: &CharacterLevels,
    category: Category,
    start: usize,
    end: Option<usize>,
) -> Vec<String> {
    let tiers = catalog.tiers(category);
    let end = end.unwrap_or(tiers.len()).min(tiers.len());

    let mut merged: IndexMap<&str, ()> = IndexMap::new();
    if start < end {
        for level in &tiers[start..end] {
            for character in level.set.keys() {
                merged.insert(character.as_str(), ());
            }
        }
    }

    merged.keys().map(|c| c.to_string()).collect()
}
