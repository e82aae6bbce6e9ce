//! Data models for the character catalog

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::CatalogError;

/// A learnable content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hiragana,
    Katakana,
    Kanji,
    Numbers,
    Words,
    Sentences,
    Listening,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Hiragana,
        Category::Katakana,
        Category::Kanji,
        Category::Numbers,
        Category::Words,
        Category::Sentences,
        Category::Listening,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hiragana => "hiragana",
            Category::Katakana => "katakana",
            Category::Kanji => "kanji",
            Category::Numbers => "numbers",
            Category::Words => "words",
            Category::Sentences => "sentences",
            Category::Listening => "listening",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Answer data as written in catalog files.
///
/// Most categories map a character to its reading; numbers carry both the
/// romanized reading and the latin numeral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogAnswer {
    Text(String),
    Number { romaji: String, latin: String },
}

/// Answer data once resolved for a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Answer {
    /// Plain reading compared verbatim
    Simple { text: String },
    /// Numeral: graded on `romaji`, `latin` is display-only
    Number { romaji: String, latin: String },
}

impl Answer {
    pub fn simple(text: impl Into<String>) -> Self {
        Self::Simple { text: text.into() }
    }

    pub fn number(romaji: impl Into<String>, latin: impl Into<String>) -> Self {
        Self::Number {
            romaji: romaji.into(),
            latin: latin.into(),
        }
    }

    /// The text a submitted answer must equal
    pub fn expected(&self) -> &str {
        match self {
            Answer::Simple { text } => text,
            Answer::Number { romaji, .. } => romaji,
        }
    }

    /// Secondary display text (the latin numeral for numbers)
    pub fn gloss(&self) -> Option<&str> {
        match self {
            Answer::Simple { .. } => None,
            Answer::Number { latin, .. } => Some(latin),
        }
    }
}

impl From<&CatalogAnswer> for Answer {
    fn from(raw: &CatalogAnswer) -> Self {
        match raw {
            CatalogAnswer::Text(text) => Answer::simple(text.clone()),
            CatalogAnswer::Number { romaji, latin } => Answer::number(romaji.clone(), latin.clone()),
        }
    }
}

/// One unlockable difficulty level within a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub name: String,
    pub set: IndexMap<String, CatalogAnswer>,
}

/// Static catalog: category -> ordered tiers -> character -> answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterLevels {
    categories: IndexMap<Category, Vec<Tier>>,
}

impl CharacterLevels {
    pub fn new(categories: IndexMap<Category, Vec<Tier>>) -> Self {
        Self { categories }
    }

    /// Ordered tiers of a category; empty when the category is absent
    pub fn tiers(&self, category: Category) -> &[Tier] {
        self.categories
            .get(&category)
            .map(|tiers| tiers.as_slice())
            .unwrap_or(&[])
    }

    pub fn tier(&self, category: Category, index: usize) -> Option<&Tier> {
        self.tiers(category).get(index)
    }

    pub fn tier_count(&self, category: Category) -> usize {
        self.tiers(category).len()
    }

    /// Categories present in the catalog, in catalog order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.keys().copied()
    }
}

/// An active pool: merged tiers of one category, in catalog order
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCharset {
    category: Option<Category>,
    tier: usize,
    entries: IndexMap<String, Answer>,
}

impl ActiveCharset {
    pub fn new(category: Option<Category>, tier: usize, entries: IndexMap<String, Answer>) -> Self {
        Self {
            category,
            tier,
            entries,
        }
    }

    pub fn empty() -> Self {
        Self::new(None, 0, IndexMap::new())
    }

    /// Category the pool was resolved for, `None` for an unknown category
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Highest tier index requested for this pool
    pub fn tier(&self) -> usize {
        self.tier
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, character: &str) -> bool {
        self.entries.contains_key(character)
    }

    pub fn get(&self, character: &str) -> Option<&Answer> {
        self.entries.get(character)
    }

    /// Characters in pool iteration order
    pub fn characters(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("hiragana".parse::<Category>().unwrap(), Category::Hiragana);
        assert_eq!("Numbers".parse::<Category>().unwrap(), Category::Numbers);
        assert!("klingon".parse::<Category>().is_err());
    }

    #[test]
    fn test_catalog_answer_shapes() {
        let text: CatalogAnswer = serde_json::from_str("\"ka\"").unwrap();
        assert_eq!(text, CatalogAnswer::Text("ka".to_string()));

        let number: CatalogAnswer =
            serde_json::from_str(r#"{"latin":"1","romaji":"ichi"}"#).unwrap();
        assert_eq!(
            Answer::from(&number),
            Answer::number("ichi", "1")
        );
    }

    #[test]
    fn test_expected_answer() {
        assert_eq!(Answer::simple("shi").expected(), "shi");
        assert_eq!(Answer::number("ni", "2").expected(), "ni");
        assert_eq!(Answer::number("ni", "2").gloss(), Some("2"));
        assert_eq!(Answer::simple("shi").gloss(), None);
    }
}
