//! Static vocabulary tables.
//!
//! A [`VocabularySet`] is built once at startup, either from the built-in
//! tables or from a JSON file, and shared read-only afterwards. Entry order
//! inside a category is the order the entries were declared in.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A vocabulary topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Greetings,
    Numbers,
    Colors,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Category; 3] = [Category::Greetings, Category::Numbers, Category::Colors];

    /// Lookup key, also used inside callback payloads.
    pub fn key(self) -> &'static str {
        match self {
            Self::Greetings => "greetings",
            Self::Numbers => "numbers",
            Self::Colors => "colors",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Greetings => "Greetings",
            Self::Numbers => "Numbers",
            Self::Colors => "Colors",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Greetings => "👋",
            Self::Numbers => "🔢",
            Self::Colors => "🎨",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A category name that is not one of [`Category::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Errors that can occur when loading a vocabulary file.
#[derive(Debug)]
pub enum VocabularyError {
    /// Failed to read the vocabulary file.
    ReadFile { path: PathBuf, source: std::io::Error },
    /// Failed to parse JSON (includes unknown category keys).
    ParseJson(serde_json::Error),
    /// A term was empty or whitespace.
    EmptyTerm(Category),
}

impl fmt::Display for VocabularyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFile { path, source } => {
                write!(f, "failed to read vocabulary file '{}': {}", path.display(), source)
            }
            Self::ParseJson(source) => write!(f, "failed to parse vocabulary: {}", source),
            Self::EmptyTerm(category) => write!(f, "empty term in category '{}'", category),
        }
    }
}

impl std::error::Error for VocabularyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFile { source, .. } => Some(source),
            Self::ParseJson(source) => Some(source),
            Self::EmptyTerm(_) => None,
        }
    }
}

const GREETINGS: &[(&str, &str)] = &[
    ("Ciao", "Hello/Hi"),
    ("Buongiorno", "Good morning"),
    ("Buonasera", "Good evening"),
    ("Arrivederci", "Goodbye"),
    ("Grazie", "Thank you"),
    ("Prego", "You're welcome"),
];

const NUMBERS: &[(&str, &str)] = &[
    ("Uno", "One"),
    ("Due", "Two"),
    ("Tre", "Three"),
    ("Quattro", "Four"),
    ("Cinque", "Five"),
];

const COLORS: &[(&str, &str)] = &[
    ("Rosso", "Red"),
    ("Blu", "Blue"),
    ("Verde", "Green"),
    ("Giallo", "Yellow"),
    ("Nero", "Black"),
];

/// Immutable mapping from category to ordered {term -> gloss} pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularySet {
    categories: IndexMap<Category, IndexMap<String, String>>,
}

impl VocabularySet {
    /// The Italian -> English tables the bot ships with.
    pub fn builtin() -> Self {
        let table = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(term, gloss)| (term.to_string(), gloss.to_string()))
                .collect::<IndexMap<_, _>>()
        };

        let mut categories = IndexMap::new();
        categories.insert(Category::Greetings, table(GREETINGS));
        categories.insert(Category::Numbers, table(NUMBERS));
        categories.insert(Category::Colors, table(COLORS));
        Self { categories }
    }

    /// Parse a vocabulary from JSON of the form
    /// `{"greetings": {"Ciao": "Hello/Hi"}, ...}`.
    ///
    /// Categories missing from the document are empty.
    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let categories: IndexMap<Category, IndexMap<String, String>> =
            serde_json::from_str(json).map_err(VocabularyError::ParseJson)?;

        for (category, entries) in &categories {
            if entries.keys().any(|term| term.trim().is_empty()) {
                return Err(VocabularyError::EmptyTerm(*category));
            }
        }

        Ok(Self { categories })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| VocabularyError::ReadFile { path: path.to_path_buf(), source: e })?;
        Self::from_json(&content)
    }

    /// Entries of a category as `(term, gloss)`, in declared order.
    pub fn entries(&self, category: Category) -> impl Iterator<Item = (&str, &str)> {
        self.categories
            .get(&category)
            .into_iter()
            .flat_map(|entries| entries.iter().map(|(t, g)| (t.as_str(), g.as_str())))
    }

    pub fn first_entry(&self, category: Category) -> Option<(&str, &str)> {
        self.entries(category).next()
    }

    pub fn len(&self, category: Category) -> usize {
        self.categories.get(&category).map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(IndexMap::is_empty)
    }
}
