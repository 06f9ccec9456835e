/*!
 * Exact-match name index.
 *
 * `people.json` and `places.json` hold arrays of curated entries:
 *
 * ```json
 * [{ "name": "Mike", "culture": "English", "chinese": "迈克" }]
 * ```
 *
 * Lookups use the same keyword normalization as the rule translator.
 */

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::errors::InputError;
use crate::file_utils::FileManager;
use crate::rules::Category;
use crate::translator::{normalize_keyword, TransliterationRecord};

pub const PEOPLE_INDEX_FILE: &str = "people.json";
pub const PLACES_INDEX_FILE: &str = "places.json";

/// One curated entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub culture: String,
    pub chinese: String,
}

/// Name to entries, one map per category
#[derive(Debug, Clone, Default)]
pub struct IndexTranslator {
    people: HashMap<String, Vec<IndexEntry>>,
    places: HashMap<String, Vec<IndexEntry>>,
}

impl IndexTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from in-memory entries
    pub fn from_entries(people: Vec<IndexEntry>, places: Vec<IndexEntry>) -> Self {
        let mut index = Self::new();
        for entry in people {
            index.insert(Category::People, entry);
        }
        for entry in places {
            index.insert(Category::Places, entry);
        }
        index
    }

    /// Load `people.json` and `places.json` from a directory
    pub fn load<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref();
        let people = read_entries(&directory.join(PEOPLE_INDEX_FILE))?;
        let places = read_entries(&directory.join(PLACES_INDEX_FILE))?;
        info!(
            "Index loaded from {:?}: {} people, {} places",
            directory,
            people.len(),
            places.len()
        );
        Ok(Self::from_entries(people, places))
    }

    pub fn insert(&mut self, category: Category, entry: IndexEntry) {
        let map = match category {
            Category::People => &mut self.people,
            Category::Places => &mut self.places,
        };
        map.entry(entry.name.clone()).or_default().push(entry);
    }

    /// People records, then Places records, for a keyword
    pub fn search(&self, word: &str) -> Result<Vec<TransliterationRecord>, InputError> {
        let keyword = normalize_keyword(word)?;
        let mut results = Vec::new();
        for (category, map) in [(Category::People, &self.people), (Category::Places, &self.places)] {
            for entry in map.get(&keyword).into_iter().flatten() {
                results.push(TransliterationRecord {
                    keyword: keyword.clone(),
                    language: entry.culture.clone(),
                    category,
                    chinese: entry.chinese.clone(),
                });
            }
        }
        Ok(results)
    }

    /// Number of distinct names per category
    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::People => self.people.len(),
            Category::Places => self.places.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.places.is_empty()
    }
}

fn read_entries(path: &Path) -> Result<Vec<IndexEntry>> {
    let text = FileManager::read_to_string(path)?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse index file: {:?}", path))
}
