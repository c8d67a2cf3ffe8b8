use crate::core::{Category, PantryError};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Steps {
    Text(String),
    List(Vec<String>),
}

impl Steps {
    fn into_lines(self) -> Vec<String> {
        let lines = match self {
            Steps::Text(text) => text.lines().map(str::to_string).collect(),
            Steps::List(list) => list,
        };
        clean_lines(lines)
    }
}

fn clean_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// A record as it appears in a corpus file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecipe {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub instructions: Option<Steps>,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    pub category: Option<String>,
    pub title_it: Option<String>,
    pub ingredients_it: Option<Vec<String>>,
    pub instructions_it: Option<Steps>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
}

/// A validated record ready to be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub title_en: String,
    pub title_it: Option<String>,
    pub ingredients_en: Vec<String>,
    pub ingredients_it: Option<Vec<String>>,
    pub instructions_en: Vec<String>,
    pub instructions_it: Option<Vec<String>>,
    pub vegetarian: bool,
    pub vegan: bool,
    pub category: Category,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
}

impl TryFrom<RawRecipe> for NewRecipe {
    type Error = String;

    fn try_from(raw: RawRecipe) -> Result<Self, Self::Error> {
        let title = raw.title.trim().to_string();
        let ingredients = clean_lines(raw.ingredients);
        let instructions = raw.instructions.map(Steps::into_lines).unwrap_or_default();

        if title.is_empty() || ingredients.is_empty() || instructions.is_empty() {
            return Err(format!("incomplete recipe '{}'", title));
        }

        let category = match raw.category.as_deref() {
            None => Category::default(),
            Some(slug) => slug.parse().unwrap_or_else(|_| {
                warn!("Unknown category '{}' for '{}', using default", slug, title);
                Category::default()
            }),
        };

        let non_empty = |s: Option<String>| s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        Ok(Self {
            title_en: title,
            title_it: non_empty(raw.title_it),
            ingredients_en: ingredients,
            ingredients_it: raw.ingredients_it.map(clean_lines).filter(|l| !l.is_empty()),
            instructions_en: instructions,
            instructions_it: raw
                .instructions_it
                .map(Steps::into_lines)
                .filter(|l| !l.is_empty()),
            // Vegan implies vegetarian
            vegetarian: raw.vegetarian || raw.vegan,
            vegan: raw.vegan,
            category,
            prep_time: raw.prep_time,
            cook_time: raw.cook_time,
            image_url: non_empty(raw.image_url),
            source_url: non_empty(raw.source_url),
        })
    }
}

#[derive(Debug, Default)]
pub struct CorpusBatch {
    pub recipes: Vec<NewRecipe>,
    pub skipped: usize,
}

impl CorpusBatch {
    fn push(&mut self, raw: Result<RawRecipe, String>, origin: &Path) {
        match raw.and_then(NewRecipe::try_from) {
            Ok(recipe) => self.recipes.push(recipe),
            Err(reason) => {
                warn!("Skipping record in {}: {}", origin.display(), reason);
                self.skipped += 1;
            }
        }
    }
}

pub struct SourceManager {
    path: PathBuf,
}

impl SourceManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads a JSON corpus file, or walks a directory of JSON and TOML
    /// recipe files. Malformed records are counted, not fatal.
    pub fn load(&self) -> Result<CorpusBatch, PantryError> {
        let mut batch = CorpusBatch::default();

        if self.path.is_file() {
            load_file(&self.path, &mut batch, true)?;
        } else if self.path.is_dir() {
            for entry in WalkDir::new(&self.path)
                .min_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() {
                    load_file(entry.path(), &mut batch, false)?;
                }
            }
        } else {
            return Err(PantryError::CorpusError(format!(
                "{} does not exist",
                self.path.display()
            )));
        }

        info!(
            "Loaded {} recipes from {} ({} skipped)",
            batch.recipes.len(),
            self.path.display(),
            batch.skipped
        );
        Ok(batch)
    }
}

/// With `strict`, an unreadable JSON document is an error. Otherwise it is
/// skipped like a broken TOML file.
fn load_file(path: &Path, batch: &mut CorpusBatch, strict: bool) -> Result<(), PantryError> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let content = std::fs::read_to_string(path)?;
            let parsed = serde_json::from_str::<Value>(&content)
                .map_err(PantryError::from)
                .and_then(|document| records(document, path));
            let list = match parsed {
                Ok(list) => list,
                Err(e) if strict => return Err(e),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    batch.skipped += 1;
                    return Ok(());
                }
            };
            for record in list {
                batch.push(
                    serde_json::from_value::<RawRecipe>(record).map_err(|e| e.to_string()),
                    path,
                );
            }
        }
        Some("toml") => {
            let content = std::fs::read_to_string(path)?;
            batch.push(
                toml::from_str::<RawRecipe>(&content).map_err(|e| e.to_string()),
                path,
            );
        }
        _ => {}
    }
    Ok(())
}

/// Accepts either `{"recipes": [...]}` or a bare array.
fn records(document: Value, path: &Path) -> Result<Vec<Value>, PantryError> {
    match document {
        Value::Array(list) => Ok(list),
        Value::Object(mut map) => match map.remove("recipes") {
            Some(Value::Array(list)) => Ok(list),
            _ => Err(PantryError::CorpusError(format!(
                "{}: expected a 'recipes' array",
                path.display()
            ))),
        },
        _ => Err(PantryError::CorpusError(format!(
            "{}: expected an array of recipes",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CORPUS: &str = r#"{
        "recipes": [
            {
                "title": "Pad Thai",
                "ingredients": ["rice noodles", "shrimp", "peanuts"],
                "instructions": "Soak noodles.\nStir fry.\n",
                "category": "quick-meals"
            },
            {
                "title": "Vegan Chili",
                "ingredients": ["beans", "tomatoes"],
                "instructions": ["Simmer."],
                "vegan": true,
                "category": "comfort-food",
                "title_it": "Chili vegano",
                "image_url": ""
            },
            { "title": "", "ingredients": ["nothing"], "instructions": "x" },
            { "title": "No Steps", "ingredients": ["salt"] },
            { "title": 42 }
        ]
    }"#;

    #[test]
    fn test_loads_json_and_skips_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        fs::write(&path, CORPUS).unwrap();

        let batch = SourceManager::new(path).load().unwrap();
        assert_eq!(batch.recipes.len(), 2);
        assert_eq!(batch.skipped, 3);

        let pad_thai = &batch.recipes[0];
        assert_eq!(pad_thai.instructions_en, vec!["Soak noodles.", "Stir fry."]);
        assert!(!pad_thai.vegetarian);

        let chili = &batch.recipes[1];
        assert!(chili.vegan && chili.vegetarian);
        assert_eq!(chili.category, Category::QuickMeals);
        assert_eq!(chili.title_it.as_deref(), Some("Chili vegano"));
        assert_eq!(chili.image_url, None);
    }

    #[test]
    fn test_walks_directory_of_toml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a_risotto.toml"),
            r#"
title = "Mushroom Risotto"
title_it = "Risotto ai funghi"
ingredients = ["arborio rice", "mushroom", "parmesan"]
instructions = ["Toast rice.", "Add broth slowly."]
vegetarian = true
category = "italian-traditions"
"#,
        )
        .unwrap();
        fs::write(dir.path().join("b_broken.toml"), "title = ").unwrap();
        fs::write(dir.path().join("c_more.json"), r#"[{"title": "Toast", "ingredients": ["bread"], "instructions": "Toast it."}]"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let batch = SourceManager::new(dir.path().to_path_buf()).load().unwrap();
        let titles: Vec<_> = batch.recipes.iter().map(|r| r.title_en.as_str()).collect();
        assert_eq!(titles, vec!["Mushroom Risotto", "Toast"]);
        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.recipes[0].category, Category::ItalianTraditions);
    }

    #[test]
    fn test_broken_json_in_directory_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"[{"title": "Toast", "ingredients": ["bread"], "instructions": "Toast it."}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("b.json"), "{ not json").unwrap();
        fs::write(dir.path().join("c.toml"), "title = ").unwrap();
        fs::write(dir.path().join("d.json"), r#"{"items": []}"#).unwrap();

        let batch = SourceManager::new(dir.path().to_path_buf()).load().unwrap();
        assert_eq!(batch.recipes.len(), 1);
        assert_eq!(batch.recipes[0].title_en, "Toast");
        assert_eq!(batch.skipped, 3);

        let single = SourceManager::new(dir.path().join("b.json")).load();
        assert!(matches!(single, Err(PantryError::JsonError(_))));
    }

    #[test]
    fn test_blank_italian_lists_are_absent() {
        let raw: RawRecipe = serde_json::from_str(
            r#"{
                "title": "Toast",
                "ingredients": ["bread"],
                "ingredients_it": ["  ", ""],
                "instructions": "Toast it.",
                "instructions_it": ["", " "]
            }"#,
        )
        .unwrap();
        let recipe = NewRecipe::try_from(raw).unwrap();
        assert_eq!(recipe.ingredients_it, None);
        assert_eq!(recipe.instructions_it, None);

        let raw: RawRecipe = serde_json::from_str(
            r#"{"title": "Toast", "ingredients": ["bread"], "instructions": "x", "ingredients_it": [" pane ", ""]}"#,
        )
        .unwrap();
        let recipe = NewRecipe::try_from(raw).unwrap();
        assert_eq!(recipe.ingredients_it, Some(vec!["pane".to_string()]));
    }

    #[test]
    fn test_rejects_bad_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        fs::write(&path, r#"{"items": []}"#).unwrap();

        let err = SourceManager::new(path).load().unwrap_err();
        assert!(matches!(err, PantryError::CorpusError(_)));

        let missing = SourceManager::new(dir.path().join("nope.json")).load();
        assert!(missing.is_err());
    }
}
