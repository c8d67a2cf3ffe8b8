use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    It,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::It => "it",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ItalianTraditions,
    Healthy,
    #[default]
    QuickMeals,
    Vegetarian,
    Vegan,
    Desserts,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::ItalianTraditions,
        Category::Healthy,
        Category::QuickMeals,
        Category::Vegetarian,
        Category::Vegan,
        Category::Desserts,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::ItalianTraditions => "italian-traditions",
            Category::Healthy => "healthy",
            Category::QuickMeals => "quick-meals",
            Category::Vegetarian => "vegetarian",
            Category::Vegan => "vegan",
            Category::Desserts => "desserts",
        }
    }

    pub fn label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            // Same name in both languages
            (Category::ItalianTraditions, _) => "Tradizioni Italiane",
            (Category::Healthy, Lang::En) => "Healthy",
            (Category::Healthy, Lang::It) => "Salutare",
            (Category::QuickMeals, Lang::En) => "Quick Meals",
            (Category::QuickMeals, Lang::It) => "Pasti Veloci",
            (Category::Vegetarian, Lang::En) => "Vegetarian",
            (Category::Vegetarian, Lang::It) => "Vegetariano",
            (Category::Vegan, Lang::En) => "Vegan",
            (Category::Vegan, Lang::It) => "Vegano",
            (Category::Desserts, Lang::En) => "Desserts",
            (Category::Desserts, Lang::It) => "Dolci",
        }
    }
}

impl FromStr for Category {
    type Err = PantryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == slug)
            .ok_or_else(|| PantryError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

pub type RecipeId = i64;

/// A recipe as held in the store. English fields are always present, Italian
/// ones are optional and resolved per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
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

impl Recipe {
    pub fn title(&self, lang: Lang) -> &str {
        match (lang, self.title_it.as_deref()) {
            (Lang::It, Some(title)) if !title.trim().is_empty() => title,
            _ => &self.title_en,
        }
    }

    pub fn ingredients(&self, lang: Lang) -> &[String] {
        pick_list(lang, &self.ingredients_en, self.ingredients_it.as_deref())
    }

    pub fn instructions(&self, lang: Lang) -> &[String] {
        pick_list(lang, &self.instructions_en, self.instructions_it.as_deref())
    }
}

fn pick_list<'a>(lang: Lang, en: &'a [String], it: Option<&'a [String]>) -> &'a [String] {
    match (lang, it) {
        (Lang::It, Some(list)) if !list.is_empty() => list,
        _ => en,
    }
}

#[derive(Error, Debug)]
pub enum PantryError {
    #[error("No ingredients provided")]
    NoIngredients,

    #[error("No matching recipes found")]
    NoMatches,

    #[error("Recipe {0} not found")]
    RecipeNotFound(RecipeId),

    #[error("Recipe {0} is already in favorites")]
    AlreadyFavorite(RecipeId),

    #[error("Recipe {0} is not in favorites")]
    FavoriteNotFound(RecipeId),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid corpus: {0}")]
    CorpusError(String),

    #[error("File system error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database failure: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config parsing error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl PantryError {
    /// Process exit status for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            PantryError::NoIngredients => 2,
            PantryError::NoMatches => 3,
            _ => 1,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::recipe;
    use super::*;

    #[test]
    fn test_fallback_is_per_field() {
        let mut r = recipe(1, "Pasta al Pomodoro", &["pasta", "tomatoes"]);
        r.title_it = Some("Pasta al pomodoro".to_string());
        r.ingredients_it = Some(vec![]);

        assert_eq!(r.title(Lang::It), "Pasta al pomodoro");
        assert_eq!(r.ingredients(Lang::It), &["pasta", "tomatoes"]);
        assert_eq!(r.instructions(Lang::It), &["Cook it."]);
        assert_eq!(r.title(Lang::En), "Pasta al Pomodoro");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "Italian-Traditions".parse::<Category>().unwrap(),
            Category::ItalianTraditions
        );
        assert!(matches!(
            "brunch".parse::<Category>(),
            Err(PantryError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_eq!(PantryError::NoIngredients.exit_code(), 2);
        assert_eq!(PantryError::NoMatches.exit_code(), 3);
        assert_eq!(PantryError::RecipeNotFound(1).exit_code(), 1);
    }
}
