use crate::core::{Category, Lang, Recipe, RecipeId};
use serde::Serialize;
use std::collections::HashSet;

pub const DEFAULT_EMOJI: &str = "🍽️";
pub const DEFAULT_IMAGE: &str = "static/images/default.jpg";

// First keyword found in the title wins
const EMOJI_KEYWORDS: &[(&str, &str)] = &[
    ("pizza", "🍕"),
    ("pasta", "🍝"),
    ("salad", "🥗"),
    ("soup", "🥣"),
    ("cake", "🍰"),
    ("bread", "🍞"),
    ("fish", "🐟"),
    ("chicken", "🍗"),
    ("rice", "🍚"),
    ("sandwich", "🥪"),
    ("burger", "🍔"),
    ("steak", "🥩"),
    ("cookie", "🍪"),
    ("pie", "🥧"),
    ("egg", "🍳"),
    ("sushi", "🍱"),
    ("taco", "🌮"),
    ("burrito", "🌯"),
];

pub fn emoji_for(title: &str) -> &'static str {
    let title = title.to_lowercase();
    EMOJI_KEYWORDS
        .iter()
        .find(|(keyword, _)| title.contains(*keyword))
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

/// Image to show for a recipe; missing and placeholder URLs use the default.
pub fn image_for(recipe: &Recipe) -> &str {
    match recipe.image_url.as_deref() {
        Some(url) if !url.trim().is_empty() && !url.contains("example.com") => url,
        _ => DEFAULT_IMAGE,
    }
}

/// Recipe display data in one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedRecipe {
    pub id: RecipeId,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub emoji: &'static str,
    pub vegetarian: bool,
    pub vegan: bool,
    pub category: Category,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub image_url: String,
    pub source_url: Option<String>,
}

impl LocalizedRecipe {
    pub fn new(recipe: &Recipe, lang: Lang) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title(lang).to_string(),
            ingredients: recipe.ingredients(lang).to_vec(),
            instructions: recipe.instructions(lang).to_vec(),
            // Tags are keyed on the English title regardless of language
            emoji: emoji_for(&recipe.title_en),
            vegetarian: recipe.vegetarian,
            vegan: recipe.vegan,
            category: recipe.category,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            image_url: image_for(recipe).to_string(),
            source_url: recipe.source_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeMatch {
    #[serde(flatten)]
    pub recipe: LocalizedRecipe,
    pub match_percentage: f64,
    pub missing_ingredients: Vec<String>,
    pub is_favorite: bool,
}

pub fn assemble(
    recipe: &Recipe,
    lang: Lang,
    match_percentage: f64,
    missing_ingredients: Vec<String>,
    favorites: &HashSet<RecipeId>,
) -> RecipeMatch {
    RecipeMatch {
        recipe: LocalizedRecipe::new(recipe, lang),
        match_percentage,
        missing_ingredients,
        is_favorite: favorites.contains(&recipe.id),
    }
}
