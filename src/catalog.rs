use crate::assembler::LocalizedRecipe;
use crate::core::{Category, Lang, Recipe};
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<Category>,
    /// 1-based.
    pub page: usize,
    pub per_page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub recipes: Vec<LocalizedRecipe>,
    pub page: usize,
    pub pages: usize,
    pub total: usize,
}

fn matches_search(recipe: &Recipe, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    let hit = |s: &str| s.to_lowercase().contains(&needle);

    hit(&recipe.title_en)
        || recipe.title_it.as_deref().is_some_and(hit)
        || recipe.ingredients_en.iter().any(|i| hit(i))
        || recipe
            .ingredients_it
            .iter()
            .flatten()
            .any(|i| hit(i))
}

fn matches_category(recipe: &Recipe, category: Category) -> bool {
    match category {
        Category::Vegetarian => recipe.vegetarian,
        Category::Vegan => recipe.vegan,
        // Anything with an Italian title counts as a tradition
        Category::ItalianTraditions => {
            recipe.category == Category::ItalianTraditions || recipe.title_it.is_some()
        }
        other => recipe.category == other,
    }
}

pub fn page(corpus: &[Recipe], query: &CatalogQuery, lang: Lang) -> CatalogPage {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut selected: Vec<&Recipe> = corpus
        .iter()
        .filter(|r| search.map_or(true, |s| matches_search(r, s)))
        .filter(|r| query.category.map_or(true, |c| matches_category(r, c)))
        .collect();

    selected.sort_by_key(|r| r.title(lang).to_lowercase());

    let per_page = query.per_page.max(1);
    let total = selected.len();
    let pages = total.div_ceil(per_page);
    let page = query.page.max(1).min(pages.max(1));

    let recipes = selected
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .map(|r| LocalizedRecipe::new(r, lang))
        .collect();

    CatalogPage {
        recipes,
        page,
        pages,
        total,
    }
}
