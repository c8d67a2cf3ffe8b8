use crate::assembler::{assemble, RecipeMatch};
use crate::core::{Lang, PantryError, Recipe, RecipeId};
use crate::matcher::match_terms;
use crate::normalizer::Normalizer;
use crate::ranker::rank_by;
use crate::translations::TranslationTable;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub ingredients: Vec<String>,
    pub vegetarian_only: bool,
    pub lang: Lang,
}

impl SearchRequest {
    /// Builds a request from raw arguments, each of which may hold several
    /// comma-separated ingredients.
    pub fn from_args(args: &[String], vegetarian_only: bool, lang: Lang) -> Self {
        let ingredients = args
            .iter()
            .flat_map(|arg| arg.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            ingredients,
            vegetarian_only,
            lang,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<RecipeMatch>),
    NoMatches,
}

pub struct SearchEngine<'t> {
    table: &'t TranslationTable,
    normalizer: Normalizer<'t>,
}

impl<'t> SearchEngine<'t> {
    pub fn new(table: &'t TranslationTable) -> Self {
        Self {
            table,
            normalizer: Normalizer::new(table),
        }
    }

    /// Canonical match keys for the request, blank and duplicate terms removed.
    pub fn user_terms(&self, request: &SearchRequest) -> Result<Vec<String>, PantryError> {
        let mut seen = HashSet::new();
        let terms: Vec<String> = request
            .ingredients
            .iter()
            .map(|raw| self.normalizer.match_key(raw, request.lang))
            .filter(|key| !key.is_empty())
            .filter(|key| seen.insert(key.clone()))
            .collect();

        if terms.is_empty() {
            return Err(PantryError::NoIngredients);
        }
        Ok(terms)
    }

    pub fn search(
        &self,
        request: &SearchRequest,
        corpus: &[Recipe],
        favorites: &HashSet<RecipeId>,
    ) -> Result<SearchOutcome, PantryError> {
        let terms = self.user_terms(request)?;
        debug!(?terms, lang = %request.lang, "matching against {} recipes", corpus.len());

        let mut results = Vec::new();
        for recipe in corpus {
            if request.vegetarian_only && !recipe.vegetarian {
                continue;
            }

            // Matching always runs against the canonical English list
            let recipe_terms: Vec<String> = recipe
                .ingredients_en
                .iter()
                .map(|line| self.normalizer.normalize(line, Lang::En).term)
                .collect();

            let found = match_terms(&terms, &recipe_terms);
            let percentage = match found.percentage() {
                Some(p) if found.is_match() => p,
                _ => continue,
            };
            debug!(
                recipe = recipe.id,
                matched = found.matched_count,
                "{:.1}% of terms matched",
                percentage
            );

            let missing = found
                .missing
                .iter()
                .map(|term| self.localize(term, request.lang))
                .collect();

            results.push(assemble(recipe, request.lang, percentage, missing, favorites));
        }

        if results.is_empty() {
            return Ok(SearchOutcome::NoMatches);
        }

        rank_by(&mut results, |r| r.match_percentage);
        Ok(SearchOutcome::Found(results))
    }

    fn localize(&self, term: &str, lang: Lang) -> String {
        match lang {
            Lang::En => term.to_string(),
            _ => self.table.translate(term, Lang::En, lang),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::recipe;

    fn request(terms: &[&str], lang: Lang) -> SearchRequest {
        SearchRequest {
            ingredients: terms.iter().map(|s| s.to_string()).collect(),
            vegetarian_only: false,
            lang,
        }
    }

    fn found(outcome: SearchOutcome) -> Vec<RecipeMatch> {
        match outcome {
            SearchOutcome::Found(results) => results,
            SearchOutcome::NoMatches => panic!("expected matches"),
        }
    }

    #[test]
    fn test_full_match_scenario() {
        let table = TranslationTable::builtin();
        let engine = SearchEngine::new(&table);
        let corpus = vec![recipe(
            1,
            "Chicken Fried Rice",
            &["chicken breast", "jasmine rice", "soy sauce"],
        )];

        let results = found(
            engine
                .search(&request(&["chicken", "rice"], Lang::En), &corpus, &HashSet::new())
                .unwrap(),
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_percentage, 100.0);
        assert!(results[0].missing_ingredients.is_empty());
    }

    #[test]
    fn test_zero_match_recipes_are_excluded() {
        let table = TranslationTable::builtin();
        let engine = SearchEngine::new(&table);
        let corpus = vec![
            recipe(1, "Grilled Chicken", &["chicken breast"]),
            recipe(2, "Mapo Tofu", &["tofu", "chili"]),
        ];

        let results = found(
            engine
                .search(&request(&["tofu"], Lang::En), &corpus, &HashSet::new())
                .unwrap(),
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe.id, 2);

        let outcome = engine
            .search(&request(&["saffron"], Lang::En), &corpus, &HashSet::new())
            .unwrap();
        assert_eq!(outcome, SearchOutcome::NoMatches);
    }

    #[test]
    fn test_italian_query_against_english_only_recipe() {
        let table = TranslationTable::builtin();
        let engine = SearchEngine::new(&table);
        let corpus = vec![recipe(1, "Roast Chicken", &["2 chicken breast", "1 tsp salt"])];

        let results = found(
            engine
                .search(&request(&["pollo", "zafferano"], Lang::It), &corpus, &HashSet::new())
                .unwrap(),
        );
        assert_eq!(results[0].match_percentage, 50.0);
        assert_eq!(results[0].missing_ingredients, vec!["zafferano"]);
    }

    #[test]
    fn test_italian_recipe_list_does_not_affect_matching() {
        let table = TranslationTable::builtin();
        let engine = SearchEngine::new(&table);
        let mut r = recipe(1, "Lentil Soup", &["lentils", "carrot", "onion"]);
        r.ingredients_it = Some(vec!["lenticchie".into(), "carota".into(), "cipolla".into()]);

        let results = found(
            engine
                .search(&request(&["lenticchie", "aglio"], Lang::It), &[r], &HashSet::new())
                .unwrap(),
        );
        assert_eq!(results[0].match_percentage, 50.0);
        // Missing terms come back in the request language
        assert_eq!(results[0].missing_ingredients, vec!["aglio"]);
        assert_eq!(results[0].recipe.ingredients, vec!["lenticchie", "carota", "cipolla"]);
    }

    #[test]
    fn test_missing_translated_for_italian() {
        let table = TranslationTable::builtin();
        let engine = SearchEngine::new(&table);
        let corpus = vec![recipe(1, "Garlic Bread", &["bread", "garlic"])];

        let results = found(
            engine
                .search(&request(&["garlic", "butter"], Lang::It), &corpus, &HashSet::new())
                .unwrap(),
        );
        assert_eq!(results[0].missing_ingredients, vec!["burro"]);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let table = TranslationTable::builtin();
        let engine = SearchEngine::new(&table);
        let corpus = vec![
            recipe(10, "Tomato Soup", &["tomatoes", "onion"]),
            recipe(11, "Caprese", &["tomatoes", "mozzarella", "basil"]),
            recipe(12, "Bruschetta", &["bread", "tomatoes", "basil"]),
        ];

        let req = request(&["tomato", "basil"], Lang::En);
        let first = found(engine.search(&req, &corpus, &HashSet::new()).unwrap());
        let ids: Vec<_> = first.iter().map(|r| r.recipe.id).collect();
        assert_eq!(ids, vec![11, 12, 10]);

        let second = found(engine.search(&req, &corpus, &HashSet::new()).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_blank_and_duplicate_terms() {
        let table = TranslationTable::builtin();
        let engine = SearchEngine::new(&table);

        let err = engine
            .search(&request(&["  ", "", "200 g"], Lang::En), &[], &HashSet::new())
            .unwrap_err();
        assert!(matches!(err, PantryError::NoIngredients));

        let terms = engine
            .user_terms(&request(&["Rice", "rice ", "pollo", "chicken"], Lang::En))
            .unwrap();
        assert_eq!(terms, vec!["rice", "pollo", "chicken"]);

        let terms = engine
            .user_terms(&request(&["pollo", "chicken"], Lang::It))
            .unwrap();
        assert_eq!(terms, vec!["chicken"]);
    }

    #[test]
    fn test_vegetarian_only_and_favorites() {
        let table = TranslationTable::builtin();
        let engine = SearchEngine::new(&table);
        let mut veggie = recipe(1, "Veggie Rice", &["rice", "peas"]);
        veggie.vegetarian = true;
        let corpus = vec![recipe(2, "Chicken Rice", &["rice", "chicken"]), veggie];
        let favorites: HashSet<RecipeId> = [1].into_iter().collect();

        let mut req = request(&["rice"], Lang::En);
        req.vegetarian_only = true;
        let results = found(engine.search(&req, &corpus, &favorites).unwrap());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe.id, 1);
        assert!(results[0].is_favorite);
    }

    #[test]
    fn test_percentages_in_range() {
        let table = TranslationTable::builtin();
        let engine = SearchEngine::new(&table);
        let corpus = vec![
            recipe(1, "A", &["flour", "eggs", "milk"]),
            recipe(2, "B", &["milk"]),
            recipe(3, "C", &["sugar"]),
        ];

        let results = found(
            engine
                .search(&request(&["milk", "eggs", "saffron"], Lang::En), &corpus, &HashSet::new())
                .unwrap(),
        );
        for r in &results {
            assert!(r.match_percentage > 0.0 && r.match_percentage <= 100.0);
        }
        assert!(results.iter().all(|r| r.recipe.id != 3));
    }

    #[test]
    fn test_request_from_args_splits_commas() {
        let args = vec!["chicken, rice".to_string(), " ".to_string(), "soy sauce".to_string()];
        let req = SearchRequest::from_args(&args, false, Lang::En);
        assert_eq!(req.ingredients, vec!["chicken", "rice", "soy sauce"]);
    }
}
