use crate::core::{Category, PantryError, Recipe, RecipeId};
use crate::sources::{CorpusBatch, NewRecipe};
use serde::Serialize;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{FromRow, SqlitePool};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
}

#[derive(FromRow)]
struct RecipeRow {
    id: i64,
    title_en: String,
    title_it: Option<String>,
    ingredients_en: String,
    ingredients_it: Option<String>,
    instructions_en: String,
    instructions_it: Option<String>,
    vegetarian: bool,
    vegan: bool,
    category: String,
    prep_time: Option<i64>,
    cook_time: Option<i64>,
    image_url: Option<String>,
    source_url: Option<String>,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = PantryError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let list = |s: Option<String>| -> Result<Option<Vec<String>>, PantryError> {
            s.map(|s| serde_json::from_str(&s)).transpose().map_err(Into::into)
        };

        let category = Category::from_str(&row.category).unwrap_or_else(|_| {
            warn!("Recipe {} has unknown category '{}'", row.id, row.category);
            Category::default()
        });

        Ok(Recipe {
            id: row.id,
            title_en: row.title_en,
            title_it: row.title_it,
            ingredients_en: serde_json::from_str(&row.ingredients_en)?,
            ingredients_it: list(row.ingredients_it)?,
            instructions_en: serde_json::from_str(&row.instructions_en)?,
            instructions_it: list(row.instructions_it)?,
            vegetarian: row.vegetarian,
            vegan: row.vegan,
            category,
            prep_time: row.prep_time.and_then(|t| u32::try_from(t).ok()),
            cook_time: row.cook_time.and_then(|t| u32::try_from(t).ok()),
            image_url: row.image_url,
            source_url: row.source_url,
        })
    }
}

const RECIPE_COLUMNS: &str = "id, title_en, title_it, ingredients_en, ingredients_it, \
    instructions_en, instructions_it, vegetarian, vegan, category, prep_time, cook_time, \
    image_url, source_url";

pub struct RecipeStore {
    pub db: SqlitePool,
}

impl RecipeStore {
    pub async fn open(path: &Path) -> Result<Self, PantryError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let db = SqlitePool::connect_with(options).await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title_en TEXT NOT NULL,
                title_it TEXT,
                ingredients_en TEXT NOT NULL,
                ingredients_it TEXT,
                instructions_en TEXT NOT NULL,
                instructions_it TEXT,
                vegetarian BOOLEAN NOT NULL DEFAULT 0,
                vegan BOOLEAN NOT NULL DEFAULT 0,
                category TEXT NOT NULL DEFAULT 'quick-meals',
                prep_time INTEGER,
                cook_time INTEGER,
                image_url TEXT,
                source_url TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_recipes_title_en ON recipes (title_en);
            CREATE TABLE IF NOT EXISTS favorites (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes (id),
                session_id TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (recipe_id, session_id)
            );",
        )
        .execute(&db)
        .await?;

        Ok(Self { db })
    }

    /// Inserts new recipes and updates existing ones matched by English
    /// title, in a single transaction.
    pub async fn import(&self, batch: &CorpusBatch) -> Result<ImportReport, PantryError> {
        let mut report = ImportReport {
            skipped: batch.skipped,
            ..Default::default()
        };
        let mut tx = self.db.begin().await?;

        for recipe in &batch.recipes {
            let existing: Option<(i64,)> =
                sqlx::query_as("SELECT id FROM recipes WHERE title_en = ? ORDER BY id LIMIT 1")
                    .bind(&recipe.title_en)
                    .fetch_optional(&mut *tx)
                    .await?;

            let encoded = Encoded::new(recipe)?;

            match existing {
                Some((id,)) => {
                    // Italian fields are only replaced when the new record has them
                    sqlx::query(
                        "UPDATE recipes SET ingredients_en = ?, instructions_en = ?,
                            vegetarian = ?, vegan = ?, category = ?, prep_time = ?,
                            cook_time = ?, image_url = ?, source_url = ?,
                            title_it = COALESCE(?, title_it),
                            ingredients_it = COALESCE(?, ingredients_it),
                            instructions_it = COALESCE(?, instructions_it)
                         WHERE id = ?",
                    )
                    .bind(&encoded.ingredients_en)
                    .bind(&encoded.instructions_en)
                    .bind(recipe.vegetarian)
                    .bind(recipe.vegan)
                    .bind(recipe.category.slug())
                    .bind(recipe.prep_time)
                    .bind(recipe.cook_time)
                    .bind(&recipe.image_url)
                    .bind(&recipe.source_url)
                    .bind(&recipe.title_it)
                    .bind(&encoded.ingredients_it)
                    .bind(&encoded.instructions_it)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                    debug!("Updated recipe {}: {}", id, recipe.title_en);
                    report.updated += 1;
                }
                None => {
                    sqlx::query(
                        "INSERT INTO recipes (title_en, title_it, ingredients_en, ingredients_it,
                            instructions_en, instructions_it, vegetarian, vegan, category,
                            prep_time, cook_time, image_url, source_url)
                         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                    )
                    .bind(&recipe.title_en)
                    .bind(&recipe.title_it)
                    .bind(&encoded.ingredients_en)
                    .bind(&encoded.ingredients_it)
                    .bind(&encoded.instructions_en)
                    .bind(&encoded.instructions_it)
                    .bind(recipe.vegetarian)
                    .bind(recipe.vegan)
                    .bind(recipe.category.slug())
                    .bind(recipe.prep_time)
                    .bind(recipe.cook_time)
                    .bind(&recipe.image_url)
                    .bind(&recipe.source_url)
                    .execute(&mut *tx)
                    .await?;
                    debug!("Added recipe: {}", recipe.title_en);
                    report.added += 1;
                }
            }
        }

        tx.commit().await?;
        info!(
            "Import finished: {} added, {} updated, {} skipped",
            report.added, report.updated, report.skipped
        );
        Ok(report)
    }

    pub async fn count(&self) -> Result<i64, PantryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }

    /// All recipes in id order, optionally only vegetarian ones.
    pub async fn recipes(&self, vegetarian_only: bool) -> Result<Vec<Recipe>, PantryError> {
        let sql = if vegetarian_only {
            format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE vegetarian = 1 ORDER BY id")
        } else {
            format!("SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY id")
        };

        let rows: Vec<RecipeRow> = sqlx::query_as(&sql).fetch_all(&self.db).await?;
        rows.into_iter().map(Recipe::try_from).collect()
    }

    pub async fn recipe(&self, id: RecipeId) -> Result<Recipe, PantryError> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?");
        let row: Option<RecipeRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        row.ok_or(PantryError::RecipeNotFound(id))?.try_into()
    }

    pub async fn add_favorite(&self, id: RecipeId, session: &str) -> Result<(), PantryError> {
        let mut tx = self.db.begin().await?;

        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM recipes WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(PantryError::RecipeNotFound(id));
        }

        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO favorites (recipe_id, session_id) VALUES (?, ?)",
        )
        .bind(id)
        .bind(session)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            return Err(PantryError::AlreadyFavorite(id));
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn remove_favorite(&self, id: RecipeId, session: &str) -> Result<(), PantryError> {
        let removed = sqlx::query("DELETE FROM favorites WHERE recipe_id = ? AND session_id = ?")
            .bind(id)
            .bind(session)
            .execute(&self.db)
            .await?;

        if removed.rows_affected() == 0 {
            return Err(PantryError::FavoriteNotFound(id));
        }
        Ok(())
    }

    pub async fn favorite_ids(&self, session: &str) -> Result<HashSet<RecipeId>, PantryError> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT recipe_id FROM favorites WHERE session_id = ?")
            .bind(session)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Favorite recipes for a session, oldest favorite first.
    pub async fn favorites(&self, session: &str) -> Result<Vec<Recipe>, PantryError> {
        let sql = format!(
            "SELECT {} FROM recipes r JOIN favorites f ON f.recipe_id = r.id \
             WHERE f.session_id = ? ORDER BY f.id",
            RECIPE_COLUMNS
                .split(", ")
                .map(|c| format!("r.{}", c.trim()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let rows: Vec<RecipeRow> = sqlx::query_as(&sql)
            .bind(session)
            .fetch_all(&self.db)
            .await?;

        rows.into_iter().map(Recipe::try_from).collect()
    }
}

/// List columns are stored as JSON text.
struct Encoded {
    ingredients_en: String,
    ingredients_it: Option<String>,
    instructions_en: String,
    instructions_it: Option<String>,
}

impl Encoded {
    fn new(recipe: &NewRecipe) -> Result<Self, PantryError> {
        let optional = |list: &Option<Vec<String>>| -> Result<Option<String>, PantryError> {
            list.as_ref()
                .map(serde_json::to_string)
                .transpose()
                .map_err(Into::into)
        };

        Ok(Self {
            ingredients_en: serde_json::to_string(&recipe.ingredients_en)?,
            ingredients_it: optional(&recipe.ingredients_it)?,
            instructions_en: serde_json::to_string(&recipe.instructions_en)?,
            instructions_it: optional(&recipe.instructions_it)?,
        })
    }
}
