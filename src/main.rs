mod assembler;
mod catalog;
mod config;
mod core;
mod matcher;
mod normalizer;
mod ranker;
mod search;
mod sources;
mod store;
mod translations;
mod ui;

use crate::assembler::LocalizedRecipe;
use crate::catalog::CatalogQuery;
use crate::config::ConfigManager;
use crate::core::{Category, Lang, PantryError, RecipeId};
use crate::normalizer::Normalizer;
use crate::search::{SearchEngine, SearchOutcome, SearchRequest};
use crate::sources::SourceManager;
use crate::store::RecipeStore;
use crate::translations::TranslationTable;
use crate::ui::{
    create_spinner, log_error, log_success, log_warning, print_banner, print_catalog,
    print_matches, print_recipe, print_recipe_list,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "pantry", version, about = "Find recipes from the ingredients you have")]
struct Cli {
    /// Directory holding the database and config.
    #[arg(long, global = true, env = "PANTRY_ROOT", default_value = "/var/lib/pantry")]
    root: PathBuf,

    /// Favorites owner; defaults to the session stored in the config.
    #[arg(long, global = true)]
    session: Option<String>,

    /// Print machine-readable JSON instead of formatted text.
    #[arg(long, global = true, action)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank recipes by how many of the given ingredients they use.
    Find {
        #[arg(required = true)]
        ingredients: Vec<String>,
        #[arg(long, action)]
        vegetarian: bool,
        #[arg(long, value_enum)]
        lang: Option<Lang>,
    },
    Import {
        path: PathBuf,
    },
    Show {
        id: RecipeId,
        #[arg(long, value_enum)]
        lang: Option<Lang>,
    },
    Browse {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        category: Option<Category>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, value_enum)]
        lang: Option<Lang>,
    },
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Translate an ingredient line, keeping quantity and unit.
    Translate {
        text: String,
        #[arg(long, value_enum, default_value = "it")]
        to: Lang,
        #[arg(long, value_enum)]
        from: Option<Lang>,
    },
    Config {
        #[arg(long, value_enum)]
        set_lang: Option<Lang>,
        #[arg(long)]
        set_page_size: Option<usize>,
        #[arg(long, action)]
        show: bool,
    },
}

#[derive(Subcommand)]
enum FavoriteAction {
    Add {
        id: RecipeId,
    },
    Remove {
        id: RecipeId,
    },
    List {
        #[arg(long, value_enum)]
        lang: Option<Lang>,
    },
}

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if !cli.json {
        print_banner();
    }

    if let Err(e) = run(cli).await {
        log_error(&e.to_string());
        let code = e
            .downcast_ref::<PantryError>()
            .map_or(1, PantryError::exit_code);
        exit(code);
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if !cli.root.exists() {
        tokio::fs::create_dir_all(&cli.root).await?;
    }

    let config_manager = ConfigManager::new(&cli.root);
    let mut config = config_manager.load().await?;
    let session = cli.session.clone().unwrap_or_else(|| config.session_id.clone());

    let table = TranslationTable::builtin();
    let store = RecipeStore::open(&cli.root.join("pantry.db")).await?;

    match cli.command {
        Commands::Find {
            ingredients,
            vegetarian,
            lang,
        } => {
            let lang = lang.unwrap_or(config.language);
            let request = SearchRequest::from_args(&ingredients, vegetarian, lang);
            let engine = SearchEngine::new(&table);

            let corpus = store.recipes(vegetarian).await?;
            let favorites = store.favorite_ids(&session).await?;

            match engine.search(&request, &corpus, &favorites)? {
                SearchOutcome::Found(results) if cli.json => print_json(&results)?,
                SearchOutcome::Found(results) => print_matches(&results, lang),
                SearchOutcome::NoMatches => {
                    if !cli.json {
                        log_warning(&format!(
                            "Nothing in {} recipes uses {}",
                            corpus.len(),
                            request.ingredients.join(", ")
                        ));
                    }
                    return Err(PantryError::NoMatches.into());
                }
            }
        }
        Commands::Import { path } => {
            let spinner = create_spinner(&format!("Reading {}...", path.display()));
            let batch = SourceManager::new(path).load()?;
            spinner.set_message(format!("Storing {} recipes...", batch.recipes.len()));
            let report = store.import(&batch).await?;
            spinner.finish_and_clear();

            if cli.json {
                print_json(&report)?;
            } else {
                log_success(&format!(
                    "Imported recipes: {} added, {} updated, {} skipped",
                    report.added, report.updated, report.skipped
                ));
            }
        }
        Commands::Show { id, lang } => {
            let lang = lang.unwrap_or(config.language);
            let recipe = LocalizedRecipe::new(&store.recipe(id).await?, lang);
            if cli.json {
                print_json(&recipe)?;
            } else {
                print_recipe(&recipe, lang);
            }
        }
        Commands::Browse {
            search,
            category,
            page,
            lang,
        } => {
            let lang = lang.unwrap_or(config.language);
            let query = CatalogQuery {
                search,
                category,
                page,
                per_page: config.page_size,
            };
            let corpus = store.recipes(false).await?;
            let result = catalog::page(&corpus, &query, lang);
            if cli.json {
                print_json(&result)?;
            } else {
                print_catalog(&result, lang);
            }
        }
        Commands::Favorite { action } => match action {
            FavoriteAction::Add { id } => {
                store.add_favorite(id, &session).await?;
                log_success(&format!("Recipe {} added to favorites", id));
            }
            FavoriteAction::Remove { id } => {
                store.remove_favorite(id, &session).await?;
                log_success(&format!("Recipe {} removed from favorites", id));
            }
            FavoriteAction::List { lang } => {
                let lang = lang.unwrap_or(config.language);
                let recipes: Vec<LocalizedRecipe> = store
                    .favorites(&session)
                    .await?
                    .iter()
                    .map(|r| LocalizedRecipe::new(r, lang))
                    .collect();
                if cli.json {
                    print_json(&recipes)?;
                } else {
                    print_recipe_list(&recipes, lang);
                }
            }
        },
        Commands::Translate { text, to, from } => {
            let from = from.unwrap_or(match to {
                Lang::En => Lang::It,
                Lang::It => Lang::En,
            });
            let translated = Normalizer::new(&table).translate_line(&text, from, to);
            if cli.json {
                print_json(&serde_json::json!({ "text": text, "translation": translated }))?;
            } else {
                println!("{}", translated);
            }
        }
        Commands::Config {
            set_lang,
            set_page_size,
            show,
        } => {
            let changed = set_lang.is_some() || set_page_size.is_some();
            if let Some(lang) = set_lang {
                config.language = lang;
            }
            if let Some(size) = set_page_size {
                config.page_size = size.max(1);
            }
            if changed {
                config_manager.save(&config).await?;
                log_success("Configuration updated");
            } else if show {
                println!("Current Configuration:");
                println!("   Language:  {}", config.language);
                println!("   Session:   {}", config.session_id);
                println!("   Page size: {}", config.page_size);
                println!("   Recipes:   {}", store.count().await?);
            } else {
                println!("Use --show, --set-lang <en|it> or --set-page-size <N>");
            }
        }
    }

    Ok(())
}
