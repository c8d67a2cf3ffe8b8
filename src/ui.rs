use crate::assembler::{LocalizedRecipe, RecipeMatch};
use crate::catalog::CatalogPage;
use crate::core::Lang;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

pub fn print_banner() {
    println!();
    println!(
        "   {}  {}",
        "PANTRY".yellow().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("   {}", "Cook with what you have".white());
    println!();
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn log_error(msg: &str) {
    eprintln!("{} {}", "✖ Error:".red().bold(), msg);
}

pub fn log_warning(msg: &str) {
    println!("{} {}", "⚠ Warning:".yellow().bold(), msg);
}

pub fn log_success(msg: &str) {
    println!("{} {}", "✔ Success:".green().bold(), msg);
}

fn label(lang: Lang, en: &'static str, it: &'static str) -> &'static str {
    match lang {
        Lang::En => en,
        Lang::It => it,
    }
}

fn print_header(recipe: &LocalizedRecipe, lang: Lang) {
    let mut tags = Vec::new();
    if recipe.vegan {
        tags.push(label(lang, "vegan", "vegano"));
    } else if recipe.vegetarian {
        tags.push(label(lang, "vegetarian", "vegetariano"));
    }
    tags.push(recipe.category.label(lang));

    println!(
        "{} {} {} {}",
        recipe.emoji,
        recipe.title.bold(),
        format!("#{}", recipe.id).dimmed(),
        format!("[{}]", tags.join(", ")).dimmed()
    );
}

pub fn print_matches(results: &[RecipeMatch], lang: Lang) {
    println!("{}", label(lang, "MATCHING RECIPES", "RICETTE TROVATE").bold().underline());
    for result in results {
        println!();
        let score = format!("{:.1}%", result.match_percentage);
        if result.match_percentage >= 80.0 {
            print!("{} ", "★".yellow());
        }
        print_header(&result.recipe, lang);
        if result.is_favorite {
            println!("   {}", label(lang, "♥ favorite", "♥ preferita").red());
        }
        println!("   {} {}", label(lang, "Match:", "Corrispondenza:"), score.green().bold());
        if !result.missing_ingredients.is_empty() {
            println!(
                "   {} {}",
                label(lang, "Missing:", "Mancanti:"),
                result.missing_ingredients.join(", ").red()
            );
        }
        println!(
            "   {} {}",
            label(lang, "Ingredients:", "Ingredienti:"),
            result.recipe.ingredients.join(", ")
        );
    }
    println!();
}

pub fn print_recipe(recipe: &LocalizedRecipe, lang: Lang) {
    print_header(recipe, lang);
    if let Some(prep) = recipe.prep_time {
        println!("   {} {} min", label(lang, "Prep:", "Preparazione:"), prep);
    }
    if let Some(cook) = recipe.cook_time {
        println!("   {} {} min", label(lang, "Cook:", "Cottura:"), cook);
    }
    println!();
    println!("{}", label(lang, "Ingredients", "Ingredienti").bold());
    for ingredient in &recipe.ingredients {
        println!("  • {}", ingredient);
    }
    println!();
    println!("{}", label(lang, "Instructions", "Istruzioni").bold());
    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    if let Some(source) = &recipe.source_url {
        println!();
        println!("{} {}", label(lang, "Source:", "Fonte:").dimmed(), source);
    }
    println!("{} {}", label(lang, "Image:", "Immagine:").dimmed(), recipe.image_url);
}

pub fn print_catalog(page: &CatalogPage, lang: Lang) {
    println!("{}", label(lang, "RECIPE BOOK", "RICETTARIO").bold().underline());
    if page.recipes.is_empty() {
        println!("{}", label(lang, "No recipes found.", "Nessuna ricetta trovata."));
    }
    for recipe in &page.recipes {
        print_header(recipe, lang);
    }
    println!();
    println!(
        "{}",
        format!(
            "{} {}/{} · {} {}",
            label(lang, "Page", "Pagina"),
            page.page,
            page.pages.max(1),
            page.total,
            label(lang, "recipes", "ricette")
        )
        .dimmed()
    );
}

pub fn print_recipe_list(recipes: &[LocalizedRecipe], lang: Lang) {
    println!("{}", label(lang, "FAVORITES", "PREFERITI").bold().underline());
    if recipes.is_empty() {
        println!("{}", label(lang, "No favorites yet.", "Nessuna ricetta preferita."));
    }
    for recipe in recipes {
        print_header(recipe, lang);
    }
    println!();
}
