//! Text and table output formatting for recipes.

use comfy_table::{presets, Table};
use owo_colors::OwoColorize;

use pantry_core::model::Recipe;

/// First eight hex characters of an id, for table display.
pub fn short_id(id: &uuid::Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// Build the recipe list table.
pub fn recipe_table(recipes: &[Recipe]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_header(vec!["ID", "Name", "Category", "Time", "Ingredients", "Updated"]);

    for recipe in recipes {
        table.add_row(vec![
            short_id(&recipe.id),
            recipe.name.clone(),
            recipe.category.clone().unwrap_or_default(),
            recipe.total_time.clone(),
            recipe.ingredients.len().to_string(),
            recipe.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    table
}

/// Print one recipe in full.
pub fn print_recipe(recipe: &Recipe) {
    println!("{}  ({})", recipe.name.bold(), recipe.id);
    if let Some(ref category) = recipe.category {
        println!("Category:   {}", category);
    }
    if !recipe.total_time.is_empty() {
        println!("Total time: {}", recipe.total_time);
    }
    if !recipe.author.is_empty() {
        println!("Author:     {}", recipe.author);
    }
    if !recipe.kitchen_appliances.is_empty() {
        println!("Appliances: {}", recipe.kitchen_appliances);
    }

    let mut flags = Vec::new();
    if recipe.caravan_friendly {
        flags.push("caravan");
    }
    if recipe.hospital_friendly {
        flags.push("hospital");
    }
    if recipe.menu_friendly {
        flags.push("menu");
    }
    if !flags.is_empty() {
        println!("Friendly:   {}", flags.join(", "));
    }

    if !recipe.ingredients.is_empty() {
        println!("\n{}", "Ingredients".bold());
        let mut ingredients = recipe.ingredients.clone();
        ingredients.sort_by_key(|i| i.order);
        for ingredient in &ingredients {
            if ingredient.quantity > 0.0 {
                println!(
                    "  - {} {} {}",
                    ingredient.quantity, ingredient.unit, ingredient.name
                );
            } else {
                println!("  - {}", ingredient.name);
            }
        }
    }

    if !recipe.addition_sequences.is_empty() {
        println!("\n{}", "Steps".bold());
        let mut sequences = recipe.addition_sequences.clone();
        sequences.sort_by_key(|s| s.step);
        for sequence in &sequences {
            let duration = if sequence.duration.is_empty() {
                String::new()
            } else {
                format!(" ({})", sequence.duration)
            };
            println!("  {}. {}{}", sequence.step, sequence.description, duration);
        }
    }

    if !recipe.preparation_method.is_empty() {
        println!("\n{}\n{}", "Method".bold(), recipe.preparation_method);
    }
    if !recipe.history.is_empty() {
        println!("\n{}\n{}", "History".bold(), recipe.history);
    }

    if !recipe.images.is_empty() || !recipe.videos.is_empty() {
        println!(
            "\nMedia: {} image(s), {} video(s)",
            recipe.images.len(),
            recipe.videos.len()
        );
    }

    let dangling = recipe.dangling_ingredient_refs();
    if !dangling.is_empty() {
        println!(
            "\n{} {} step ingredient reference(s) do not match any ingredient",
            "warning:".yellow(),
            dangling.len()
        );
    }
}
