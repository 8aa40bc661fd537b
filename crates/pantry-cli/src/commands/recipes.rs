//! Recipe CRUD command handlers.

use std::io::IsTerminal;
use std::path::Path;

use pantry_core::media::{load_media_file, MediaKind};
use pantry_core::model::{Recipe, Sequence};

use crate::cli::{AddArgs, Cli, ClearArgs, DeleteArgs, ListArgs, ShowArgs};
use crate::commands::open_manager;
use crate::helpers::{parse_ingredient_spec, parse_recipe_id};
use crate::output::{print_recipe, recipe_table, recipes_json, short_id};

pub fn handle_add(cli: &Cli, args: &AddArgs) -> anyhow::Result<()> {
    let mut recipe = Recipe::new(args.name.clone())?;
    recipe.category = args.category.clone();
    recipe.total_time = args.time.clone().unwrap_or_default();
    recipe.preparation_method = args.method.clone().unwrap_or_default();
    recipe.author = args.author.clone().unwrap_or_default();
    recipe.kitchen_appliances = args.appliances.clone().unwrap_or_default();
    recipe.caravan_friendly = args.caravan;
    recipe.hospital_friendly = args.hospital;
    recipe.menu_friendly = args.menu;

    for (order, spec) in args.ingredient.iter().enumerate() {
        recipe
            .ingredients
            .push(parse_ingredient_spec(spec, order as u32)?);
    }
    for (position, description) in args.step.iter().enumerate() {
        recipe
            .addition_sequences
            .push(Sequence::new(position as u32 + 1, description.clone()));
    }
    for path in &args.image {
        let media = load_media_file(Path::new(path), MediaKind::Image)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;
        recipe.images.push(media);
    }
    for path in &args.video {
        let media = load_media_file(Path::new(path), MediaKind::Video)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;
        recipe.videos.push(media);
    }

    let mut manager = open_manager(cli)?;
    let id = manager
        .save_recipe(&mut recipe)
        .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;

    if !cli.quiet {
        println!("Added \"{}\" ({})", recipe.name, short_id(&id));
    }
    Ok(())
}

pub fn handle_list(cli: &Cli, args: &ListArgs) -> anyhow::Result<()> {
    let manager = open_manager(cli)?;
    let recipes = match args.category.as_deref() {
        Some(category) => manager.get_recipes_by_category(category),
        None => manager.get_all_recipes(),
    }
    .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recipes_json(&recipes))?);
        return Ok(());
    }

    if recipes.is_empty() {
        if !cli.quiet {
            println!("No recipes yet.");
        }
        return Ok(());
    }

    println!("{}", recipe_table(&recipes));
    Ok(())
}

pub fn handle_show(cli: &Cli, args: &ShowArgs) -> anyhow::Result<()> {
    let id = parse_recipe_id(&args.id)?;
    let manager = open_manager(cli)?;

    let recipe = manager
        .get_recipe(&id)
        .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?
        .ok_or_else(|| anyhow::anyhow!("No recipe stored under {}", id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        print_recipe(&recipe);
    }
    Ok(())
}

pub fn handle_delete(cli: &Cli, args: &DeleteArgs) -> anyhow::Result<()> {
    let id = parse_recipe_id(&args.id)?;
    let mut manager = open_manager(cli)?;

    manager
        .delete_recipe(&id)
        .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;

    if !cli.quiet {
        println!("Deleted {}", short_id(&id));
    }
    Ok(())
}

pub fn handle_categories(cli: &Cli) -> anyhow::Result<()> {
    let manager = open_manager(cli)?;
    let recipes = manager
        .get_all_recipes()
        .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;

    let mut counts: Vec<(String, usize)> = Vec::new();
    for recipe in &recipes {
        let Some(ref category) = recipe.category else {
            continue;
        };
        match counts.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => counts.push((category.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| a.0.cmp(&b.0));

    if counts.is_empty() {
        if !cli.quiet {
            println!("No categories in use.");
        }
        return Ok(());
    }
    for (category, count) in counts {
        println!("{}  ({})", category, count);
    }
    Ok(())
}

pub fn handle_clear(cli: &Cli, args: &ClearArgs) -> anyhow::Result<()> {
    if std::io::stdin().is_terminal() && !args.yes {
        let proceed = dialoguer::Confirm::new()
            .with_prompt("Delete ALL recipes?")
            .default(false)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Clear cancelled"));
        }
    }

    let mut manager = open_manager(cli)?;
    manager
        .clear_all_recipes()
        .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;

    if !cli.quiet {
        println!("All recipes deleted.");
    }
    Ok(())
}
