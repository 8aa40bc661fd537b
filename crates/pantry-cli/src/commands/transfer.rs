//! Export and import command handlers.

use std::path::{Path, PathBuf};

use pantry_core::model::Recipe;
use pantry_core::xml::{self, Schema};

use crate::cli::{Cli, ExportArgs, ImportArgs};
use crate::commands::open_manager;
use crate::helpers::parse_recipe_id;
use crate::output::short_id;

pub fn handle_export(cli: &Cli, args: &ExportArgs) -> anyhow::Result<()> {
    let manager = open_manager(cli)?;

    let recipes: Vec<Recipe> = if args.all {
        manager
            .get_all_recipes()
            .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?
    } else {
        if args.ids.is_empty() {
            return Err(anyhow::anyhow!(
                "Nothing to export: pass recipe ids or --all"
            ));
        }
        let mut selected = Vec::new();
        for raw in &args.ids {
            let id = parse_recipe_id(raw)?;
            let recipe = manager
                .get_recipe(&id)
                .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?
                .ok_or_else(|| anyhow::anyhow!("No recipe stored under {}", id))?;
            selected.push(recipe);
        }
        selected
    };

    if recipes.is_empty() {
        return Err(anyhow::anyhow!("Nothing to export: the store is empty"));
    }

    let schema = if args.compact {
        Schema::Compact
    } else {
        Schema::Full
    };

    let path = match args.output.as_deref() {
        Some(path) => PathBuf::from(path),
        None => match recipes.as_slice() {
            [single] => PathBuf::from(xml::export_file_name(single)),
            _ => PathBuf::from("recipes.xml"),
        },
    };

    xml::write_to_file(&recipes, schema, &path)
        .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;

    if !cli.quiet {
        println!("Exported {} recipe(s) to {}", recipes.len(), path.display());
    }
    Ok(())
}

pub fn handle_import(cli: &Cli, args: &ImportArgs) -> anyhow::Result<()> {
    let report = xml::parse_file(Path::new(&args.file))
        .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;

    let mut manager = open_manager(cli)?;
    let mut saved = 0usize;
    for mut recipe in report.successful {
        let dangling = recipe.dangling_ingredient_refs().len();
        if dangling > 0 && !cli.quiet {
            println!(
                "Note: \"{}\" has {} unresolved step ingredient reference(s)",
                recipe.name, dangling
            );
        }
        let id = manager
            .save_recipe(&mut recipe)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;
        if !cli.quiet {
            println!("Imported \"{}\" ({})", recipe.name, short_id(&id));
        }
        saved += 1;
    }

    if !cli.quiet {
        println!(
            "Import finished: {} saved, {} failed",
            saved,
            report.failed.len()
        );
    }
    for failure in &report.failed {
        let label = failure.name.as_deref().unwrap_or("<unnamed>");
        eprintln!(
            "  recipe #{} ({}): {}",
            failure.index + 1,
            label,
            failure.reason
        );
    }

    if saved == 0 && !report.failed.is_empty() {
        return Err(anyhow::anyhow!("Import failed for every recipe in the file"));
    }
    Ok(())
}
