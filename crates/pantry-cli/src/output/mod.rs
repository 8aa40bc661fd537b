//! Output formatting helpers for the CLI.
//!
//! Table and plain-text rendering lives in `text`, JSON views in `json`.

mod json;
mod text;

pub use json::{recipe_json, recipes_json};
pub use text::{print_recipe, recipe_table, short_id};
