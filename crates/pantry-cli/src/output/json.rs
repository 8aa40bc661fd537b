//! JSON output formatting for recipes.

use pantry_core::model::Recipe;

/// Summary view of one recipe for list output.
pub fn recipe_json(recipe: &Recipe) -> serde_json::Value {
    serde_json::json!({
        "id": recipe.id,
        "name": recipe.name,
        "category": recipe.category,
        "total_time": recipe.total_time,
        "ingredients": recipe.ingredients.len(),
        "steps": recipe.addition_sequences.len(),
        "images": recipe.images.len(),
        "videos": recipe.videos.len(),
        "created_at": recipe.created_at,
        "updated_at": recipe.updated_at,
    })
}

/// Summary views for a recipe list.
pub fn recipes_json(recipes: &[Recipe]) -> Vec<serde_json::Value> {
    recipes.iter().map(recipe_json).collect()
}
