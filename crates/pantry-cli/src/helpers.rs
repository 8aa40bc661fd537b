//! Parsing helpers for CLI arguments.

use uuid::Uuid;

use pantry_core::model::Ingredient;

/// Parse a recipe id argument (full UUID).
pub fn parse_recipe_id(value: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| anyhow::anyhow!("Invalid recipe id (expected a UUID): {}", value))
}

/// Parse an ingredient spec of the form `name:quantity:unit`.
///
/// Quantity and unit are optional: `flour`, `flour:200`, `flour:200:g` are
/// all accepted.
pub fn parse_ingredient_spec(spec: &str, order: u32) -> anyhow::Result<Ingredient> {
    let mut parts = spec.splitn(3, ':');
    let name = parts.next().unwrap_or("").trim();
    let quantity = match parts.next() {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| anyhow::anyhow!("Invalid quantity in ingredient spec: {}", spec))?,
        None => 0.0,
    };
    let unit = parts.next().unwrap_or("").trim();

    Ingredient::new(name, quantity, unit, order)
        .map_err(|e| anyhow::anyhow!("Invalid ingredient spec \"{}\": {}", spec, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient_spec_variants() {
        let bare = parse_ingredient_spec("flour", 0).unwrap();
        assert_eq!(bare.name, "flour");
        assert_eq!(bare.quantity, 0.0);
        assert_eq!(bare.unit, "");

        let with_quantity = parse_ingredient_spec("flour:200", 1).unwrap();
        assert_eq!(with_quantity.quantity, 200.0);

        let complete = parse_ingredient_spec("flour:200.5:g", 2).unwrap();
        assert_eq!(complete.quantity, 200.5);
        assert_eq!(complete.unit, "g");
        assert_eq!(complete.order, 2);
    }

    #[test]
    fn test_parse_ingredient_spec_rejects_garbage() {
        assert!(parse_ingredient_spec(":200:g", 0).is_err());
        assert!(parse_ingredient_spec("flour:abc", 0).is_err());
        assert!(parse_ingredient_spec("flour:-2:g", 0).is_err());
    }

    #[test]
    fn test_parse_recipe_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_recipe_id(&id.to_string()).unwrap(), id);
        assert!(parse_recipe_id("not-a-uuid").is_err());
    }
}
