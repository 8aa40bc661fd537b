//! The tag table shared by both directions of the XML codec.
//!
//! Every semantic field has a full spelling (backups, bulk export) and a
//! compact spelling (size-constrained payloads). The generator picks one by
//! [`Schema`]; the parser accepts either spelling transparently, so a
//! document may even mix them.

/// Which spelling the generator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Full,
    Compact,
}

/// A full/compact tag (or attribute) name pair for one semantic field.
#[derive(Debug, Clone, Copy)]
pub struct TagNames {
    pub full: &'static str,
    pub compact: &'static str,
}

impl TagNames {
    const fn new(full: &'static str, compact: &'static str) -> Self {
        Self { full, compact }
    }

    /// The spelling for `schema`.
    pub fn name(&self, schema: Schema) -> &'static str {
        match schema {
            Schema::Full => self.full,
            Schema::Compact => self.compact,
        }
    }

    /// Whether `candidate` is either spelling of this field.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate == self.full || candidate == self.compact
    }
}

// Elements.
pub const RECIPES: TagNames = TagNames::new("recipes", "rs");
pub const RECIPE: TagNames = TagNames::new("recipe", "r");
pub const NAME: TagNames = TagNames::new("name", "n");
pub const CATEGORY: TagNames = TagNames::new("category", "c");
pub const TOTAL_TIME: TagNames = TagNames::new("totalTime", "t");
pub const PREPARATION_METHOD: TagNames = TagNames::new("preparationMethod", "p");
pub const AUTHOR: TagNames = TagNames::new("author", "au");
pub const HISTORY: TagNames = TagNames::new("history", "h");
pub const KITCHEN_APPLIANCES: TagNames = TagNames::new("kitchenAppliances", "a");
pub const INGREDIENTS: TagNames = TagNames::new("ingredients", "ii");
pub const INGREDIENT: TagNames = TagNames::new("ingredient", "i");
pub const QUANTITY: TagNames = TagNames::new("quantity", "q");
pub const UNIT: TagNames = TagNames::new("unit", "u");
pub const ORDER: TagNames = TagNames::new("order", "o");
pub const ADDITION_SEQUENCES: TagNames = TagNames::new("additionSequences", "ss");
pub const SEQUENCE: TagNames = TagNames::new("sequence", "s");
pub const STEP: TagNames = TagNames::new("step", "st");
pub const INGREDIENT_IDS: TagNames = TagNames::new("ingredientIds", "ings");
pub const INGREDIENT_ID: TagNames = TagNames::new("ingredientId", "ing");
pub const DESCRIPTION: TagNames = TagNames::new("description", "desc");
pub const DURATION: TagNames = TagNames::new("duration", "dur");
pub const IMAGES: TagNames = TagNames::new("images", "im");
pub const IMAGE: TagNames = TagNames::new("image", "img");
pub const VIDEOS: TagNames = TagNames::new("videos", "vd");
pub const VIDEO: TagNames = TagNames::new("video", "vid");
pub const CREATED_AT: TagNames = TagNames::new("createdAt", "ca");
pub const UPDATED_AT: TagNames = TagNames::new("updatedAt", "ua");

// Attributes.
pub const ATTR_ID: TagNames = TagNames::new("id", "id");
pub const ATTR_NAME: TagNames = TagNames::new("name", "n");
pub const ATTR_TYPE: TagNames = TagNames::new("type", "ty");
pub const ATTR_SIZE: TagNames = TagNames::new("size", "sz");
pub const ATTR_CARAVAN_FRIENDLY: TagNames = TagNames::new("caravanFriendly", "cf");
pub const ATTR_HOSPITAL_FRIENDLY: TagNames = TagNames::new("hospitalFriendly", "hf");
pub const ATTR_MENU_FRIENDLY: TagNames = TagNames::new("menuFriendly", "mf");
