//! Core entity model: the [`Recipe`] aggregate and the value objects it owns.
//!
//! A recipe is the sole persistence unit. Ingredients, preparation sequences
//! and media files live and die with their recipe; nothing references them
//! across aggregate boundaries except the weak ingredient-id strings held by
//! [`Sequence`].
//!
//! Invariants are enforced synchronously at construction; deserialized values
//! can be re-checked with [`Recipe::validate`] before they are persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// A recipe: the aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,

    /// Display name. Never blank after trimming.
    pub name: String,

    /// Category reference. No referential integrity is enforced.
    #[serde(default)]
    pub category: Option<String>,

    /// Free-text duration, `"1h 30min"` style (either part optional).
    #[serde(default)]
    pub total_time: String,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default)]
    pub preparation_method: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub history: String,

    #[serde(default)]
    pub kitchen_appliances: String,

    /// Preparation steps, in display order.
    #[serde(default)]
    pub addition_sequences: Vec<Sequence>,

    #[serde(default)]
    pub images: Vec<MediaFile>,

    #[serde(default)]
    pub videos: Vec<MediaFile>,

    #[serde(default)]
    pub caravan_friendly: bool,

    #[serde(default)]
    pub hospital_friendly: bool,

    #[serde(default)]
    pub menu_friendly: bool,

    /// Set once at creation.
    pub created_at: DateTime<Utc>,

    /// Refreshed by the storage layer on every persisted mutation.
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Create an empty recipe with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankField`] if the name is blank after
    /// trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if blank(&name) {
            return Err(ValidationError::BlankField {
                entity: "recipe",
                field: "name",
            });
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            category: None,
            total_time: String::new(),
            ingredients: Vec::new(),
            preparation_method: String::new(),
            author: String::new(),
            history: String::new(),
            kitchen_appliances: String::new(),
            addition_sequences: Vec::new(),
            images: Vec::new(),
            videos: Vec::new(),
            caravan_friendly: false,
            hospital_friendly: false,
            menu_friendly: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_total_time(mut self, total_time: impl Into<String>) -> Self {
        self.total_time = total_time.into();
        self
    }

    pub fn with_preparation_method(mut self, method: impl Into<String>) -> Self {
        self.preparation_method = method.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Re-check the aggregate's invariants, including those of every owned
    /// value object. Used by the storage layer before persisting values that
    /// did not come through the constructors (e.g. deserialized payloads).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if blank(&self.name) {
            return Err(ValidationError::BlankField {
                entity: "recipe",
                field: "name",
            });
        }
        for ingredient in &self.ingredients {
            ingredient.validate()?;
        }
        for media in self.images.iter().chain(self.videos.iter()) {
            media.validate()?;
        }
        Ok(())
    }

    /// Ingredient-id references held by sequences that resolve to no
    /// ingredient of this recipe.
    ///
    /// Dangling references are reported, not rejected: a sequence that kept a
    /// foreign document id through a tolerant import is still usable data.
    pub fn dangling_ingredient_refs(&self) -> Vec<&str> {
        let known: Vec<String> = self.ingredients.iter().map(|i| i.id.to_string()).collect();
        self.addition_sequences
            .iter()
            .flat_map(|s| s.ingredient_ids.iter())
            .filter(|id| !known.iter().any(|k| k == *id))
            .map(String::as_str)
            .collect()
    }
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,

    /// Never blank after trimming.
    pub name: String,

    /// Amount in `unit`. Finite and non-negative.
    pub quantity: f64,

    #[serde(default)]
    pub unit: String,

    /// Display position within the recipe.
    #[serde(default)]
    pub order: u32,
}

impl Ingredient {
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankField`] for a blank name and
    /// [`ValidationError::InvalidQuantity`] for a negative or non-finite
    /// quantity.
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        order: u32,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if blank(&name) {
            return Err(ValidationError::BlankField {
                entity: "ingredient",
                field: "name",
            });
        }
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(ValidationError::InvalidQuantity);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            quantity,
            unit: unit.into(),
            order,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if blank(&self.name) {
            return Err(ValidationError::BlankField {
                entity: "ingredient",
                field: "name",
            });
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(ValidationError::InvalidQuantity);
        }
        Ok(())
    }
}

/// One preparation step of a recipe.
///
/// `ingredient_ids` are weak references into the owning recipe's ingredient
/// list, stored as id strings so an unresolved foreign id can survive import
/// verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: Uuid,

    /// Step number, drives display order.
    pub step: u32,

    #[serde(default)]
    pub ingredient_ids: Vec<String>,

    #[serde(default)]
    pub description: String,

    /// Free-text duration, same pattern as `Recipe::total_time`.
    #[serde(default)]
    pub duration: String,
}

impl Sequence {
    pub fn new(step: u32, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            step,
            ingredient_ids: Vec::new(),
            description: description.into(),
            duration: String::new(),
        }
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    pub fn with_ingredient_ids(mut self, ids: Vec<String>) -> Self {
        self.ingredient_ids = ids;
        self
    }
}

/// An embedded media payload (image or video) owned by a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: Uuid,

    /// Original file name. Never blank.
    pub name: String,

    /// MIME-like type string, e.g. `image/png`. Never blank.
    pub media_type: String,

    /// Base64 data-URI payload (`data:<mime>;base64,...`). Never blank.
    pub data: String,

    /// Source size in bytes.
    pub size: u64,
}

impl MediaFile {
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankField`] if name, type or payload is
    /// blank.
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        data: impl Into<String>,
        size: u64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let media_type = media_type.into();
        let data = data.into();
        if blank(&name) {
            return Err(ValidationError::BlankField {
                entity: "media file",
                field: "name",
            });
        }
        if blank(&media_type) {
            return Err(ValidationError::BlankField {
                entity: "media file",
                field: "type",
            });
        }
        if blank(&data) {
            return Err(ValidationError::BlankField {
                entity: "media file",
                field: "data",
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            media_type,
            data,
            size,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if blank(&self.name) {
            return Err(ValidationError::BlankField {
                entity: "media file",
                field: "name",
            });
        }
        if blank(&self.media_type) {
            return Err(ValidationError::BlankField {
                entity: "media file",
                field: "type",
            });
        }
        if blank(&self.data) {
            return Err(ValidationError::BlankField {
                entity: "media file",
                field: "data",
            });
        }
        Ok(())
    }
}
