//! XML import for recipes.
//!
//! Import is tolerant by design: one malformed `<recipe>` element never
//! aborts the batch. Each element parses in its own scope; failures are
//! collected with their document position and a best-effort name while the
//! rest of the batch proceeds. Only document-level problems (unreadable
//! file, malformed XML, unrecognizable structure) fail the import as a
//! whole.
//!
//! Imported entities never keep foreign ids: every ingredient gets a fresh
//! id and sequence references are rewritten through the per-recipe
//! old-id-to-new-id map, falling back to the literal document id when a
//! reference cannot be resolved.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use uuid::Uuid;

use crate::error::ImportError;
use crate::model::{Ingredient, MediaFile, Recipe, Sequence};
use crate::xml::dom::{self, Element};
use crate::xml::tags;

/// Hard ceiling on import file size.
pub const MAX_IMPORT_BYTES: u64 = 50 * 1024 * 1024;

/// Anything smaller cannot be a document worth parsing.
pub const MIN_IMPORT_BYTES: u64 = 10;

/// Outcome of a batch import. Partial success is a first-class result, not
/// an error.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub successful: Vec<Recipe>,
    pub failed: Vec<FailedRecipe>,
}

impl ImportReport {
    /// Number of `<recipe>` elements seen.
    pub fn total(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    /// Whether every element parsed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// One recipe element that did not parse.
#[derive(Debug)]
pub struct FailedRecipe {
    /// Zero-based position among the document's `<recipe>` elements.
    pub index: usize,
    /// Best-effort extracted name, if the element carried one.
    pub name: Option<String>,
    pub reason: String,
}

/// Pre-parse validation of an import candidate.
///
/// # Errors
///
/// Returns [`ImportError::InvalidFile`] for a non-XML extension or a size
/// outside `[MIN_IMPORT_BYTES, MAX_IMPORT_BYTES]`.
pub fn validate_import_file(path: &Path, size: u64) -> Result<(), ImportError> {
    let is_xml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("xml"))
        .unwrap_or(false);
    if !is_xml {
        return Err(ImportError::InvalidFile(format!(
            "{}: not an .xml file",
            path.display()
        )));
    }
    if size > MAX_IMPORT_BYTES {
        return Err(ImportError::InvalidFile(format!(
            "{}: {} bytes exceeds the {} byte limit",
            path.display(),
            size,
            MAX_IMPORT_BYTES
        )));
    }
    if size < MIN_IMPORT_BYTES {
        return Err(ImportError::InvalidFile(format!(
            "{}: {} bytes is too small to be a recipe document",
            path.display(),
            size
        )));
    }
    Ok(())
}

/// Validate, read and parse an import file.
pub fn parse_file(path: &Path) -> Result<ImportReport, ImportError> {
    let metadata = fs::metadata(path)
        .map_err(|e| ImportError::InvalidFile(format!("{}: {}", path.display(), e)))?;
    validate_import_file(path, metadata.len())?;
    let xml = fs::read_to_string(path)
        .map_err(|e| ImportError::ParsingFailed(format!("{}: {}", path.display(), e)))?;
    parse(&xml)
}

/// Parse a document containing one `<recipe>` or a `<recipes>` batch.
///
/// # Errors
///
/// [`ImportError::InvalidXml`] for malformed documents,
/// [`ImportError::InvalidStructure`] when no recipe structure is found.
/// Per-recipe failures land in the report instead.
pub fn parse(xml: &str) -> Result<ImportReport, ImportError> {
    let root = dom::parse_document(xml).map_err(ImportError::InvalidXml)?;

    let elements: Vec<&Element> = if tags::RECIPE.matches(&root.name) {
        vec![&root]
    } else if tags::RECIPES.matches(&root.name) {
        let children: Vec<&Element> = root.children_named(tags::RECIPE).collect();
        if children.is_empty() {
            return Err(ImportError::InvalidStructure(
                "batch container holds no recipe elements".to_string(),
            ));
        }
        children
    } else {
        return Err(ImportError::InvalidStructure(format!(
            "unexpected root element <{}>",
            root.name
        )));
    };

    let mut report = ImportReport::default();
    for (index, element) in elements.iter().enumerate() {
        match parse_recipe_element(element) {
            Ok(recipe) => report.successful.push(recipe),
            Err(err) => report.failed.push(FailedRecipe {
                index,
                name: best_effort_name(element),
                reason: err.to_string(),
            }),
        }
    }

    tracing::debug!(
        successful = report.successful.len(),
        failed = report.failed.len(),
        "parsed import document"
    );

    Ok(report)
}

fn best_effort_name(element: &Element) -> Option<String> {
    let name = element.child_text(tags::NAME);
    if name.trim().is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Parse one `<recipe>` element. Failure here is scoped to this element.
fn parse_recipe_element(element: &Element) -> Result<Recipe, ImportError> {
    let name = element.child_text(tags::NAME);
    if name.trim().is_empty() {
        return Err(ImportError::InvalidRecipeData(
            "recipe name is missing or blank".to_string(),
        ));
    }

    // Fresh id and timestamps: an import is a new creation, not a restore.
    let mut recipe =
        Recipe::new(name).map_err(|e| ImportError::InvalidRecipeData(e.to_string()))?;

    recipe.category = element
        .child(tags::CATEGORY)
        .map(|c| c.text.clone())
        .filter(|text| !text.is_empty());
    recipe.total_time = element.child_text(tags::TOTAL_TIME);
    recipe.preparation_method = element.child_text(tags::PREPARATION_METHOD);
    recipe.author = element.child_text(tags::AUTHOR);
    recipe.history = element.child_text(tags::HISTORY);
    recipe.kitchen_appliances = element.child_text(tags::KITCHEN_APPLIANCES);
    recipe.caravan_friendly = element.has_flag(tags::ATTR_CARAVAN_FRIENDLY);
    recipe.hospital_friendly = element.has_flag(tags::ATTR_HOSPITAL_FRIENDLY);
    recipe.menu_friendly = element.has_flag(tags::ATTR_MENU_FRIENDLY);

    // Ingredients first: their old-id-to-new-id map feeds sequence parsing.
    let mut id_map: HashMap<String, Uuid> = HashMap::new();
    if let Some(container) = element.child(tags::INGREDIENTS) {
        for (position, ingredient_element) in
            container.children_named(tags::INGREDIENT).enumerate()
        {
            let ingredient = parse_ingredient(ingredient_element, position, &mut id_map)?;
            recipe.ingredients.push(ingredient);
        }
    }

    if let Some(container) = element.child(tags::ADDITION_SEQUENCES) {
        for (position, sequence_element) in container.children_named(tags::SEQUENCE).enumerate() {
            recipe
                .addition_sequences
                .push(parse_sequence(sequence_element, position, &id_map));
        }
    }

    if let Some(container) = element.child(tags::IMAGES) {
        for media_element in container.children_named(tags::IMAGE) {
            if let Some(media) = parse_media(media_element, "data:image/") {
                recipe.images.push(media);
            }
        }
    }
    if let Some(container) = element.child(tags::VIDEOS) {
        for media_element in container.children_named(tags::VIDEO) {
            if let Some(media) = parse_media(media_element, "data:video/") {
                recipe.videos.push(media);
            }
        }
    }

    Ok(recipe)
}

fn parse_ingredient(
    element: &Element,
    position: usize,
    id_map: &mut HashMap<String, Uuid>,
) -> Result<Ingredient, ImportError> {
    let name = element.child_text(tags::NAME);
    let quantity = element
        .child_text(tags::QUANTITY)
        .parse::<f64>()
        .unwrap_or(0.0);
    let unit = element.child_text(tags::UNIT);
    let order = element
        .child_text(tags::ORDER)
        .parse::<u32>()
        .unwrap_or(position as u32);

    let ingredient = Ingredient::new(name, quantity, unit, order)
        .map_err(|e| ImportError::InvalidRecipeData(e.to_string()))?;

    // Document ids are never trusted; record them only to resolve in-document
    // references.
    if let Some(old_id) = element.attr(tags::ATTR_ID) {
        if !old_id.is_empty() {
            id_map.insert(old_id.to_string(), ingredient.id);
        }
    }

    Ok(ingredient)
}

fn parse_sequence(element: &Element, position: usize, id_map: &HashMap<String, Uuid>) -> Sequence {
    let step = element
        .child_text(tags::STEP)
        .parse::<u32>()
        .unwrap_or(position as u32 + 1);
    let mut sequence = Sequence::new(step, element.child_text(tags::DESCRIPTION));
    sequence.duration = element.child_text(tags::DURATION);

    if let Some(container) = element.child(tags::INGREDIENT_IDS) {
        for id_element in container.children_named(tags::INGREDIENT_ID) {
            let old_id = id_element.text.trim();
            if old_id.is_empty() {
                continue;
            }
            // Rewrite through the map; an unmapped reference keeps the
            // literal document id rather than failing the recipe.
            let resolved = id_map
                .get(old_id)
                .map(Uuid::to_string)
                .unwrap_or_else(|| old_id.to_string());
            sequence.ingredient_ids.push(resolved);
        }
    }

    sequence
}

/// Parse a media element, or skip it with a warning when the payload does
/// not carry the expected data-URI prefix.
fn parse_media(element: &Element, prefix: &str) -> Option<MediaFile> {
    let data = element.text.trim();
    if !data.starts_with(prefix) {
        tracing::warn!(
            element = %element.name,
            expected = prefix,
            "skipping media element without a valid data-uri payload"
        );
        return None;
    }

    let name = element
        .attr(tags::ATTR_NAME)
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("media")
        .to_string();
    let media_type = element
        .attr(tags::ATTR_TYPE)
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| mime_from_data_uri(data));
    let size = element
        .attr(tags::ATTR_SIZE)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(data.len() as u64);

    match MediaFile::new(name, media_type, data.to_string(), size) {
        Ok(media) => Some(media),
        Err(err) => {
            tracing::warn!(element = %element.name, error = %err, "skipping unusable media element");
            None
        }
    }
}

/// Extract the MIME portion of a `data:<mime>;base64,...` payload.
fn mime_from_data_uri(data: &str) -> String {
    let rest = data.strip_prefix("data:").unwrap_or(data);
    let end = rest
        .find(|c| c == ';' || c == ',')
        .unwrap_or(rest.len());
    rest[..end].to_string()
}
