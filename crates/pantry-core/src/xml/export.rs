//! XML generation for recipes.
//!
//! A single recipe exports under a bare `<recipe>` root; a batch wraps in
//! `<recipes>`. Text content and attribute values are escaped for the five
//! XML-reserved characters by the writer. Collection containers are always
//! emitted, even when empty; blank optional scalars are omitted.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::ExportError;
use crate::model::{Ingredient, MediaFile, Recipe, Sequence};
use crate::xml::tags::{self, Schema, TagNames};

fn gen<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::GenerationFailed(err.to_string())
}

/// Serialize one or many recipes into a single document.
///
/// # Errors
///
/// Returns [`ExportError::InvalidData`] for an empty input set and
/// [`ExportError::GenerationFailed`] if the writer fails.
pub fn generate(recipes: &[Recipe], schema: Schema) -> Result<String, ExportError> {
    match recipes {
        [] => Err(ExportError::InvalidData(
            "nothing to export: empty recipe set".to_string(),
        )),
        [single] => generate_one(single, schema),
        many => {
            let mut writer = writer_for(schema);
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(gen)?;
            let container = tags::RECIPES.name(schema);
            writer
                .write_event(Event::Start(BytesStart::new(container)))
                .map_err(gen)?;
            for recipe in many {
                write_recipe(&mut writer, recipe, schema)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(container)))
                .map_err(gen)?;
            finish(writer)
        }
    }
}

/// Serialize a single recipe under a bare `<recipe>` root.
pub fn generate_one(recipe: &Recipe, schema: Schema) -> Result<String, ExportError> {
    let mut writer = writer_for(schema);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(gen)?;
    write_recipe(&mut writer, recipe, schema)?;
    finish(writer)
}

/// Generate and write a document to `path`.
///
/// # Errors
///
/// Generation failures keep their own codes; filesystem failures map to
/// [`ExportError::WriteFailed`].
pub fn write_to_file(recipes: &[Recipe], schema: Schema, path: &Path) -> Result<(), ExportError> {
    let document = generate(recipes, schema)?;
    fs::write(path, document)
        .map_err(|e| ExportError::WriteFailed(format!("{}: {}", path.display(), e)))
}

/// Deterministic file name for a single-recipe export:
/// a slug of the name plus an id fragment.
pub fn export_file_name(recipe: &Recipe) -> String {
    let mut slug = String::new();
    let mut last_dash = true;
    for ch in recipe.name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
        if slug.len() >= 40 {
            break;
        }
    }
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "recipe" } else { slug };
    let id = recipe.id.simple().to_string();
    format!("{}_{}.xml", slug, &id[..8])
}

fn writer_for(schema: Schema) -> Writer<Vec<u8>> {
    match schema {
        Schema::Full => Writer::new_with_indent(Vec::new(), b' ', 2),
        Schema::Compact => Writer::new(Vec::new()),
    }
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String, ExportError> {
    String::from_utf8(writer.into_inner()).map_err(gen)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    tag: TagNames,
    text: &str,
    schema: Schema,
) -> Result<(), ExportError> {
    let name = tag.name(schema);
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(gen)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(gen)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(gen)?;
    Ok(())
}

/// Emit a scalar only when it carries content.
fn write_optional_element(
    writer: &mut Writer<Vec<u8>>,
    tag: TagNames,
    text: &str,
    schema: Schema,
) -> Result<(), ExportError> {
    if text.trim().is_empty() {
        return Ok(());
    }
    write_text_element(writer, tag, text, schema)
}

fn write_recipe(
    writer: &mut Writer<Vec<u8>>,
    recipe: &Recipe,
    schema: Schema,
) -> Result<(), ExportError> {
    let root = tags::RECIPE.name(schema);
    let mut start = BytesStart::new(root);
    let id = recipe.id.to_string();
    start.push_attribute((tags::ATTR_ID.name(schema), id.as_str()));
    if recipe.caravan_friendly {
        start.push_attribute((tags::ATTR_CARAVAN_FRIENDLY.name(schema), "true"));
    }
    if recipe.hospital_friendly {
        start.push_attribute((tags::ATTR_HOSPITAL_FRIENDLY.name(schema), "true"));
    }
    if recipe.menu_friendly {
        start.push_attribute((tags::ATTR_MENU_FRIENDLY.name(schema), "true"));
    }
    writer.write_event(Event::Start(start)).map_err(gen)?;

    write_text_element(writer, tags::NAME, &recipe.name, schema)?;
    write_optional_element(
        writer,
        tags::CATEGORY,
        recipe.category.as_deref().unwrap_or(""),
        schema,
    )?;
    write_optional_element(writer, tags::TOTAL_TIME, &recipe.total_time, schema)?;
    write_optional_element(writer, tags::AUTHOR, &recipe.author, schema)?;
    write_optional_element(writer, tags::HISTORY, &recipe.history, schema)?;
    write_optional_element(
        writer,
        tags::PREPARATION_METHOD,
        &recipe.preparation_method,
        schema,
    )?;

    let ingredients = tags::INGREDIENTS.name(schema);
    writer
        .write_event(Event::Start(BytesStart::new(ingredients)))
        .map_err(gen)?;
    for ingredient in &recipe.ingredients {
        write_ingredient(writer, ingredient, schema)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(ingredients)))
        .map_err(gen)?;

    let sequences = tags::ADDITION_SEQUENCES.name(schema);
    writer
        .write_event(Event::Start(BytesStart::new(sequences)))
        .map_err(gen)?;
    for sequence in &recipe.addition_sequences {
        write_sequence(writer, sequence, schema)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(sequences)))
        .map_err(gen)?;

    write_optional_element(
        writer,
        tags::KITCHEN_APPLIANCES,
        &recipe.kitchen_appliances,
        schema,
    )?;

    write_media_collection(writer, tags::IMAGES, tags::IMAGE, &recipe.images, schema)?;
    write_media_collection(writer, tags::VIDEOS, tags::VIDEO, &recipe.videos, schema)?;

    write_text_element(
        writer,
        tags::CREATED_AT,
        &recipe.created_at.to_rfc3339(),
        schema,
    )?;
    write_text_element(
        writer,
        tags::UPDATED_AT,
        &recipe.updated_at.to_rfc3339(),
        schema,
    )?;

    writer
        .write_event(Event::End(BytesEnd::new(root)))
        .map_err(gen)?;
    Ok(())
}

fn write_ingredient(
    writer: &mut Writer<Vec<u8>>,
    ingredient: &Ingredient,
    schema: Schema,
) -> Result<(), ExportError> {
    let name = tags::INGREDIENT.name(schema);
    let mut start = BytesStart::new(name);
    let id = ingredient.id.to_string();
    start.push_attribute((tags::ATTR_ID.name(schema), id.as_str()));
    writer.write_event(Event::Start(start)).map_err(gen)?;

    write_text_element(writer, tags::NAME, &ingredient.name, schema)?;
    write_text_element(
        writer,
        tags::QUANTITY,
        &ingredient.quantity.to_string(),
        schema,
    )?;
    write_optional_element(writer, tags::UNIT, &ingredient.unit, schema)?;
    write_text_element(writer, tags::ORDER, &ingredient.order.to_string(), schema)?;

    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(gen)?;
    Ok(())
}

fn write_sequence(
    writer: &mut Writer<Vec<u8>>,
    sequence: &Sequence,
    schema: Schema,
) -> Result<(), ExportError> {
    let name = tags::SEQUENCE.name(schema);
    let mut start = BytesStart::new(name);
    let id = sequence.id.to_string();
    start.push_attribute((tags::ATTR_ID.name(schema), id.as_str()));
    writer.write_event(Event::Start(start)).map_err(gen)?;

    write_text_element(writer, tags::STEP, &sequence.step.to_string(), schema)?;

    let ids = tags::INGREDIENT_IDS.name(schema);
    writer
        .write_event(Event::Start(BytesStart::new(ids)))
        .map_err(gen)?;
    for ingredient_id in &sequence.ingredient_ids {
        write_text_element(writer, tags::INGREDIENT_ID, ingredient_id, schema)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(ids)))
        .map_err(gen)?;

    write_optional_element(writer, tags::DESCRIPTION, &sequence.description, schema)?;
    write_optional_element(writer, tags::DURATION, &sequence.duration, schema)?;

    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(gen)?;
    Ok(())
}

fn write_media_collection(
    writer: &mut Writer<Vec<u8>>,
    container: TagNames,
    item: TagNames,
    files: &[MediaFile],
    schema: Schema,
) -> Result<(), ExportError> {
    let container_name = container.name(schema);
    writer
        .write_event(Event::Start(BytesStart::new(container_name)))
        .map_err(gen)?;
    for file in files {
        let item_name = item.name(schema);
        let mut start = BytesStart::new(item_name);
        start.push_attribute((tags::ATTR_NAME.name(schema), file.name.as_str()));
        start.push_attribute((tags::ATTR_TYPE.name(schema), file.media_type.as_str()));
        let size = file.size.to_string();
        start.push_attribute((tags::ATTR_SIZE.name(schema), size.as_str()));
        writer.write_event(Event::Start(start)).map_err(gen)?;
        writer
            .write_event(Event::Text(BytesText::new(&file.data)))
            .map_err(gen)?;
        writer
            .write_event(Event::End(BytesEnd::new(item_name)))
            .map_err(gen)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(container_name)))
        .map_err(gen)?;
    Ok(())
}
