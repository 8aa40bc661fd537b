use pantry_core::model::{Ingredient, MediaFile, Recipe, Sequence};
use pantry_core::xml::{self, Schema};

/// A recipe exercising every exported field.
fn full_recipe() -> Recipe {
    let mut recipe = Recipe::new("Chili con Carne")
        .expect("valid name")
        .with_category("dinner")
        .with_total_time("1h 30min")
        .with_author("M. Cook")
        .with_preparation_method("Brown the meat, add everything else, simmer.");
    recipe.history = "From the 2019 camping trip.".to_string();
    recipe.kitchen_appliances = "dutch oven".to_string();
    recipe.caravan_friendly = true;
    recipe.menu_friendly = true;

    let beans = Ingredient::new("kidney beans", 400.0, "g", 0).expect("valid");
    let chili = Ingredient::new("chili pepper", 2.5, "pc", 1).expect("valid");
    let beans_id = beans.id.to_string();
    recipe.ingredients.push(beans);
    recipe.ingredients.push(chili);

    recipe.addition_sequences.push(
        Sequence::new(1, "Soak the beans overnight.")
            .with_duration("8h")
            .with_ingredient_ids(vec![beans_id]),
    );
    recipe
        .addition_sequences
        .push(Sequence::new(2, "Combine and simmer.").with_duration("45min"));

    recipe.images.push(
        MediaFile::new(
            "chili.png",
            "image/png",
            "data:image/png;base64,aGVsbG8=",
            5,
        )
        .expect("valid media"),
    );

    recipe
}

/// Field-by-field comparison ignoring ids and timestamps, which import
/// regenerates by design.
fn assert_content_round_trips(original: &Recipe, imported: &Recipe) {
    assert_eq!(imported.name, original.name);
    assert_eq!(imported.category, original.category);
    assert_eq!(imported.total_time, original.total_time);
    assert_eq!(imported.preparation_method, original.preparation_method);
    assert_eq!(imported.author, original.author);
    assert_eq!(imported.history, original.history);
    assert_eq!(imported.kitchen_appliances, original.kitchen_appliances);
    assert_eq!(imported.caravan_friendly, original.caravan_friendly);
    assert_eq!(imported.hospital_friendly, original.hospital_friendly);
    assert_eq!(imported.menu_friendly, original.menu_friendly);
    assert_ne!(imported.id, original.id);

    assert_eq!(imported.ingredients.len(), original.ingredients.len());
    for (got, want) in imported.ingredients.iter().zip(&original.ingredients) {
        assert_eq!(got.name, want.name);
        assert_eq!(got.quantity, want.quantity);
        assert_eq!(got.unit, want.unit);
        assert_eq!(got.order, want.order);
        assert_ne!(got.id, want.id);
    }

    assert_eq!(
        imported.addition_sequences.len(),
        original.addition_sequences.len()
    );
    for (got, want) in imported
        .addition_sequences
        .iter()
        .zip(&original.addition_sequences)
    {
        assert_eq!(got.step, want.step);
        assert_eq!(got.description, want.description);
        assert_eq!(got.duration, want.duration);
        assert_eq!(got.ingredient_ids.len(), want.ingredient_ids.len());
    }

    assert_eq!(imported.images.len(), original.images.len());
    for (got, want) in imported.images.iter().zip(&original.images) {
        assert_eq!(got.name, want.name);
        assert_eq!(got.media_type, want.media_type);
        assert_eq!(got.data, want.data);
        assert_eq!(got.size, want.size);
    }
    assert_eq!(imported.videos.len(), original.videos.len());
}

#[test]
fn test_round_trip_full_schema() {
    let original = full_recipe();
    let xml = xml::generate_one(&original, Schema::Full).expect("generate");

    let report = xml::parse(&xml).expect("parse");
    assert!(report.is_clean());
    assert_eq!(report.successful.len(), 1);
    assert_content_round_trips(&original, &report.successful[0]);
}

#[test]
fn test_round_trip_compact_schema() {
    let original = full_recipe();
    let xml = xml::generate_one(&original, Schema::Compact).expect("generate");

    let report = xml::parse(&xml).expect("parse");
    assert!(report.is_clean());
    assert_content_round_trips(&original, &report.successful[0]);

    // The compact rendition is meaningfully smaller than the full one.
    let full = xml::generate_one(&original, Schema::Full).expect("generate");
    assert!(xml.len() < full.len());
}

#[test]
fn test_round_trip_preserves_remapped_references() {
    let original = full_recipe();
    let xml = xml::generate_one(&original, Schema::Full).expect("generate");
    let report = xml::parse(&xml).expect("parse");
    let imported = &report.successful[0];

    // The first sequence referenced the beans ingredient; after import the
    // reference must equal the beans ingredient's fresh id, not the exported
    // one.
    let beans = &imported.ingredients[0];
    let reference = &imported.addition_sequences[0].ingredient_ids[0];
    assert_eq!(reference, &beans.id.to_string());
    assert_ne!(reference, &original.ingredients[0].id.to_string());
    assert!(imported.dangling_ingredient_refs().is_empty());
}

#[test]
fn test_multi_recipe_batch_round_trip() {
    let recipes = vec![full_recipe(), full_recipe(), full_recipe()];
    let xml = xml::generate(&recipes, Schema::Full).expect("generate");
    assert!(xml.contains("<recipes>"));

    let report = xml::parse(&xml).expect("parse");
    assert_eq!(report.successful.len(), 3);
    assert!(report.is_clean());
}

#[test]
fn test_reserved_characters_survive_round_trip() {
    let mut recipe = Recipe::new(r#"Sauce <"Béarnaise" & Friends>"#).expect("valid");
    recipe.preparation_method = "Whisk 'til thick & glossy".to_string();

    for schema in [Schema::Full, Schema::Compact] {
        let xml = xml::generate_one(&recipe, schema).expect("generate");
        let report = xml::parse(&xml).expect("parse");
        let imported = &report.successful[0];
        assert_eq!(imported.name, recipe.name);
        assert_eq!(imported.preparation_method, recipe.preparation_method);
    }
}

#[test]
fn test_partial_failure_isolation() {
    // Three valid recipes and one with a missing name at position 2.
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<recipes>
  <recipe id="a"><name>First</name></recipe>
  <recipe id="b"><name>Second</name></recipe>
  <recipe id="c"><category>lost</category></recipe>
  <recipe id="d"><name>Fourth</name></recipe>
</recipes>"#;

    let report = xml::parse(xml).expect("parse");
    assert_eq!(report.successful.len(), 3);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.total(), 4);

    let failure = &report.failed[0];
    assert_eq!(failure.index, 2);
    assert_eq!(failure.name, None);
    assert!(failure.reason.contains("name"));
}

#[test]
fn test_id_remapping_from_foreign_document() {
    let xml = r#"<recipe>
  <name>Imported Stew</name>
  <ingredients>
    <ingredient id="ing-1"><name>carrot</name><quantity>3</quantity><unit>pc</unit></ingredient>
    <ingredient id="ing-2"><name>potato</name><quantity>5</quantity><unit>pc</unit></ingredient>
  </ingredients>
  <additionSequences>
    <sequence><step>1</step>
      <ingredientIds><ingredientId>ing-1</ingredientId></ingredientIds>
      <description>Chop the carrots.</description>
    </sequence>
  </additionSequences>
</recipe>"#;

    let report = xml::parse(xml).expect("parse");
    let recipe = &report.successful[0];

    let carrot = &recipe.ingredients[0];
    assert_eq!(carrot.name, "carrot");

    let refs = &recipe.addition_sequences[0].ingredient_ids;
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0], carrot.id.to_string());
    assert_ne!(refs[0], "ing-1");
}

#[test]
fn test_unmapped_reference_keeps_literal_id() {
    let xml = r#"<recipe>
  <name>Ghost Stew</name>
  <ingredients>
    <ingredient id="ing-1"><name>carrot</name></ingredient>
  </ingredients>
  <additionSequences>
    <sequence><step>1</step>
      <ingredientIds><ingredientId>ing-404</ingredientId></ingredientIds>
    </sequence>
  </additionSequences>
</recipe>"#;

    let report = xml::parse(xml).expect("parse");
    let recipe = &report.successful[0];
    assert_eq!(recipe.addition_sequences[0].ingredient_ids[0], "ing-404");
    assert_eq!(recipe.dangling_ingredient_refs(), vec!["ing-404"]);
}

#[test]
fn test_mixed_schema_document_parses() {
    // Full and compact spellings in one document; the parser is agnostic.
    let xml = r#"<recipe>
  <n>Mixed</n>
  <ii>
    <ingredient id="one"><n>salt</n><q>1</q></ingredient>
  </ii>
</recipe>"#;

    let report = xml::parse(xml).expect("parse");
    let recipe = &report.successful[0];
    assert_eq!(recipe.name, "Mixed");
    assert_eq!(recipe.ingredients[0].name, "salt");
    assert_eq!(recipe.ingredients[0].quantity, 1.0);
}

#[test]
fn test_invalid_xml_carries_diagnostic() {
    let err = xml::parse("<recipe><name>Broken</recipe>").expect_err("malformed");
    assert_eq!(err.code(), "INVALID_XML");
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_unrecognized_structure() {
    let err = xml::parse("<menu><dish>Soup</dish></menu>").expect_err("wrong root");
    assert_eq!(err.code(), "INVALID_STRUCTURE");

    let err = xml::parse("<recipes></recipes>").expect_err("empty batch");
    assert_eq!(err.code(), "INVALID_STRUCTURE");
}

#[test]
fn test_media_without_data_uri_is_skipped_not_fatal() {
    let xml = r#"<recipe>
  <name>Pictureless</name>
  <images>
    <image name="broken.png" type="image/png">just some text</image>
    <image name="ok.png" type="image/png">data:image/png;base64,aGVsbG8=</image>
  </images>
</recipe>"#;

    let report = xml::parse(xml).expect("parse");
    let recipe = &report.successful[0];
    assert_eq!(recipe.images.len(), 1);
    assert_eq!(recipe.images[0].name, "ok.png");
}

#[test]
fn test_import_file_validation() {
    let dir = tempfile::tempdir().unwrap();

    let tiny = dir.path().join("tiny.xml");
    std::fs::write(&tiny, "<r/>").unwrap();
    let err = xml::parse_file(&tiny).expect_err("too small");
    assert_eq!(err.code(), "INVALID_FILE");

    let wrong_ext = dir.path().join("recipes.txt");
    std::fs::write(&wrong_ext, "<recipe><name>Hi there</name></recipe>").unwrap();
    let err = xml::parse_file(&wrong_ext).expect_err("wrong extension");
    assert_eq!(err.code(), "INVALID_FILE");

    let good = dir.path().join("recipes.xml");
    std::fs::write(&good, "<recipe><name>Hi there</name></recipe>").unwrap();
    let report = xml::parse_file(&good).expect("parse");
    assert_eq!(report.successful.len(), 1);
}

#[test]
fn test_import_stamps_fresh_timestamps() {
    let original = full_recipe();
    let xml = xml::generate_one(&original, Schema::Full).expect("generate");
    let report = xml::parse(&xml).expect("parse");
    let imported = &report.successful[0];

    // Import is a fresh creation, not a restore.
    assert!(imported.created_at >= original.created_at);
    assert_eq!(imported.created_at, imported.updated_at);
}
