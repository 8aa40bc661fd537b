use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pantry"))
}

fn pantry(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()
        .expect("binary should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_add_list_export_import_flow() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().join("data");

    let added = pantry(
        &data_dir,
        &[
            "add",
            "Test Soup",
            "--category",
            "soup",
            "--ingredient",
            "water:1:l",
            "--ingredient",
            "salt:0.5:tsp",
            "--step",
            "Boil the water.",
        ],
    );
    assert!(added.status.success(), "add failed: {:?}", added);
    assert!(stdout(&added).contains("Test Soup"));

    let listed = pantry(&data_dir, &["list", "--json"]);
    assert!(listed.status.success());
    let recipes: Vec<serde_json::Value> =
        serde_json::from_str(&stdout(&listed)).expect("list --json output");
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["ingredients"], 2);
    let id = recipes[0]["id"].as_str().expect("id").to_string();

    let shown = pantry(&data_dir, &["show", &id]);
    assert!(shown.status.success());
    assert!(stdout(&shown).contains("Boil the water."));

    let export_path = dir.path().join("out.xml");
    let exported = pantry(
        &data_dir,
        &["export", "--all", "--output", export_path.to_str().unwrap()],
    );
    assert!(exported.status.success(), "export failed: {:?}", exported);
    let document = std::fs::read_to_string(&export_path).expect("exported file");
    assert!(document.contains("Test Soup"));

    // Importing the exported file creates a second, freshly-identified copy.
    let imported = pantry(&data_dir, &["import", export_path.to_str().unwrap()]);
    assert!(imported.status.success(), "import failed: {:?}", imported);
    assert!(stdout(&imported).contains("1 saved, 0 failed"));

    let listed = pantry(&data_dir, &["list", "--json"]);
    let recipes: Vec<serde_json::Value> =
        serde_json::from_str(&stdout(&listed)).expect("list --json output");
    assert_eq!(recipes.len(), 2);

    let deleted = pantry(&data_dir, &["delete", &id]);
    assert!(deleted.status.success());

    let cleared = pantry(&data_dir, &["clear", "--yes"]);
    assert!(cleared.status.success());
    let listed = pantry(&data_dir, &["list", "--json"]);
    let recipes: Vec<serde_json::Value> =
        serde_json::from_str(&stdout(&listed)).expect("list --json output");
    assert!(recipes.is_empty());
}

#[test]
fn test_category_filter_and_categories_listing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().join("data");

    for (name, category) in [("Soup", "starter"), ("Cake", "dessert"), ("Pie", "dessert")] {
        let added = pantry(&data_dir, &["add", name, "--category", category]);
        assert!(added.status.success());
    }

    let listed = pantry(&data_dir, &["list", "--json", "--category", "dessert"]);
    let recipes: Vec<serde_json::Value> =
        serde_json::from_str(&stdout(&listed)).expect("list --json output");
    assert_eq!(recipes.len(), 2);

    let categories = pantry(&data_dir, &["categories"]);
    let text = stdout(&categories);
    assert!(text.contains("dessert"));
    assert!(text.contains("starter"));
}

#[test]
fn test_import_reports_per_recipe_failures() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().join("data");

    let file = dir.path().join("mixed.xml");
    std::fs::write(
        &file,
        r#"<recipes>
  <recipe><name>Good One</name></recipe>
  <recipe><category>nameless</category></recipe>
</recipes>"#,
    )
    .unwrap();

    let imported = pantry(&data_dir, &["import", file.to_str().unwrap()]);
    assert!(imported.status.success());
    assert!(stdout(&imported).contains("1 saved, 1 failed"));
}

#[test]
fn test_add_rejects_blank_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().join("data");

    let added = pantry(&data_dir, &["add", "   "]);
    assert!(!added.status.success());
}
