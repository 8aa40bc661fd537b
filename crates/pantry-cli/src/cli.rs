use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use pantry_core::VERSION;

/// Pantry - a local-first personal recipe manager
#[derive(Parser)]
#[command(name = "pantry")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding the recipe store
    #[arg(short, long, global = true, env = "PANTRY_DATA_DIR")]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new recipe
    Add(AddArgs),

    /// List recipes
    List(ListArgs),

    /// Show one recipe in full
    Show(ShowArgs),

    /// Delete a recipe
    Delete(DeleteArgs),

    /// Export recipes to an XML file
    Export(ExportArgs),

    /// Import recipes from an XML file
    Import(ImportArgs),

    /// List categories in use
    Categories,

    /// Delete ALL recipes
    Clear(ClearArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Recipe name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Total time, e.g. "1h 30min"
    #[arg(short, long)]
    pub time: Option<String>,

    /// Preparation method text
    #[arg(short, long)]
    pub method: Option<String>,

    /// Author
    #[arg(long)]
    pub author: Option<String>,

    /// Kitchen appliances needed
    #[arg(long)]
    pub appliances: Option<String>,

    /// Ingredient as "name:quantity:unit" (repeatable; quantity and unit optional)
    #[arg(short, long, value_name = "SPEC")]
    pub ingredient: Vec<String>,

    /// Preparation step description (repeatable, in order)
    #[arg(short, long, value_name = "TEXT")]
    pub step: Vec<String>,

    /// Attach an image file (repeatable)
    #[arg(long, value_name = "PATH")]
    pub image: Vec<String>,

    /// Attach a video file (repeatable)
    #[arg(long, value_name = "PATH")]
    pub video: Vec<String>,

    /// Mark as caravan friendly
    #[arg(long)]
    pub caravan: bool,

    /// Mark as hospital friendly
    #[arg(long)]
    pub hospital: bool,

    /// Mark as menu friendly
    #[arg(long)]
    pub menu: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Filter by category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Recipe ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Recipe ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Recipe IDs to export
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,

    /// Export every stored recipe
    #[arg(long, conflicts_with = "ids")]
    pub all: bool,

    /// Use the compact tag schema (QR-sized payloads)
    #[arg(long)]
    pub compact: bool,

    /// Output file (defaults to a name derived from the export)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// XML file to import
    #[arg(value_name = "FILE")]
    pub file: String,
}

/// Arguments for the `clear` command
#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}
