//! The XML interchange codec: lossless export and tolerant import over one
//! shared tag table.
//!
//! Two sibling schemas exist — verbose tags for backups and bulk export,
//! abbreviated tags for size-constrained payloads. Both directions consult
//! the same table, so the parser accepts either spelling and
//! `parse(generate(recipes))` reconstructs every primitive field verbatim
//! (entity ids excepted: imports always regenerate them).

pub mod dom;
pub mod export;
pub mod import;
pub mod tags;

pub use export::{export_file_name, generate, generate_one, write_to_file};
pub use import::{parse, parse_file, FailedRecipe, ImportReport};
pub use tags::Schema;
