//! Domain layer - Notes, tags and export records

pub mod html;
pub mod note;
pub mod record;
pub mod tags;

pub use note::{Field, Note};
pub use record::{ExportRecord, RecordSchema};
pub use tags::{TagSpec, TagTree};
