//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod markup;
pub mod note_file;
pub mod repository;

pub use config::Config;
pub use markup::{Dialect, DocumentHead, MarkupWriter};
pub use repository::{FileSystemRepository, NoteFileWriter, NoteRepository};
