//! Application layer - Use cases and orchestration

pub mod export;
pub mod init;
pub mod list_tags;
pub mod manage_config;
pub mod publish;

pub use export::{ExportFormat, ExportOptions, ExportOutcome, ExportService};
pub use list_tags::{ListTagsService, TagSummary};
pub use manage_config::ConfigService;
pub use publish::{PublishReport, PublishService};
