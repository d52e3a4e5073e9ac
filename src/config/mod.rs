// src/config/mod.rs
pub mod consts;
pub mod member_types;
pub mod options;

pub use member_types::RoleTable;
pub use options::{AppOptions, ExportFormat, ExportOptions, ScrapeOptions, ServerOptions};
