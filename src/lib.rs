// Library interface for devindex
pub mod config;
pub mod core;
pub mod logging;
pub mod symbols;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::core::index::{render, IndexGenerator};
pub use crate::core::listing::{Entry, EntryLister, ListingError, DEFAULT_PATTERN};
pub use crate::core::render::{render_page, PageOptions};
