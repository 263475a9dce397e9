//! Index page generation for a test results directory

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs as async_fs;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::listing::{Entry, EntryLister, DEFAULT_PATTERN};
use crate::core::render::{render_page, PageOptions};

/// Lists the matching entries of a directory and renders them as an index page
#[derive(Debug, Clone)]
pub struct IndexGenerator {
    lister: EntryLister,
    options: PageOptions,
}

impl IndexGenerator {
    pub fn new(lister: EntryLister, options: PageOptions) -> Self {
        Self { lister, options }
    }

    /// Build a generator from the configured directory, pattern and page settings
    pub fn from_config(config: &Config) -> Result<Self> {
        let lister = EntryLister::new(config.get_directory(), &config.get_pattern())?;
        Ok(Self::new(lister, config.page_options()))
    }

    pub fn lister(&self) -> &EntryLister {
        &self.lister
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Matching entries, sorted by name
    pub fn entries(&self) -> Result<Vec<Entry>> {
        let entries = self.lister.list_entries().with_context(|| {
            format!(
                "Failed to list entries matching '{}'",
                self.lister.pattern()
            )
        })?;

        for entry in &entries {
            debug!("Indexing entry: {}", entry.name);
        }
        Ok(entries)
    }

    /// Produce the complete HTML document
    pub fn generate(&self) -> Result<String> {
        info!(
            "Indexing {} with pattern '{}'",
            self.lister.directory().display(),
            self.lister.pattern()
        );

        let entries = self.entries()?;
        info!("Found {} matching entries", entries.len());

        render_page(&entries, &self.options)
    }

    /// Render the page into `path`, returning the number of bytes written
    pub async fn generate_to_file(&self, path: &Path) -> Result<usize> {
        let page = self.generate()?;
        async_fs::write(path, &page)
            .await
            .with_context(|| format!("Failed to write index page: {}", path.display()))?;

        info!("Wrote index page to {}", path.display());
        Ok(page.len())
    }
}

/// Render the index of the current working directory with the default settings
pub fn render() -> Result<String> {
    let lister = EntryLister::new(".", DEFAULT_PATTERN)?;
    IndexGenerator::new(lister, PageOptions::default()).generate()
}
