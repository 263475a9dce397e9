use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Glob pattern selecting the test run directories by default
pub const DEFAULT_PATTERN: &str = "zipios*";

/// Names are matched one directory level deep, so separators and a leading
/// dot must be spelled out in the pattern.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Errors raised while enumerating the target directory
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("directory does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read directory {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// A directory entry selected for the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }
}

/// Selects the entries of one directory whose names match a glob pattern
#[derive(Debug, Clone)]
pub struct EntryLister {
    directory: PathBuf,
    pattern: Pattern,
}

impl EntryLister {
    pub fn new(directory: impl Into<PathBuf>, pattern: &str) -> Result<Self, ListingError> {
        let pattern = parse_pattern(pattern)?;
        Ok(Self {
            directory: directory.into(),
            pattern,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Check whether a bare file name is selected by the pattern
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.matches_with(name, MATCH_OPTIONS)
    }

    /// Read the directory once and return the matching entries sorted by name
    pub fn list_entries(&self) -> Result<Vec<Entry>, ListingError> {
        let metadata = fs::metadata(&self.directory).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ListingError::NotFound(self.directory.clone()),
            _ => ListingError::Read {
                path: self.directory.clone(),
                source: e,
            },
        })?;
        if !metadata.is_dir() {
            return Err(ListingError::NotADirectory(self.directory.clone()));
        }

        let read_err = |source| ListingError::Read {
            path: self.directory.clone(),
            source,
        };

        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&self.directory).map_err(read_err)? {
            let dir_entry = dir_entry.map_err(read_err)?;
            let name = match dir_entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!("Skipping entry with non UTF-8 name: {:?}", raw);
                    continue;
                }
            };

            if !self.matches(&name) {
                continue;
            }

            debug!("Matched entry: {}", name);
            entries.push(Entry {
                is_dir: dir_entry.path().is_dir(),
                name,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Compile a glob pattern, rejecting empty ones
pub fn parse_pattern(pattern: &str) -> Result<Pattern, ListingError> {
    if pattern.is_empty() {
        return Err(ListingError::InvalidPattern {
            pattern: pattern.to_string(),
            source: glob::PatternError {
                pos: 0,
                msg: "pattern is empty",
            },
        });
    }

    Pattern::new(pattern).map_err(|source| ListingError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// List the entries of `directory` matching `pattern`
pub fn list_entries(directory: &Path, pattern: &str) -> Result<Vec<Entry>, ListingError> {
    EntryLister::new(directory, pattern)?.list_entries()
}
