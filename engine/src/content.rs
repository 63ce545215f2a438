//! Loading the content table from TOML.

use std::path::{Path, PathBuf};

use thiserror::Error;

use limitless_types::{ContentDocument, ContentError, ContentTable};

#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("failed to read content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse content: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid content: {0}")]
    Invalid(#[from] ContentError),
}

/// Parse and validate a content document.
pub fn parse_content(raw: &str) -> Result<ContentTable, ContentLoadError> {
    let document: ContentDocument = toml::from_str(raw)?;
    let table = ContentTable::from_document(document)?;
    tracing::debug!(questions = table.question_count(), "Loaded content table");
    Ok(table)
}

pub fn load_content_file(path: &Path) -> Result<ContentTable, ContentLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ContentLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_content(&raw)
}
