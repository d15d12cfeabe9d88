// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reading and writing graph documents and layout settings.

use crate::layout::ConfigError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// On-disk document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Rusty Object Notation (default)
    Ron,
    /// JSON
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension; anything but `.json` is RON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Ron,
        }
    }
}

/// Parse a RON string
pub(crate) fn from_ron_str<T: DeserializeOwned>(content: &str) -> Result<T, FileError> {
    Ok(ron::from_str(content)?)
}

/// Render a value as pretty RON
pub(crate) fn to_ron_string<T: Serialize>(value: &T) -> Result<String, FileError> {
    let config = ron::ser::PrettyConfig::default()
        .struct_names(true)
        .enumerate_arrays(false);
    Ok(ron::ser::to_string_pretty(value, config)?)
}

/// Read a document, choosing the format from the extension
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, FileError> {
    let content = std::fs::read_to_string(path)?;
    match DocumentFormat::from_path(path) {
        DocumentFormat::Ron => from_ron_str(&content),
        DocumentFormat::Json => Ok(serde_json::from_str(&content)?),
    }
}

/// Write a document, choosing the format from the extension
pub(crate) fn write_document<T: Serialize>(value: &T, path: &Path) -> Result<(), FileError> {
    let content = match DocumentFormat::from_path(path) {
        DocumentFormat::Ron => to_ron_string(value)?,
        DocumentFormat::Json => serde_json::to_string_pretty(value)?,
    };
    std::fs::write(path, content)?;
    Ok(())
}

/// Error while loading or saving a document
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed RON input, including graphs that fail validation
    #[error("Invalid RON document: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// RON serialization failure
    #[error("Failed to write RON: {0}")]
    RonWrite(#[from] ron::Error),

    /// Malformed JSON input or JSON serialization failure
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// Document written by a newer version
    #[error("Format version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version found in the document
        found: u32,
        /// Newest version this build understands
        supported: u32,
    },

    /// Settings that parse but cannot be used
    #[error("Invalid layout settings: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("tree.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("tree.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("tree.ron")), DocumentFormat::Ron);
        assert_eq!(DocumentFormat::from_path(Path::new("tree")), DocumentFormat::Ron);
    }
}
