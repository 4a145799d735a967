//! Errors raised while loading external input data

use std::path::PathBuf;

use thiserror::Error;

/// External palette, template or metadata data is missing or structurally invalid
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed XML in {origin}: {message}")]
    Xml { origin: String, message: String },

    #[error("malformed JSON in {origin}: {source}")]
    Json {
        origin: String,
        source: serde_json::Error,
    },

    #[error("palette entry '{name}' has invalid color literal '{value}' (expected # followed by 6 or 8 hex digits)")]
    InvalidColor { name: String, value: String },

    #[error("metadata template {origin} must be a flat object of strings")]
    InvalidMetadata { origin: String },
}

impl DataLoadError {
    /// Read `path` to a string, mapping failure to [`DataLoadError::Io`]
    pub fn read(path: impl Into<PathBuf>) -> Result<String, Self> {
        let path = path.into();
        std::fs::read_to_string(&path).map_err(|source| Self::Io { path, source })
    }

    pub fn xml(origin: impl Into<String>, message: impl ToString) -> Self {
        Self::Xml {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    pub fn json(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            origin: origin.into(),
            source,
        }
    }

    /// The file path involved, if the error came from the filesystem
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let err = DataLoadError::read("/definitely/not/here.json").unwrap_err();
        assert_eq!(
            err.path().map(|p| p.as_path()),
            Some(std::path::Path::new("/definitely/not/here.json"))
        );
        assert!(err.to_string().contains("here.json"));
    }

    #[test]
    fn test_invalid_color_display() {
        let err = DataLoadError::InvalidColor {
            name: "red".to_string(),
            value: "e06c75".to_string(),
        };
        assert!(err.to_string().contains("'red'"));
        assert!(err.to_string().contains("'e06c75'"));
    }
}
