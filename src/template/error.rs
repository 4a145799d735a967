//! Error types for placeholder resolution

use thiserror::Error;

use crate::palette::ColorVariant;

/// Errors that abort the resolution of a template
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Color placeholder names a color the active palette does not define
    #[error("{name} is not in the color definition for {variant}")]
    MissingColorDefinition { name: String, variant: ColorVariant },

    /// Font placeholder references a group outside attributes/comments/keywords
    #[error("unknown group reference '{group}' (valid groups: attributes, comments, keywords)")]
    UnknownGroupReference { group: String },

    /// Value starts with a placeholder delimiter but never closes it
    #[error("malformed placeholder '{value}': missing closing '{delimiter}'")]
    MalformedPlaceholder { value: String, delimiter: char },
}

impl ResolveError {
    pub fn missing_color(name: impl Into<String>, variant: ColorVariant) -> Self {
        Self::MissingColorDefinition {
            name: name.into(),
            variant,
        }
    }

    pub fn unknown_group(group: impl Into<String>) -> Self {
        Self::UnknownGroupReference {
            group: group.into(),
        }
    }

    pub fn malformed(value: impl Into<String>, delimiter: char) -> Self {
        Self::MalformedPlaceholder {
            value: value.into(),
            delimiter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_color_display() {
        let err = ResolveError::missing_color("unknown_color", ColorVariant::Vivid);
        assert_eq!(
            err.to_string(),
            "unknown_color is not in the color definition for VIVID"
        );
    }

    #[test]
    fn test_malformed_display() {
        let err = ResolveError::malformed("$bg0", '$');
        assert!(err.to_string().contains("missing closing '$'"));
    }
}
