//! Color palettes for the two theme variants
//!
//! A palette maps symbolic color names used in template placeholders (for
//! example `$bg0$`) to literal hex colors. Each variant is loaded from its own
//! flat JSON object, fresh for every generation run.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::DataLoadError;

/// Which palette a generation run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorVariant {
    Vivid,
    Normal,
}

impl ColorVariant {
    pub fn from_vivid(is_vivid: bool) -> Self {
        if is_vivid {
            ColorVariant::Vivid
        } else {
            ColorVariant::Normal
        }
    }

    /// Lower-case name used in palette file names
    pub fn file_stem(self) -> &'static str {
        match self {
            ColorVariant::Vivid => "vivid",
            ColorVariant::Normal => "normal",
        }
    }
}

impl fmt::Display for ColorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorVariant::Vivid => f.write_str("VIVID"),
            ColorVariant::Normal => f.write_str("NORMAL"),
        }
    }
}

/// Symbolic name -> literal color mapping for one variant
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    pub variant: ColorVariant,
    /// Color mappings: symbolic name -> `#rrggbb` or `#rrggbbaa`
    pub colors: HashMap<String, String>,
}

impl ColorPalette {
    /// Load a palette from a JSON file
    pub fn from_file(variant: ColorVariant, path: &Path) -> Result<Self, DataLoadError> {
        let content = DataLoadError::read(path)?;
        Self::from_json(variant, &content, &path.display().to_string())
    }

    /// Load a palette from a JSON string; `origin` names the source in errors
    pub fn from_json(variant: ColorVariant, content: &str, origin: &str) -> Result<Self, DataLoadError> {
        let colors: HashMap<String, String> =
            serde_json::from_str(content).map_err(|e| DataLoadError::json(origin, e))?;

        for (name, value) in &colors {
            if !is_color_literal(value) {
                return Err(DataLoadError::InvalidColor {
                    name: name.clone(),
                    value: value.clone(),
                });
            }
        }

        Ok(ColorPalette { variant, colors })
    }

    /// Resolve a symbolic color name to its literal value
    ///
    /// Returns None if the name is not defined in this palette.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(|s| s.as_str())
    }
}

/// `#` followed by exactly 6 or 8 hex digits
fn is_color_literal(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
