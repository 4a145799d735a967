//! Emphasis model for generated themes
//!
//! A theme assigns each token [`Group`] a [`GroupStyling`]. Font placeholders in
//! the base template combine literal directives with group references, and the
//! result is collapsed into a single [`FontVariant`] written into the scheme.

mod config;
mod identity;

pub use config::StyleConfiguration;
pub use identity::{is_managed_theme, HostTheme, IdentityError, ThemeIdentity, MANAGED_THEME_ID, THEMES};

use std::fmt;
use std::str::FromStr;

/// Emphasis assigned to a token group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroupStyling {
    #[default]
    None,
    Bold,
    Italic,
    BoldItalic,
}

impl GroupStyling {
    /// Build a styling from independent bold and italic flags
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, true) => GroupStyling::BoldItalic,
            (true, false) => GroupStyling::Bold,
            (false, true) => GroupStyling::Italic,
            (false, false) => GroupStyling::None,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, GroupStyling::Bold | GroupStyling::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, GroupStyling::Italic | GroupStyling::BoldItalic)
    }

    /// Same styling with bold added
    pub fn with_bold(self) -> Self {
        Self::from_flags(true, self.is_italic())
    }

    /// Same styling with italic added
    pub fn with_italic(self) -> Self {
        Self::from_flags(self.is_bold(), true)
    }
}

/// Token groups that font placeholders may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Attributes,
    Comments,
    Keywords,
}

impl Group {
    pub fn as_str(self) -> &'static str {
        match self {
            Group::Attributes => "attributes",
            Group::Comments => "comments",
            Group::Keywords => "keywords",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a group name is not one of the three known groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGroup(pub String);

impl FromStr for Group {
    type Err = UnknownGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attributes" => Ok(Group::Attributes),
            "comments" => Ok(Group::Comments),
            "keywords" => Ok(Group::Keywords),
            other => Err(UnknownGroup(other.to_string())),
        }
    }
}

/// Font emphasis as encoded in the editor scheme format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontVariant {
    None,
    Bold,
    Italic,
    BoldItalic,
}

impl FontVariant {
    /// Collapse independent bold and italic matches into one variant
    pub fn from_matches(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, true) => FontVariant::BoldItalic,
            (true, false) => FontVariant::Bold,
            (false, true) => FontVariant::Italic,
            (false, false) => FontVariant::None,
        }
    }

    /// Integer code used by the scheme's `FONT_TYPE` option
    pub fn scheme_value(self) -> u8 {
        match self {
            FontVariant::None => 0,
            FontVariant::Bold => 1,
            FontVariant::Italic => 2,
            FontVariant::BoldItalic => 3,
        }
    }
}

/// Select the styling `config` assigns to `group`
pub fn evaluate(group: Group, config: &StyleConfiguration) -> GroupStyling {
    match group {
        Group::Attributes => config.attributes_style,
        Group::Comments => config.comment_style,
        Group::Keywords => config.keyword_style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_variant_table_is_total() {
        let cases = [
            (false, false, FontVariant::None, 0),
            (true, false, FontVariant::Bold, 1),
            (false, true, FontVariant::Italic, 2),
            (true, true, FontVariant::BoldItalic, 3),
        ];
        for (bold, italic, variant, code) in cases {
            let got = FontVariant::from_matches(bold, italic);
            assert_eq!(got, variant, "bold={bold} italic={italic}");
            assert_eq!(got.scheme_value(), code);
        }
    }

    #[test]
    fn test_group_styling_facets() {
        assert!(GroupStyling::Bold.is_bold());
        assert!(!GroupStyling::Bold.is_italic());
        assert!(GroupStyling::BoldItalic.is_bold());
        assert!(GroupStyling::BoldItalic.is_italic());
        assert!(!GroupStyling::None.is_bold());
        assert_eq!(GroupStyling::Italic.with_bold(), GroupStyling::BoldItalic);
        assert_eq!(GroupStyling::None.with_italic(), GroupStyling::Italic);
    }

    #[test]
    fn test_group_from_str() {
        assert_eq!("keywords".parse::<Group>(), Ok(Group::Keywords));
        assert_eq!("comments".parse::<Group>(), Ok(Group::Comments));
        assert_eq!("attributes".parse::<Group>(), Ok(Group::Attributes));
        assert_eq!(
            "strings".parse::<Group>(),
            Err(UnknownGroup("strings".to_string()))
        );
    }

    #[test]
    fn test_evaluate_selects_matching_field() {
        let config = StyleConfiguration {
            is_vivid: false,
            comment_style: GroupStyling::Italic,
            keyword_style: GroupStyling::BoldItalic,
            attributes_style: GroupStyling::Bold,
        };
        assert_eq!(evaluate(Group::Comments, &config), GroupStyling::Italic);
        assert_eq!(evaluate(Group::Keywords, &config), GroupStyling::BoldItalic);
        assert_eq!(evaluate(Group::Attributes, &config), GroupStyling::Bold);
    }
}
