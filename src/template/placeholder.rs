//! Placeholder grammars embedded in template attribute values
//!
//! Two grammars share one delimiter-scanning primitive:
//!
//! ```text
//! $bg0$, border          color: symbolic name between '$', suffix kept
//! %bold$theme^keywords%  font: '$'-separated directives between '%'
//! ```

use crate::style::{self, FontVariant, Group, StyleConfiguration};

use super::error::ResolveError;

/// Delimiter of color placeholders
pub const COLOR_DELIMITER: char = '$';
/// Delimiter of font placeholders
pub const FONT_DELIMITER: char = '%';

const SEGMENT_SEPARATOR: char = '$';
const GROUP_SEPARATOR: char = '^';
const GROUP_PREFIX: &str = "theme";

/// Token found between the first and last occurrence of a delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extraction<'a> {
    /// Byte index of the closing delimiter
    pub end: usize,
    pub token: &'a str,
    /// Everything after the closing delimiter
    pub suffix: &'a str,
}

/// Extract the text between the first and last `delimiter` in `value`
///
/// Returns None when `value` holds fewer than two delimiters.
pub fn extract(value: &str, delimiter: char) -> Option<Extraction<'_>> {
    let start = value.find(delimiter)?;
    let end = value.rfind(delimiter)?;
    if end == start {
        return None;
    }
    let width = delimiter.len_utf8();
    Some(Extraction {
        end,
        token: &value[start + width..end],
        suffix: &value[end + width..],
    })
}

/// An attribute value sorted into one of the grammars
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder<'a> {
    Color { name: &'a str, suffix: &'a str },
    Font(FontSpec),
    Literal(&'a str),
}

/// Decide which grammar `value` belongs to
///
/// Only values starting with a delimiter are placeholders; such a value
/// without a closing delimiter is an error.
pub fn classify(value: &str) -> Result<Placeholder<'_>, ResolveError> {
    if value.starts_with(COLOR_DELIMITER) {
        let found = extract(value, COLOR_DELIMITER)
            .ok_or_else(|| ResolveError::malformed(value, COLOR_DELIMITER))?;
        Ok(Placeholder::Color {
            name: found.token,
            suffix: found.suffix,
        })
    } else if value.starts_with(FONT_DELIMITER) {
        let found = extract(value, FONT_DELIMITER)
            .ok_or_else(|| ResolveError::malformed(value, FONT_DELIMITER))?;
        Ok(Placeholder::Font(FontSpec::parse(found.token)?))
    } else {
        Ok(Placeholder::Literal(value))
    }
}

/// One `$`-separated segment of a font placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontDirective {
    Bold,
    Italic,
    /// `theme^<group>`: take the emphasis configured for the group
    Group(Group),
    /// Anything else; never matches
    Other(String),
}

impl FontDirective {
    pub fn parse(segment: &str) -> Result<Self, ResolveError> {
        if segment.starts_with("bold") {
            Ok(FontDirective::Bold)
        } else if segment.starts_with("italic") {
            Ok(FontDirective::Italic)
        } else if segment.starts_with(GROUP_PREFIX) {
            let group = segment
                .split_once(GROUP_SEPARATOR)
                .map_or(segment, |(_, group)| group);
            group
                .parse()
                .map(FontDirective::Group)
                .map_err(|_| ResolveError::unknown_group(group))
        } else {
            Ok(FontDirective::Other(segment.to_string()))
        }
    }
}

/// Parsed font placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub directives: Vec<FontDirective>,
}

impl FontSpec {
    /// Parse the token between the `%` delimiters
    pub fn parse(token: &str) -> Result<Self, ResolveError> {
        let directives = token
            .split(SEGMENT_SEPARATOR)
            .map(FontDirective::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { directives })
    }

    /// True if any directive asks for bold
    pub fn is_bold(&self, config: &StyleConfiguration) -> bool {
        self.directives.iter().any(|d| match d {
            FontDirective::Bold => true,
            FontDirective::Group(group) => style::evaluate(*group, config).is_bold(),
            _ => false,
        })
    }

    /// True if any directive asks for italic
    pub fn is_italic(&self, config: &StyleConfiguration) -> bool {
        self.directives.iter().any(|d| match d {
            FontDirective::Italic => true,
            FontDirective::Group(group) => style::evaluate(*group, config).is_italic(),
            _ => false,
        })
    }

    pub fn variant(&self, config: &StyleConfiguration) -> FontVariant {
        FontVariant::from_matches(self.is_bold(config), self.is_italic(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::GroupStyling;

    fn config(keywords: GroupStyling, comments: GroupStyling) -> StyleConfiguration {
        StyleConfiguration {
            is_vivid: false,
            comment_style: comments,
            keyword_style: keywords,
            attributes_style: GroupStyling::None,
        }
    }

    #[test]
    fn test_extract_between_first_and_last() {
        let found = extract("$bg0$, border", '$').expect("Should extract");
        assert_eq!(found.token, "bg0");
        assert_eq!(found.end, 4);
        assert_eq!(found.suffix, ", border");
    }

    #[test]
    fn test_extract_uses_last_delimiter() {
        let found = extract("$a$ and $b$", '$').expect("Should extract");
        assert_eq!(found.token, "a$ and $b");
        assert_eq!(found.suffix, "");
    }

    #[test]
    fn test_extract_single_delimiter() {
        assert_eq!(extract("$bg0", '$'), None);
        assert_eq!(extract("bg0", '$'), None);
    }

    #[test]
    fn test_extract_empty_token() {
        let found = extract("%%", '%').expect("Should extract");
        assert_eq!(found.token, "");
    }

    #[test]
    fn test_classify_literal() {
        assert_eq!(classify("282c34").unwrap(), Placeholder::Literal("282c34"));
        // Delimiter not in first position is not a placeholder
        assert_eq!(classify("x$bg0$").unwrap(), Placeholder::Literal("x$bg0$"));
        assert_eq!(classify("").unwrap(), Placeholder::Literal(""));
    }

    #[test]
    fn test_classify_color() {
        assert_eq!(
            classify("$red$;suffix").unwrap(),
            Placeholder::Color {
                name: "red",
                suffix: ";suffix"
            }
        );
    }

    #[test]
    fn test_classify_font() {
        let placeholder = classify("%bold$theme^keywords%").unwrap();
        assert_eq!(
            placeholder,
            Placeholder::Font(FontSpec {
                directives: vec![FontDirective::Bold, FontDirective::Group(Group::Keywords)]
            })
        );
    }

    #[test]
    fn test_classify_malformed() {
        assert_eq!(classify("$bg0"), Err(ResolveError::malformed("$bg0", '$')));
        assert_eq!(classify("%bold"), Err(ResolveError::malformed("%bold", '%')));
    }

    #[test]
    fn test_unknown_group_reference() {
        assert_eq!(
            FontDirective::parse("theme^strings"),
            Err(ResolveError::unknown_group("strings"))
        );
        // No separator: the whole segment is taken as the group name
        assert_eq!(
            FontDirective::parse("theme"),
            Err(ResolveError::unknown_group("theme"))
        );
    }

    #[test]
    fn test_unrecognised_segment_never_matches() {
        let spec = FontSpec::parse("underline").unwrap();
        let cfg = config(GroupStyling::BoldItalic, GroupStyling::BoldItalic);
        assert_eq!(spec.variant(&cfg), FontVariant::None);
    }

    #[test]
    fn test_literal_directives() {
        let cfg = config(GroupStyling::None, GroupStyling::None);
        assert_eq!(FontSpec::parse("bold").unwrap().variant(&cfg), FontVariant::Bold);
        assert_eq!(FontSpec::parse("italic").unwrap().variant(&cfg), FontVariant::Italic);
        assert_eq!(
            FontSpec::parse("bold$italic").unwrap().variant(&cfg),
            FontVariant::BoldItalic
        );
    }

    #[test]
    fn test_group_reference_follows_configuration() {
        let spec = FontSpec::parse("theme^keywords").unwrap();
        assert_eq!(
            spec.variant(&config(GroupStyling::BoldItalic, GroupStyling::None)),
            FontVariant::BoldItalic
        );
        assert_eq!(
            spec.variant(&config(GroupStyling::Italic, GroupStyling::None)),
            FontVariant::Italic
        );
        assert_eq!(
            spec.variant(&config(GroupStyling::None, GroupStyling::BoldItalic)),
            FontVariant::None
        );
    }

    #[test]
    fn test_literal_and_group_combine() {
        let spec = FontSpec::parse("bold$theme^comments").unwrap();
        let cfg = config(GroupStyling::None, GroupStyling::Italic);
        assert!(spec.is_bold(&cfg));
        assert!(spec.is_italic(&cfg));
        assert_eq!(spec.variant(&cfg).scheme_value(), 3);
    }
}
