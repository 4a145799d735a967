//! Per-run style configuration

use crate::settings::Preferences;

use super::{GroupStyling, ThemeIdentity};

/// Effective emphasis for one generation run
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleConfiguration {
    /// Select the vivid palette instead of the normal one
    pub is_vivid: bool,
    pub comment_style: GroupStyling,
    pub keyword_style: GroupStyling,
    pub attributes_style: GroupStyling,
}

impl StyleConfiguration {
    /// Derive the configuration for `identity` with `preferences` layered on top
    ///
    /// The identity fixes the palette and the base styling of every group.
    /// `is_vivid` forces the vivid palette, `is_italic` makes every group
    /// italic and `is_bold` adds bold to keywords.
    pub fn new(identity: &ThemeIdentity, preferences: &Preferences) -> Self {
        let base = identity.base_style();
        let apply_italic = |style: GroupStyling| {
            if preferences.is_italic {
                style.with_italic()
            } else {
                style
            }
        };

        let mut keyword_style = apply_italic(base);
        if preferences.is_bold {
            keyword_style = keyword_style.with_bold();
        }

        Self {
            is_vivid: identity.is_vivid() || preferences.is_vivid,
            comment_style: apply_italic(base),
            keyword_style,
            attributes_style: apply_italic(base),
        }
    }

    /// Configuration for a batch run, where only the identity matters
    pub fn for_identity(identity: &ThemeIdentity) -> Self {
        Self::new(identity, &Preferences::default())
    }
}
