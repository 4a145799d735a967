//! Fixed table of the four generated theme identities

use thiserror::Error;

use super::GroupStyling;

/// Errors raised when looking up a theme identity
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("unknown theme identity: {identity}")]
    Unknown { identity: String },
}

/// One of the four (palette x emphasis) combinations the batch produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeIdentity {
    /// Opaque identifier the host uses for the theme
    pub id: &'static str,
    /// Human-readable theme name
    pub display_name: &'static str,
    vivid: bool,
    italic: bool,
}

/// Identifier of the regular theme, the one the host reports as active
pub const MANAGED_THEME_ID: &str = "f92a0fa7-1a98-47cd-b5cb-78ff67e6f4f3";

pub const THEMES: [ThemeIdentity; 4] = [
    ThemeIdentity {
        id: MANAGED_THEME_ID,
        display_name: "One Dark",
        vivid: false,
        italic: false,
    },
    ThemeIdentity {
        id: "1a92aa6f-c2f1-4994-ae01-6a78e43eeb24",
        display_name: "One Dark Italic",
        vivid: false,
        italic: true,
    },
    ThemeIdentity {
        id: "4b6007f7-b596-4ee2-96f9-968d3d3eb392",
        display_name: "One Dark Vivid",
        vivid: true,
        italic: false,
    },
    ThemeIdentity {
        id: "4f556d32-83cb-4b8b-9932-c4eccc4ce3af",
        display_name: "One Dark Vivid Italic",
        vivid: true,
        italic: true,
    },
];

impl ThemeIdentity {
    /// Find an identity by opaque id or by display name
    pub fn lookup(key: &str) -> Result<&'static ThemeIdentity, IdentityError> {
        THEMES
            .iter()
            .find(|t| t.id == key || t.display_name == key)
            .ok_or_else(|| IdentityError::Unknown {
                identity: key.to_string(),
            })
    }

    /// Whether this identity uses the vivid palette
    pub fn is_vivid(&self) -> bool {
        self.vivid
    }

    /// Styling applied to every group before user preferences are layered on
    pub fn base_style(&self) -> GroupStyling {
        if self.italic {
            GroupStyling::Italic
        } else {
            GroupStyling::None
        }
    }

    /// File stem for outputs: lower-cased name, spaces replaced by underscores
    pub fn slug(&self) -> String {
        crate::document::slug(self.display_name)
    }
}

/// Anything the host can report as its current theme
pub trait HostTheme {
    fn id(&self) -> &str;
}

impl HostTheme for str {
    fn id(&self) -> &str {
        self
    }
}

impl HostTheme for ThemeIdentity {
    fn id(&self) -> &str {
        self.id
    }
}

/// Whether the host's current theme is the one this generator manages
pub fn is_managed_theme<T: HostTheme + ?Sized>(theme: &T) -> bool {
    theme.id() == MANAGED_THEME_ID
}
