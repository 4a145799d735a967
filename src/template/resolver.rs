//! Template resolution - rewrites placeholders into concrete scheme values

use tracing::debug;

use crate::palette::ColorPalette;
use crate::style::StyleConfiguration;

use super::error::ResolveError;
use super::placeholder::{classify, Placeholder};
use super::tree::{Template, TemplateTree};

/// Name written into the root `<scheme>` element
pub const DEFAULT_SCHEME_NAME: &str = "One Dark Generated";

const SCHEME_TAG: &str = "scheme";
const OPTION_TAG: &str = "option";
const NAME_ATTR: &str = "name";
const VALUE_ATTR: &str = "value";

/// Context for template resolution
#[derive(Debug, Clone)]
pub struct ResolutionContext<'a> {
    /// Palette color placeholders resolve against
    pub palette: &'a ColorPalette,
    /// Emphasis font placeholders resolve against
    pub style: &'a StyleConfiguration,
    /// Replacement for the root scheme's `name` attribute
    pub scheme_name: String,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(palette: &'a ColorPalette, style: &'a StyleConfiguration) -> Self {
        Self {
            palette,
            style,
            scheme_name: DEFAULT_SCHEME_NAME.to_string(),
        }
    }

    pub fn with_scheme_name(mut self, name: impl Into<String>) -> Self {
        self.scheme_name = name.into();
        self
    }

    /// Literal for a color placeholder, without its leading `#`
    fn color(&self, name: &str) -> Result<&'a str, ResolveError> {
        let literal = self
            .palette
            .resolve(name)
            .ok_or_else(|| ResolveError::missing_color(name, self.palette.variant))?;
        let mut chars = literal.chars();
        chars.next();
        Ok(chars.as_str())
    }
}

/// Counts of rewrites performed during one resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub colors: usize,
    pub fonts: usize,
    pub renamed_schemes: usize,
}

/// Resolve a template into a fresh tree, leaving the template untouched
pub fn resolve_template(
    template: &Template,
    ctx: &ResolutionContext<'_>,
) -> Result<TemplateTree, ResolveError> {
    let mut tree = template.instantiate();
    resolve_tree(&mut tree, ctx)?;
    Ok(tree)
}

/// Rewrite every placeholder in `tree` in place
///
/// Nodes are visited breadth-first. The first failing placeholder aborts the
/// whole resolution.
pub fn resolve_tree(
    tree: &mut TemplateTree,
    ctx: &ResolutionContext<'_>,
) -> Result<ResolutionStats, ResolveError> {
    let mut stats = ResolutionStats::default();

    for id in tree.breadth_first() {
        let Some(element) = tree.element_mut(id) else {
            continue;
        };

        match element.name.as_str() {
            SCHEME_TAG => {
                if element.replace_attribute(NAME_ATTR, ctx.scheme_name.as_str()) {
                    stats.renamed_schemes += 1;
                }
            }
            OPTION_TAG => {
                let Some(value) = element.attribute(VALUE_ATTR) else {
                    continue;
                };

                let replacement = match classify(value)? {
                    Placeholder::Literal(_) => continue,
                    Placeholder::Color { name, suffix } => {
                        stats.colors += 1;
                        format!("{}{}", ctx.color(name)?, suffix)
                    }
                    // Text after the closing '%' is dropped; only the code is written
                    Placeholder::Font(spec) => {
                        stats.fonts += 1;
                        spec.variant(ctx.style).scheme_value().to_string()
                    }
                };

                element.replace_attribute(VALUE_ATTR, replacement);
            }
            _ => {}
        }
    }

    debug!(
        colors = stats.colors,
        fonts = stats.fonts,
        palette = %ctx.palette.variant,
        "resolved template placeholders"
    );
    Ok(stats)
}
