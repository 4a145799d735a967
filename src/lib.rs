//! One Dark theme generator
//!
//! Resolves a parameterized editor-scheme template into the concrete theme
//! variants (regular, italic, vivid, vivid italic), each written as a scheme
//! XML document plus a JSON metadata document.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use onedark_themegen::palette::{ColorPalette, ColorVariant};
//! use onedark_themegen::style::{StyleConfiguration, THEMES};
//! use onedark_themegen::template::{resolve_template, ResolutionContext, Template};
//!
//! let template = Template::parse(
//!     r#"<scheme name="One Dark"><option name="TEXT" value="$fg$"/></scheme>"#,
//!     "inline",
//! ).unwrap();
//! let palette = ColorPalette {
//!     variant: ColorVariant::Normal,
//!     colors: HashMap::from([("fg".to_string(), "#abb2bf".to_string())]),
//! };
//! let style = StyleConfiguration::for_identity(&THEMES[0]);
//!
//! let tree = resolve_template(&template, &ResolutionContext::new(&palette, &style)).unwrap();
//! assert!(tree.to_xml().unwrap().contains(r#"value="abb2bf""#));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod palette;
pub mod settings;
pub mod style;
pub mod template;

pub use config::GeneratorConfig;
pub use document::{MetadataTemplate, OutputError, ThemeDocuments};
pub use error::DataLoadError;
pub use palette::{ColorPalette, ColorVariant};
pub use settings::Preferences;
pub use style::{IdentityError, StyleConfiguration, ThemeIdentity, THEMES};
pub use template::{ResolveError, Template};

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use template::{resolve_template, ResolutionContext};

/// Errors that can occur while generating themes
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Palette, template or metadata input could not be loaded
    #[error("data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    /// Requested theme is not one of the four known identities
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// A placeholder in the template could not be resolved
    #[error("failed to resolve '{theme}': {source}")]
    Resolve { theme: String, source: ResolveError },

    /// Resolved tree could not be serialized
    #[error("failed to serialize '{theme}': {source}")]
    Serialize { theme: String, source: std::io::Error },

    /// Output directory could not be cleared or written
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Resolve `template` for one theme and assemble its output documents
///
/// Pure in-memory step: nothing is read or written.
pub fn resolve_document(
    template: &Template,
    palette: &ColorPalette,
    style: &StyleConfiguration,
    metadata: &MetadataTemplate,
    display_name: &str,
    config: &GeneratorConfig,
) -> Result<ThemeDocuments, GenerateError> {
    let ctx = ResolutionContext::new(palette, style).with_scheme_name(config.scheme_name.as_str());
    let tree = resolve_template(template, &ctx).map_err(|source| GenerateError::Resolve {
        theme: display_name.to_string(),
        source,
    })?;

    ThemeDocuments::assemble(&tree, display_name, metadata, &config.editor_scheme_root).map_err(
        |source| GenerateError::Serialize {
            theme: display_name.to_string(),
            source,
        },
    )
}

/// Load fresh inputs and produce the documents for `identity`
pub fn generate_theme(
    identity: &ThemeIdentity,
    preferences: &Preferences,
    config: &GeneratorConfig,
) -> Result<ThemeDocuments, GenerateError> {
    let style = StyleConfiguration::new(identity, preferences);
    let variant = ColorVariant::from_vivid(style.is_vivid);

    let palette = ColorPalette::from_file(variant, &config.palette_path(variant))?;
    let template = Template::from_file(&config.template_path())?;
    let metadata = MetadataTemplate::from_file(&config.metadata_path())?;

    resolve_document(
        &template,
        &palette,
        &style,
        &metadata,
        identity.display_name,
        config,
    )
}

/// Generate one theme and write it into the assets directory
///
/// Other files in the directory are left alone.
pub fn write_theme(
    identity: &ThemeIdentity,
    preferences: &Preferences,
    config: &GeneratorConfig,
) -> Result<[PathBuf; 2], GenerateError> {
    let docs = generate_theme(identity, preferences, config)?;
    std::fs::create_dir_all(&config.assets_dir).map_err(|source| OutputError {
        path: config.assets_dir.clone(),
        source,
    })?;
    Ok(docs.write_to(&config.assets_dir)?)
}

/// Clear the assets directory, then generate all four themes in order
///
/// Stops at the first failure; themes written before it stay on disk.
pub fn build_all(config: &GeneratorConfig) -> Result<Vec<PathBuf>, GenerateError> {
    document::clear_directory(&config.assets_dir)?;

    let mut written = Vec::with_capacity(THEMES.len() * 2);
    for identity in &THEMES {
        let docs = generate_theme(identity, &Preferences::default(), config)?;
        written.extend(docs.write_to(&config.assets_dir)?);
    }

    info!(
        themes = THEMES.len(),
        dir = %config.assets_dir.display(),
        "theme batch complete"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn palette() -> ColorPalette {
        ColorPalette {
            variant: ColorVariant::Normal,
            colors: HashMap::from([("fg".to_string(), "#abb2bf".to_string())]),
        }
    }

    #[test]
    fn test_resolve_document() {
        let template = Template::parse(
            r#"<scheme name="One Dark"><option name="FONT_TYPE" value="%theme^comments%"/></scheme>"#,
            "test",
        )
        .unwrap();
        let metadata = MetadataTemplate::from_json(r#"{"name": "", "editorScheme": ""}"#, "test").unwrap();
        let style = StyleConfiguration::for_identity(&THEMES[1]);

        let docs = resolve_document(
            &template,
            &palette(),
            &style,
            &metadata,
            "One Dark Italic",
            &GeneratorConfig::default(),
        )
        .unwrap();

        assert_eq!(
            docs.scheme_xml,
            r#"<scheme name="One Dark Generated"><option name="FONT_TYPE" value="2"/></scheme>"#
        );
        assert_eq!(
            docs.metadata_json(),
            r#"{"name":"One Dark Italic","editorScheme":"/themes/one_dark_italic.xml"}"#
        );
    }

    #[test]
    fn test_resolve_error_names_theme() {
        let template =
            Template::parse(r#"<scheme><option value="$nope$"/></scheme>"#, "test").unwrap();
        let metadata = MetadataTemplate::from_json("{}", "test").unwrap();
        let style = StyleConfiguration::for_identity(&THEMES[0]);

        let err = resolve_document(
            &template,
            &palette(),
            &style,
            &metadata,
            "One Dark",
            &GeneratorConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(
            &err,
            GenerateError::Resolve { theme, source: ResolveError::MissingColorDefinition { name, .. } }
                if theme == "One Dark" && name == "nope"
        ));
        assert!(err.to_string().contains("nope is not in the color definition for NORMAL"));
    }

    #[test]
    fn test_missing_inputs_are_data_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::new()
            .with_templates_dir(dir.path().join("missing"))
            .with_assets_dir(dir.path().join("out"));

        let result = generate_theme(&THEMES[0], &Preferences::default(), &config);
        assert!(matches!(result, Err(GenerateError::DataLoad(DataLoadError::Io { .. }))));
    }
}
