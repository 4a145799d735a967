//! Output documents: the resolved scheme and its metadata companion

use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::DataLoadError;
use crate::template::TemplateTree;

const EDITOR_SCHEME_KEY: &str = "editorScheme";
const NAME_KEY: &str = "name";

/// Failure to write into the assets directory
#[derive(Debug, Error)]
#[error("failed to write {}: {source}", .path.display())]
pub struct OutputError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl OutputError {
    fn at(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Lower-case `display_name` and replace spaces with underscores
pub fn slug(display_name: &str) -> String {
    display_name.to_lowercase().replace(' ', "_")
}

/// Flat key/value template for the metadata document
///
/// Key order is preserved. Only `editorScheme` and `name` are rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataTemplate {
    entries: Map<String, Value>,
}

impl MetadataTemplate {
    pub fn from_file(path: &Path) -> Result<Self, DataLoadError> {
        let content = DataLoadError::read(path)?;
        Self::from_json(&content, &path.display().to_string())
    }

    /// Parse a JSON object whose values are all scalars
    pub fn from_json(content: &str, origin: &str) -> Result<Self, DataLoadError> {
        let value: Value = serde_json::from_str(content).map_err(|e| DataLoadError::json(origin, e))?;
        let invalid = || DataLoadError::InvalidMetadata {
            origin: origin.to_string(),
        };

        let Value::Object(entries) = value else {
            return Err(invalid());
        };
        if entries
            .values()
            .any(|v| matches!(v, Value::Object(_) | Value::Array(_)))
        {
            return Err(invalid());
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Copy of the template with the theme's reference path and name filled in
    pub fn render(&self, display_name: &str, editor_scheme: &str) -> Map<String, Value> {
        let mut entries = self.entries.clone();
        entries.insert(EDITOR_SCHEME_KEY.to_string(), Value::from(editor_scheme));
        entries.insert(NAME_KEY.to_string(), Value::from(display_name));
        entries
    }
}

/// The two documents produced for one theme
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDocuments {
    /// Shared file stem of both outputs
    pub slug: String,
    pub scheme_xml: String,
    pub metadata: Map<String, Value>,
}

impl ThemeDocuments {
    /// Serialize `tree` and fill in the metadata for `display_name`
    ///
    /// `editor_scheme_root` prefixes the `editorScheme` reference, e.g.
    /// `/themes` gives `/themes/one_dark_italic.xml`.
    pub fn assemble(
        tree: &TemplateTree,
        display_name: &str,
        metadata: &MetadataTemplate,
        editor_scheme_root: &str,
    ) -> io::Result<Self> {
        let slug = slug(display_name);
        let editor_scheme = format!(
            "{}/{}.xml",
            editor_scheme_root.trim_end_matches('/'),
            slug
        );

        Ok(Self {
            scheme_xml: tree.to_xml()?,
            metadata: metadata.render(display_name, &editor_scheme),
            slug,
        })
    }

    pub fn scheme_file_name(&self) -> String {
        format!("{}.xml", self.slug)
    }

    pub fn metadata_file_name(&self) -> String {
        format!("{}.json", self.slug)
    }

    pub fn metadata_json(&self) -> String {
        Value::Object(self.metadata.clone()).to_string()
    }

    /// Write both documents into `dir`, replacing any existing files
    pub fn write_to(&self, dir: &Path) -> Result<[PathBuf; 2], OutputError> {
        let scheme_path = dir.join(self.scheme_file_name());
        let metadata_path = dir.join(self.metadata_file_name());

        std::fs::write(&scheme_path, &self.scheme_xml).map_err(OutputError::at(&scheme_path))?;
        std::fs::write(&metadata_path, self.metadata_json()).map_err(OutputError::at(&metadata_path))?;

        info!(scheme = %scheme_path.display(), metadata = %metadata_path.display(), "wrote theme");
        Ok([scheme_path, metadata_path])
    }
}

/// Make sure `dir` exists and is empty
///
/// Returns the number of entries removed.
pub fn clear_directory(dir: &Path) -> Result<usize, OutputError> {
    std::fs::create_dir_all(dir).map_err(OutputError::at(dir))?;

    let mut removed = 0;
    for entry in std::fs::read_dir(dir).map_err(OutputError::at(dir))? {
        let path = entry.map_err(OutputError::at(dir))?.path();
        let result = if path.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        result.map_err(OutputError::at(&path))?;
        removed += 1;
    }

    debug!(dir = %dir.display(), removed, "cleared assets directory");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Template;
    use pretty_assertions::assert_eq;

    const METADATA: &str = r#"{"name": "One Dark", "dark": true, "author": "someone", "editorScheme": "/themes/one_dark.xml"}"#;

    #[test]
    fn test_slug() {
        insta::assert_snapshot!(slug("One Dark Vivid Italic"), @"one_dark_vivid_italic");
        assert_eq!(slug("One Dark"), "one_dark");
    }

    #[test]
    fn test_metadata_overwrites_two_keys() {
        let template = MetadataTemplate::from_json(METADATA, "test").expect("Should parse");
        let rendered = template.render("One Dark Italic", "/themes/one_dark_italic.xml");

        assert_eq!(rendered["name"], "One Dark Italic");
        assert_eq!(rendered["editorScheme"], "/themes/one_dark_italic.xml");
        assert_eq!(rendered["dark"], true);
        assert_eq!(rendered["author"], "someone");
        // Insertion order of the template is kept
        let keys: Vec<&str> = rendered.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "dark", "author", "editorScheme"]);
    }

    #[test]
    fn test_metadata_must_be_flat_object() {
        for bad in [r#"["a"]"#, r#"{"ui": {"nested": 1}}"#, r#"{"list": [1]}"#] {
            let result = MetadataTemplate::from_json(bad, "bad.json");
            assert!(
                matches!(result, Err(DataLoadError::InvalidMetadata { .. })),
                "{bad} should be rejected"
            );
        }
        let result = MetadataTemplate::from_json("{", "bad.json");
        assert!(matches!(result, Err(DataLoadError::Json { .. })));
    }

    #[test]
    fn test_assemble() {
        let template = Template::parse("<scheme name=\"x\">\n  <colors/>\n</scheme>", "test").unwrap();
        let metadata = MetadataTemplate::from_json(METADATA, "test").unwrap();
        let docs =
            ThemeDocuments::assemble(&template.instantiate(), "One Dark Vivid", &metadata, "/themes/")
                .unwrap();

        assert_eq!(docs.slug, "one_dark_vivid");
        assert_eq!(docs.scheme_file_name(), "one_dark_vivid.xml");
        assert_eq!(docs.metadata_file_name(), "one_dark_vivid.json");
        assert_eq!(docs.scheme_xml, "<scheme name=\"x\">\n  <colors/>\n</scheme>");
        assert_eq!(
            docs.metadata_json(),
            r#"{"name":"One Dark Vivid","dark":true,"author":"someone","editorScheme":"/themes/one_dark_vivid.xml"}"#
        );
    }

    #[test]
    fn test_write_truncates_existing() {
        let dir = tempfile::tempdir().unwrap();
        let template = Template::parse("<scheme/>", "test").unwrap();
        let metadata = MetadataTemplate::from_json("{}", "test").unwrap();
        let docs = ThemeDocuments::assemble(&template.instantiate(), "One Dark", &metadata, "/themes").unwrap();

        std::fs::write(dir.path().join("one_dark.xml"), "x".repeat(1000)).unwrap();
        let [scheme, json] = docs.write_to(dir.path()).unwrap();

        assert_eq!(std::fs::read_to_string(scheme).unwrap(), "<scheme/>");
        assert_eq!(
            std::fs::read_to_string(json).unwrap(),
            r#"{"editorScheme":"/themes/one_dark.xml","name":"One Dark"}"#
        );
    }

    #[test]
    fn test_clear_directory() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("themes");
        assert_eq!(clear_directory(&assets).unwrap(), 0);

        std::fs::write(assets.join("stale.xml"), "old").unwrap();
        std::fs::create_dir(assets.join("nested")).unwrap();
        std::fs::write(assets.join("nested/file.json"), "{}").unwrap();

        assert_eq!(clear_directory(&assets).unwrap(), 2);
        assert_eq!(std::fs::read_dir(&assets).unwrap().count(), 0);
    }
}
