//! Fixture loader.
//!
//! A fixture describes a document of forms in TOML (or JSON when the file
//! ends in `.json`) and is materialised into a [`MemoryDocument`].
//!
//! # Fixture format
//!
//! ```toml
//! [[forms]]
//! id      = "profile"
//! name    = "profile"
//! classes = ["popup__form"]
//!
//! [[forms.fields]]
//! id            = "name"
//! type          = "text"              # defaults to "text"
//! classes       = ["popup__input"]
//! required      = true
//! minlength     = 2
//! maxlength     = 40
//! error_message = "Invalid name"      # becomes data-error-message
//! wrapper       = "label"             # optional element around the input
//! error_element = true                # pre-render <span id="name-error">
//!
//! [[forms.fields]]
//! tag        = "textarea"
//! id         = "about"
//! classes    = ["popup__input"]
//! value      = "Explorer"
//! attributes = { placeholder = "About" }
//!
//! [forms.button]
//! classes = ["popup__button"]
//! text    = "Save"
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use formcheck_core::{
    application::{ApplicationError, ports::Document},
    domain::{ERROR_ELEMENT_CLASS, ERROR_ELEMENT_TAG, NodeId, error_element_id},
    error::{FormError, FormResult},
};

use crate::document::MemoryDocument;

/// Serialization format of a fixture or settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    /// Pick the format from the file extension; anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

// ── Fixture types ─────────────────────────────────────────────────────────────

/// A whole document: the forms it contains, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub forms: Vec<FormFixture>,
}

/// One `<form>` element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormFixture {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldFixture>,
    pub button: Option<ButtonFixture>,
}

/// One form control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldFixture {
    /// `input` unless stated otherwise.
    pub tag: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    pub value: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
    pub minlength: Option<u32>,
    pub maxlength: Option<u32>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<String>,
    /// Rendered as the `data-error-message` attribute.
    pub error_message: Option<String>,
    /// Any other attribute, written verbatim.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Tag of an element wrapping the control (and its error element).
    pub wrapper: Option<String>,
    /// Pre-render the paired `<span id="{id}-error">`.
    #[serde(default)]
    pub error_element: bool,
}

/// The form's submit button.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonFixture {
    pub tag: Option<String>,
    #[serde(rename = "type")]
    pub button_type: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub disabled: bool,
}

impl Fixture {
    /// Parse a fixture from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Parse a fixture from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// Number of fields across every form.
    pub fn field_count(&self) -> usize {
        self.forms.iter().map(|f| f.fields.len()).sum()
    }

    /// Build a fresh document from the fixture.
    #[instrument(skip_all, fields(forms = self.forms.len()))]
    pub fn build(&self) -> FormResult<MemoryDocument> {
        let doc = MemoryDocument::new();
        for form in &self.forms {
            build_form(&doc, form)?;
        }
        debug!(elements = doc.len()?, "fixture materialised");
        Ok(doc)
    }
}

fn set_classes(doc: &MemoryDocument, node: NodeId, classes: &[String]) -> FormResult<()> {
    for class in classes {
        doc.add_class(node, class)?;
    }
    Ok(())
}

fn build_form(doc: &MemoryDocument, fixture: &FormFixture) -> FormResult<NodeId> {
    let form = doc.append_element(doc.root(), "form")?;
    if let Some(id) = &fixture.id {
        doc.set_id(form, id)?;
    }
    if let Some(name) = &fixture.name {
        doc.set_attribute(form, "name", name)?;
    }
    doc.set_attribute(form, "novalidate", "")?;
    set_classes(doc, form, &fixture.classes)?;

    for field in &fixture.fields {
        build_field(doc, form, field)?;
    }

    if let Some(button) = &fixture.button {
        let tag = button.tag.as_deref().unwrap_or("button");
        let node = doc.append_element(form, tag)?;
        doc.set_attribute(node, "type", button.button_type.as_deref().unwrap_or("submit"))?;
        set_classes(doc, node, &button.classes)?;
        doc.set_text(node, &button.text)?;
        doc.set_disabled(node, button.disabled)?;
    }

    Ok(form)
}

fn build_field(doc: &MemoryDocument, form: NodeId, field: &FieldFixture) -> FormResult<NodeId> {
    let container = match &field.wrapper {
        Some(tag) => doc.append_element(form, tag)?,
        None => form,
    };

    let tag = field.tag.as_deref().unwrap_or("input");
    let input = doc.append_element(container, tag)?;

    if let Some(id) = &field.id {
        doc.set_id(input, id)?;
    }
    if tag == "input" {
        doc.set_attribute(input, "type", field.input_type.as_deref().unwrap_or("text"))?;
    }
    set_classes(doc, input, &field.classes)?;

    for (name, value) in &field.attributes {
        doc.set_attribute(input, name, value)?;
    }
    if field.required {
        doc.set_attribute(input, "required", "")?;
    }
    if let Some(min) = field.minlength {
        doc.set_attribute(input, "minlength", &min.to_string())?;
    }
    if let Some(max) = field.maxlength {
        doc.set_attribute(input, "maxlength", &max.to_string())?;
    }
    if let Some(min) = field.min {
        doc.set_attribute(input, "min", &min.to_string())?;
    }
    if let Some(max) = field.max {
        doc.set_attribute(input, "max", &max.to_string())?;
    }
    if let Some(pattern) = &field.pattern {
        doc.set_attribute(input, "pattern", pattern)?;
    }
    if let Some(message) = &field.error_message {
        doc.set_attribute(input, "data-error-message", message)?;
    }
    if let Some(value) = &field.value {
        doc.set_value(input, value)?;
    }
    doc.set_disabled(input, field.disabled)?;

    if field.error_element {
        match field.id.as_deref().and_then(error_element_id) {
            Some(error_id) => {
                let span = doc.append_element(container, ERROR_ELEMENT_TAG)?;
                doc.set_id(span, &error_id)?;
                doc.add_class(span, ERROR_ELEMENT_CLASS)?;
            }
            None => warn!(
                field = field.id.as_deref().unwrap_or_default(),
                "error_element needs a field id without whitespace; skipped"
            ),
        }
    }

    Ok(input)
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Reads fixtures from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureLoader;

impl FixtureLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse the fixture at `path`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> FormResult<Fixture> {
        let fail = |reason: String| -> FormError {
            ApplicationError::FixtureLoad {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        };

        let content = fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
        let fixture = match FileFormat::from_path(path) {
            FileFormat::Json => Fixture::from_json_str(&content),
            FileFormat::Toml => Fixture::from_toml_str(&content),
        }
        .map_err(fail)?;

        if fixture.forms.is_empty() {
            warn!("fixture defines no forms");
        }
        debug!(
            forms = fixture.forms.len(),
            fields = fixture.field_count(),
            "fixture parsed"
        );
        Ok(fixture)
    }

    /// Read a fixture and build its document in one step.
    pub fn load_document(&self, path: &Path) -> FormResult<MemoryDocument> {
        self.load(path)?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PROFILE: &str = r#"
[[forms]]
id = "profile"
classes = ["popup__form"]

[[forms.fields]]
id = "name"
classes = ["popup__input"]
required = true
minlength = 2
maxlength = 40
error_message = "Invalid name"
wrapper = "label"
error_element = true

[[forms.fields]]
id = "link"
type = "url"
classes = ["popup__input"]

[forms.button]
classes = ["popup__button"]
text = "Save"
"#;

    #[test]
    fn builds_forms_fields_and_button() {
        let doc = Fixture::from_toml_str(PROFILE).unwrap().build().unwrap();

        let form = doc.query(None, "form#profile.popup__form").unwrap().unwrap();
        let inputs = doc.query_all(Some(form), ".popup__input").unwrap();
        assert_eq!(inputs.len(), 2);

        let name = inputs[0];
        assert_eq!(doc.tag(doc.parent(name).unwrap().unwrap()).unwrap(), "label");
        assert_eq!(doc.attribute(name, "type").unwrap().as_deref(), Some("text"));
        assert_eq!(doc.attribute(name, "minlength").unwrap().as_deref(), Some("2"));
        assert_eq!(
            doc.attribute(name, "data-error-message").unwrap().as_deref(),
            Some("Invalid name")
        );

        let span = doc.element_by_id(form, "name-error").unwrap().unwrap();
        assert!(doc.has_class(span, ERROR_ELEMENT_CLASS).unwrap());
        assert_eq!(doc.parent(span).unwrap(), doc.parent(name).unwrap());

        let button = doc.query(Some(form), "button.popup__button").unwrap().unwrap();
        assert_eq!(doc.text(button).unwrap(), "Save");
        assert_eq!(doc.attribute(button, "type").unwrap().as_deref(), Some("submit"));
    }

    #[test]
    fn error_element_without_id_is_skipped() {
        let fixture = Fixture {
            forms: vec![FormFixture {
                fields: vec![FieldFixture {
                    error_element: true,
                    ..FieldFixture::default()
                }],
                ..FormFixture::default()
            }],
        };
        let doc = fixture.build().unwrap();
        assert!(doc.query(None, "span").unwrap().is_none());
    }

    #[test]
    fn loads_json_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"forms":[{{"classes":["popup__form"],"fields":[{{"id":"a","value":"x"}}]}}]}}"#
        )
        .unwrap();

        let doc = FixtureLoader::new().load_document(file.path()).unwrap();
        let input = doc.query(None, "#a").unwrap().unwrap();
        assert_eq!(doc.value(input).unwrap(), "x");
    }

    #[test]
    fn malformed_file_is_a_fixture_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[[forms]\nid = ").unwrap();

        let err = FixtureLoader::new().load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            FormError::Application(ApplicationError::FixtureLoad { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_fixture_error() {
        let err = FixtureLoader::new()
            .load(Path::new("/definitely/not/here.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("not/here.toml"));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.JSON")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("a.toml")), FileFormat::Toml);
        assert_eq!(FileFormat::from_path(Path::new("a")), FileFormat::Toml);
    }
}
