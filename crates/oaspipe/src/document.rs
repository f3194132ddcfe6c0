//! the document being transformed, plus loading and saving it
//!
//! A [Document] is always a mapping at its root. Loading accepts JSON or YAML, saving produces
//! JSON (2-space indentation) or YAML. Both directions are thin wrappers around [serde_json] and
//! [serde_yaml]: the pipeline itself only ever sees the in-memory tree.
use crate::value::{ConversionError, Mapping, Node, NodeKind};
use std::path::Path;

/// Root of a schema document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Mapping,
}

impl Document {
    pub fn new(fields: Mapping) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Mapping {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Mapping {
        &mut self.fields
    }

    pub fn into_fields(self) -> Mapping {
        self.fields
    }
}

impl serde::Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.fields, serializer)
    }
}

impl TryFrom<Node> for Document {
    type Error = LoadError;

    fn try_from(value: Node) -> Result<Self, Self::Error> {
        match value {
            Node::Mapping(fields) => Ok(Self::new(fields)),
            other => Err(LoadError::RootNotMapping(other.kind())),
        }
    }
}

/// Input encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.yaml` and `.yml` are YAML, everything else is treated as JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

impl Document {
    pub fn from_json_str(input: &str) -> Result<Self, LoadError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Node::from(value).try_into()
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, LoadError> {
        let value: serde_yaml::Value = serde_yaml::from_str(input)?;
        Node::try_from(value)?.try_into()
    }

    pub fn from_reader(reader: impl std::io::Read, format: Format) -> Result<Self, LoadError> {
        let input = std::io::read_to_string(reader)?;
        match format {
            Format::Json => Self::from_json_str(&input),
            Format::Yaml => Self::from_yaml_str(&input),
        }
    }

    pub fn load_file(file_path: &Path) -> Result<Self, LoadError> {
        let file_path = file_path.canonicalize()?;
        tracing::info!(path=%file_path.display(), "loading file");

        let file = std::fs::File::open(&file_path)?;
        Self::from_reader(file, Format::from_path(&file_path))
    }

    /// JSON with 2-space indentation and a trailing newline
    pub fn to_json_pretty(&self) -> Result<String, SaveError> {
        let mut output = serde_json::to_string_pretty(self)?;
        output.push('\n');
        Ok(output)
    }

    pub fn to_yaml(&self) -> Result<String, SaveError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to parse json document")]
    JsonParseFailed(#[from] serde_json::Error),
    #[error("Unable to parse yaml document")]
    YamlParseFailed(#[from] serde_yaml::Error),
    #[error("Unsupported yaml content")]
    Unsupported(#[from] ConversionError),
    #[error("Document root must be a mapping, found {0}")]
    RootNotMapping(NodeKind),
}

#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("Unable to write json document")]
    Json(#[from] serde_json::Error),
    #[error("Unable to write yaml document")]
    Yaml(#[from] serde_yaml::Error),
}

/// Utility macro to create a [Document] from a JSON literal
///
/// ```
/// # use oaspipe::document;
/// let doc = document!(r#"{"openapi": "3.0.0"}"#);
/// assert_eq!(doc.fields().len(), 1);
/// ```
///
/// # Panic
/// Panics on invalid input
///
/// ```should_panic
/// # use oaspipe::document;
/// document!("[1, 2]");
/// ```
#[macro_export]
macro_rules! document {
    { $expr:expr } => {
        $crate::document::Document::from_json_str($expr).expect("document must parse")
    };
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_and_yaml_load_the_same_tree() {
        let json = Document::from_json_str(
            r#"{"paths": {"/outputs": {"post": {"responses": {"200": {"description": "ok"}}}}}}"#,
        )
        .unwrap();
        let yaml = Document::from_yaml_str(
            "paths:\n  /outputs:\n    post:\n      responses:\n        200:\n          description: ok\n",
        )
        .unwrap();

        assert_eq!(json, yaml);
    }

    #[test]
    fn root_must_be_mapping() {
        let err = Document::from_json_str("[1]").unwrap_err();
        assert!(matches!(err, LoadError::RootNotMapping(NodeKind::Sequence)));
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(matches!(
            Document::from_json_str("{"),
            Err(LoadError::JsonParseFailed(_))
        ));
        assert!(matches!(
            Document::from_yaml_str("a: [b"),
            Err(LoadError::YamlParseFailed(_))
        ));
    }

    #[test]
    fn json_output_is_indented_with_two_spaces() {
        let doc = document!(r#"{"b": {"c": [1]}, "a": "x"}"#);

        assert_eq!(
            doc.to_json_pretty().unwrap(),
            "{\n  \"b\": {\n    \"c\": [\n      1\n    ]\n  },\n  \"a\": \"x\"\n}\n"
        );
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("b.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("b.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("b")), Format::Json);
    }
}
