//! wrap a referenced response schema into an `item` property
//!
//! The fleet API answers `/outputs/{outputId}` with `{"item": <output>}` while the description
//! references the output schema directly. This only rewrites that one endpoint.
use crate::document::Document;
use crate::pipeline::Step;
use crate::resolve::PathAccess;
use crate::value::{Mapping, Node};

#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    path: String,
    methods: Vec<String>,
    property: String,
    name: String,
}

impl ResponseEnvelope {
    pub fn new<M: Into<String>>(
        path: impl Into<String>,
        methods: impl IntoIterator<Item = M>,
        property: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let property = property.into();
        Self {
            name: format!("wrap {path} response into {property}"),
            path,
            methods: methods.into_iter().map(Into::into).collect(),
            property,
        }
    }

    pub fn output_item() -> Self {
        Self::new("/outputs/{outputId}", ["get", "put"], "item").named("wrap output response item")
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn schema_location(&self, method: &str) -> String {
        format!(
            "paths.{}.{method}.responses.200.content.application/json.schema",
            self.path
        )
    }
}

impl Step for ResponseEnvelope {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut document: Document) -> Document {
        for method in &self.methods {
            let location = self.schema_location(method);
            let Some(schema) = document.fields_mut().get_fields_mut(&location) else {
                tracing::warn!(path = %self.path, method, "response schema not found, skipping");
                continue;
            };

            let Some(reference) = schema.get("$ref").cloned() else {
                tracing::debug!(path = %self.path, method, "response schema has no reference");
                continue;
            };

            if let Some(properties) = schema.get("properties").filter(|p| p.as_mapping().is_none()) {
                tracing::warn!(
                    path = %self.path,
                    method,
                    found = %properties.kind(),
                    "properties is not a mapping, skipping"
                );
                continue;
            }

            schema.insert("type".to_string(), "object".into());

            let item = Node::Mapping(Mapping::from([("$ref".to_string(), reference)]));
            if let Err(err) = schema.set_path(&format!("properties.{}", self.property), item) {
                tracing::warn!(path = %self.path, method, %err, "unable to wrap response schema");
                continue;
            }

            schema.shift_remove("$ref");
        }

        document
    }
}
