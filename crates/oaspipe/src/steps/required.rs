//! make sure a field is listed as required
use crate::document::Document;
use crate::pipeline::Step;
use crate::resolve::PathAccess;
use crate::value::Node;

/// Output request schemas whose discriminator is not marked as required upstream
pub const OUTPUT_REQUEST_REQUIRED: &[&str] = &[
    "components.schemas.new_output_elasticsearch.required",
    "components.schemas.new_output_remote_elasticsearch.required",
    "components.schemas.new_output_logstash.required",
    "components.schemas.new_output_kafka.required",
    "components.schemas.update_output_elasticsearch.required",
    "components.schemas.update_output_remote_elasticsearch.required",
    "components.schemas.update_output_logstash.required",
    "components.schemas.update_output_kafka.required",
];

/// Appends `field` to every `required` list found at `locations`
///
/// Locations that are missing or not a sequence are skipped. Running the step twice never
/// duplicates the field.
#[derive(Debug, Clone)]
pub struct RequiredField {
    locations: Vec<String>,
    field: String,
    name: String,
}

impl RequiredField {
    pub fn new<L: Into<String>>(
        locations: impl IntoIterator<Item = L>,
        field: impl Into<String>,
    ) -> Self {
        let field = field.into();
        Self {
            name: format!("require {field}"),
            locations: locations.into_iter().map(Into::into).collect(),
            field,
        }
    }

    pub fn output_type() -> Self {
        Self::new(OUTPUT_REQUEST_REQUIRED.iter().copied(), "type").named("require output type")
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Step for RequiredField {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut document: Document) -> Document {
        for location in &self.locations {
            let Some(required) = document
                .fields_mut()
                .get_path_mut(location)
                .and_then(Node::as_sequence_mut)
            else {
                tracing::debug!(location, "no required list, skipping");
                continue;
            };

            if required
                .iter()
                .any(|name| name.as_str() == Some(self.field.as_str()))
            {
                continue;
            }

            required.push(self.field.as_str().into());
        }

        document
    }
}
