//! ordered list of transform steps
use crate::document::Document;
use crate::steps::{AllowListFilter, RequiredField, ResponseEnvelope};

/// One named rule applied to a [Document]
///
/// A step owns the document while it runs and hands it (or a replacement) back. Steps skip
/// structure they do not find instead of failing.
pub trait Step {
    fn name(&self) -> &str;
    fn apply(&self, document: Document) -> Document;
}

// blanket impl for named closures
impl<F> Step for (&'static str, F)
where
    F: Fn(Document) -> Document,
{
    fn name(&self) -> &str {
        self.0
    }

    fn apply(&self, document: Document) -> Document {
        (self.1)(document)
    }
}

/// Applies its steps in registration order
///
/// There is no isolation between steps: whatever a step changed stays changed for every later
/// step.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The steps run on the fleet API description before code generation
    pub fn fleet() -> Self {
        Self::new()
            .with_step(AllowListFilter::fleet())
            .with_step(RequiredField::output_type())
            .with_step(ResponseEnvelope::output_item())
    }

    pub fn with_step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.name())
    }

    pub fn run(&self, mut document: Document) -> Document {
        for step in &self.steps {
            let span = tracing::debug_span!("step", name = step.name());
            let _guard = span.enter();

            tracing::debug!("applying");
            document = step.apply(document);
            tracing::debug!(fields = document.fields().len(), "applied");
        }

        document
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.step_names()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document;
    use crate::resolve::PathAccess;
    use crate::value::Node;
    use pretty_assertions::assert_eq;

    fn append(marker: &'static str) -> impl Fn(Document) -> Document {
        move |mut document| {
            let order = document
                .fields_mut()
                .get_path_mut("order")
                .and_then(Node::as_sequence_mut)
                .expect("order must be a sequence");
            order.push(marker.into());
            document
        }
    }

    #[test]
    fn runs_steps_in_registration_order() {
        let pipeline = Pipeline::new()
            .with_step(("first", append("a")))
            .with_step(("second", append("b")))
            .with_step(("third", append("c")));

        let result = pipeline.run(document!(r#"{"order": []}"#));

        assert_eq!(result, document!(r#"{"order": ["a", "b", "c"]}"#));
        assert_eq!(
            pipeline.step_names().collect::<Vec<_>>(),
            ["first", "second", "third"]
        );
    }

    #[test]
    fn step_may_replace_the_document() {
        let pipeline =
            Pipeline::new().with_step(("replace", |_: Document| document!(r#"{"new": true}"#)));

        let result = pipeline.run(document!(r#"{"old": true}"#));
        assert_eq!(result, document!(r#"{"new": true}"#));
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let doc = document!(r#"{"a": {"b": [1, 2]}}"#);
        assert_eq!(Pipeline::new().run(doc.clone()), doc);
    }

    #[test]
    fn fleet_step_order() {
        assert_eq!(
            Pipeline::fleet().step_names().collect::<Vec<_>>(),
            [
                "filter allowed fleet paths",
                "require output type",
                "wrap output response item"
            ]
        );
    }
}
