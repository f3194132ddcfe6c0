//! Runs the fleet pipeline over a trimmed-down fleet API description

use oaspipe::document::Document;
use oaspipe::pipeline::Pipeline;
use oaspipe::resolve::PathAccess;
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("OASPIPE_LOG"))
        .with_test_writer()
        .try_init();
}

fn fleet_fixture() -> Document {
    Document::from_json_str(include_str!("fixtures/fleet.json")).expect("fixture must parse")
}

#[test]
fn fleet_pipeline() {
    init_tracing();

    let transformed = Pipeline::fleet().run(fleet_fixture());
    let expected = Document::from_json_str(include_str!("fixtures/fleet.expected.json"))
        .expect("expected output must parse");

    assert_eq!(transformed, expected);
    // saving keeps the key order of the input
    assert_eq!(
        transformed.to_json_pretty().unwrap(),
        include_str!("fixtures/fleet.expected.json")
    );
}

#[test]
fn rewritten_output_response() {
    init_tracing();

    let transformed = Pipeline::fleet().run(fleet_fixture());
    let schema = transformed
        .fields()
        .get_path("paths./outputs/{outputId}.get.responses.200.content.application/json.schema")
        .expect("schema must survive the pipeline");

    insta::assert_json_snapshot!(schema, @r###"
    {
      "type": "object",
      "properties": {
        "item": {
          "$ref": "#/components/schemas/output"
        }
      }
    }
    "###);
}

#[test]
fn pipeline_is_stable_on_its_own_output() {
    init_tracing();

    let once = Pipeline::fleet().run(fleet_fixture());
    let twice = Pipeline::fleet().run(once.clone());

    assert_eq!(once, twice);
}

#[test]
fn yaml_input_gives_the_same_result() {
    init_tracing();

    let yaml = serde_yaml::to_string(&fleet_fixture()).unwrap();
    let from_yaml = Document::from_yaml_str(&yaml).unwrap();

    assert_eq!(
        Pipeline::fleet().run(from_yaml),
        Pipeline::fleet().run(fleet_fixture())
    );
}
