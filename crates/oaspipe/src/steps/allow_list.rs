//! drop every path and operation not used by code generation
use super::METHODS;
use crate::document::Document;
use crate::pipeline::Step;
use crate::resolve::PathAccess;
use crate::value::{Mapping, Node};

/// Header parameter every mutating Kibana endpoint declares. Generated clients send it themselves.
pub const XSRF_PARAMETER_REF: &str = "#/components/parameters/kbn_xsrf";

/// Paths of the fleet API and the methods kept for each of them
pub const FLEET_ALLOW_LIST: &[(&str, &[&str])] = &[
    ("/agent_policies", &["post"]),
    ("/agent_policies/{agentPolicyId}", &["get", "put"]),
    ("/agent_policies/delete", &["post"]),
    ("/enrollment_api_keys", &["get"]),
    ("/epm/packages", &["get"]),
    ("/epm/packages/{pkgName}/{pkgVersion}", &["get", "post", "delete"]),
    ("/fleet_server_hosts", &["post"]),
    ("/fleet_server_hosts/{itemId}", &["get", "put", "delete"]),
    ("/outputs", &["post"]),
    ("/outputs/{outputId}", &["get", "put", "delete"]),
    ("/package_policies", &["post"]),
    ("/package_policies/{packagePolicyId}", &["get", "put", "delete"]),
];

#[derive(Debug, Clone, derive_new::new)]
pub struct AllowListFilter {
    /// path -> allowed methods
    allowed: indexmap::IndexMap<String, Vec<String>>,
    #[new(value = r#""filter allowed paths".to_string()"#)]
    name: String,
}

impl AllowListFilter {
    pub fn from_table(table: &[(&str, &[&str])]) -> Self {
        Self::new(
            table
                .iter()
                .map(|(path, methods)| {
                    (
                        path.to_string(),
                        methods.iter().map(|m| m.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    pub fn fleet() -> Self {
        Self::from_table(FLEET_ALLOW_LIST).named("filter allowed fleet paths")
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn filter_path_item(&self, path: &str, item: &mut Mapping) {
        let allowed = &self.allowed[path];

        remove_xsrf_parameter(item);

        for method in METHODS {
            if !item.contains_key(method) {
                continue;
            }

            if !allowed.iter().any(|allowed| allowed == method) {
                tracing::debug!(path, method, "dropping operation");
                item.shift_remove(method);
                continue;
            }

            if let Some(Node::Mapping(operation)) = item.get_mut(method) {
                remove_xsrf_parameter(operation);
            }
        }
    }
}

impl Step for AllowListFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut document: Document) -> Document {
        let Some(paths) = document.fields_mut().get_fields_mut("paths") else {
            tracing::warn!("document has no paths");
            return document;
        };

        paths.retain(|path, item| {
            if !self.allowed.contains_key(path) {
                tracing::trace!(path, "dropping path");
                return false;
            }

            if let Node::Mapping(item) = item {
                self.filter_path_item(path, item);
            }
            true
        });

        document
    }
}

/// Removes the first xsrf reference from `parameters`, leaving the list untouched otherwise
fn remove_xsrf_parameter(fields: &mut Mapping) {
    let Some(parameters) = fields.get_mut("parameters").and_then(Node::as_sequence_mut) else {
        return;
    };

    let position = parameters.iter().position(|parameter| {
        parameter
            .as_mapping()
            .and_then(|parameter| parameter.get("$ref"))
            .and_then(Node::as_str)
            == Some(XSRF_PARAMETER_REF)
    });

    if let Some(index) = position {
        parameters.remove(index);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document;
    use pretty_assertions::assert_eq;

    fn filter() -> AllowListFilter {
        AllowListFilter::from_table(&[("/outputs", &["post"]), ("/outputs/{id}", &["get", "put"])])
    }

    #[test]
    fn drops_unlisted_paths() {
        let doc = document!(
            r#"{"paths": {
                "/outputs": {"post": {}},
                "/agents": {"get": {}},
                "/outputs/{id}": {"get": {}}
            }}"#
        );

        let doc = filter().apply(doc);

        assert_eq!(
            doc,
            document!(r#"{"paths": {"/outputs": {"post": {}}, "/outputs/{id}": {"get": {}}}}"#)
        );
        assert_eq!(doc.fields().get_path("paths./agents"), None);
    }

    #[test]
    fn drops_unlisted_methods() {
        let doc = document!(
            r#"{"paths": {"/outputs/{id}": {
                "summary": "kept",
                "get": {"operationId": "get"},
                "put": {"operationId": "put"},
                "delete": {"operationId": "delete"},
                "post": {"operationId": "post"}
            }}}"#
        );

        let doc = filter().apply(doc);

        assert_eq!(
            doc,
            document!(
                r#"{"paths": {"/outputs/{id}": {
                    "summary": "kept",
                    "get": {"operationId": "get"},
                    "put": {"operationId": "put"}
                }}}"#
            )
        );
    }

    #[test]
    fn removes_xsrf_parameter_keeping_order() {
        let doc = document!(
            r##"{"paths": {"/outputs": {
                "parameters": [
                    {"$ref": "#/components/parameters/a"},
                    {"$ref": "#/components/parameters/kbn_xsrf"},
                    {"$ref": "#/components/parameters/b"}
                ],
                "post": {"parameters": [
                    {"$ref": "#/components/parameters/kbn_xsrf"},
                    {"name": "inline", "in": "query"}
                ]}
            }}}"##
        );

        let doc = filter().apply(doc);

        assert_eq!(
            doc,
            document!(
                r##"{"paths": {"/outputs": {
                    "parameters": [
                        {"$ref": "#/components/parameters/a"},
                        {"$ref": "#/components/parameters/b"}
                    ],
                    "post": {"parameters": [
                        {"name": "inline", "in": "query"}
                    ]}
                }}}"##
            )
        );
    }

    #[test]
    fn parameters_without_xsrf_are_unchanged() {
        let doc = document!(
            r##"{"paths": {"/outputs": {"post": {"parameters": [
                {"$ref": "#/components/parameters/a"}, "not a mapping"
            ]}}}}"##
        );

        assert_eq!(filter().apply(doc.clone()), doc);
    }

    #[test]
    fn missing_paths_is_skipped() {
        let doc = document!(r#"{"openapi": "3.0.0"}"#);
        assert_eq!(filter().apply(doc.clone()), doc);
    }

    #[test]
    fn name_follows_configuration() {
        assert_eq!(filter().name(), "filter allowed paths");
        assert_eq!(filter().named("outputs only").name(), "outputs only");
        assert_eq!(AllowListFilter::fleet().name(), "filter allowed fleet paths");
    }

    #[test]
    fn fleet_table_only_uses_known_methods() {
        for (path, methods) in FLEET_ALLOW_LIST {
            assert!(path.starts_with('/'), "{path}");
            assert!(!path.contains('.'), "{path} cannot be addressed by a dotted path");
            for method in *methods {
                assert!(METHODS.contains(method), "{path}: {method}");
            }
        }
    }
}
