//! # oaspipe - OpenAPI document pipeline
//!
//! Filters and normalizes a large API description before it is handed to a code generator.
//!
//! ## Introduction for developers
//!
//! Read this to understand how `oaspipe` works internally.
//!
//! ### Document model
//!
//! A loaded document ([document::Document]) is a tree of [value::Node]s. There are three kinds
//! of nodes: mappings (string keys, insertion order preserved), sequences and scalars. Scalars
//! are never interpreted, they are written back exactly as they were read.
//!
//! Loading and saving go through [serde_json] and [serde_yaml], the rest of the crate only works
//! on the tree.
//!
//! ### Paths
//!
//! Locations in a document are addressed with dotted paths:
//!
//! | **path**                      | **document**                          | **result**   |
//! |-------------------------------|---------------------------------------|--------------|
//! | `a.b`                         | `{"a": {"b": 1}}`                     | `1`          |
//! | `a.b.1.c`                     | `{"a": {"b": [{"c": 1}, {"c": 2}]}}`  | `2`          |
//! | `a.b.5.c`                     | `{"a": {"b": [{"c": 1}, {"c": 2}]}}`  | not found    |
//! | `x.y`                         | `{"x.y": 1}`                          | `1`          |
//!
//! A segment is a key or an index depending on the node it is applied to, see [path] for the
//! parsing and [resolve::PathAccess] for the lookup and write rules.
//!
//! ### Pipeline
//!
//! A [pipeline::Pipeline] threads one document through an ordered list of [pipeline::Step]s.
//! Each step takes the document, changes it and hands it back. [pipeline::Pipeline::fleet] is the
//! list used on the fleet API description:
//!
//! 1. [steps::AllowListFilter] drops every path and operation not in the allow-list and removes
//!    the `kbn_xsrf` header parameter
//! 2. [steps::RequiredField] marks `type` as required on the output request schemas
//! 3. [steps::ResponseEnvelope] rewrites the `/outputs/{outputId}` response into `{item: ...}`
//!
//! Steps skip structure they cannot find. Only loading and saving can fail.
//!
pub mod document;
pub mod path;
pub mod pipeline;
pub mod resolve;
pub mod steps;
pub mod value;
