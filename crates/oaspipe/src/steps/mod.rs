//! transform steps applied by [crate::pipeline::Pipeline::fleet]
mod allow_list;
mod envelope;
mod required;

pub use allow_list::{AllowListFilter, FLEET_ALLOW_LIST, XSRF_PARAMETER_REF};
pub use envelope::ResponseEnvelope;
pub use required::{RequiredField, OUTPUT_REQUEST_REQUIRED};

/// Operations the steps inspect on a path item
pub const METHODS: [&str; 4] = ["get", "post", "put", "delete"];
