//! OpenAPI v3 schema access.
//!
//! - `document` - the parts of a group version document the verifier reads
//! - `root` - the `/openapi/v3` root and the `SchemaSource` seam
//! - `file_source` - documents saved to a directory

pub mod document;
pub mod file_source;
pub mod root;

pub use document::{OpenApiDocument, Operation, Parameter, ParameterOrRef, PathItem};
pub use file_source::FileSchemaSource;
pub use root::{SchemaRoot, SchemaSource};
