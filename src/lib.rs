//! runtype - runtime type checking and normalization for nested JSON values
//!
//! Values crossing a trust boundary (function arguments, callback results,
//! deserialized payloads) are checked against declarative schema trees. A
//! construct call returns either a sanitized, schema-conformant value or a
//! single structured error carrying every path-tagged problem found in one
//! pass.

pub mod builtins;
pub mod construct;
pub mod enforce;
pub mod errors;
pub mod loader;
pub mod registry;
pub mod schema;

pub use builtins::Builtins;
pub use construct::{Constructed, Constructor, LengthMismatchPolicy, Options};
pub use enforce::{EnforceError, Enforced, FunctionSchema};
pub use errors::{ConstructError, ErrorCode, Finding, LeafError, LoaderError};
pub use loader::load_dir;
pub use registry::TypeRegistry;
pub use schema::{Schema, SchemaRef};
