//! # tool-spec
//!
//! Function-calling schemas for aipseo tools.
//!
//! Tools are declared as explicit [`ToolDescriptor`]s, grouped by
//! [`ToolProvider`]s and turned into OpenAI-style JSON schemas.

pub mod error;
pub mod format;
pub mod provider;
pub mod schema;
pub mod types;

pub use error::{ToolSpecError, ToolSpecResult};
pub use format::{emit, SpecFormat};
pub use provider::{StaticTools, ToolProvider, UnavailableTools};
pub use schema::{
    generate_schemas, map_type, JsonType, ParametersSchema, PropertySchema, SchemaGenerator,
    ToolSchema, TypeTag,
};
pub use types::{ParamDefault, ParamType, ToolDescriptor, ToolParam};
