//! OpenAI function-calling schema generation

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::provider::ToolProvider;
use crate::types::{ParamDefault, ParamType, ToolDescriptor, ToolParam};

/// JSON Schema primitive type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Boolean,
    Integer,
    Number,
}

/// `type` of a property: one tag, or several for a union
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeTag {
    Single(JsonType),
    Multiple(Vec<JsonType>),
}

/// Schema of a single parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: TypeTag,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// `parameters` object of a tool schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersSchema {
    #[serde(rename = "type")]
    pub schema_type: String,

    pub properties: IndexMap<String, PropertySchema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

/// Function-calling schema of one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: ParametersSchema,
}

/// Map a parameter type onto JSON Schema type tags
///
/// Total: unknown types map to "string".
pub fn map_type(kind: &ParamType) -> TypeTag {
    let mut tags = Vec::new();
    collect_tags(kind, &mut tags);

    if tags.len() == 1 {
        TypeTag::Single(tags[0])
    } else {
        TypeTag::Multiple(tags)
    }
}

fn collect_tags(kind: &ParamType, tags: &mut Vec<JsonType>) {
    let tag = match kind {
        ParamType::String | ParamType::Other(_) => JsonType::String,
        ParamType::Bool => JsonType::Boolean,
        ParamType::Int => JsonType::Integer,
        ParamType::Float => JsonType::Number,
        ParamType::Optional(inner) => return collect_tags(inner, tags),
        ParamType::Union(arms) => {
            for arm in arms {
                collect_tags(arm, tags);
            }
            // An empty union still needs a type
            if tags.is_empty() {
                tags.push(JsonType::String);
            }
            return;
        }
    };

    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// Generator for tool schemas
pub struct SchemaGenerator;

impl SchemaGenerator {
    /// Create a new schema generator
    pub fn new() -> Self {
        Self
    }

    /// Generate schemas for every tool of every provider, in order
    ///
    /// A provider that fails is skipped with a warning.
    pub fn generate(&self, providers: &[&dyn ToolProvider]) -> Vec<ToolSchema> {
        let mut schemas = Vec::new();

        for provider in providers {
            match provider.descriptors() {
                Ok(descriptors) => {
                    debug!(
                        "Generating {} schemas for group '{}'",
                        descriptors.len(),
                        provider.group()
                    );
                    schemas.extend(descriptors.iter().map(|d| self.generate_schema(d)));
                }
                Err(e) => {
                    warn!("Skipping tool group '{}': {}", provider.group(), e);
                }
            }
        }

        schemas
    }

    /// Generate the schema of a single tool
    pub fn generate_schema(&self, descriptor: &ToolDescriptor) -> ToolSchema {
        let mut properties = IndexMap::new();
        let mut required = Vec::new();

        for param in &descriptor.params {
            properties.insert(param.name.clone(), self.property_schema(param));
            if param.is_required() {
                required.push(param.name.clone());
            }
        }

        ToolSchema {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            parameters: ParametersSchema {
                schema_type: "object".to_string(),
                properties,
                required: if required.is_empty() { None } else { Some(required) },
            },
        }
    }

    fn property_schema(&self, param: &ToolParam) -> PropertySchema {
        let default = match &param.default {
            ParamDefault::Value(v) => Some(v.clone()),
            ParamDefault::Required | ParamDefault::Unrepresentable(_) => None,
        };

        PropertySchema {
            schema_type: map_type(&param.kind),
            description: param.description.clone(),
            default,
        }
    }
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate schemas for all providers with a default generator
pub fn generate_schemas(providers: &[&dyn ToolProvider]) -> Vec<ToolSchema> {
    SchemaGenerator::new().generate(providers)
}
