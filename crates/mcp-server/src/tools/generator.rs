//! Generate MCP tools from tool descriptors

use serde_json::Map;
use tool_spec::{SchemaGenerator, ToolProvider, ToolSchema};
use tracing::warn;

use crate::protocol::{McpInputSchema, McpTool};

/// Generator for MCP tools from tool providers
pub struct ToolGenerator {
    schemas: SchemaGenerator,
}

/// Sanitize a property name to match Claude's pattern: ^[a-zA-Z0-9_.-]{1,64}$
fn sanitize_property_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect();

    if sanitized.is_empty() {
        "param".to_string()
    } else {
        sanitized
    }
}

impl ToolGenerator {
    /// Create a new tool generator
    pub fn new() -> Self {
        Self {
            schemas: SchemaGenerator::new(),
        }
    }

    /// Generate MCP tools for every tool of `providers`
    pub fn generate_tools(&self, providers: &[&dyn ToolProvider]) -> Vec<McpTool> {
        self.schemas
            .generate(providers)
            .iter()
            .map(|schema| self.generate_tool(schema))
            .collect()
    }

    /// Convert one function-calling schema into an MCP tool
    pub fn generate_tool(&self, schema: &ToolSchema) -> McpTool {
        let mut properties = Map::new();
        for (name, property) in &schema.parameters.properties {
            match serde_json::to_value(property) {
                Ok(value) => {
                    properties.insert(sanitize_property_name(name), value);
                }
                Err(e) => warn!("Skipping property {} of {}: {}", name, schema.name, e),
            }
        }

        let required = schema
            .parameters
            .required
            .as_ref()
            .map(|names| names.iter().map(|n| sanitize_property_name(n)).collect());

        McpTool {
            name: schema.name.clone(),
            description: if schema.description.is_empty() {
                None
            } else {
                Some(schema.description.clone())
            },
            input_schema: McpInputSchema {
                schema_type: schema.parameters.schema_type.clone(),
                properties,
                required,
            },
        }
    }
}

impl Default for ToolGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog::AgentToolProvider;
    use serde_json::json;
    use serde_json::Value;
    use tool_spec::{ParamType, StaticTools, ToolDescriptor, ToolParam};

    fn input_properties(tool: &McpTool) -> Value {
        Value::Object(tool.input_schema.properties.clone())
    }

    #[test]
    fn test_generate_agent_tools() {
        let tools = ToolGenerator::new().generate_tools(&[&AgentToolProvider]);
        assert_eq!(tools.len(), 4);

        let lookup = &tools[0];
        assert_eq!(lookup.name, "get_url_lookup");
        assert!(lookup.description.is_some());
        assert_eq!(input_properties(lookup), json!({"url": {"type": "string"}}));
        assert_eq!(lookup.input_schema.required, Some(vec!["url".to_string()]));
    }

    #[test]
    fn test_input_schema_serialization() {
        let tools = ToolGenerator::new().generate_tools(&[&AgentToolProvider]);
        let json = serde_json::to_value(&tools[3]).unwrap();
        assert_eq!(json["name"], "get_wallet_balance");
        assert_eq!(json["inputSchema"]["type"], "object");
        assert_eq!(json["inputSchema"]["required"], json!(["wallet_id"]));
    }

    #[test]
    fn test_sanitize_property_name() {
        assert_eq!(sanitize_property_name("dr_min"), "dr_min");
        assert_eq!(sanitize_property_name("price max$"), "price_max_");
        assert_eq!(sanitize_property_name(""), "param");
        assert_eq!(sanitize_property_name(&"a".repeat(80)).len(), 64);
    }

    #[test]
    fn test_parameterless_tool() {
        let provider = StaticTools::new(
            "misc",
            vec![
                ToolDescriptor::new("noop", ""),
                ToolDescriptor::new("echo", "Echo.")
                    .param(ToolParam::required("text value", ParamType::String)),
            ],
        );
        let tools = ToolGenerator::new().generate_tools(&[&provider]);

        assert!(tools[0].description.is_none());
        assert!(tools[0].input_schema.properties.is_empty());
        let json = serde_json::to_value(&tools[0]).unwrap();
        assert_eq!(json, json!({"name": "noop", "inputSchema": {"type": "object"}}));
        assert!(tools[0].input_schema.required.is_none());
        assert_eq!(
            tools[1].input_schema.required,
            Some(vec!["text_value".to_string()])
        );
    }
}
