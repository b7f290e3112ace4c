//! Tool descriptor types
//!
//! A descriptor is an explicit manifest of one exposed function: its name,
//! description and parameter list. Schemas are generated from these rather
//! than from any runtime reflection.

use serde_json::Value;

/// Declared type of a tool parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamType {
    String,
    Bool,
    Int,
    Float,
    /// May be absent / null
    Optional(Box<ParamType>),
    /// One of several types
    Union(Vec<ParamType>),
    /// Anything without a JSON Schema primitive (paths, lists, records...)
    Other(String),
}

impl ParamType {
    /// Wrap a type as optional
    pub fn optional(inner: ParamType) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Whether a value of this type may be omitted
    pub fn is_optional(&self) -> bool {
        match self {
            Self::Optional(_) => true,
            Self::Union(arms) => arms.iter().any(ParamType::is_optional),
            _ => false,
        }
    }
}

/// Default value of a tool parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamDefault {
    /// No default; the caller has to supply the value
    Required,
    /// JSON-encodable default
    Value(Value),
    /// A default exists but has no JSON form (described for humans only)
    Unrepresentable(String),
}

/// One parameter of a tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolParam {
    pub name: String,
    pub kind: ParamType,
    pub default: ParamDefault,
    pub description: Option<String>,
}

impl ToolParam {
    /// A parameter without a default
    pub fn required(name: impl Into<String>, kind: ParamType) -> Self {
        Self {
            name: name.into(),
            kind,
            default: ParamDefault::Required,
            description: None,
        }
    }

    /// A parameter with a JSON-encodable default
    pub fn with_default(name: impl Into<String>, kind: ParamType, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            default: ParamDefault::Value(default.into()),
            description: None,
        }
    }

    /// An optional parameter defaulting to null
    pub fn optional(name: impl Into<String>, inner: ParamType) -> Self {
        Self {
            name: name.into(),
            kind: ParamType::optional(inner),
            default: ParamDefault::Value(Value::Null),
            description: None,
        }
    }

    /// Set the help text
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the generated schema lists this parameter as required
    pub fn is_required(&self) -> bool {
        !self.kind.is_optional() && self.default == ParamDefault::Required
    }
}

/// Manifest entry for one exposed function
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub params: Vec<ToolParam>,
}

impl ToolDescriptor {
    /// Create a descriptor without parameters
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter (declaration order is preserved)
    pub fn param(mut self, param: ToolParam) -> Self {
        self.params.push(param);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rules() {
        assert!(ToolParam::required("url", ParamType::String).is_required());
        assert!(!ToolParam::optional("topic", ParamType::String).is_required());
        assert!(!ToolParam::with_default("force", ParamType::Bool, false).is_required());

        // Optional type without a default is still not required
        let p = ToolParam::required("b", ParamType::optional(ParamType::Int));
        assert!(!p.is_required());

        let p = ToolParam::required(
            "x",
            ParamType::Union(vec![ParamType::Int, ParamType::optional(ParamType::String)]),
        );
        assert!(!p.is_required());

        let p = ToolParam {
            name: "out".into(),
            kind: ParamType::Other("Path".into()),
            default: ParamDefault::Unrepresentable("Path(\"out\")".into()),
            description: None,
        };
        assert!(!p.is_required());
    }

    #[test]
    fn test_builder_preserves_order() {
        let tool = ToolDescriptor::new("f", "doc")
            .param(ToolParam::required("a", ParamType::String))
            .param(ToolParam::optional("b", ParamType::Int))
            .param(ToolParam::required("c", ParamType::Float).describe("third"));

        let names: Vec<_> = tool.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(tool.params[2].description.as_deref(), Some("third"));
    }
}
