//! Output formats for generated tool specs

use std::fmt;
use std::str::FromStr;

use crate::error::{ToolSpecError, ToolSpecResult};
use crate::provider::ToolProvider;
use crate::schema::generate_schemas;

/// Supported tool spec formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
    /// OpenAI function-calling format
    #[default]
    OpenAi,
}

impl SpecFormat {
    /// Parse a format name (case-insensitive)
    pub fn parse(name: &str) -> ToolSpecResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            _ => Err(ToolSpecError::UnsupportedFormat(name.to_string())),
        }
    }
}

impl FromStr for SpecFormat {
    type Err = ToolSpecError;

    fn from_str(s: &str) -> ToolSpecResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

/// Generate the tool spec of all providers as pretty-printed JSON
pub fn emit(format: SpecFormat, providers: &[&dyn ToolProvider]) -> ToolSpecResult<String> {
    match format {
        SpecFormat::OpenAi => {
            let schemas = generate_schemas(providers);
            Ok(serde_json::to_string_pretty(&schemas)?)
        }
    }
}
