//! Sources of tool descriptors

use crate::error::{ToolSpecError, ToolSpecResult};
use crate::types::ToolDescriptor;

/// A named group of tools
///
/// Providers are walked in order by the schema generator. A provider whose
/// tools cannot be produced (for example because its feature is compiled
/// out) returns an error and is skipped.
pub trait ToolProvider {
    /// Group name, used in log messages
    fn group(&self) -> &str;

    /// Descriptors of the tools in this group
    fn descriptors(&self) -> ToolSpecResult<Vec<ToolDescriptor>>;
}

/// Provider over a fixed list of descriptors
#[derive(Debug, Clone)]
pub struct StaticTools {
    group: String,
    tools: Vec<ToolDescriptor>,
}

impl StaticTools {
    pub fn new(group: impl Into<String>, tools: Vec<ToolDescriptor>) -> Self {
        Self {
            group: group.into(),
            tools,
        }
    }
}

impl ToolProvider for StaticTools {
    fn group(&self) -> &str {
        &self.group
    }

    fn descriptors(&self) -> ToolSpecResult<Vec<ToolDescriptor>> {
        Ok(self.tools.clone())
    }
}

/// Provider standing in for a group that is not available in this build
#[derive(Debug, Clone)]
pub struct UnavailableTools {
    group: String,
    reason: String,
}

impl UnavailableTools {
    pub fn new(group: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            reason: reason.into(),
        }
    }
}

impl ToolProvider for UnavailableTools {
    fn group(&self) -> &str {
        &self.group
    }

    fn descriptors(&self) -> ToolSpecResult<Vec<ToolDescriptor>> {
        Err(ToolSpecError::Unavailable {
            group: self.group.clone(),
            reason: self.reason.clone(),
        })
    }
}
