//! `aipseo tool-spec`

use tool_spec::{emit, SpecFormat, ToolProvider};

use crate::context::Context;
use crate::error::Result;
use crate::registry;

/// Tool spec of every command and agent tool
pub fn render(format: &str) -> Result<String> {
    let format = SpecFormat::parse(format)?;
    let providers = registry::providers();
    let providers: Vec<&dyn ToolProvider> = providers.iter().map(|p| p.as_ref()).collect();
    Ok(emit(format, &providers)?)
}

/// Always prints JSON, whatever `--format` of the top-level command says
pub fn run(ctx: &mut Context, format: &str) -> Result<()> {
    let spec = render(format)?;
    ctx.output.line(spec)
}
