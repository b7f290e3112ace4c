//! Agent tool catalog, generation and execution

pub mod catalog;
mod executor;
mod generator;

pub use catalog::{agent_tools, AgentToolProvider};
pub use executor::ToolExecutor;
pub use generator::ToolGenerator;
