//! Tool registry and implementations: send_file.

pub mod context;
pub mod registry;
pub mod result;
pub mod send_file;

pub use context::ToolCtx;
pub use registry::{Tool, ToolRegistry, build_default_registry, tool_to_spec};
pub use result::ToolResult;
pub use send_file::SendFileTool;
