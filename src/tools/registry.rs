//! Register tools by name; name, description, JSON schema, execute(ctx, args) -> ToolResult.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::tools::context::ToolCtx;
use crate::tools::result::ToolResult;
use crate::tools::send_file::SendFileTool;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A single tool: name, description, JSON schema for args, and execute.
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters(&self) -> Value;
    fn execute<'a>(&'a self, ctx: &'a ToolCtx, args: &'a Value) -> BoxFuture<'a, ToolResult>;
}

/// Declarative tool spec for the invocation framework (OpenAI function shape:
/// `type: "function"`, `function: { name, description, parameters }`).
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub type_: String,
    pub function: ToolFunctionSpec,
}

/// Inner function definition for a tool spec.
#[derive(Debug, Clone, Serialize)]
pub struct ToolFunctionSpec {
    pub name: String,
    pub description: String,
    /// JSON schema object, e.g. `{"type":"object","properties":{...}}`.
    pub parameters: Value,
}

/// Convert a tool to its declarative spec.
#[inline]
pub fn tool_to_spec(tool: &dyn Tool) -> ToolSpec {
    ToolSpec {
        type_: "function".to_string(),
        function: ToolFunctionSpec {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            parameters: tool.parameters(),
        },
    }
}

/// Registry of tools by name. Thread-safe; tools are shared via Arc.
#[derive(Default)]
pub struct ToolRegistry {
    inner: RwLock<HashMap<String, Arc<dyn Tool + Send + Sync>>>,
}

impl ToolRegistry {
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register a tool by its name. Overwrites if name already exists.
    pub fn register<T: Tool + Send + Sync + 'static>(&self, tool: T) {
        let name = tool.name().to_string();
        self.inner
            .write()
            .expect("registry lock")
            .insert(name, Arc::new(tool));
    }

    /// Execute tool by name. Returns error result if not found.
    pub async fn execute(&self, ctx: &ToolCtx, name: &str, args: &Value) -> ToolResult {
        let tool = {
            let guard = self.inner.read().expect("registry lock");
            guard.get(name).cloned()
        };

        if let Some(tool) = tool {
            tool.execute(ctx, args).await
        } else {
            ToolResult::error(format!("tool '{name}' not found"))
        }
    }

    /// All tool specs for the invocation framework, sorted by name.
    pub fn to_specs(&self) -> Vec<ToolSpec> {
        let guard = self.inner.read().expect("registry lock");
        let mut specs: Vec<ToolSpec> = guard.values().map(|t| tool_to_spec(t.as_ref())).collect();
        specs.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        specs
    }

    /// Sorted list of tool names.
    pub fn list(&self) -> Vec<String> {
        let guard = self.inner.read().expect("registry lock");
        let mut names: Vec<String> = guard.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Build the default registry from config: the send_file tool, restricted
/// to `files.allowed-dir` when set.
pub fn build_default_registry(config: &Config) -> ToolRegistry {
    let reg = ToolRegistry::new();
    reg.register(SendFileTool::new(config.allowed_dir()));
    reg
}
