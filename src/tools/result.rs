//! Tool execution result: for_llm string, is_error flag.

/// Result of executing a tool. `for_llm` is the single human-readable
/// string handed back to the invocation framework verbatim; `is_error`
/// is internal (the framework only forwards the string).
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Content appended to the conversation for the LLM.
    pub for_llm: String,
    /// If true, treat as tool error (LLM may retry or report).
    pub is_error: bool,
}

impl ToolResult {
    /// Success with content for the LLM.
    #[inline]
    pub fn ok(for_llm: impl Into<String>) -> Self {
        Self {
            for_llm: for_llm.into(),
            is_error: false,
        }
    }

    /// Error: for_llm = msg, is_error = true.
    #[inline]
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            for_llm: msg.into(),
            is_error: true,
        }
    }
}
