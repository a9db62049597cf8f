//! Execution context for tools: current chat routing, outbound delivery seam.

use std::sync::Arc;

use crate::outbound::Delivery;

/// Context passed into each tool execution. The host rebuilds it whenever
/// the active conversation changes; a request may still override the
/// routing pair for a single call.
#[derive(Clone, Default)]
pub struct ToolCtx {
    /// Channel label of the active conversation (e.g. "telegram").
    pub channel: Option<String>,
    /// Chat/user ID of the active conversation.
    pub chat_id: Option<String>,
    /// Delivery seam for outbound messages; None when no transport is attached.
    pub delivery: Option<Arc<dyn Delivery>>,
}

impl ToolCtx {
    /// Resolve the routing target: non-empty request value wins, else the
    /// context default, else empty string.
    pub fn resolve_target(
        &self,
        req_channel: Option<&str>,
        req_chat_id: Option<&str>,
    ) -> (String, String) {
        let channel = req_channel
            .filter(|c| !c.is_empty())
            .map(String::from)
            .or_else(|| self.channel.clone())
            .unwrap_or_default();
        let chat_id = req_chat_id
            .filter(|c| !c.is_empty())
            .map(String::from)
            .or_else(|| self.chat_id.clone())
            .unwrap_or_default();
        (channel, chat_id)
    }
}
