//! send_file tool: validate local files and hand them to the outbound delivery seam.

use std::io;
use std::path::PathBuf;

use serde_json::Value;

use crate::outbound::{DeliveryError, OutboundMessage};
use crate::tools::context::ToolCtx;
use crate::tools::registry::{BoxFuture, Tool};
use crate::tools::result::ToolResult;

/// Why a send_file call failed. Rendered to the single result string at the
/// tool boundary; nothing here escapes as a panic or raised error.
#[derive(Debug)]
pub enum SendError {
    MissingTarget,
    NotConfigured,
    NoPaths,
    Resolve { path: String, reason: String },
    OutsideAllowed { path: String, allowed: String },
    NotFound { path: String },
    NotAFile { path: String },
    Delivery(DeliveryError),
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::MissingTarget => write!(f, "no target channel/chat specified"),
            SendError::NotConfigured => {
                write!(f, "file delivery not configured (no outbound transport)")
            }
            SendError::NoPaths => write!(f, "no file paths provided"),
            SendError::Resolve { path, reason } => {
                write!(f, "cannot resolve path '{}': {}", path, reason)
            }
            SendError::OutsideAllowed { path, allowed } => {
                write!(f, "file '{}' is outside allowed directory '{}'", path, allowed)
            }
            SendError::NotFound { path } => write!(f, "file not found: {}", path),
            SendError::NotAFile { path } => write!(f, "not a file: {}", path),
            SendError::Delivery(e) => write!(f, "failed to send file(s): {}", e),
        }
    }
}

impl std::error::Error for SendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SendError::Delivery(e) => Some(e),
            _ => None,
        }
    }
}

fn get_optional_string(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(String::from)
}

/// Required array-of-string argument; any non-string element rejects the whole array.
fn get_string_array(args: &Value, key: &str) -> Result<Vec<String>, String> {
    let items = args
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| format!("missing or invalid '{key}'"))?;
    items
        .iter()
        .map(|v| v.as_str().map(String::from))
        .collect::<Option<Vec<String>>>()
        .ok_or_else(|| format!("missing or invalid '{key}'"))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Expand a leading `~` against the user's home directory. Relative paths
/// stay relative (canonicalize later resolves them against the cwd).
fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// send_file tool: all-or-nothing validation of a path batch, then one
/// outbound message through the ctx delivery seam.
pub struct SendFileTool {
    /// Containment root. When set, every validated path must live under it.
    allowed_dir: Option<PathBuf>,
}

impl SendFileTool {
    pub fn new(allowed_dir: Option<PathBuf>) -> Self {
        Self { allowed_dir }
    }

    /// Validate the batch in input order; the first failing path aborts the
    /// whole request. Returns canonicalized absolute path strings.
    async fn validate_paths(&self, raw_paths: &[String]) -> Result<Vec<String>, SendError> {
        if raw_paths.is_empty() {
            return Err(SendError::NoPaths);
        }
        // Canonicalize the root once per call; fall back to the configured
        // path if the root itself is missing (every check then fails closed).
        let allowed = match &self.allowed_dir {
            Some(dir) => Some(
                tokio::fs::canonicalize(dir)
                    .await
                    .unwrap_or_else(|_| dir.clone()),
            ),
            None => None,
        };

        let mut validated = Vec::with_capacity(raw_paths.len());
        for raw in raw_paths {
            let expanded = expand_home(raw);
            let canonical = match tokio::fs::canonicalize(&expanded).await {
                Ok(p) => p,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(SendError::NotFound { path: raw.clone() });
                }
                Err(e) => {
                    return Err(SendError::Resolve {
                        path: raw.clone(),
                        reason: e.to_string(),
                    });
                }
            };
            // Component-wise ancestry check, not string prefixing: keeps
            // `/allowed-other` out while `..` is already resolved above.
            if let Some(allowed) = &allowed {
                if !canonical.starts_with(allowed) {
                    return Err(SendError::OutsideAllowed {
                        path: raw.clone(),
                        allowed: allowed.to_string_lossy().into_owned(),
                    });
                }
            }
            let meta = match tokio::fs::metadata(&canonical).await {
                Ok(m) => m,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(SendError::NotFound { path: raw.clone() });
                }
                Err(e) => {
                    return Err(SendError::Resolve {
                        path: raw.clone(),
                        reason: e.to_string(),
                    });
                }
            };
            if !meta.is_file() {
                return Err(SendError::NotAFile { path: raw.clone() });
            }
            validated.push(canonical.to_string_lossy().into_owned());
        }
        Ok(validated)
    }
}

impl Tool for SendFileTool {
    fn name(&self) -> &str {
        "send_file"
    }

    fn description(&self) -> &str {
        "Send one or more local files to the user on a chat channel. \
         Supports images, documents, audio, and other file types."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_paths": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "File paths to send (one or more)"
                },
                "caption": {
                    "type": "string",
                    "description": "Optional caption/description for the file(s)"
                },
                "channel": {
                    "type": "string",
                    "description": "Optional: target channel (telegram, discord, etc.)"
                },
                "chat_id": {
                    "type": "string",
                    "description": "Optional: target chat/user ID"
                }
            },
            "required": ["file_paths"]
        })
    }

    fn execute<'a>(&'a self, ctx: &'a ToolCtx, args: &'a Value) -> BoxFuture<'a, ToolResult> {
        Box::pin(async move {
            let raw_paths = match get_string_array(args, "file_paths") {
                Ok(p) => p,
                Err(e) => return ToolResult::error(e),
            };
            let caption = get_optional_string(args, "caption").unwrap_or_default();
            let req_channel = get_optional_string(args, "channel");
            let req_chat_id = get_optional_string(args, "chat_id");

            let (channel, chat_id) =
                ctx.resolve_target(req_channel.as_deref(), req_chat_id.as_deref());
            if channel.is_empty() || chat_id.is_empty() {
                return ToolResult::error(SendError::MissingTarget.to_string());
            }
            let Some(delivery) = ctx.delivery.as_ref() else {
                return ToolResult::error(SendError::NotConfigured.to_string());
            };

            let validated = match self.validate_paths(&raw_paths).await {
                Ok(v) => v,
                Err(e) => return ToolResult::error(e.to_string()),
            };

            let count = validated.len();
            let first = validated[0].clone();
            let msg = OutboundMessage {
                channel: channel.clone(),
                chat_id: chat_id.clone(),
                content: caption,
                files: validated,
            };
            match delivery.deliver(msg).await {
                Ok(()) => {
                    let sent = if count > 1 {
                        format!("{count} file(s)")
                    } else {
                        first
                    };
                    ToolResult::ok(format!("sent {sent} to {channel}:{chat_id}"))
                }
                Err(e) => ToolResult::error(SendError::Delivery(e).to_string()),
            }
        })
    }
}
