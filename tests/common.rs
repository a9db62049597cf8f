use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use filedrop::outbound::{Delivery, DeliveryError, DeliveryFuture, OutboundMessage};
use filedrop::tools::ToolCtx;

pub struct TestWorkspace {
    // Keep TempDir alive so dir isn't deleted until struct drop
    _tmp: TempDir,
    pub root: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("failed to create temp dir");
        // Canonicalize up front so assertions compare against the same
        // symlink-resolved form the validator produces (/var vs /private/var).
        let root = tmp
            .path()
            .canonicalize()
            .expect("failed to canonicalize temp dir");
        Self { _tmp: tmp, root }
    }

    /// Create a file under the workspace root, returning its path.
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let p = self.root.join(name);
        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&p, content).unwrap();
        p
    }

    /// Create a directory under the workspace root, returning its path.
    pub fn dir(&self, name: &str) -> PathBuf {
        let p = self.root.join(name);
        std::fs::create_dir_all(&p).unwrap();
        p
    }
}

/// Delivery fake that records every message it is handed.
#[derive(Default)]
pub struct CaptureDelivery {
    sent: Mutex<Vec<OutboundMessage>>,
}

impl CaptureDelivery {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Delivery for CaptureDelivery {
    fn deliver<'a>(&'a self, msg: OutboundMessage) -> DeliveryFuture<'a> {
        Box::pin(async move {
            self.sent.lock().unwrap().push(msg);
            Ok(())
        })
    }
}

/// Delivery fake that always fails with a transport error.
pub struct FailingDelivery(pub String);

impl Delivery for FailingDelivery {
    fn deliver<'a>(&'a self, _msg: OutboundMessage) -> DeliveryFuture<'a> {
        let reason = self.0.clone();
        Box::pin(async move { Err(DeliveryError::Transport(reason)) })
    }
}

/// Ctx for the usual active conversation: telegram:123 with the given delivery.
pub fn ctx_with(delivery: Arc<dyn Delivery>) -> ToolCtx {
    ToolCtx {
        channel: Some("telegram".into()),
        chat_id: Some("123".into()),
        delivery: Some(delivery),
    }
}
