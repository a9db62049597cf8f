//! Outbound delivery: message type, delivery seam, bounded mpsc queue.
//!
//! The host owns the transport (e.g. a Telegram send loop). Tools only see
//! the `Delivery` trait; `OutboundQueue` is the default implementation and
//! hands messages to the host through a bounded channel.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

/// One outbound message: routing pair, text content, validated file paths.
///
/// `files` entries are absolute, canonicalized paths. Ownership passes to
/// the deliverer; the sending tool keeps no reference after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub channel: String,
    pub chat_id: String,
    pub content: String,
    pub files: Vec<String>,
}

/// Errors from the delivery seam; the transport side reports its own
/// failures as `Transport`.
#[derive(Debug)]
pub enum DeliveryError {
    /// The host dropped the receiving end of the queue.
    Closed,
    Transport(String),
}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryError::Closed => write!(f, "outbound queue closed"),
            DeliveryError::Transport(s) => write!(f, "transport: {}", s),
        }
    }
}

impl std::error::Error for DeliveryError {}

pub type DeliveryFuture<'a> = Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>>;

/// Narrow delivery seam: accept one message, suspend while handing it off,
/// fail with a `DeliveryError`. Implemented by the host's transport glue.
pub trait Delivery: Send + Sync {
    fn deliver<'a>(&'a self, msg: OutboundMessage) -> DeliveryFuture<'a>;
}

/// Bounded queue implementation of [`Delivery`]. Cheap to clone; the host
/// keeps the matching receiver and drains it from its send loop.
#[derive(Clone)]
pub struct OutboundQueue {
    tx: mpsc::Sender<OutboundMessage>,
}

impl Delivery for OutboundQueue {
    fn deliver<'a>(&'a self, msg: OutboundMessage) -> DeliveryFuture<'a> {
        Box::pin(async move { self.tx.send(msg).await.map_err(|_| DeliveryError::Closed) })
    }
}

/// New bounded outbound queue. The returned receiver belongs to the host's
/// transport; when it is dropped every later deliver fails with `Closed`.
pub fn outbound_queue(capacity: usize) -> (OutboundQueue, mpsc::Receiver<OutboundMessage>) {
    let (tx, rx) = mpsc::channel(capacity);
    (OutboundQueue { tx }, rx)
}
