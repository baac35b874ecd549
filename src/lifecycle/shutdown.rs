//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcasts a single "stop" to every running server.
///
/// Servers take a receiver from [`Shutdown::subscribe`] and drain once
/// [`Shutdown::trigger`] fires. Triggering with no subscribers is a no-op.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Servers still listening for the signal.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
