use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Where activated panel actions go. Fire-and-forget: nothing is returned
/// and the caller never waits on the game.
pub trait CommandSink: Send + Sync {
    fn send(&self, command: &str);
}

impl<T: CommandSink + ?Sized> CommandSink for std::sync::Arc<T> {
    fn send(&self, command: &str) {
        (**self).send(command)
    }
}

/// Forwards commands to a channel drained by the connection task.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl CommandSink for ChannelSink {
    fn send(&self, command: &str) {
        if self.tx.send(command.to_string()).is_err() {
            tracing::warn!(%command, "command dropped, receiver is gone");
        }
    }
}

/// Keeps every command it is given.
#[derive(Default)]
pub struct MemorySink {
    sent: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

impl CommandSink for MemorySink {
    fn send(&self, command: &str) {
        self.sent.lock().push(command.to_string());
    }
}
