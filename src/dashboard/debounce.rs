use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Trailing-edge debouncer: every `push` cancels the pending timer and starts a
/// new one; only a value that survives `delay` without a newer push is sent.
pub struct Debouncer<T> {
    delay: Duration,
    handle: Handle,
    out: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, handle: Handle, out: UnboundedSender<T>) -> Self {
        Self {
            delay,
            handle,
            out,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T) {
        self.cancel();
        let delay = self.delay;
        let out = self.out.clone();
        self.pending = Some(self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = out.send(value);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}
