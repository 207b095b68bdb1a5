use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// A single-slot, cancel-and-replace delayed task.
///
/// Each controller owns its own instance, so two live filter bars can never
/// cancel each other's timers. Scheduling replaces any pending run
/// (last-change-wins); dropping the instance cancels whatever is pending,
/// which is what tears timers down on unmount.
pub struct Debounce {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Debounce {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the configured delay, cancelling any previously
    /// scheduled task that has not fired yet.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        if let Some(previous) = self.pending.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Cancel the pending task, if any. A task that already started running
    /// is not interrupted mid-request.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for Debounce {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_the_last_scheduled_task_fires() {
        let debounce = Debounce::new(Duration::from_millis(600));
        let fired = Arc::new(Mutex::new(Vec::new()));

        for value in ["a", "b", "c"] {
            let sink = Arc::clone(&fired);
            debounce.schedule(async move {
                sink.lock().push(value);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(700)).await;

        assert_eq!(*fired.lock(), vec!["c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_the_pending_run() {
        let debounce = Debounce::new(Duration::from_millis(600));
        let fired = Arc::new(Mutex::new(false));

        let sink = Arc::clone(&fired);
        debounce.schedule(async move {
            *sink.lock() = true;
        });
        debounce.cancel();
        tokio::time::sleep(Duration::from_millis(700)).await;

        assert!(!*fired.lock());
    }
}
