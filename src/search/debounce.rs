//! Debounced query dispatch
//!
//! Queries arriving faster than the settle interval are coalesced: every new
//! query restarts the timer and replaces the pending one, so only the last
//! query of a burst is handed to the handler.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default settle interval for interactive input
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(250);

/// Sending half of a debounced query stream
///
/// Dropping every clone flushes a pending query and stops the task.
#[derive(Debug, Clone)]
pub struct QueryDebouncer {
    tx: mpsc::UnboundedSender<String>,
}

impl QueryDebouncer {
    /// Spawn the debounce task on the current tokio runtime
    pub fn spawn<F>(settle: Duration, mut on_settled: F) -> (Self, JoinHandle<()>)
    where
        F: FnMut(String) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let handle = tokio::spawn(async move {
            let mut pending: Option<String> = None;

            loop {
                tokio::select! {
                    received = rx.recv() => match received {
                        Some(query) => {
                            if let Some(old) = pending.replace(query) {
                                tracing::trace!("Superseded query {:?}", old);
                            }
                        }
                        None => break,
                    },
                    _ = tokio::time::sleep(settle), if pending.is_some() => {
                        if let Some(query) = pending.take() {
                            on_settled(query);
                        }
                    }
                }
            }

            if let Some(query) = pending.take() {
                on_settled(query);
            }
        });

        (Self { tx }, handle)
    }

    /// Queue a query; returns false once the task has stopped
    pub fn push(&self, query: impl Into<String>) -> bool {
        self.tx.send(query.into()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(String) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |q| sink.lock().unwrap().push(q))
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_is_coalesced() {
        let (seen, handler) = recorder();
        let (debouncer, handle) = QueryDebouncer::spawn(Duration::from_millis(250), handler);

        for query in ["r", "ru", "rus", "rust"] {
            assert!(debouncer.push(query));
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["rust"]);

        drop(debouncer);
        handle.await.unwrap();
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts() {
        let (seen, handler) = recorder();
        let (debouncer, handle) = QueryDebouncer::spawn(Duration::from_millis(250), handler);

        debouncer.push("vite");
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.push("react");
        debouncer.push("react hooks");
        tokio::time::sleep(Duration::from_millis(400)).await;

        drop(debouncer);
        handle.await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["vite", "react hooks"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_query_flushed_on_close() {
        let (seen, handler) = recorder();
        let (debouncer, handle) = QueryDebouncer::spawn(Duration::from_millis(250), handler);

        debouncer.push("a");
        debouncer.push("ab");
        drop(debouncer);
        handle.await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["ab"]);
    }
}
