//! Debounced query controller.
//!
//! Converts a rapidly-changing input string (potentially one update per
//! keystroke) into a throttled stream of effective queries. Pure trailing-edge
//! debounce: an emission happens only after input has been quiet for the full
//! window, always carrying the latest value; intermediate values are dropped,
//! never queued, and a continuous stream of input never emits until it pauses.
//!
//! Built as a spawned task draining an mpsc channel with
//! `tokio::time::timeout` as the quiet-window clock. Dropping the
//! [`Debouncer`] handle closes the input channel; the task then exits without
//! emitting any pending value, so teardown can never produce a late query.

use crate::domain::error::{Result, ShelfmarkError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Channel depth for raw input; keystrokes beyond this apply backpressure.
const INPUT_BUFFER: usize = 32;

/// Channel depth for emitted effective queries.
const OUTPUT_BUFFER: usize = 8;

/// Handle feeding raw input into the debounce task.
///
/// Created by [`Debouncer::spawn`] together with the receiver of effective
/// queries. Dropping the handle tears the task down and cancels any pending
/// emission.
#[derive(Debug, Clone)]
pub struct Debouncer {
    tx: mpsc::Sender<String>,
}

impl Debouncer {
    /// Spawns the debounce task with the given quiet window.
    ///
    /// Returns the input handle and the receiver on which effective queries
    /// arrive once input has settled.
    #[must_use]
    pub fn spawn(quiet_window: Duration) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel::<String>(INPUT_BUFFER);
        let (out_tx, out_rx) = mpsc::channel::<String>(OUTPUT_BUFFER);

        tokio::spawn(debounce_loop(quiet_window, rx, out_tx));

        (Self { tx }, out_rx)
    }

    /// Feeds one input update into the debouncer.
    ///
    /// Each call supersedes any value still waiting out the quiet window and
    /// restarts the window.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfmarkError::Channel`] if the debounce task has exited.
    pub async fn input(&self, value: String) -> Result<()> {
        self.tx
            .send(value)
            .await
            .map_err(|_| ShelfmarkError::Channel("debounce task has shut down".to_string()))
    }
}

/// Task body: waits for input, then holds the latest value until the quiet
/// window passes without a newer one.
async fn debounce_loop(
    quiet_window: Duration,
    mut rx: mpsc::Receiver<String>,
    out_tx: mpsc::Sender<String>,
) {
    let mut pending: Option<String> = None;

    loop {
        match pending.take() {
            None => match rx.recv().await {
                Some(value) => pending = Some(value),
                None => break,
            },
            Some(current) => match timeout(quiet_window, rx.recv()).await {
                // Newer input within the window supersedes the held value.
                Ok(Some(value)) => pending = Some(value),
                // Input channel closed: teardown, held value is discarded.
                Ok(None) => break,
                // Quiet window elapsed: emit.
                Err(_) => {
                    tracing::debug!(query = %current, "quiet window elapsed, emitting effective query");
                    if out_tx.send(current).await.is_err() {
                        break;
                    }
                }
            },
        }
    }

    tracing::debug!("debounce task exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn burst_emits_only_latest_value() {
        let (debouncer, mut effective) = Debouncer::spawn(WINDOW);

        debouncer.input("h".to_string()).await.unwrap();
        debouncer.input("ha".to_string()).await.unwrap();
        debouncer.input("har".to_string()).await.unwrap();

        assert_eq!(effective.recv().await.as_deref(), Some("har"));
    }

    #[tokio::test(start_paused = true)]
    async fn newer_input_within_window_supersedes() {
        let (debouncer, mut effective) = Debouncer::spawn(WINDOW);

        debouncer.input("har".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.input("harry".to_string()).await.unwrap();

        assert_eq!(effective.recv().await.as_deref(), Some("harry"));
        // "har" was dropped, not queued.
        tokio::time::sleep(WINDOW * 2).await;
        assert!(effective.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn separate_pauses_emit_separately() {
        let (debouncer, mut effective) = Debouncer::spawn(WINDOW);

        debouncer.input("dune".to_string()).await.unwrap();
        assert_eq!(effective.recv().await.as_deref(), Some("dune"));

        debouncer.input("hobbit".to_string()).await.unwrap();
        assert_eq!(effective.recv().await.as_deref(), Some("hobbit"));
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_pending_emission() {
        let (debouncer, mut effective) = Debouncer::spawn(WINDOW);

        debouncer.input("pending".to_string()).await.unwrap();
        drop(debouncer);

        // The task exits without emitting; the channel closes empty.
        assert_eq!(effective.recv().await, None);
    }
}
