// Debounced state writer
//
// Background task that coalesces rapid state updates and persists only the
// latest one once updates have been quiet for the debounce delay.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::reducer::ConversationContextState;
use super::store::{snapshot_for_persistence, StateStore};

enum WriterMessage {
    Update(ConversationContextState),
    Flush(oneshot::Sender<()>),
}

/// Handle to the writer task
pub struct DebouncedWriter {
    tx: mpsc::UnboundedSender<WriterMessage>,
    handle: JoinHandle<()>,
}

impl DebouncedWriter {
    /// Start the writer on the current runtime
    pub fn spawn(store: Arc<dyn StateStore>, delay: Duration, max_history: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(store, delay, max_history, rx));
        tracing::debug!("Started conversation writer ({}ms debounce)", delay.as_millis());
        Self { tx, handle }
    }

    /// Queue `state` for writing. Each call restarts the quiet period.
    pub fn schedule(&self, state: ConversationContextState) {
        if self.tx.send(WriterMessage::Update(state)).is_err() {
            tracing::warn!("Conversation writer has stopped; state not persisted");
        }
    }

    /// Write any pending state now
    pub async fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(WriterMessage::Flush(ack_tx))
            .map_err(|_| anyhow::anyhow!("Conversation writer has stopped"))?;
        ack_rx.await.context("Conversation writer dropped flush request")
    }

    /// Write any pending state and stop the task
    pub async fn shutdown(self) -> Result<()> {
        drop(self.tx);
        self.handle.await.context("Conversation writer task failed")
    }
}

async fn run(
    store: Arc<dyn StateStore>,
    delay: Duration,
    max_history: usize,
    mut rx: mpsc::UnboundedReceiver<WriterMessage>,
) {
    let mut pending: Option<ConversationContextState> = None;

    loop {
        let message = if pending.is_some() {
            match tokio::time::timeout(delay, rx.recv()).await {
                Ok(message) => message,
                Err(_) => {
                    write(store.as_ref(), pending.take(), max_history);
                    continue;
                }
            }
        } else {
            rx.recv().await
        };

        match message {
            Some(WriterMessage::Update(state)) => pending = Some(state),
            Some(WriterMessage::Flush(ack)) => {
                write(store.as_ref(), pending.take(), max_history);
                let _ = ack.send(());
            }
            None => {
                write(store.as_ref(), pending.take(), max_history);
                break;
            }
        }
    }

    tracing::debug!("Conversation writer stopped");
}

fn write(store: &dyn StateStore, state: Option<ConversationContextState>, max_history: usize) {
    let Some(state) = state else {
        return;
    };

    match store.save(&snapshot_for_persistence(&state, max_history)) {
        Ok(()) => tracing::debug!(
            "Persisted conversation state ({} messages)",
            state.message_history.len().min(max_history)
        ),
        Err(e) => tracing::warn!("Failed to persist state: {:#}", e),
    }
}
