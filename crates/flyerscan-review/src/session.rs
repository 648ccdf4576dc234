//! Review session wiring
//!
//! Connects the review queue to the two external collaborators: the
//! event-creation service that receives approved drafts, and the hosting
//! controller that wants a single "batch complete" signal when the queue
//! drains so it can close the review interface.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{info, warn};

use flyerscan_core::models::EventDraft;

use crate::queue::{Direction, DraftEdit, ReviewError, ReviewQueue};

/// Consumer of approved drafts. Persistence, further validation, and any
/// network I/O live behind this boundary.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn create_event(&self, draft: EventDraft) -> anyhow::Result<()>;
}

/// Sink that swallows approved drafts; useful in tests and dry runs.
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn create_event(&self, _draft: EventDraft) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Signals sent to the hosting controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The last draft was approved or rejected; close the review interface.
    BatchComplete,
}

/// One operator's review pass over one batch of drafts.
pub struct ReviewSession {
    queue: ReviewQueue,
    sink: Arc<dyn EventSink>,
    complete_tx: Option<mpsc::Sender<SessionEvent>>,
}

impl ReviewSession {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            queue: ReviewQueue::new(),
            sink,
            complete_tx: None,
        }
    }

    /// Attach a channel that receives [`SessionEvent::BatchComplete`] when
    /// the queue drains.
    pub fn with_completion_channel(mut self, tx: mpsc::Sender<SessionEvent>) -> Self {
        self.complete_tx = Some(tx);
        self
    }

    pub fn load(&mut self, drafts: Vec<EventDraft>) {
        info!(drafts = drafts.len(), "loading review session");
        self.queue.load(drafts);
    }

    pub fn queue(&self) -> &ReviewQueue {
        &self.queue
    }

    pub fn current(&self) -> Option<&EventDraft> {
        self.queue.current()
    }

    pub fn navigate(&mut self, direction: Direction) -> Result<&EventDraft, ReviewError> {
        self.queue.navigate(direction)
    }

    pub fn edit(&mut self, edit: DraftEdit) -> Result<(), ReviewError> {
        self.queue.edit(edit)
    }

    /// Approve the current draft: hand it to the event sink and remove it
    /// from the queue. If the sink refuses the draft it is restored under
    /// the cursor so the operator can retry. Returns whether the session is
    /// complete.
    pub async fn approve(&mut self) -> anyhow::Result<bool> {
        let position = self.queue.position().ok_or(ReviewError::Empty)?;
        let (draft, complete) = self.queue.approve()?;

        if let Err(err) = self.sink.create_event(draft.clone()).await {
            warn!(draft = %draft.id, error = %err, "event sink refused draft; restoring");
            self.queue.restore(position, draft);
            return Err(err.context("Event creation failed; draft returned to queue"));
        }

        info!(draft = %draft.id, "draft approved");
        if complete {
            self.notify_complete().await;
        }
        Ok(complete)
    }

    /// Discard the current draft without emitting it. Returns whether the
    /// session is complete.
    pub async fn reject(&mut self) -> Result<bool, ReviewError> {
        let complete = self.queue.reject()?;
        if complete {
            self.notify_complete().await;
        }
        Ok(complete)
    }

    async fn notify_complete(&self) {
        info!("review session complete");
        if let Some(tx) = &self.complete_tx {
            if tx.send(SessionEvent::BatchComplete).await.is_err() {
                warn!("session controller dropped the completion channel");
            }
        }
    }
}
