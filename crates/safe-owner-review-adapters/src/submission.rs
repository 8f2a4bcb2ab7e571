use std::sync::{Arc, Mutex};

use safe_owner_review_core::{PortError, SubmissionPort, TransactionIntent};

/// Holds submitted intents until the signing side drains them.
#[derive(Debug, Clone, Default)]
pub struct QueuedSubmissionAdapter {
    queue: Arc<Mutex<Vec<TransactionIntent>>>,
}

impl QueuedSubmissionAdapter {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, PortError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, PortError> {
        Ok(self.lock()?.is_empty())
    }

    pub fn drain(&self) -> Result<Vec<TransactionIntent>, PortError> {
        Ok(std::mem::take(&mut *self.lock()?))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<TransactionIntent>>, PortError> {
        self.queue
            .lock()
            .map_err(|e| PortError::Transport(format!("submission queue lock poisoned: {e}")))
    }
}

impl SubmissionPort for QueuedSubmissionAdapter {
    fn submit(&self, intent: &TransactionIntent) -> Result<(), PortError> {
        let mut g = self.lock()?;
        g.push(intent.clone());
        tracing::debug!(queued = g.len(), target_account = %intent.target_account, "intent queued");
        Ok(())
    }
}
