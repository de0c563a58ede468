use crate::FetchState;

use tokio::sync::watch;

/// Token for a scheduled fetch. Observes its state; cannot cancel it.
#[derive(Debug)]
pub struct FetchHandle {
    id: u64,
    state: watch::Receiver<FetchState>,
}

impl FetchHandle {
    pub(crate) fn new(id: u64, state: watch::Receiver<FetchState>) -> Self {
        Self { id, state }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> FetchState {
        *self.state.borrow()
    }

    pub fn is_delivered(&self) -> bool {
        self.state().is_delivered()
    }

    /// Waits until the completion callback has run.
    ///
    /// Returns early with the last known state if the delivery was dropped
    /// because the presentation context went away.
    pub async fn delivered(&mut self) -> FetchState {
        let _ = self.state.wait_for(FetchState::is_delivered).await;
        self.state()
    }
}
