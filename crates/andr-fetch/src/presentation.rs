//! The execution context that owns displayable state.
//!
//! Workers never run completion callbacks themselves. They post them through a
//! [`PresentationHandle`], and the interactive thread runs them when it drains
//! its [`PresentationContext`].

use log::warn;
use tokio::sync::mpsc;

type Delivery = Box<dyn FnOnce() + Send + 'static>;

/// Receiving side, owned by the interactive thread.
pub struct PresentationContext {
    deliveries: mpsc::UnboundedReceiver<Delivery>,
}

/// Cloneable sending side, given to whoever produces results.
#[derive(Clone)]
pub struct PresentationHandle {
    deliveries: mpsc::UnboundedSender<Delivery>,
}

impl PresentationContext {
    pub fn new() -> (Self, PresentationHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self { deliveries: rx },
            PresentationHandle { deliveries: tx },
        )
    }

    /// Runs every delivery already queued and returns how many ran. Never waits.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(delivery) = self.deliveries.try_recv() {
            delivery();
            ran += 1;
        }
        ran
    }

    /// Waits for the next delivery and runs it.
    ///
    /// Returns `false` once every handle is gone and nothing is left to run.
    pub async fn run_next(&mut self) -> bool {
        match self.deliveries.recv().await {
            Some(delivery) => {
                delivery();
                true
            }
            None => false,
        }
    }
}

impl PresentationHandle {
    /// Whether the context still exists to run deliveries.
    pub fn is_alive(&self) -> bool {
        !self.deliveries.is_closed()
    }

    /// Queues `delivery` for the presentation context.
    ///
    /// Returns `false`, after logging, when the context has been torn down; the
    /// delivery is dropped without running.
    pub fn post<F>(&self, delivery: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        if self.deliveries.send(Box::new(delivery)).is_err() {
            warn!("Presentation context is gone, dropping delivery");
            return false;
        }
        true
    }
}
