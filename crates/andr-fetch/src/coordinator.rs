use crate::{
    FetchError, FetchErrorResult, FetchHandle, FetchOutcome, FetchState, HttpTransport,
    PresentationHandle, Transport,
};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use log::{debug, error, info, warn};
use reqwest::Url;
use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Runs one retrieval per `fetch` on a worker task and hands the outcome to the
/// presentation context exactly once.
///
/// At most one fetch is in flight per coordinator. The slot is released just
/// before the completion callback runs, so the callback may start the next one.
pub struct FetchCoordinator<T: Transport = HttpTransport> {
    transport: Arc<T>,
    presentation: PresentationHandle,
    runtime: Handle,
    in_flight: Arc<AtomicBool>,
    active_workers: Arc<AtomicUsize>,
    next_id: AtomicU64,
}

impl<T: Transport> FetchCoordinator<T> {
    pub fn new(transport: T, presentation: PresentationHandle, runtime: Handle) -> Self {
        Self {
            transport: Arc::new(transport),
            presentation,
            runtime,
            in_flight: Arc::new(AtomicBool::new(false)),
            active_workers: Arc::new(AtomicUsize::new(0)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Whether a fetch is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Number of worker tasks that have not finished yet.
    pub fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::Acquire)
    }

    /// Schedules a retrieval of `url` and returns immediately.
    ///
    /// `on_complete` runs exactly once, on the presentation context:
    /// - a malformed or non-http(s) `url` is reported as
    ///   [`FailureKind::InvalidUrl`](crate::FailureKind) without starting a worker,
    /// - a call made while another fetch is in flight is reported as
    ///   [`FailureKind::Busy`](crate::FailureKind) without starting a worker,
    /// - otherwise a worker performs the request and reports its body or a
    ///   [`FailureKind::Network`](crate::FailureKind) failure.
    ///
    /// If the presentation context is torn down first, the delivery is dropped.
    pub fn fetch<F>(&self, url: &str, on_complete: F) -> FetchHandle
    where
        F: FnOnce(FetchOutcome) + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (state_tx, state_rx) = watch::channel(FetchState::Idle);
        let handle = FetchHandle::new(id, state_rx);

        let url = match parse_target(url) {
            Ok(url) => url,
            Err(e) => {
                warn!("Fetch {id} rejected: {}", e.diagnostic());
                self.deliver_now(id, state_tx, e.into(), on_complete);
                return handle;
            }
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Fetch {id} rejected: another fetch is in flight");
            self.deliver_now(id, state_tx, FetchOutcome::busy(), on_complete);
            return handle;
        }

        state_tx.send_replace(FetchState::Running);
        info!("Fetch {id} started: {url}");

        let transport = Arc::clone(&self.transport);
        let presentation = self.presentation.clone();
        let slot = InFlightSlot::held(&self.in_flight);
        let worker = WorkerGuard::enter(&self.active_workers);

        self.runtime.spawn(async move {
            let _worker = worker;

            // A panicking transport unwinds its own task, not this one.
            // The transport has released the connection by the time this returns.
            let request = tokio::spawn(async move { transport.get_text(&url).await });
            let outcome = match request.await {
                Ok(Ok(body)) => {
                    debug!("Fetch {id} received {} bytes", body.len());
                    FetchOutcome::Success { body }
                }
                Ok(Err(e)) => {
                    warn!("Fetch {id} failed: {}", e.diagnostic());
                    FetchOutcome::from(e)
                }
                Err(e) => {
                    let e = FetchError::worker(e);
                    error!("Fetch {id} aborted: {}", e.diagnostic());
                    FetchOutcome::from(e)
                }
            };

            let (ack_tx, ack_rx) = oneshot::channel();
            let posted = presentation.post(move || {
                drop(slot);
                deliver(state_tx, outcome, on_complete);
                let _ = ack_tx.send(());
            });

            if !posted {
                return;
            }

            // Delivery happens-before this worker finishes.
            match ack_rx.await {
                Ok(()) => debug!("Fetch {id} delivered"),
                Err(_) => warn!("Fetch {id} result dropped: presentation context torn down"),
            }
        });

        handle
    }

    /// Posts an outcome that needs no worker.
    fn deliver_now<F>(
        &self,
        id: u64,
        state_tx: watch::Sender<FetchState>,
        outcome: FetchOutcome,
        on_complete: F,
    ) where
        F: FnOnce(FetchOutcome) + Send + 'static,
    {
        if !self
            .presentation
            .post(move || deliver(state_tx, outcome, on_complete))
        {
            warn!("Fetch {id} result dropped: presentation context torn down");
        }
    }
}

impl FetchCoordinator<HttpTransport> {
    /// Coordinator backed by [`HttpTransport`].
    pub fn http(
        timeout: Option<std::time::Duration>,
        presentation: PresentationHandle,
        runtime: Handle,
    ) -> FetchErrorResult<Self> {
        Ok(Self::new(HttpTransport::new(timeout)?, presentation, runtime))
    }
}

/// Runs the callback, then marks the fetch delivered.
fn deliver<F>(state_tx: watch::Sender<FetchState>, outcome: FetchOutcome, on_complete: F)
where
    F: FnOnce(FetchOutcome),
{
    let succeeded = outcome.is_success();
    on_complete(outcome);
    state_tx.send_replace(FetchState::Delivered { succeeded });
}

pub(crate) fn parse_target(raw: &str) -> FetchErrorResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| FetchError::invalid_url(raw, e.to_string()))?;

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(FetchError::invalid_url(
            raw,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

/// Marks the coordinator busy until dropped.
///
/// Dropped just before the callback runs, or wherever the delivery is dropped
/// instead, so no exit path leaves the coordinator busy.
struct InFlightSlot {
    in_flight: Arc<AtomicBool>,
}

impl InFlightSlot {
    /// Wraps a slot that the caller has already claimed.
    fn held(in_flight: &Arc<AtomicBool>) -> Self {
        Self {
            in_flight: Arc::clone(in_flight),
        }
    }
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

/// Counts a worker as active until dropped, including on panic.
struct WorkerGuard {
    active: Arc<AtomicUsize>,
}

impl WorkerGuard {
    fn enter(active: &Arc<AtomicUsize>) -> Self {
        active.fetch_add(1, Ordering::AcqRel);
        Self {
            active: Arc::clone(active),
        }
    }
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}
