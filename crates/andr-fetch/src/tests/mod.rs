
use crate::{FetchError, FetchErrorResult, FetchOutcome, Transport};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tokio::sync::Notify;

/// What the scripted transport answers.
#[derive(Clone)]
pub(crate) enum Script {
    Body(String),
    Status(u16),
    Panic,
}

/// Stand-in for an open connection; flips `released` when dropped.
struct Connection {
    released: Arc<AtomicBool>,
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

/// Transport double that records connection lifetime and worker thread.
pub(crate) struct ScriptedTransport {
    script: Script,
    pub(crate) released: Arc<AtomicBool>,
    pub(crate) calls: Arc<AtomicUsize>,
    pub(crate) worker_thread: Arc<Mutex<Option<ThreadId>>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Script) -> Self {
        Self {
            script,
            released: Arc::new(AtomicBool::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
            worker_thread: Arc::new(Mutex::new(None)),
            gate: None,
        }
    }

    /// Holds every request open until the returned gate is notified.
    pub(crate) fn gated(script: Script) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let transport = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::new(script)
        };
        (transport, gate)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get_text(&self, url: &Url) -> FetchErrorResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.worker_thread.lock().unwrap() = Some(std::thread::current().id());
        self.released.store(false, Ordering::SeqCst);

        let _connection = Connection {
            released: Arc::clone(&self.released),
        };

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.script {
            Script::Body(body) => Ok(body.clone()),
            Script::Status(status) => Err(FetchError::status(url.as_str(), *status)),
            Script::Panic => panic!("transport blew up while reading {url}"),
        }
    }
}

/// Collects delivered outcomes together with the delivering thread.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    deliveries: Arc<Mutex<Vec<(FetchOutcome, ThreadId)>>>,
}

impl Recorder {
    pub(crate) fn callback(&self) -> impl FnOnce(FetchOutcome) + Send + 'static {
        let deliveries = Arc::clone(&self.deliveries);
        move |outcome| {
            deliveries
                .lock()
                .unwrap()
                .push((outcome, std::thread::current().id()));
        }
    }

    pub(crate) fn outcomes(&self) -> Vec<FetchOutcome> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .map(|(outcome, _)| outcome.clone())
            .collect()
    }

    pub(crate) fn threads(&self) -> Vec<ThreadId> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .map(|(_, thread)| *thread)
            .collect()
    }
}

/// Polls `condition` until it holds or a generous deadline passes.
pub(crate) async fn eventually(condition: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
