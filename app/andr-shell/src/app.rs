use crate::commands::Commands;
use crate::error::{AppError, Result as AppErrorResult};
use crate::pin_commands::PinCommands;
use crate::report::{FetchReport, SessionReport, StartReport};
use crate::session_commands::SessionCommands;

use andr_config::Config;
use andr_fetch::{FetchCoordinator, PresentationContext};
use andr_pins::{Pin, PinStore};
use andr_session::{FileBackend, Identity, SessionStore, SessionStoreCell};

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use log::{info, warn};
use serde_json::{Value, json, to_value};
use tokio::runtime::Handle;

/// Owns the configuration and the lazily opened session and pin stores.
pub struct App {
    config: Config,
    session_path: PathBuf,
    pins_path: PathBuf,
    sessions: SessionStoreCell,
    pins: Mutex<Option<Arc<PinStore>>>,
}

impl App {
    pub fn new(config: Config, session_path: PathBuf, pins_path: PathBuf) -> Self {
        Self {
            config,
            session_path,
            pins_path,
            sessions: SessionStoreCell::new(),
            pins: Mutex::new(None),
        }
    }

    /// Resolves the session and pin file locations from `config`.
    pub fn from_config(config: Config) -> AppErrorResult<Self> {
        let session_path = config.session_path()?;
        let pins_path = config.pins_path()?;
        Ok(Self::new(config, session_path, pins_path))
    }

    /// The one session store, opened on first use.
    pub fn session_store(&self) -> AppErrorResult<Arc<SessionStore>> {
        let path = &self.session_path;
        let store = self
            .sessions
            .get_or_open(|| Ok(SessionStore::new(FileBackend::open(path)?)))?;
        Ok(store)
    }

    pub fn default_identity(&self) -> AppErrorResult<Identity> {
        let session = &self.config.session;
        Ok(Identity::new(
            session.default_user_id.as_str(),
            session.default_display_name.as_str(),
        )?)
    }

    /// Restores the stored identity, or saves the configured default on first run.
    pub fn manage_user_session(&self) -> AppErrorResult<SessionReport> {
        let start = self
            .session_store()?
            .get_or_create(self.default_identity()?)?;

        let report = SessionReport::from(start);
        info!("{}", report.message);
        Ok(report)
    }

    pub fn show_session(&self) -> AppErrorResult<Option<Identity>> {
        Ok(self.session_store()?.current()?)
    }

    pub fn save_session(&self, id: &str, name: &str) -> AppErrorResult<Identity> {
        let identity = Identity::new(id, name)?;
        self.session_store()?.save(&identity)?;
        Ok(identity)
    }

    pub fn clear_session(&self) -> AppErrorResult<()> {
        Ok(self.session_store()?.clear()?)
    }

    /// The pin store, opened on first use.
    pub fn pin_store(&self) -> AppErrorResult<Arc<PinStore>> {
        let mut slot = self.pins.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(store) = slot.as_ref() {
            return Ok(Arc::clone(store));
        }

        let store = Arc::new(PinStore::new(FileBackend::open(&self.pins_path)?));
        *slot = Some(Arc::clone(&store));
        Ok(store)
    }

    /// Saves a pin owned by the current identity.
    ///
    /// With `id`, replaces the pin stored under that id.
    pub fn add_pin(
        &self,
        name: &str,
        description: Option<String>,
        latitude: f64,
        longitude: f64,
        id: Option<u64>,
    ) -> AppErrorResult<Pin> {
        let owner = self.show_session()?.ok_or_else(AppError::no_session)?;

        let mut pin = Pin::for_identity(&owner, name, description, latitude, longitude)?;
        if let Some(id) = id {
            pin = pin.with_id(id);
        }

        Ok(self.pin_store()?.add_pin(pin)?)
    }

    /// Pins of the current identity; none when nobody is logged in.
    pub fn list_pins(&self) -> AppErrorResult<Vec<Pin>> {
        match self.show_session()? {
            Some(owner) => Ok(self.pin_store()?.pins_for(&owner)?),
            None => {
                warn!("No active session, no pins to show");
                Ok(Vec::new())
            }
        }
    }

    /// Fetches `url` (or the configured URL) on a worker and waits, acting as
    /// the presentation context, until the result has been delivered.
    pub async fn fetch(&self, url: Option<&str>) -> AppErrorResult<FetchReport> {
        let url = url.unwrap_or(&self.config.fetch.url).to_string();

        let (mut context, presentation) = PresentationContext::new();
        let coordinator =
            FetchCoordinator::http(self.config.fetch.timeout(), presentation, Handle::current())?;

        let delivered = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&delivered);
        let target = url.clone();

        info!("Fetching network data from {url}");
        let handle = coordinator.fetch(&url, move |outcome| {
            let report = FetchReport::new(target, outcome);
            if report.success {
                info!("{}", report.message);
            } else {
                warn!("{}", report.message);
            }
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(report);
        });

        while !handle.is_delivered() {
            if !context.run_next().await {
                break;
            }
        }

        let report = delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        report.ok_or_else(|| AppError::undelivered(handle.id()))
    }

    /// Startup flow: session first, then the optional fetch.
    pub async fn start(&self, fetch: bool, url: Option<&str>) -> AppErrorResult<StartReport> {
        let session = self.manage_user_session()?;

        let fetch = if fetch || url.is_some() {
            Some(self.fetch(url).await?)
        } else {
            None
        };

        Ok(StartReport { session, fetch })
    }

    /// Runs one CLI command and returns its JSON output.
    pub async fn execute(&self, command: Commands) -> AppErrorResult<Value> {
        let value = match command {
            Commands::Start { fetch, url } => to_value(self.start(fetch, url.as_deref()).await?)?,
            Commands::Session { action } => match action {
                SessionCommands::Show => json!({ "identity": to_value(self.show_session()?)? }),
                SessionCommands::Clear => {
                    self.clear_session()?;
                    json!({ "cleared": true })
                }
                SessionCommands::Save { id, name } => {
                    json!({ "identity": to_value(self.save_session(&id, &name)?)? })
                }
            },
            Commands::Pins { action } => match action {
                PinCommands::Add {
                    name,
                    description,
                    lat,
                    lng,
                    id,
                } => json!({ "pin": to_value(self.add_pin(&name, description, lat, lng, id)?)? }),
                PinCommands::List => json!({ "pins": to_value(self.list_pins()?)? }),
            },
            Commands::Fetch { url } => to_value(self.fetch(url.as_deref()).await?)?,
        };

        Ok(value)
    }
}
