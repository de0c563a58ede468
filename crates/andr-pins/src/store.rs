use crate::{Pin, PinResult};

use andr_session::{Identity, KeyValueBackend, WriteBatch};

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

const PIN_KEY_PREFIX: &str = "pin/";
const NEXT_ID_KEY: &str = "pins.next_id";

/// Per-user pin storage.
///
/// Each pin is one JSON entry keyed by its zero-padded id, so a prefix scan
/// returns pins in id order. Adding a pin writes the pin and the id counter in
/// one commit.
pub struct PinStore {
    backend: Box<dyn KeyValueBackend>,
    guard: Mutex<()>,
}

impl PinStore {
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            guard: Mutex::new(()),
        }
    }

    /// Stores `pin` and returns it as stored.
    ///
    /// A pin without an id gets the next free one. A pin with an id replaces
    /// the pin stored under that id, if any.
    pub fn add_pin(&self, pin: Pin) -> PinResult<Pin> {
        pin.validate()?;
        let _guard = self.lock();

        let next_id = self.next_id()?;
        let pin = if pin.id() == 0 {
            pin.with_id(next_id)
        } else {
            pin
        };
        let id = pin.id();
        let key = pin_key(id);

        let replaced = self.backend.get(&key)?.is_some();
        let json = serde_json::to_string(&pin)?;

        self.backend.commit(
            WriteBatch::new()
                .put(key, json)
                .put(NEXT_ID_KEY, next_id.max(id.saturating_add(1)).to_string()),
        )?;

        if replaced {
            info!("Replaced pin {id} for {}", pin.user_id());
        } else {
            info!("Added pin {id} for {}", pin.user_id());
        }
        Ok(pin)
    }

    /// Pins owned by `user_id`, in id order.
    pub fn pins_for_user(&self, user_id: &str) -> PinResult<Vec<Pin>> {
        let _guard = self.lock();

        let pins: Vec<Pin> = self
            .stored_pins()?
            .into_iter()
            .filter(|pin| pin.user_id() == user_id)
            .collect();

        debug!("Found {} pins for {user_id}", pins.len());
        Ok(pins)
    }

    /// Pins owned by `owner`.
    pub fn pins_for(&self, owner: &Identity) -> PinResult<Vec<Pin>> {
        self.pins_for_user(owner.id())
    }

    /// Every readable pin. Unreadable entries are logged and skipped.
    fn stored_pins(&self) -> PinResult<Vec<Pin>> {
        let pins = self
            .backend
            .scan_prefix(PIN_KEY_PREFIX)?
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_str::<Pin>(&value) {
                Ok(pin) => Some(pin),
                Err(e) => {
                    warn!("Skipping unreadable pin entry {key}: {e}");
                    None
                }
            })
            .collect();
        Ok(pins)
    }

    /// The stored counter, or one past the highest stored id when the counter
    /// is missing or unreadable.
    fn next_id(&self) -> PinResult<u64> {
        if let Some(raw) = self.backend.get(NEXT_ID_KEY)? {
            match raw.parse::<u64>() {
                Ok(next) if next > 0 => return Ok(next),
                _ => warn!("Pin id counter '{raw}' is unreadable, recomputing"),
            }
        }

        let highest = self
            .stored_pins()?
            .iter()
            .map(Pin::id)
            .max()
            .unwrap_or(0);
        Ok(highest.saturating_add(1))
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn pin_key(id: u64) -> String {
    format!("{PIN_KEY_PREFIX}{id:020}")
}
