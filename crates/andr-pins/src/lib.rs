//! Saved map pins, each owned by the identity that dropped it.
//!
//! Pins are stored through the same [`KeyValueBackend`](andr_session::KeyValueBackend)
//! commit discipline as the session itself, in a file of their own.

pub(crate) mod error;
pub(crate) mod pin;
pub(crate) mod store;

#[cfg(test)]
mod tests;

pub use error::{PinError, Result as PinResult};
pub use pin::Pin;
pub use store::PinStore;
