//! Background fetch coordination.
//!
//! A [`FetchCoordinator`] performs one network retrieval per call on a tokio
//! worker task and marshals the [`FetchOutcome`] back to a
//! [`PresentationContext`], where the caller's completion callback runs exactly
//! once.

pub(crate) mod coordinator;
pub(crate) mod error;
pub(crate) mod fetch_handle;
pub(crate) mod fetch_state;
pub(crate) mod outcome;
pub(crate) mod presentation;
pub(crate) mod transport;

#[cfg(test)]
mod tests;

pub use coordinator::FetchCoordinator;
pub use error::{FetchError, Result as FetchErrorResult};
pub use fetch_handle::FetchHandle;
pub use fetch_state::FetchState;
pub use outcome::{FailureKind, FetchOutcome};
pub use presentation::{PresentationContext, PresentationHandle};
pub use transport::{HttpTransport, Transport};
