//! Durable single-slot storage for the current logged-in identity.

pub(crate) mod backend;
pub(crate) mod error;
pub(crate) mod identity;
pub(crate) mod session_start;
pub(crate) mod store;
pub(crate) mod store_cell;

#[cfg(test)]
mod tests;

pub use backend::{
    KeyValueBackend,
    file_backend::FileBackend,
    memory_backend::MemoryBackend,
    write_batch::{WriteBatch, WriteOp},
};
pub use error::{Result as SessionResult, SessionError};
pub use identity::Identity;
pub use session_start::SessionStart;
pub use store::{KEY_USER_ID, KEY_USERNAME, SessionStore};
pub use store_cell::SessionStoreCell;
