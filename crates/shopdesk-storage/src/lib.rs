//! Shopdesk Storage
//!
//! This crate provides the persistent key-value storage behind the session:
//! - `StateStore` trait with file-backed and in-memory implementations
//! - `KeyValueTokenStore`, the `TokenStore` built on a `StateStore`

pub mod atomic_writer;
pub mod memory;
pub mod state;
pub mod token_store;
pub mod traits;

pub use memory::MemoryStateStore;
pub use state::FileStateStore;
pub use token_store::{AUTH_TOKEN_KEY, KeyValueTokenStore, USER_EMAIL_KEY};
pub use traits::{StateStore, StorageError, StorageResult};
