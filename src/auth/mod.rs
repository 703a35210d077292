//! Session and credential management.
//!
//! This module provides:
//! - `TokenStore`: one-slot durable storage for the access token, with
//!   memory, file, and OS-keychain backends
//! - `SessionManager`: the session state machine (startup resolution,
//!   login, registration, logout) and its derived authorization flags
//!
//! Only the access token is persisted; the profile is re-fetched from it.

pub mod session;
pub mod token_store;

pub use session::{Destination, Session, SessionManager};
pub use token_store::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};
