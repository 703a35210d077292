//! Client library for the Storefront catalog and AI recommendation API.
//!
//! The core is the session and authorization subsystem: a one-slot
//! `TokenStore` persisting the access token across restarts, an
//! `ApiClient` gateway that attaches the token to every request and
//! normalizes responses, and a `SessionManager` owning the
//! unresolved/authenticated/anonymous state machine. `gate::check_access`
//! is the page-level capability check built on top of it.
//!
//! Catalog, user administration, and AI endpoints are exposed as typed
//! operations on `ApiClient`.

pub mod api;
pub mod auth;
pub mod config;
pub mod gate;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{Destination, Session, SessionManager, TokenStore};
pub use config::ApiConfig;
pub use gate::{check_access, GateDecision};
