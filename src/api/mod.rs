//! REST API client module for the Storefront service.
//!
//! This module provides the `ApiClient` for communicating with the
//! Storefront API: auth, admin user management, product and category
//! CRUD, and the AI recommendation endpoints.
//!
//! The API uses JWT bearer token authentication; the token is read from
//! the configured `TokenStore` at call time unless a caller passes an
//! explicit override.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
