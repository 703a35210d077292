//! Client configuration.
//!
//! This module resolves the Storefront API base URL from the environment
//! and centralizes the endpoint paths used by the rest of the client.

use std::env;

/// Environment variable overriding the API base URL
const API_URL_VAR: &str = "STOREFRONT_API_URL";

/// Default base URL for local development
const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Resolve configuration from the environment, honoring a `.env` file
    /// and falling back to the local development default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let base_url = env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Build a configuration for an explicit base URL. A trailing slash is
    /// trimmed so endpoint paths can always start with `/`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Endpoint paths, relative to the base URL.
pub mod endpoints {
    pub const AUTH_LOGIN: &str = "/api/auth/login";
    pub const AUTH_REGISTER: &str = "/api/auth/register";
    pub const AUTH_PROFILE: &str = "/api/auth/profile";
    pub const AUTH_REFRESH: &str = "/api/auth/refresh";

    pub const ADMIN_USERS: &str = "/api/auth/admin/users";
    pub const PRODUCTS: &str = "/api/products/";
    pub const CATEGORIES: &str = "/api/categories/";

    pub const AI_RECOMMEND: &str = "/api/ai/recommend";
    pub const AI_RECOMMEND_CATEGORY: &str = "/api/ai/recommend/category";
    pub const AI_RECOMMEND_PRICE: &str = "/api/ai/recommend/price";
    pub const AI_GENERATE_DESCRIPTION: &str = "/api/ai/generate/description";

    pub fn admin_user(id: &str) -> String {
        format!("{}/{}", ADMIN_USERS, id)
    }

    pub fn product(id: &str) -> String {
        format!("{}{}", PRODUCTS, id)
    }

    pub fn category(id: &str) -> String {
        format!("{}{}", CATEGORIES, id)
    }
}
