//! API client for communicating with the Storefront REST API.
//!
//! This module provides the `ApiClient` struct, the single choke point for
//! every network call. It resolves the base URL, attaches the bearer token
//! (an explicit override wins over the stored one), and normalizes every
//! response into parsed JSON or an `ApiError`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{header, Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::TokenStore;
use crate::config::{endpoints, ApiConfig};
use crate::models::{
    AuthResponse, Category, CategoryRecommendationRequest, CategoryUpdate, CreateUser,
    DescriptionRequest, GeneratedDescription, LoginCredentials, NewCategory, NewProduct,
    PriceRecommendationRequest, Product, ProductUpdate, RecommendationRequest,
    RecommendationResponse, RefreshResponse, RegisterData, ScoredRecommendations, UserProfile,
    UserUpdate,
};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow AI endpoints while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the Storefront service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a new API client. The token store is only ever read here;
    /// writing it is the session manager's job.
    pub fn new(config: &ApiConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            store,
        })
    }

    /// Token used for a request: the explicit override, else the stored one.
    /// Each call takes its own snapshot at call time.
    fn resolve_token(&self, explicit: Option<&str>) -> Option<String> {
        explicit.map(str::to_owned).or_else(|| self.store.read())
    }

    fn require_token(&self, explicit: Option<&str>) -> Result<String, ApiError> {
        self.resolve_token(explicit).ok_or(ApiError::AuthRequired)
    }

    fn prepare(&self, method: Method, path: &str, token: Option<String>) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Send a prepared request and normalize the outcome: parsed JSON on
    /// success, `ApiError::Rejected` on a non-2xx status. Unparseable bodies
    /// become an empty object rather than a parse error.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).unwrap_or_else(|_| json!({}));

        if status.is_success() {
            Ok(body)
        } else {
            debug!(status = %status, "API request rejected");
            Err(ApiError::rejected(status, body))
        }
    }

    fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
        serde_json::from_value(body).map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let request = self.prepare(Method::GET, path, self.resolve_token(token));
        Self::decode(self.execute(request).await?)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let request = self
            .prepare(Method::POST, path, self.resolve_token(token))
            .json(body);
        Self::decode(self.execute(request).await?)
    }

    /// PUT always mutates, so a missing token fails here rather than at
    /// the server.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let token = self.require_token(token)?;
        let request = self.prepare(Method::PUT, path, Some(token)).json(body);
        Self::decode(self.execute(request).await?)
    }

    /// DELETE always mutates, so a missing token fails here rather than at
    /// the server.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let token = self.require_token(token)?;
        let request = self.prepare(Method::DELETE, path, Some(token));
        Self::decode(self.execute(request).await?)
    }

    // ===== Auth endpoints =====

    /// Exchange credentials for an access token and profile
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        self.post(endpoints::AUTH_LOGIN, credentials, None).await
    }

    /// Create an account and exchange it for an access token and profile
    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse, ApiError> {
        self.post(endpoints::AUTH_REGISTER, data, None).await
    }

    /// Fetch the profile for the current token
    pub async fn fetch_profile(&self, token: Option<&str>) -> Result<UserProfile, ApiError> {
        self.get(endpoints::AUTH_PROFILE, token).await
    }

    /// Exchange for a new access token. Exposed as part of the contract;
    /// startup resolution does not call it.
    pub async fn refresh_token(&self) -> Result<RefreshResponse, ApiError> {
        self.post(endpoints::AUTH_REFRESH, &json!({}), None).await
    }

    // ===== Admin user endpoints =====

    /// Fetch all users (admin token required by the server)
    pub async fn fetch_users(&self) -> Result<Vec<UserProfile>, ApiError> {
        self.get(endpoints::ADMIN_USERS, None).await
    }

    /// Fetch a single user by id
    pub async fn fetch_user(&self, id: &str) -> Result<UserProfile, ApiError> {
        self.get(&endpoints::admin_user(id), None).await
    }

    /// Create a user through the registration endpoint, as the admin
    /// console does. Fails locally without a token.
    pub async fn create_user(&self, data: &CreateUser) -> Result<UserProfile, ApiError> {
        let token = self.require_token(None)?;
        let response: AuthResponse = self
            .post(endpoints::AUTH_REGISTER, data, Some(&token))
            .await?;
        Ok(response.user)
    }

    /// Update a user's fields
    pub async fn update_user(&self, id: &str, changes: &UserUpdate) -> Result<UserProfile, ApiError> {
        self.put(&endpoints::admin_user(id), changes, None).await
    }

    /// Delete a user
    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.delete(&endpoints::admin_user(id), None).await?;
        Ok(())
    }

    // ===== Product endpoints =====

    /// Fetch the full product catalog
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get(endpoints::PRODUCTS, None).await
    }

    /// Fetch a single product by id
    pub async fn fetch_product(&self, id: &str) -> Result<Product, ApiError> {
        self.get(&endpoints::product(id), None).await
    }

    /// Create a product. Fails locally without a token.
    pub async fn create_product(&self, data: &NewProduct) -> Result<Product, ApiError> {
        let token = self.require_token(None)?;
        self.post(endpoints::PRODUCTS, data, Some(&token)).await
    }

    /// Update a product's fields
    pub async fn update_product(&self, id: &str, changes: &ProductUpdate) -> Result<Product, ApiError> {
        self.put(&endpoints::product(id), changes, None).await
    }

    /// Delete a product
    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.delete(&endpoints::product(id), None).await?;
        Ok(())
    }

    // ===== Category endpoints =====

    /// Fetch all categories
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get(endpoints::CATEGORIES, None).await
    }

    /// Fetch a single category by id
    pub async fn fetch_category(&self, id: &str) -> Result<Category, ApiError> {
        self.get(&endpoints::category(id), None).await
    }

    /// Create a category. Fails locally without a token.
    pub async fn create_category(&self, data: &NewCategory) -> Result<Category, ApiError> {
        let token = self.require_token(None)?;
        self.post(endpoints::CATEGORIES, data, Some(&token)).await
    }

    /// Update a category's fields
    pub async fn update_category(
        &self,
        id: &str,
        changes: &CategoryUpdate,
    ) -> Result<Category, ApiError> {
        self.put(&endpoints::category(id), changes, None).await
    }

    /// Delete a category
    pub async fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.delete(&endpoints::category(id), None).await?;
        Ok(())
    }

    // ===== AI endpoints =====

    /// Free-form product recommendation
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, ApiError> {
        self.post(endpoints::AI_RECOMMEND, request, None).await
    }

    /// Scored recommendations within a category
    pub async fn recommend_by_category(
        &self,
        request: &CategoryRecommendationRequest,
    ) -> Result<ScoredRecommendations, ApiError> {
        self.post(endpoints::AI_RECOMMEND_CATEGORY, request, None)
            .await
    }

    /// Scored recommendations within a price range
    pub async fn recommend_by_price(
        &self,
        request: &PriceRecommendationRequest,
    ) -> Result<ScoredRecommendations, ApiError> {
        self.post(endpoints::AI_RECOMMEND_PRICE, request, None).await
    }

    /// Generate a product description
    pub async fn generate_description(
        &self,
        request: &DescriptionRequest,
    ) -> Result<GeneratedDescription, ApiError> {
        self.post(endpoints::AI_GENERATE_DESCRIPTION, request, None)
            .await
    }
}
