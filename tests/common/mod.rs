//! In-process mock of the Storefront API for integration tests.
//!
//! Serves canned auth/catalog responses on an ephemeral port and counts
//! every request it receives, so tests can assert that fail-fast paths
//! perform zero network calls.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use storefront_client::auth::MemoryTokenStore;
use storefront_client::{ApiClient, ApiConfig, SessionManager};

pub const CLIENT_TOKEN: &str = "tok1";
pub const ADMIN_TOKEN: &str = "tok-admin";
pub const REGISTER_TOKEN: &str = "tok-reg";

#[derive(Clone, Default)]
struct MockState {
    hits: Arc<AtomicUsize>,
}

pub struct MockServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// An address nothing is listening on, for transport-failure tests.
    pub fn unreachable() -> MockServer {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("reserve port");
        let addr = listener.local_addr().expect("reserved port addr");
        drop(listener);
        MockServer {
            addr,
            hits: Arc::default(),
        }
    }
}

pub async fn spawn() -> MockServer {
    let state = MockState::default();
    let hits = state.hits.clone();

    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/profile", get(profile))
        .route("/api/echo", get(echo))
        .route("/api/broken", get(broken))
        .route("/api/products/", get(list_products).post(create_product))
        .route("/api/products/{id}", put(update_product).delete(delete_product))
        .route("/api/auth/admin/users", get(list_users))
        .route(
            "/api/auth/admin/users/{id}",
            get(get_user).put(admin_update_user).delete(admin_delete_user),
        )
        .route("/api/categories/", get(list_categories).post(create_category))
        .route(
            "/api/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/api/ai/recommend", post(ai_recommend))
        .route("/api/ai/recommend/category", post(ai_recommend_category))
        .route("/api/ai/recommend/price", post(ai_recommend_price))
        .route("/api/ai/generate/description", post(ai_generate_description))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock listener addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });

    MockServer { addr, hits }
}

/// Client + manager wired to the mock server through a shared memory store.
pub fn harness(server: &MockServer) -> (Arc<MemoryTokenStore>, ApiClient, SessionManager) {
    let store = Arc::new(MemoryTokenStore::new());
    let config = ApiConfig::with_base_url(server.base_url());
    let api = ApiClient::new(&config, store.clone()).expect("build api client");
    let manager = SessionManager::new(api.clone(), store.clone());
    (store, api, manager)
}

pub fn client_user() -> Value {
    json!({
        "id": "u1",
        "username": "casey",
        "email": "casey@example.com",
        "role": "client",
        "created_at": "2024-05-01T10:00:00",
        "updated_at": "2024-05-01T10:00:00",
        "is_active": true
    })
}

pub fn admin_user() -> Value {
    json!({
        "id": "u-admin",
        "username": "root",
        "email": "admin@example.com",
        "role": "admin",
        "created_at": "2024-01-01T00:00:00",
        "updated_at": "2024-01-01T00:00:00",
        "is_active": true
    })
}

fn registered_user(username: &str) -> Value {
    json!({
        "id": "u-reg",
        "username": username,
        "email": "new@example.com",
        "role": "client",
        "created_at": "2024-06-01T09:00:00",
        "updated_at": "2024-06-01T09:00:00",
        "is_active": true
    })
}

fn product(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Trail Mug",
        "description": "Enamel camping mug",
        "price": 14.5,
        "category": "kitchen",
        "stock": 12,
        "image_url": null,
        "created_at": "2024-04-01T08:00:00",
        "updated_at": "2024-04-01T08:00:00",
        "is_active": true
    })
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn login(State(state): State<MockState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if body["password"].as_str() == Some("wrong") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid credentials"})),
        );
    }
    let (token, user) = if body["email"].as_str() == Some("admin@example.com") {
        (ADMIN_TOKEN, admin_user())
    } else {
        (CLIENT_TOKEN, client_user())
    };
    (
        StatusCode::OK,
        Json(json!({
            "message": "Login successful",
            "access_token": token,
            "refresh_token": "refresh-1",
            "user": user,
        })),
    )
}

async fn register(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let username = body["username"].as_str().unwrap_or("new-user");
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "access_token": REGISTER_TOKEN,
            "refresh_token": "refresh-reg",
            "user": registered_user(username),
        })),
    )
}

async fn profile(State(state): State<MockState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    match bearer(&headers) {
        Some(CLIENT_TOKEN) => (StatusCode::OK, Json(client_user())),
        Some(ADMIN_TOKEN) => (StatusCode::OK, Json(admin_user())),
        Some(REGISTER_TOKEN) => (StatusCode::OK, Json(registered_user("new-user"))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Token has expired"})),
        ),
    }
}

/// Echoes the authorization header back, so tests can assert its exact shape
async fn echo(State(state): State<MockState>, headers: HeaderMap) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    Json(json!({ "authorization": authorization }))
}

/// Fails with a body that is not JSON
async fn broken(State(state): State<MockState>) -> (StatusCode, &'static str) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn list_products(State(state): State<MockState>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!([product("p1"), product("p2")]))
}

async fn create_product(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if bearer(&headers).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Missing Authorization Header"})),
        );
    }
    let mut created = product("p-new");
    if let Some(name) = body["name"].as_str() {
        created["name"] = json!(name);
    }
    (StatusCode::CREATED, Json(created))
}

async fn update_product(State(state): State<MockState>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(product("p1"))
}

async fn delete_product(State(state): State<MockState>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({"message": "Product deleted successfully"}))
}

fn category(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Kitchen",
        "description": "Pots, pans, and camp cookware",
        "slug": "kitchen",
        "image_url": null,
        "created_at": "2024-03-01T08:00:00",
        "updated_at": "2024-03-01T08:00:00",
        "is_active": true
    })
}

fn forbidden() -> (StatusCode, Json<Value>) {
    (StatusCode::FORBIDDEN, Json(json!({"error": "Admins only!"})))
}

async fn list_users(State(state): State<MockState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if bearer(&headers) != Some(ADMIN_TOKEN) {
        return forbidden();
    }
    (StatusCode::OK, Json(json!([admin_user(), client_user()])))
}

async fn get_user(State(state): State<MockState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if bearer(&headers) != Some(ADMIN_TOKEN) {
        return forbidden();
    }
    (StatusCode::OK, Json(client_user()))
}

async fn admin_update_user(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if bearer(&headers) != Some(ADMIN_TOKEN) {
        return forbidden();
    }
    let mut user = client_user();
    if let Some(is_active) = body["is_active"].as_bool() {
        user["is_active"] = json!(is_active);
    }
    if let Some(role) = body["role"].as_str() {
        user["role"] = json!(role);
    }
    (StatusCode::OK, Json(user))
}

async fn admin_delete_user(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if bearer(&headers) != Some(ADMIN_TOKEN) {
        return forbidden();
    }
    (StatusCode::OK, Json(json!({"message": "User deleted successfully"})))
}

async fn list_categories(State(state): State<MockState>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!([category("c1"), category("c2")]))
}

async fn get_category(State(state): State<MockState>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(category("c1"))
}

async fn create_category(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if bearer(&headers).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Missing Authorization Header"})),
        );
    }
    let mut created = category("c-new");
    if let Some(name) = body["name"].as_str() {
        created["name"] = json!(name);
    }
    if let Some(slug) = body["slug"].as_str() {
        created["slug"] = json!(slug);
    }
    (StatusCode::CREATED, Json(created))
}

async fn update_category(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let mut updated = category("c1");
    if let Some(is_active) = body["is_active"].as_bool() {
        updated["is_active"] = json!(is_active);
    }
    Json(updated)
}

async fn delete_category(State(state): State<MockState>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({"message": "Category deleted successfully"}))
}

fn ai_product() -> Value {
    json!({
        "id": "p1",
        "name": "Trail Mug",
        "description": "Enamel camping mug",
        "category": "kitchen",
        "price": 14.5,
        "image_url": null,
        "stock": 12
    })
}

fn scored(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Trail Mug",
        "description": "Enamel camping mug",
        "category": "kitchen",
        "price": 14.5,
        "score": 0.92,
        "reason": "Matches your preferences"
    })
}

async fn ai_recommend(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    // The backend requires a string query and an optional filters object
    let Some(query) = body["query"].as_str() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "query is required"})),
        );
    };
    if !body["filters"].is_null() && !body["filters"].is_object() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "filters must be an object"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "recommendations": format!("Top picks for: {}", query),
            "products": [ai_product()]
        })),
    )
}

async fn ai_recommend_category(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if body["category"].as_str().is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "category is required"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"recommendations": [scored("p1"), scored("p2")]})),
    )
}

async fn ai_recommend_price(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let range = &body["price_range"];
    if !range["min"].is_number() || !range["max"].is_number() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "price_range with min and max is required"})),
        );
    }
    (StatusCode::OK, Json(json!({"recommendations": [scored("p1")]})))
}

async fn ai_generate_description(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let Some(name) = body["product_name"].as_str() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "product_name is required"})),
        );
    };
    (
        StatusCode::OK,
        Json(json!({
            "description": format!("The {} is built for the trail.", name),
            "features": ["Durable enamel finish"],
            "benefits": ["Survives being dropped on rocks"]
        })),
    )
}
