//! Request and response types for the AI recommendation endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Free-form recommendation query
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendedProduct {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: i64,
}

/// AI text response plus the products it drew from
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: String,
    #[serde(default)]
    pub products: Vec<RecommendedProduct>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRecommendationRequest {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_preferences: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceRecommendationRequest {
    pub price_range: PriceRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A recommendation with a relevance score and explanation
#[derive(Debug, Clone, Deserialize)]
pub struct ScoredRecommendation {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub score: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoredRecommendations {
    #[serde(default)]
    pub recommendations: Vec<ScoredRecommendation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescriptionRequest {
    pub product_name: String,
    pub category: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedDescription {
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
}
