//! Wire types exchanged with the Storefront API.

pub mod ai;
pub mod category;
pub mod product;
pub mod user;

pub use ai::{
    CategoryRecommendationRequest, DescriptionRequest, GeneratedDescription, PriceRange,
    PriceRecommendationRequest, RecommendationRequest, RecommendationResponse,
    RecommendedProduct, ScoredRecommendation, ScoredRecommendations,
};
pub use category::{Category, CategoryUpdate, NewCategory};
pub use product::{NewProduct, Product, ProductUpdate};
pub use user::{
    AuthResponse, CreateUser, LoginCredentials, RefreshResponse, RegisterData, Role, UserProfile,
    UserUpdate,
};
