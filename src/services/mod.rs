/// Typed clients for the remote movie API
///
/// Each endpoint family gets its own small client over the shared
/// `ApiClient`. The recommendation source additionally sits behind a
/// trait so the feed engine can be driven by scripted sources in tests.
pub mod auth;
pub mod catalog;
pub mod client;
pub mod library;
pub mod recommendations;
pub mod reviews;

pub use auth::{AuthClient, LoginResponse, ProfileUpdate, RegisterRequest};
pub use catalog::{refine, CatalogClient, FilterQuery, Refinement, SearchQuery, SortBy};
pub use client::ApiClient;
pub use library::{LibraryClient, SaveMovieRequest, SavedMovie};
pub use recommendations::{HttpRecommendationSource, RecommendationSource};
pub use reviews::ReviewsClient;
