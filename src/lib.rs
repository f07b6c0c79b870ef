pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod services;
pub mod session;

pub use config::Config;
pub use error::{ApiError, ApiResult};
