//! Shopdesk Egress
//!
//! This crate talks to the remote store API:
//! - `ApiClient`: authorized JSON requests against the base URL
//! - `Authenticator`: credential exchange and session lifecycle
//! - `ResourceController`: products, categories and users
//! - `load_dashboard`: the three collection counts, loaded concurrently

pub mod api;
pub mod auth;
pub mod client;
pub mod dashboard;
pub mod resources;

pub use api::{ApiClient, ApiConfig};
pub use auth::Authenticator;
pub use dashboard::{DashboardError, DashboardSummary, load_dashboard};
pub use resources::{
    CategoriesController, ProductsController, ResourceController, UsersController,
};
