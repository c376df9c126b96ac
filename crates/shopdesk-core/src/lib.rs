//! Shopdesk Core Types and Traits
//!
//! This crate provides the fundamental types and traits used throughout Shopdesk:
//! - Session, credential and request types
//! - The `TokenStore` abstraction over persisted sessions
//! - Draft payloads for create calls and their validation
//! - Core error types

pub mod error;
pub mod request;
pub mod resource;
pub mod session;
pub mod token_store;
pub mod validation;

pub use error::{ApiError, AuthError, Error, Result, ValidationError};
pub use request::{ApiRequest, Method};
pub use resource::{Draft, NewCategory, NewProduct, NewUser, Resource, ResourceKind};
pub use session::{Credentials, Session};
pub use token_store::TokenStore;
