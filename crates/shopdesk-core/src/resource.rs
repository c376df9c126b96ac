//! Remote resources and the drafts used to create them
//!
//! Products, categories and users are owned by the remote API. Their shape is
//! not modeled here; they travel as opaque JSON. Only the create payloads are
//! typed, so they can be validated before anything is sent.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::validation::{FieldCheck, is_valid_email};

/// An entity returned by the remote API
pub type Resource = serde_json::Value;

/// The resource collections exposed by the remote API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Products,
    Categories,
    Users,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Products,
        ResourceKind::Categories,
        ResourceKind::Users,
    ];

    /// Collection path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Products => "/products",
            ResourceKind::Categories => "/categories",
            ResourceKind::Users => "/users",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Products => "products",
            ResourceKind::Categories => "categories",
            ResourceKind::Users => "users",
        }
    }

    /// Path of a single entity
    pub fn item_path(&self, id: u64) -> String {
        format!("{}/{}", self.path(), id)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated create payload, tied to the collection it is posted to
pub trait Draft: Serialize + Send + Sync {
    const KIND: ResourceKind;

    fn validate(&self) -> Result<(), ValidationError>;
}

/// Payload for `POST /products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    #[serde(rename = "categoryId")]
    pub category_id: u64,
    pub images: Vec<String>,
}

impl NewProduct {
    /// Split a comma separated list of image URLs, dropping blanks
    pub fn parse_images(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Draft for NewProduct {
    const KIND: ResourceKind = ResourceKind::Products;

    fn validate(&self) -> Result<(), ValidationError> {
        FieldCheck::new()
            .non_blank("title", &self.title)
            .require("price", self.price.is_finite())
            .non_blank("description", &self.description)
            .require(
                "images",
                self.images.iter().any(|img| !img.trim().is_empty()),
            )
            .finish()
    }
}

/// Payload for `POST /categories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub image: String,
}

impl Draft for NewCategory {
    const KIND: ResourceKind = ResourceKind::Categories;

    fn validate(&self) -> Result<(), ValidationError> {
        FieldCheck::new()
            .non_blank("name", &self.name)
            .non_blank("image", &self.image)
            .finish()
    }
}

/// Payload for `POST /users`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: String,
    #[serde(default = "default_role")]
    pub role: String,
}

impl Draft for NewUser {
    const KIND: ResourceKind = ResourceKind::Users;

    fn validate(&self) -> Result<(), ValidationError> {
        let check = FieldCheck::new()
            .non_blank("name", &self.name)
            .non_blank("email", &self.email)
            .non_blank("password", &self.password)
            .non_blank("avatar", &self.avatar);

        // A blank email is already reported; only flag the format otherwise
        let email_ok = self.email.trim().is_empty() || is_valid_email(&self.email);
        check.require("email", email_ok).finish()
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("avatar", &self.avatar)
            .field("role", &self.role)
            .finish()
    }
}

pub fn default_role() -> String {
    "customer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product() -> NewProduct {
        NewProduct {
            title: "Classic Tee".to_string(),
            price: 19.5,
            description: "Cotton t-shirt".to_string(),
            category_id: 1,
            images: vec!["https://img.example/tee.png".to_string()],
        }
    }

    #[test]
    fn test_resource_paths() {
        assert_eq!(ResourceKind::Products.path(), "/products");
        assert_eq!(ResourceKind::Categories.item_path(7), "/categories/7");
        assert_eq!(ResourceKind::Users.to_string(), "users");
    }

    #[test]
    fn test_parse_images_trims_and_drops_blanks() {
        let images = NewProduct::parse_images(" https://a.png, ,https://b.png ,");
        assert_eq!(images, vec!["https://a.png", "https://b.png"]);
    }

    #[test]
    fn test_product_serializes_with_api_field_names() {
        let body = serde_json::to_value(product()).unwrap();
        assert_eq!(body["categoryId"], json!(1));
        assert!(body.get("category_id").is_none());
    }

    #[test]
    fn test_product_validation() {
        assert!(product().validate().is_ok());

        let mut bad = product();
        bad.title = "  ".to_string();
        bad.price = f64::NAN;
        bad.images.clear();

        let err = bad.validate().unwrap_err();
        assert_eq!(err.fields, vec!["title", "price", "images"]);
    }

    #[test]
    fn test_category_validation() {
        let category = NewCategory {
            name: "Shoes".to_string(),
            image: String::new(),
        };
        let err = category.validate().unwrap_err();
        assert_eq!(err.fields, vec!["image"]);
    }

    #[test]
    fn test_user_validation_rejects_bad_email() {
        let user = NewUser {
            name: "Ana".to_string(),
            email: "ana-at-example.com".to_string(),
            password: "pw".to_string(),
            avatar: "https://img.example/ana.png".to_string(),
            role: default_role(),
        };
        let err = user.validate().unwrap_err();
        assert_eq!(err.fields, vec!["email"]);
    }

    #[test]
    fn test_user_validation_blank_email_reported_once() {
        let user = NewUser {
            name: "Ana".to_string(),
            email: String::new(),
            password: "pw".to_string(),
            avatar: "https://img.example/ana.png".to_string(),
            role: default_role(),
        };
        let err = user.validate().unwrap_err();
        assert_eq!(err.fields, vec!["email"]);
    }

    #[test]
    fn test_user_role_defaults_to_customer() {
        let user: NewUser = serde_json::from_value(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "pw",
            "avatar": "https://img.example/ana.png"
        }))
        .unwrap();
        assert_eq!(user.role, "customer");
        assert!(format!("{:?}", user).contains("<redacted>"));
    }
}
