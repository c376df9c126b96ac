//! Resource controllers for products, categories and users

use crate::api::ApiClient;
use shopdesk_core::{
    ApiError, ApiRequest, NewCategory, NewProduct, NewUser, Resource, ResourceKind, Result,
    resource::Draft,
};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// List, fetch and create one kind of resource
///
/// The draft type fixes the collection: a `ResourceController<NewProduct>`
/// only ever talks to `/products`.
pub struct ResourceController<D> {
    client: Arc<ApiClient>,
    _draft: PhantomData<fn(&D)>,
}

pub type ProductsController = ResourceController<NewProduct>;
pub type CategoriesController = ResourceController<NewCategory>;
pub type UsersController = ResourceController<NewUser>;

impl<D: Draft> ResourceController<D> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            _draft: PhantomData,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        D::KIND
    }

    /// Every entity in the collection
    pub async fn list(&self) -> std::result::Result<Vec<Resource>, ApiError> {
        self.list_at(D::KIND.path()).await
    }

    pub async fn get_by_id(&self, id: u64) -> std::result::Result<Resource, ApiError> {
        self.client.get(&D::KIND.item_path(id)).await
    }

    /// Validate the draft, then post it
    ///
    /// # Errors
    /// - `Error::Validation` if the draft is incomplete; nothing is sent
    /// - `Error::Api` if the call fails
    pub async fn create(&self, draft: &D) -> Result<Resource> {
        draft.validate()?;
        let body = serde_json::to_value(draft)?;
        let created = self.client.post(D::KIND.path(), body).await?;
        debug!("Created entry in {}", D::KIND);
        Ok(created)
    }

    async fn list_at(&self, path: &str) -> std::result::Result<Vec<Resource>, ApiError> {
        let (status_code, body) = self.client.request_with_status(ApiRequest::get(path)).await?;
        match body {
            Value::Array(items) => {
                debug!("Listed {} entries from {}", items.len(), D::KIND);
                Ok(items)
            }
            other => Err(ApiError::Parse {
                status_code,
                detail: format!("expected a JSON array from {}, got {}", path, json_kind(&other)),
            }),
        }
    }
}

impl ProductsController {
    /// Products whose title matches `title`; a blank filter lists everything
    pub async fn list_filtered(
        &self,
        title: Option<&str>,
    ) -> std::result::Result<Vec<Resource>, ApiError> {
        match title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(title) => self.list_at(&title_filter_path(title)?).await,
            None => self.list().await,
        }
    }
}

fn title_filter_path(title: &str) -> std::result::Result<String, ApiError> {
    let query = serde_urlencoded::to_string([("title", title)])
        .map_err(|e| ApiError::InvalidRequest(format!("failed to encode title filter: {}", e)))?;
    Ok(format!("{}/?{}", ResourceKind::Products.path(), query))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
