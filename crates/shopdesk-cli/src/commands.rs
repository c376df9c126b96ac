//! Command handlers
//!
//! Each handler returns the text to print. Resource and dashboard handlers
//! check for a session first and never reach the network without one.

use crate::render;
use anyhow::Context;
use serde_json::Value;
use shopdesk_config_file::ShopdeskConfig;
use shopdesk_core::{
    Credentials, NewCategory, NewProduct, NewUser, ResourceKind, validation::validate_credentials,
};
use shopdesk_egress::{
    ApiClient, ApiConfig, Authenticator, CategoriesController, ProductsController,
    UsersController, load_dashboard,
};
use shopdesk_storage::{FileStateStore, KeyValueTokenStore};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Area of the dashboard guarded by login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Resource(ResourceKind),
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Dashboard => f.write_str("dashboard"),
            Section::Resource(kind) => write!(f, "{}", kind),
        }
    }
}

#[derive(Debug, Error)]
#[error("you must log in to access {0}")]
pub struct LoginRequired(pub Section);

pub struct App {
    client: Arc<ApiClient>,
    auth: Authenticator,
    json: bool,
}

impl App {
    /// Open the session file and build the API client from config
    pub fn from_config(config: &ShopdeskConfig, json: bool) -> anyhow::Result<Self> {
        let session_path = config.session_path();
        let state = FileStateStore::open(&session_path)
            .with_context(|| format!("failed to open session file {:?}", session_path))?;
        let tokens = Arc::new(KeyValueTokenStore::new(state));

        let mut api_config = ApiConfig::new().with_base_url(config.api.base_url.clone());
        if let Some(user_agent) = &config.api.user_agent {
            api_config = api_config.with_user_agent(user_agent.clone());
        }

        let client = ApiClient::new(api_config, tokens).context("failed to build API client")?;
        Ok(Self::new(Arc::new(client), json))
    }

    pub fn new(client: Arc<ApiClient>, json: bool) -> Self {
        Self {
            auth: Authenticator::new(client.clone()),
            client,
            json,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> anyhow::Result<String> {
        validate_credentials(&Credentials::new(email, password))?;

        let session = self
            .auth
            .login(email, password)
            .await
            .context("login failed")?;
        Ok(format!("Logged in as {}", session.user_email))
    }

    pub async fn logout(&self) -> String {
        self.auth.logout().await;
        "Logged out".to_string()
    }

    pub async fn status(&self) -> String {
        match self.auth.current_session().await {
            Some(session) => format!("Logged in as {}", session.user_email),
            None => "Not logged in".to_string(),
        }
    }

    pub async fn dashboard(&self) -> anyhow::Result<String> {
        self.require_session(Section::Dashboard).await?;
        let summary = load_dashboard(&self.client).await?;
        if self.json {
            return Ok(serde_json::to_string_pretty(&serde_json::json!({
                "products": summary.products,
                "categories": summary.categories,
                "users": summary.users,
            }))?);
        }
        Ok(render::dashboard(&summary))
    }

    pub async fn list_products(&self, title: Option<&str>) -> anyhow::Result<String> {
        self.require_session(Section::Resource(ResourceKind::Products))
            .await?;
        let products = ProductsController::new(self.client.clone())
            .list_filtered(title)
            .await
            .context("failed to load products")?;
        self.render_list(products, render::product_cards)
    }

    pub async fn get_product(&self, id: u64) -> anyhow::Result<String> {
        self.require_session(Section::Resource(ResourceKind::Products))
            .await?;
        let product = ProductsController::new(self.client.clone())
            .get_by_id(id)
            .await
            .with_context(|| format!("failed to load product {}", id))?;
        self.render_one(product, render::product_detail)
    }

    pub async fn create_product(&self, draft: NewProduct) -> anyhow::Result<String> {
        self.require_session(Section::Resource(ResourceKind::Products))
            .await?;
        let created = ProductsController::new(self.client.clone())
            .create(&draft)
            .await
            .context("failed to add product")?;
        self.render_one(created, render::product_detail)
    }

    pub async fn list_categories(&self) -> anyhow::Result<String> {
        self.require_session(Section::Resource(ResourceKind::Categories))
            .await?;
        let categories = CategoriesController::new(self.client.clone())
            .list()
            .await
            .context("failed to load categories")?;
        self.render_list(categories, render::category_list)
    }

    pub async fn get_category(&self, id: u64) -> anyhow::Result<String> {
        self.require_session(Section::Resource(ResourceKind::Categories))
            .await?;
        let category = CategoriesController::new(self.client.clone())
            .get_by_id(id)
            .await
            .with_context(|| format!("failed to load category {}", id))?;
        self.render_one(category, render::category_detail)
    }

    pub async fn create_category(&self, draft: NewCategory) -> anyhow::Result<String> {
        self.require_session(Section::Resource(ResourceKind::Categories))
            .await?;
        let created = CategoriesController::new(self.client.clone())
            .create(&draft)
            .await
            .context("failed to add category")?;
        self.render_one(created, render::category_detail)
    }

    pub async fn list_users(&self) -> anyhow::Result<String> {
        self.require_session(Section::Resource(ResourceKind::Users))
            .await?;
        let users = UsersController::new(self.client.clone())
            .list()
            .await
            .context("failed to load users")?;
        self.render_list(users, render::user_table)
    }

    pub async fn get_user(&self, id: u64) -> anyhow::Result<String> {
        self.require_session(Section::Resource(ResourceKind::Users))
            .await?;
        let user = UsersController::new(self.client.clone())
            .get_by_id(id)
            .await
            .with_context(|| format!("failed to load user {}", id))?;
        self.render_one(user, render::user_detail)
    }

    pub async fn create_user(&self, draft: NewUser) -> anyhow::Result<String> {
        self.require_session(Section::Resource(ResourceKind::Users))
            .await?;
        let created = UsersController::new(self.client.clone())
            .create(&draft)
            .await
            .context("failed to add user")?;
        self.render_one(created, render::user_detail)
    }

    async fn require_session(&self, section: Section) -> Result<(), LoginRequired> {
        if self.auth.is_authenticated().await {
            Ok(())
        } else {
            Err(LoginRequired(section))
        }
    }

    fn render_list(&self, items: Vec<Value>, view: fn(&[Value]) -> String) -> anyhow::Result<String> {
        if self.json {
            return Ok(serde_json::to_string_pretty(&items)?);
        }
        Ok(view(&items))
    }

    fn render_one(&self, item: Value, view: fn(&Value) -> String) -> anyhow::Result<String> {
        if self.json {
            return Ok(serde_json::to_string_pretty(&item)?);
        }
        Ok(view(&item))
    }
}
