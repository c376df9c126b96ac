//! Dashboard counts, loaded concurrently
//!
//! The three collection lists are requested at once. The loader waits for all
//! of them to settle; if any failed, none of the counts are returned.

use crate::api::ApiClient;
use crate::resources::{CategoriesController, ProductsController, UsersController};
use futures::future::join_all;
use shopdesk_core::{ApiError, ResourceKind};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Number of entries in each collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    pub products: usize,
    pub categories: usize,
    pub users: usize,
}

/// One or more of the dashboard lists failed
#[derive(Debug, Error)]
#[error("failed to load dashboard: {}", describe(.failures))]
pub struct DashboardError {
    /// Every failed collection with its error, in display order
    pub failures: Vec<(ResourceKind, ApiError)>,
}

impl DashboardError {
    pub fn failed(&self, kind: ResourceKind) -> bool {
        self.failures.iter().any(|(k, _)| *k == kind)
    }
}

fn describe(failures: &[(ResourceKind, ApiError)]) -> String {
    failures
        .iter()
        .map(|(kind, err)| format!("{} ({})", kind, err))
        .collect::<Vec<_>>()
        .join(", ")
}

#[instrument(skip(client))]
pub async fn load_dashboard(client: &Arc<ApiClient>) -> Result<DashboardSummary, DashboardError> {
    let results = join_all(
        ResourceKind::ALL
            .iter()
            .map(|&kind| count_collection(client, kind)),
    )
    .await;

    let mut counts = [0usize; 3];
    let mut failures = Vec::new();
    for ((kind, result), count) in ResourceKind::ALL.iter().zip(results).zip(counts.iter_mut()) {
        match result {
            Ok(n) => *count = n,
            Err(e) => failures.push((*kind, e)),
        }
    }

    if !failures.is_empty() {
        warn!("Dashboard load failed for {} collection(s)", failures.len());
        return Err(DashboardError { failures });
    }

    let [products, categories, users] = counts;
    let summary = DashboardSummary {
        products,
        categories,
        users,
    };
    debug!("Dashboard loaded: {:?}", summary);
    Ok(summary)
}

async fn count_collection(client: &Arc<ApiClient>, kind: ResourceKind) -> Result<usize, ApiError> {
    let items = match kind {
        ResourceKind::Products => ProductsController::new(client.clone()).list().await?,
        ResourceKind::Categories => CategoriesController::new(client.clone()).list().await?,
        ResourceKind::Users => UsersController::new(client.clone()).list().await?,
    };
    Ok(items.len())
}
