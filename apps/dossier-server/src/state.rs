//! Shared application state

use std::sync::Arc;

use dossier_core::DossierConfig;
use dossier_types::{Catalog, Lead};
use route_service::RouteService;
use tokio::sync::RwLock;
use tracing::info;

/// Append-only log of captured leads, kept in memory
#[derive(Debug, Default)]
pub struct LeadStore {
    leads: RwLock<Vec<Lead>>,
}

impl LeadStore {
    pub async fn record(&self, lead: Lead) {
        info!("Captured {:?} lead {}", lead.kind, lead.id);
        self.leads.write().await.push(lead);
    }

    /// Newest first
    pub async fn all(&self) -> Vec<Lead> {
        self.leads.read().await.iter().rev().cloned().collect()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub config: Arc<DossierConfig>,
    pub routes: Arc<dyn RouteService>,
    pub leads: Arc<LeadStore>,
}

impl AppState {
    pub fn new(catalog: Catalog, config: DossierConfig, routes: Arc<dyn RouteService>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            routes,
            leads: Arc::new(LeadStore::default()),
        }
    }
}
