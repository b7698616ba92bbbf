use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::{DashboardEvent, DashboardSnapshot};
use crate::services::api::MarketplaceApi;
use crate::services::payments::PaymentProcessor;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub api: Box<dyn MarketplaceApi>,
    pub payments: Box<dyn PaymentProcessor>,
    pub session_id: Uuid,
    pub dashboard: Mutex<Option<DashboardSnapshot>>,
    pub dashboard_tx: broadcast::Sender<DashboardEvent>,
}

impl AppState {
    pub fn new(
        conn: Connection,
        config: AppConfig,
        api: Box<dyn MarketplaceApi>,
        payments: Box<dyn PaymentProcessor>,
    ) -> Self {
        let (dashboard_tx, _) = broadcast::channel(64);
        Self {
            db: Arc::new(Mutex::new(conn)),
            config,
            api,
            payments,
            session_id: Uuid::new_v4(),
            dashboard: Mutex::new(None),
            dashboard_tx,
        }
    }
}
