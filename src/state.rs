use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::demo;
use crate::error::AppError;
use crate::models::carrier::Carrier;
use crate::models::invoice::Invoice;
use crate::models::load::Load;
use crate::models::notification::Notification;
use crate::models::shipment::Shipment;
use crate::models::stats::MarketStats;
use crate::observability::metrics::Metrics;
use crate::store::Listing;

pub struct AppState {
    pub loads: Listing<Load>,
    pub shipments: Listing<Shipment>,
    pub carriers: Listing<Carrier>,
    pub invoices: Vec<Invoice>,
    pub notification_tx: broadcast::Sender<Notification>,
    pub metrics: Metrics,
    recent_notifications: Mutex<VecDeque<Notification>>,
    notification_history: usize,
}

impl AppState {
    pub fn new(event_buffer_size: usize, notification_history: usize) -> Self {
        let (notification_tx, _unused_rx) = broadcast::channel(event_buffer_size.max(1));

        Self {
            loads: Listing::new(),
            shipments: Listing::new(),
            carriers: Listing::new(),
            invoices: Vec::new(),
            notification_tx,
            metrics: Metrics::new(),
            recent_notifications: Mutex::new(VecDeque::new()),
            notification_history,
        }
    }

    /// Fills the store with the demo marketplace.
    pub fn seeded(event_buffer_size: usize, notification_history: usize) -> Self {
        let mut state = Self::new(event_buffer_size, notification_history);
        state.invoices = demo::invoices();

        for load in demo::loads() {
            if let Err(err) = state.publish_load(load) {
                warn!(error = %err, "skipping demo load");
            }
        }
        for shipment in demo::shipments() {
            state.shipments.push_back(shipment.id.clone(), shipment);
        }
        for carrier in demo::carriers() {
            state.carriers.push_back(carrier.id.clone(), carrier);
        }
        // oldest first so the newest ends up at the front
        for notification in demo::notifications().into_iter().rev() {
            state.remember(notification);
        }

        info!(
            loads = state.loads.len(),
            shipments = state.shipments.len(),
            carriers = state.carriers.len(),
            "seeded demo data"
        );
        state
    }

    /// Ingestion boundary for loads: anything stored here has passed validation.
    pub fn publish_load(&self, load: Load) -> Result<(), AppError> {
        load.validate()?;

        if !self.loads.push_back(load.id.clone(), load.clone()) {
            return Err(AppError::Conflict(format!("carga {} already exists", load.id)));
        }
        self.refresh_gauges();
        Ok(())
    }

    pub fn stats(&self) -> MarketStats {
        let shipments = self.shipments.snapshot();
        let carriers = self.carriers.snapshot();
        MarketStats::tally(self.loads.len(), &shipments, &carriers)
    }

    pub fn notify(&self, notification: Notification) {
        self.remember(notification.clone());
        let _ = self.notification_tx.send(notification);
    }

    pub fn recent_notifications(&self) -> Vec<Notification> {
        self.recent_notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    fn remember(&self, notification: Notification) {
        let mut recent = self
            .recent_notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        recent.push_front(notification);
        recent.truncate(self.notification_history);
    }

    pub fn refresh_gauges(&self) {
        let stats = self.stats();
        self.metrics.loads_available.set(stats.available_loads);
        self.metrics
            .shipments_in_progress
            .set(stats.shipments_in_progress);
    }
}
