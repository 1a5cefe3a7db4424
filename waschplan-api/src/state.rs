use std::sync::Arc;
use tokio::sync::broadcast;

use waschplan_core::repository::{DeviceRepository, MieterRepository, TerminRepository};
use waschplan_shared::PlanEvent;
use waschplan_store::app_config::PlanRules;

#[derive(Clone)]
pub struct AppState {
    pub termin_repo: Arc<dyn TerminRepository>,
    pub mieter_repo: Arc<dyn MieterRepository>,
    pub device_repo: Arc<dyn DeviceRepository>,
    pub events_tx: broadcast::Sender<PlanEvent>,
    pub plan_rules: PlanRules,
}
