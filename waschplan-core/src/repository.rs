use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::mieter::Mieter;
use crate::plan::PlanError;
use crate::termin::Termin;

/// Repository trait for the Termin set and its lifecycle transitions.
///
/// The overlap check runs inside the create path against the current set,
/// so the server revalidates what the calendar already checked client-side.
#[async_trait]
pub trait TerminRepository: Send + Sync {
    async fn list_termine(&self) -> Result<Vec<Termin>, PlanError>;

    async fn get_termin(&self, termin_id: &str) -> Result<Option<Termin>, PlanError>;

    async fn erfasse_termin(
        &self,
        partei_id: &str,
        beginn: DateTime<Utc>,
    ) -> Result<Termin, PlanError>;

    async fn mark_termin(&self, termin_id: &str) -> Result<Termin, PlanError>;

    async fn confirm_delete(&self, termin_id: &str) -> Result<(), PlanError>;

    async fn decline_delete(&self, termin_id: &str) -> Result<Termin, PlanError>;
}

/// Repository trait for tenant data access (read-only here)
#[async_trait]
pub trait MieterRepository: Send + Sync {
    async fn list_mieter(&self) -> Result<Vec<Mieter>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_mieter(
        &self,
        mieter_id: &str,
    ) -> Result<Option<Mieter>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for registered push-notification device tokens
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    async fn register_device(
        &self,
        token: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_devices(&self) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}
