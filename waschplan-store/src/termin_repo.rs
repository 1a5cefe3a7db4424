use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use waschplan_core::plan::{PlanError, PlanManager};
use waschplan_core::repository::TerminRepository;
use waschplan_core::termin::Termin;

/// In-memory Termin store.
///
/// Wraps the lifecycle manager behind an async lock; all mutations are
/// serialized through it, which is the single-process stand-in for the
/// original's dispatch-serialized Redux store.
pub struct InMemoryTerminRepo {
    plan: RwLock<PlanManager>,
}

impl InMemoryTerminRepo {
    pub fn new(termin_dauer_stunden: i64) -> Self {
        Self {
            plan: RwLock::new(PlanManager::new(termin_dauer_stunden)),
        }
    }
}

#[async_trait]
impl TerminRepository for InMemoryTerminRepo {
    async fn list_termine(&self) -> Result<Vec<Termin>, PlanError> {
        Ok(self.plan.read().await.termine())
    }

    async fn get_termin(&self, termin_id: &str) -> Result<Option<Termin>, PlanError> {
        Ok(self.plan.read().await.get_termin(termin_id).cloned())
    }

    async fn erfasse_termin(
        &self,
        partei_id: &str,
        beginn: DateTime<Utc>,
    ) -> Result<Termin, PlanError> {
        let termin = self.plan.write().await.erfasse_termin(partei_id, beginn)?;
        tracing::info!(termin_id = %termin.id, %partei_id, "Termin stored");
        Ok(termin)
    }

    async fn mark_termin(&self, termin_id: &str) -> Result<Termin, PlanError> {
        self.plan.write().await.mark_termin(termin_id)
    }

    async fn confirm_delete(&self, termin_id: &str) -> Result<(), PlanError> {
        self.plan.write().await.confirm_delete(termin_id)?;
        tracing::info!(%termin_id, "Termin deleted");
        Ok(())
    }

    async fn decline_delete(&self, termin_id: &str) -> Result<Termin, PlanError> {
        self.plan.write().await.decline_delete(termin_id)
    }
}
