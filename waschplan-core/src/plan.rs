use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::conflict::is_booked;
use crate::ids;
use crate::termin::{Termin, TerminStatus};

/// Manages the Termin set, the pending slot selection and the
/// two-step deletion lifecycle.
///
/// Lifecycle per Termin: Unconfirmed → Active → MarkedForDeletion → removed.
/// Declining the delete confirmation returns a marked Termin to Active.
pub struct PlanManager {
    termine: HashMap<String, Termin>,
    pending_slot: Option<DateTime<Utc>>,
    termin_dauer: Duration,
}

impl PlanManager {
    pub fn new(termin_dauer_stunden: i64) -> Self {
        Self {
            termine: HashMap::new(),
            pending_slot: None,
            termin_dauer: Duration::hours(termin_dauer_stunden),
        }
    }

    /// All Termine, ordered by start instant
    pub fn termine(&self) -> Vec<Termin> {
        let mut all: Vec<Termin> = self.termine.values().cloned().collect();
        all.sort_by_key(|t| t.termin_beginn);
        all
    }

    /// Get a Termin by ID
    pub fn get_termin(&self, termin_id: &str) -> Option<&Termin> {
        self.termine.get(termin_id)
    }

    /// Date-click path: remember the clicked slot until a Mieter is chosen.
    /// Rejected up front when the slot is already booked.
    pub fn select_slot(&mut self, beginn: DateTime<Utc>) -> Result<(), PlanError> {
        if is_booked(beginn, &self.termine()) {
            return Err(PlanError::SlotBelegt(beginn));
        }
        self.pending_slot = Some(beginn);
        Ok(())
    }

    pub fn pending_slot(&self) -> Option<DateTime<Utc>> {
        self.pending_slot
    }

    /// Abort the pending selection without creating anything
    pub fn cancel_pending(&mut self) {
        self.pending_slot = None;
    }

    /// Book the pending slot for the chosen Mieter
    pub fn erfasse_pending(&mut self, partei_id: &str) -> Result<Termin, PlanError> {
        let beginn = self.pending_slot.take().ok_or(PlanError::NoPendingSlot)?;
        self.erfasse_termin(partei_id, beginn)
    }

    /// Drag-drop path: create an Active Termin spanning the configured
    /// duration. The conflict check is re-run here so a stale pending
    /// selection cannot slip past it.
    pub fn erfasse_termin(
        &mut self,
        partei_id: &str,
        beginn: DateTime<Utc>,
    ) -> Result<Termin, PlanError> {
        if is_booked(beginn, &self.termine()) {
            return Err(PlanError::SlotBelegt(beginn));
        }

        let termin = Termin::new(partei_id.to_string(), beginn, beginn + self.termin_dauer);
        self.termine.insert(termin.id.clone(), termin.clone());
        tracing::debug!(termin_id = %termin.id, %partei_id, "Termin erfasst");
        Ok(termin)
    }

    /// Insert a provisionally captured Termin under its client pseudo id
    pub fn erfasse_unconfirmed(
        &mut self,
        pseudo_id: &str,
        partei_id: &str,
        beginn: DateTime<Utc>,
    ) -> Result<Termin, PlanError> {
        if !ids::is_pseudo(pseudo_id) {
            return Err(PlanError::NotPseudo(pseudo_id.to_string()));
        }
        if is_booked(beginn, &self.termine()) {
            return Err(PlanError::SlotBelegt(beginn));
        }

        let termin = Termin::unconfirmed(
            pseudo_id.to_string(),
            partei_id.to_string(),
            beginn,
            beginn + self.termin_dauer,
        );
        self.termine.insert(termin.id.clone(), termin.clone());
        Ok(termin)
    }

    /// Transition: Unconfirmed → Active, swapping the pseudo id for a
    /// backend-assigned one
    pub fn confirm_termin(&mut self, pseudo_id: &str) -> Result<Termin, PlanError> {
        let mut termin = self
            .termine
            .remove(pseudo_id)
            .ok_or_else(|| PlanError::NotFound(pseudo_id.to_string()))?;

        if termin.status != TerminStatus::Unconfirmed {
            self.termine.insert(termin.id.clone(), termin.clone());
            return Err(PlanError::InvalidTransition {
                from: format!("{:?}", termin.status),
                to: "ACTIVE".to_string(),
            });
        }

        termin.id = Uuid::new_v4().to_string();
        termin.update_status(TerminStatus::Active);
        self.termine.insert(termin.id.clone(), termin.clone());
        Ok(termin)
    }

    /// First delete click: Active → MarkedForDeletion. A second mark on an
    /// already marked Termin toggles it back to Active (the decline path
    /// shares this transition).
    pub fn mark_termin(&mut self, termin_id: &str) -> Result<Termin, PlanError> {
        let termin = self.get_termin_mut(termin_id)?;

        match termin.status {
            TerminStatus::Active => termin.update_status(TerminStatus::MarkedForDeletion),
            TerminStatus::MarkedForDeletion => termin.update_status(TerminStatus::Active),
            TerminStatus::Unconfirmed => {
                return Err(PlanError::InvalidTransition {
                    from: format!("{:?}", termin.status),
                    to: "MARKED_FOR_DELETION".to_string(),
                });
            }
        }

        Ok(termin.clone())
    }

    /// Confirmed deletion: only a MarkedForDeletion Termin may be removed
    pub fn confirm_delete(&mut self, termin_id: &str) -> Result<(), PlanError> {
        let termin = self.get_termin_mut(termin_id)?;

        if termin.status != TerminStatus::MarkedForDeletion {
            return Err(PlanError::InvalidTransition {
                from: format!("{:?}", termin.status),
                to: "DELETED".to_string(),
            });
        }

        self.termine.remove(termin_id);
        tracing::debug!(%termin_id, "Termin geloescht");
        Ok(())
    }

    /// Declined confirmation: MarkedForDeletion → Active
    pub fn decline_delete(&mut self, termin_id: &str) -> Result<Termin, PlanError> {
        let termin = self.get_termin_mut(termin_id)?;

        if termin.status != TerminStatus::MarkedForDeletion {
            return Err(PlanError::InvalidTransition {
                from: format!("{:?}", termin.status),
                to: "ACTIVE".to_string(),
            });
        }

        termin.update_status(TerminStatus::Active);
        Ok(termin.clone())
    }

    /// Helper to get mutable termin reference
    fn get_termin_mut(&mut self, termin_id: &str) -> Result<&mut Termin, PlanError> {
        self.termine
            .get_mut(termin_id)
            .ok_or_else(|| PlanError::NotFound(termin_id.to_string()))
    }
}

impl Default for PlanManager {
    fn default() -> Self {
        // The calendar's drag source books nine-hour wash days
        Self::new(9)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Dieser Waschtag ist bereits gebucht: {0}")]
    SlotBelegt(DateTime<Utc>),

    #[error("Termin not found: {0}")]
    NotFound(String),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("No pending slot selected")]
    NoPendingSlot,

    #[error("Not a provisional id: {0}")]
    NotPseudo(String),

    #[error("Internal plan error: {0}")]
    Internal(String),
}
