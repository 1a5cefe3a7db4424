use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Termin status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminStatus {
    /// Captured provisionally (client-side pseudo id, not yet acknowledged)
    Unconfirmed,
    Active,
    MarkedForDeletion,
}

/// A laundry-day booking for one tenant party.
///
/// The interval is closed on both ends: a candidate start equal to
/// `termin_ende` still counts as booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Termin {
    pub id: String,
    pub partei_id: String,
    pub termin_beginn: DateTime<Utc>,
    pub termin_ende: DateTime<Utc>,
    pub status: TerminStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Termin {
    pub fn new(partei_id: String, termin_beginn: DateTime<Utc>, termin_ende: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            partei_id,
            termin_beginn,
            termin_ende,
            status: TerminStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// A provisional Termin still carrying its client-generated pseudo id
    pub fn unconfirmed(
        pseudo_id: String,
        partei_id: String,
        termin_beginn: DateTime<Utc>,
        termin_ende: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: pseudo_id,
            partei_id,
            termin_beginn,
            termin_ende,
            status: TerminStatus::Unconfirmed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update termin status
    pub fn update_status(&mut self, new_status: TerminStatus) {
        self.status = new_status;
        self.updated_at = Utc::now();
    }

    /// The "marked for deletion" flag the calendar renders
    pub fn is_marked(&self) -> bool {
        self.status == TerminStatus::MarkedForDeletion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_camel_case() {
        let now = Utc::now();
        let termin = Termin::new("partei-1".to_string(), now, now);

        let value = serde_json::to_value(&termin).unwrap();
        assert!(value.get("parteiId").is_some());
        assert!(value.get("terminBeginn").is_some());
        assert!(value.get("terminEnde").is_some());
        assert_eq!(value["status"], "ACTIVE");
    }

    #[test]
    fn test_marked_follows_status() {
        let now = Utc::now();
        let mut termin = Termin::new("partei-1".to_string(), now, now);
        assert!(!termin.is_marked());

        termin.update_status(TerminStatus::MarkedForDeletion);
        assert!(termin.is_marked());
    }
}
