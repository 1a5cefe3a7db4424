use chrono::{DateTime, Utc};

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct TerminErfasstEvent {
    pub termin_id: String,
    pub partei_id: String,
    pub termin_beginn: DateTime<Utc>,
    pub termin_ende: DateTime<Utc>,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct TerminMarkiertEvent {
    pub termin_id: String,
    pub marked: bool,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct TerminGeloeschtEvent {
    pub termin_id: String,
    pub timestamp: i64,
}

/// State-change notification fanned out to SSE subscribers and the
/// push-notification worker.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanEvent {
    TerminErfasst(TerminErfasstEvent),
    TerminMarkiert(TerminMarkiertEvent),
    TerminGeloescht(TerminGeloeschtEvent),
}
