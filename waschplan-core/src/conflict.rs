use chrono::{DateTime, Utc};

use crate::termin::Termin;

/// Returns true iff `candidate_start` falls within the closed interval
/// `[termin_beginn, termin_ende]` of any existing Termin.
///
/// Boundary equality counts as booked. Linear scan, no side effects.
pub fn is_booked(candidate_start: DateTime<Utc>, termine: &[Termin]) -> bool {
    termine
        .iter()
        .any(|t| candidate_start >= t.termin_beginn && candidate_start <= t.termin_ende)
}
