use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::termin::Termin;

/// Display format used by the Termin table, `31.12.2024 08:00`
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

/// A display projection of one Termin.
///
/// Recomputed from the Termin set on every request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TerminRow {
    pub id: String,
    pub mieter_name: String,
    pub beginn: String,
    pub ende: String,
}

impl TerminRow {
    pub fn from_termin(termin: &Termin, mieter_name: &str) -> Self {
        Self {
            id: termin.id.clone(),
            mieter_name: mieter_name.to_string(),
            beginn: termin.termin_beginn.format(DISPLAY_FORMAT).to_string(),
            ende: termin.termin_ende.format(DISPLAY_FORMAT).to_string(),
        }
    }
}

/// Sortable table columns
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    MieterName,
    Beginn,
    Ende,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Sort rows by the chosen column.
///
/// The two date columns are parsed back into instants before comparison;
/// the other columns compare their raw string values. The sort is stable:
/// rows with equal keys keep their original input order, implemented by
/// pairing each row with its index and tie-breaking on it. Descending
/// order reverses the key comparison only, not the tie-break.
pub fn sort_rows(rows: Vec<TerminRow>, order: SortOrder, key: SortKey) -> Vec<TerminRow> {
    let mut indexed: Vec<(usize, TerminRow)> = rows.into_iter().enumerate().collect();

    indexed.sort_by(|(ia, a), (ib, b)| {
        let by_key = compare_by_key(a, b, key);
        let by_key = match order {
            SortOrder::Asc => by_key,
            SortOrder::Desc => by_key.reverse(),
        };
        by_key.then(ia.cmp(ib))
    });

    indexed.into_iter().map(|(_, row)| row).collect()
}

fn compare_by_key(a: &TerminRow, b: &TerminRow, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::MieterName => a.mieter_name.cmp(&b.mieter_name),
        SortKey::Beginn => compare_display_dates(&a.beginn, &b.beginn),
        SortKey::Ende => compare_display_dates(&a.ende, &b.ende),
    }
}

/// Lexicographic order on `DD.MM.YYYY` strings is wrong, so the date
/// columns are parsed back first. Unparseable values fall back to the
/// raw string comparison.
fn compare_display_dates(a: &str, b: &str) -> Ordering {
    match (
        NaiveDateTime::parse_from_str(a, DISPLAY_FORMAT),
        NaiveDateTime::parse_from_str(b, DISPLAY_FORMAT),
    ) {
        (Ok(da), Ok(db)) => da.cmp(&db),
        _ => a.cmp(b),
    }
}

/// Slice one page out of the sorted sequence. Pages are zero-based;
/// anything past the end yields an empty page.
pub fn paginate(rows: &[TerminRow], page: usize, page_size: usize) -> Vec<TerminRow> {
    let start = page.saturating_mul(page_size);
    if start >= rows.len() || page_size == 0 {
        return Vec::new();
    }
    let end = (start + page_size).min(rows.len());
    rows[start..end].to_vec()
}
