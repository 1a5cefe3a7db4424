use uuid::Uuid;

const PSEUDO_PREFIX: &str = "pseudo-";

/// Generate a provisional client-side id for a Termin captured before the
/// backend has acknowledged it.
pub fn pseudo_id() -> String {
    format!("{}{}", PSEUDO_PREFIX, Uuid::new_v4())
}

/// True for ids produced by [`pseudo_id`], i.e. Termine captured
/// provisionally and not yet backed by a real record.
pub fn is_pseudo(id: &str) -> bool {
    id.starts_with(PSEUDO_PREFIX)
}
