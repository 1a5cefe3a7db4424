use serde::{Deserialize, Serialize};

/// A tenant party eligible to book laundry slots.
///
/// Read-only from the scheduling side; the set is seeded at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Mieter {
    pub id: String,
    pub name: String,
    /// Path to the avatar asset shown on the drag source
    pub avatar: String,
}

impl Mieter {
    pub fn new(id: impl Into<String>, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}
