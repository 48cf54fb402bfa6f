//! Strongly-typed purchase identifier
//!
//! Displayed in a short `pur-xxxxxxxx` form; the full UUID is what gets
//! persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "pur-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseId(Uuid);

impl PurchaseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// The eight hex digits shown after the `pur-` prefix
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }

    /// Whether a user-typed reference (`pur-1a2b3c4d`, `1a2b`, full UUID)
    /// identifies this ID
    pub fn matches(&self, reference: &str) -> bool {
        let reference = reference.trim().to_lowercase();
        let reference = reference.strip_prefix(DISPLAY_PREFIX).unwrap_or(&reference);
        if reference.is_empty() {
            return false;
        }
        if let Ok(uuid) = Uuid::parse_str(reference) {
            return uuid == self.0;
        }
        self.0.simple().to_string().starts_with(reference)
    }
}

impl Default for PurchaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, self.short())
    }
}

impl From<Uuid> for PurchaseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for PurchaseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}
