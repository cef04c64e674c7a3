use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Regatta as returned by the backend's `/regattas` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Regatta {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    /// Only filled in by the single-regatta endpoint; the list endpoint omits it.
    #[serde(default)]
    pub status: String,
}

impl Regatta {
    pub fn is_scheduled(&self) -> bool {
        self.status.eq_ignore_ascii_case("scheduled")
    }

    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
