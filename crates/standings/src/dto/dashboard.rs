use serde::{Deserialize, Serialize};

/// Counters served by the backend's `/dashboard/stats` endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub active_regattas: u64,
    pub total_teams: u64,
    pub races_completed: u64,
    pub upcoming_races: u64,
}
