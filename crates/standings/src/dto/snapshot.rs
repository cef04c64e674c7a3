use serde::{Deserialize, Serialize};

use super::null_as_empty;
use crate::models::{RaceResult, Team, TeamStanding};

/// Everything the aggregator needs for one regatta: the roster and every
/// recorded result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegattaSnapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub teams: Vec<Team>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<RaceResult>,
}

impl RegattaSnapshot {
    pub fn new(teams: Vec<Team>, results: Vec<RaceResult>) -> Self {
        Self { teams, results }
    }

    /// Rebuilds a snapshot from the backend's `/standings` payload, which
    /// nests results under each team that has any.
    pub fn from_backend_standings(teams: Vec<Team>, standings: Vec<TeamStanding>) -> Self {
        let results = standings
            .into_iter()
            .flat_map(|standing| standing.results)
            .collect();
        Self { teams, results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_lists_decode_as_empty() {
        let snapshot: RegattaSnapshot =
            serde_json::from_str(r#"{"teams": null, "results": null}"#).unwrap();
        assert_eq!(snapshot, RegattaSnapshot::default());

        let snapshot: RegattaSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.teams.is_empty());
    }

    #[test]
    fn test_flattens_backend_standings() {
        let json = r#"[
            {"teamId": "a", "name": "Alpha", "totalPoints": 4, "results": [
                {"teamId": "a", "raceNumber": 1, "position": 1, "points": 1},
                {"teamId": "a", "raceNumber": 2, "position": 3, "points": 3}
            ]},
            {"teamId": "b", "name": "Bravo", "totalPoints": 2, "results": [
                {"teamId": "b", "raceNumber": 1, "position": 2, "points": 2}
            ]}
        ]"#;
        let standings: Vec<TeamStanding> = serde_json::from_str(json).unwrap();
        let teams = vec![Team::new("a", "Alpha"), Team::new("b", "Bravo")];

        let snapshot = RegattaSnapshot::from_backend_standings(teams, standings);
        assert_eq!(snapshot.teams.len(), 2);
        assert_eq!(snapshot.results.len(), 3);
        assert!(snapshot.results.contains(&RaceResult::new("b", 1, 2, 2)));
    }
}
