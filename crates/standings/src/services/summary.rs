use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{TeamId, TeamStanding};

/// Per-regatta counterpart of the backend dashboard counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegattaSummary {
    pub teams: usize,
    pub races_completed: usize,
    pub results_recorded: usize,
    pub leader: Option<TeamId>,
}

impl RegattaSummary {
    /// `standings` must already be ranked. The leader is the best-placed
    /// team that has sailed at least one race.
    pub fn from_standings(standings: &[TeamStanding]) -> Self {
        let races: BTreeSet<u32> = standings
            .iter()
            .flat_map(|s| s.results.iter().map(|r| r.race_number))
            .collect();

        Self {
            teams: standings.len(),
            races_completed: races.len(),
            results_recorded: standings.iter().map(TeamStanding::races_sailed).sum(),
            leader: standings
                .iter()
                .find(|s| s.races_sailed() > 0)
                .map(|s| s.team_id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RaceResult, Team};
    use crate::services::standings_computation::compute_standings;

    #[test]
    fn test_summary_counts() {
        let teams = vec![
            Team::new("a", "Alpha"),
            Team::new("b", "Bravo"),
            Team::new("c", "Charlie"),
        ];
        let results = vec![
            RaceResult::new("a", 1, 2, 2),
            RaceResult::new("b", 1, 1, 1),
            RaceResult::new("b", 3, 1, 1),
        ];

        let standings = compute_standings(&teams, &results).unwrap();
        let summary = RegattaSummary::from_standings(&standings);

        assert_eq!(summary.teams, 3);
        assert_eq!(summary.races_completed, 2);
        assert_eq!(summary.results_recorded, 3);
        // charlie sits on 0 points but has not raced
        assert_eq!(summary.leader, Some(TeamId::from("b")));
    }

    #[test]
    fn test_empty_regatta_has_no_leader() {
        let summary = RegattaSummary::from_standings(&[]);
        assert_eq!(summary.teams, 0);
        assert_eq!(summary.races_completed, 0);
        assert!(summary.leader.is_none());
    }
}
