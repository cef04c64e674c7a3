use serde::{Deserialize, Serialize};

use super::{RaceResult, Team, TeamId};
use crate::error::{Result, ValidationError};

/// A team's cumulative score and race-by-race history within one regatta.
///
/// `total_points` is always derived from `results`. Decoding recomputes it
/// and ignores whatever total the payload carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StandingRecord")]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub team_name: String,
    pub total_points: i64,
    pub results: Vec<RaceResult>,
}

/// Wire shape of a standing as the backend sends it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StandingRecord {
    team_id: TeamId,
    #[serde(alias = "name")]
    team_name: String,
    #[serde(default, deserialize_with = "crate::dto::null_as_empty")]
    results: Vec<RaceResult>,
}

impl TryFrom<StandingRecord> for TeamStanding {
    type Error = ValidationError;

    fn try_from(record: StandingRecord) -> Result<Self> {
        let total_points = sum_points(&record.team_id, &record.results)?;
        Ok(Self {
            team_id: record.team_id,
            team_name: record.team_name,
            total_points,
            results: record.results,
        })
    }
}

fn sum_points(team_id: &TeamId, results: &[RaceResult]) -> Result<i64> {
    results
        .iter()
        .try_fold(0i64, |total, r| total.checked_add(r.points))
        .ok_or_else(|| ValidationError::PointsOverflow(team_id.clone()))
}

impl TeamStanding {
    pub fn new(team: &Team, results: Vec<RaceResult>) -> Result<Self> {
        let total_points = sum_points(&team.id, &results)?;
        Ok(Self {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            total_points,
            results,
        })
    }

    pub fn result_for(&self, race_number: u32) -> Option<&RaceResult> {
        self.results.iter().find(|r| r.race_number == race_number)
    }

    pub fn races_sailed(&self) -> usize {
        self.results.len()
    }

    /// Finishing positions, best first. Used for countback.
    pub fn positions_best_first(&self) -> Vec<u32> {
        let mut positions: Vec<u32> = self.results.iter().map(|r| r.position).collect();
        positions.sort_unstable();
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum_of_points() {
        let team = Team::new("a", "Alpha");
        let standing = TeamStanding::new(
            &team,
            vec![RaceResult::new("a", 1, 1, 1), RaceResult::new("a", 2, 4, 4)],
        )
        .unwrap();

        assert_eq!(standing.total_points, 5);
        assert_eq!(standing.team_name, "Alpha");
        assert_eq!(standing.result_for(2).map(|r| r.position), Some(4));
        assert!(standing.result_for(3).is_none());
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        let team = Team::new("a", "Alpha");
        let results = vec![
            RaceResult::new("a", 1, 1, i64::MAX),
            RaceResult::new("a", 2, 1, 1),
        ];

        assert!(matches!(
            TeamStanding::new(&team, results),
            Err(ValidationError::PointsOverflow(ref id)) if id.as_str() == "a"
        ));
    }

    #[test]
    fn test_accepts_backend_name_field() {
        let json = r#"{"teamId": "a", "name": "Alpha", "totalPoints": 0, "results": null}"#;
        let standing: TeamStanding = serde_json::from_str(json).unwrap();
        assert!(standing.results.is_empty());

        let json = r#"{"teamId": "a", "name": "Alpha", "totalPoints": 0}"#;
        let standing: TeamStanding = serde_json::from_str(json).unwrap();
        assert_eq!(standing.team_name, "Alpha");
        assert!(standing.results.is_empty());
    }

    #[test]
    fn test_decoded_total_is_recomputed() {
        let json = r#"{"teamId": "a", "teamName": "Alpha", "totalPoints": 99, "results": [
            {"teamId": "a", "raceNumber": 1, "position": 1, "points": 1},
            {"teamId": "a", "raceNumber": 2, "position": 3, "points": 3}
        ]}"#;

        let standing: TeamStanding = serde_json::from_str(json).unwrap();
        assert_eq!(standing.total_points, 4);
    }

    #[test]
    fn test_decoding_overflowing_total_fails() {
        let json = format!(
            r#"{{"teamId": "a", "name": "Alpha", "results": [
                {{"teamId": "a", "raceNumber": 1, "position": 1, "points": {}}},
                {{"teamId": "a", "raceNumber": 2, "position": 1, "points": 1}}
            ]}}"#,
            i64::MAX
        );

        assert!(serde_json::from_str::<TeamStanding>(&json).is_err());
    }
}
