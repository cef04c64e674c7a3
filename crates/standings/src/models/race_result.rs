use serde::{Deserialize, Serialize};

use super::TeamId;
use crate::error::{Result, ValidationError};

/// One team's finish in one race of a regatta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResult {
    pub team_id: TeamId,
    pub race_number: u32,
    pub position: u32,
    pub points: i64,
}

impl RaceResult {
    pub fn new(team_id: impl Into<TeamId>, race_number: u32, position: u32, points: i64) -> Self {
        Self {
            team_id: team_id.into(),
            race_number,
            position,
            points,
        }
    }

    /// Rejects zero race numbers and positions. The backend stores whatever
    /// it is sent, so a zero here usually means a field was missing upstream.
    pub fn check_shape(&self) -> Result<()> {
        if self.race_number < 1 {
            return Err(ValidationError::InvalidRaceNumber(self.race_number));
        }
        if self.position < 1 {
            return Err(ValidationError::InvalidPosition {
                team_id: self.team_id.clone(),
                position: self.position,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_backend_shape() {
        let json = r#"{
            "id": "4b1c",
            "regattaId": "r-1",
            "teamId": "team-a",
            "raceNumber": 2,
            "position": 3,
            "points": 3
        }"#;

        let result: RaceResult = serde_json::from_str(json).unwrap();
        assert_eq!(result, RaceResult::new("team-a", 2, 3, 3));
    }

    #[test]
    fn test_non_numeric_position_is_rejected() {
        let json = r#"{"teamId": "team-a", "raceNumber": 1, "position": "first", "points": 1}"#;
        assert!(serde_json::from_str::<RaceResult>(json).is_err());
    }

    #[test]
    fn test_missing_points_is_rejected() {
        let json = r#"{"teamId": "team-a", "raceNumber": 1, "position": 1}"#;
        assert!(serde_json::from_str::<RaceResult>(json).is_err());
    }

    #[test]
    fn test_check_shape() {
        assert!(RaceResult::new("a", 1, 1, 1).check_shape().is_ok());
        assert!(matches!(
            RaceResult::new("a", 0, 1, 1).check_shape(),
            Err(ValidationError::InvalidRaceNumber(0))
        ));
        assert!(matches!(
            RaceResult::new("a", 1, 0, 0).check_shape(),
            Err(ValidationError::InvalidPosition { position: 0, .. })
        ));
    }
}
