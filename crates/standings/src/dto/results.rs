use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{RaceResult, TeamId};

/// Request body for `POST /regattas/{id}/results`.
///
/// The backend reads the race number from each entry rather than the
/// envelope, so every entry repeats it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultsRequest {
    #[validate(range(min = 1, message = "Race number must be >= 1"))]
    pub race_number: u32,

    #[validate(length(min = 1, message = "At least one result is required"))]
    #[validate(nested)]
    pub results: Vec<SubmittedResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedResult {
    pub team_id: TeamId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regatta_id: Option<String>,

    pub race_number: u32,

    #[validate(range(min = 1, message = "Position must be >= 1"))]
    pub position: u32,

    pub points: i64,
}

impl SubmitResultsRequest {
    /// Validation that spans the envelope and its entries
    pub fn validate_race_numbers(&self) -> Result<(), &'static str> {
        if self
            .results
            .iter()
            .any(|r| r.race_number != self.race_number)
        {
            return Err("Every result must carry the batch race number");
        }
        Ok(())
    }

    pub fn for_regatta(mut self, regatta_id: &str) -> Self {
        for result in &mut self.results {
            result.regatta_id = Some(regatta_id.to_string());
        }
        self
    }
}

impl From<RaceResult> for SubmittedResult {
    fn from(result: RaceResult) -> Self {
        Self {
            team_id: result.team_id,
            regatta_id: None,
            race_number: result.race_number,
            position: result.position,
            points: result.points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(race_number: u32, results: Vec<SubmittedResult>) -> SubmitResultsRequest {
        SubmitResultsRequest {
            race_number,
            results,
        }
    }

    #[test]
    fn test_valid_request() {
        let req = request(2, vec![RaceResult::new("a", 2, 1, 1).into()]);
        assert!(req.validate().is_ok());
        assert!(req.validate_race_numbers().is_ok());
    }

    #[test]
    fn test_rejects_zero_race_number_and_empty_results() {
        let errors = request(0, vec![RaceResult::new("a", 0, 1, 1).into()])
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("race_number"));

        assert!(request(1, vec![]).validate().is_err());
    }

    #[test]
    fn test_rejects_zero_position() {
        let req = request(1, vec![RaceResult::new("a", 1, 0, 0).into()]);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rejects_mismatched_race_number() {
        let req = request(1, vec![RaceResult::new("a", 2, 1, 1).into()]);
        assert!(req.validate_race_numbers().is_err());
    }

    #[test]
    fn test_wire_shape() {
        let req = request(3, vec![RaceResult::new("a", 3, 2, 2).into()]).for_regatta("r-9");
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["raceNumber"], 3);
        assert_eq!(json["results"][0]["teamId"], "a");
        assert_eq!(json["results"][0]["regattaId"], "r-9");
        assert_eq!(json["results"][0]["position"], 2);
        assert_eq!(json["results"][0]["points"], 2);
    }
}
