use std::collections::HashSet;

use tracing::debug;
use validator::Validate;

use crate::dto::results::{SubmitResultsRequest, SubmittedResult};
use crate::error::{Result, ValidationError};
use crate::models::{RaceResult, ScoringSystem, Team, TeamId};

/// Results for a single race, built from a team → position mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsBatch {
    race_number: u32,
    results: Vec<RaceResult>,
}

impl ResultsBatch {
    pub fn from_positions<I, T, S>(race_number: u32, positions: I, scoring: &S) -> Result<Self>
    where
        I: IntoIterator<Item = (T, u32)>,
        T: Into<TeamId>,
        S: ScoringSystem + ?Sized,
    {
        if race_number < 1 {
            return Err(ValidationError::InvalidRaceNumber(race_number));
        }

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for (team_id, position) in positions {
            let team_id = team_id.into();
            if position < 1 {
                return Err(ValidationError::InvalidPosition { team_id, position });
            }
            if !seen.insert(team_id.clone()) {
                return Err(ValidationError::DuplicateTeam(team_id));
            }
            let points = scoring.points_for(position);
            results.push(RaceResult::new(team_id, race_number, position, points));
        }

        if results.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }

        debug!(
            race_number,
            entries = results.len(),
            scoring = scoring.name(),
            "Built results batch"
        );

        Ok(Self {
            race_number,
            results,
        })
    }

    /// Rejects entries for teams outside the roster and entries for a
    /// (team, race) that already has a recorded result.
    pub fn check_against(&self, teams: &[Team], existing: &[RaceResult]) -> Result<()> {
        let roster: HashSet<&TeamId> = teams.iter().map(|t| &t.id).collect();
        let recorded: HashSet<(&TeamId, u32)> = existing
            .iter()
            .map(|r| (&r.team_id, r.race_number))
            .collect();

        for result in &self.results {
            if !roster.contains(&result.team_id) {
                return Err(ValidationError::UnknownTeam(result.team_id.clone()));
            }
            if recorded.contains(&(&result.team_id, self.race_number)) {
                return Err(ValidationError::ResultAlreadyRecorded {
                    team_id: result.team_id.clone(),
                    race_number: self.race_number,
                });
            }
        }
        Ok(())
    }

    pub fn race_number(&self) -> u32 {
        self.race_number
    }

    pub fn results(&self) -> &[RaceResult] {
        &self.results
    }

    pub fn into_request(self) -> Result<SubmitResultsRequest> {
        let request = SubmitResultsRequest {
            race_number: self.race_number,
            results: self
                .results
                .into_iter()
                .map(SubmittedResult::from)
                .collect(),
        };
        request.validate()?;
        Ok(request)
    }
}
