use thiserror::Error;

use crate::models::TeamId;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Duplicate result for team {team_id} in race {race_number}")]
    DuplicateResult { team_id: TeamId, race_number: u32 },

    #[error("Result references unknown team: {0}")]
    UnknownTeam(TeamId),

    #[error("Team listed more than once: {0}")]
    DuplicateTeam(TeamId),

    #[error("Invalid race number {0}: race numbers start at 1")]
    InvalidRaceNumber(u32),

    #[error("Invalid position {position} for team {team_id}: positions start at 1")]
    InvalidPosition { team_id: TeamId, position: u32 },

    #[error("At least one result is required")]
    EmptyBatch,

    #[error("Team {team_id} already has a result for race {race_number}")]
    ResultAlreadyRecorded { team_id: TeamId, race_number: u32 },

    #[error("Points total for team {0} does not fit in 64 bits")]
    PointsOverflow(TeamId),

    #[error("Invalid request: {0}")]
    Rule(&'static str),

    #[error("Invalid request: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

pub type Result<T> = std::result::Result<T, ValidationError>;

impl ValidationError {
    /// True when the error concerns a single (team, race) slot rather than
    /// the shape of the whole input.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ValidationError::DuplicateResult { .. } | ValidationError::ResultAlreadyRecorded { .. }
        )
    }
}
