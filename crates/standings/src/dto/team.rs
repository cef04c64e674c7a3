use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /regattas/{id}/teams` and
/// `PUT /regattas/{id}/teams/{teamId}`. Only the name is writable; the
/// backend fills in the ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeamRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Team name must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_team_name"))]
    pub name: String,
}

impl TeamRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

fn validate_team_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() || name.trim() != name {
        return Err(validator::ValidationError::new("untrimmed_name"));
    }
    Ok(())
}
