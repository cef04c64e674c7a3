use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Regatta;

/// Request body for `POST /regattas`. The backend assigns the id and sets
/// the status to `SCHEDULED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegattaRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[validate(length(max = 255))]
    pub location: String,
}

/// Request body for `PUT /regattas/{id}`.
///
/// The backend overwrites every column, so the request always carries the
/// full regatta rather than only the changed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegattaRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[validate(length(max = 255))]
    pub location: String,

    #[validate(length(
        min = 1,
        max = 32,
        message = "Status must be between 1 and 32 characters"
    ))]
    pub status: String,
}

fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        Err(validator::ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

fn check_dates(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if end < start {
        return Err("End date must be on or after start date");
    }
    Ok(())
}

impl CreateRegattaRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        check_dates(self.start_date, self.end_date)
    }
}

impl UpdateRegattaRequest {
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        check_dates(self.start_date, self.end_date)
    }
}

impl From<Regatta> for UpdateRegattaRequest {
    fn from(regatta: Regatta) -> Self {
        Self {
            name: regatta.name,
            start_date: regatta.start_date,
            end_date: regatta.end_date,
            location: regatta.location,
            status: regatta.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create(name: &str, start: NaiveDate, end: NaiveDate) -> CreateRegattaRequest {
        CreateRegattaRequest {
            name: name.to_string(),
            start_date: start,
            end_date: end,
            location: "Marblehead".to_string(),
        }
    }

    #[test]
    fn test_create_request_wire_shape() {
        let request = create("Spring Series", date(2024, 4, 6), date(2024, 4, 7));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["startDate"], "2024-04-06");
        assert_eq!(json["endDate"], "2024-04-07");
        assert_eq!(json["location"], "Marblehead");
        assert!(request.validate().is_ok());
        assert!(request.validate_dates().is_ok());
    }

    #[test]
    fn test_name_rules() {
        let empty = create("", date(2024, 4, 6), date(2024, 4, 6));
        assert!(empty.validate().is_err());

        let blank = create("   ", date(2024, 4, 6), date(2024, 4, 6));
        let errors = blank.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let long = create(&"x".repeat(256), date(2024, 4, 6), date(2024, 4, 6));
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let request = create("Spring Series", date(2024, 4, 7), date(2024, 4, 6));
        assert!(request.validate().is_ok());
        assert_eq!(
            request.validate_dates(),
            Err("End date must be on or after start date")
        );
    }

    #[test]
    fn test_update_request_from_regatta() {
        let regatta = Regatta {
            id: "r-1".to_string(),
            name: "Spring Series".to_string(),
            start_date: date(2024, 4, 6),
            end_date: date(2024, 4, 7),
            location: "Marblehead".to_string(),
            status: "SCHEDULED".to_string(),
        };

        let mut request = UpdateRegattaRequest::from(regatta);
        assert!(request.validate().is_ok());

        request.status.clear();
        assert!(request.validate().is_err());
    }
}
