use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use standings::dto::dashboard::DashboardStats;
use standings::dto::regatta::{CreateRegattaRequest, UpdateRegattaRequest};
use standings::dto::results::SubmitResultsRequest;
use standings::dto::snapshot::RegattaSnapshot;
use standings::dto::team::TeamRequest;
use standings::{Regatta, Team, TeamId, TeamStanding, ValidationError};
use tracing::debug;
use validator::Validate;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Client for the regatta backend's REST API.
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("regatta-client/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_regattas(&self) -> Result<Vec<Regatta>> {
        self.get_list("/regattas").await
    }

    pub async fn get_regatta(&self, regatta_id: &str) -> Result<Regatta> {
        self.get_json(&format!("/regattas/{}", regatta_id)).await
    }

    pub async fn create_regatta(&self, request: &CreateRegattaRequest) -> Result<Regatta> {
        request.validate().map_err(ValidationError::from)?;
        request.validate_dates().map_err(ValidationError::Rule)?;
        self.send_json(Method::POST, "/regattas", request).await
    }

    /// Replaces every field of the regatta; the backend has no partial update.
    pub async fn update_regatta(
        &self,
        regatta_id: &str,
        request: &UpdateRegattaRequest,
    ) -> Result<Regatta> {
        request.validate().map_err(ValidationError::from)?;
        request.validate_dates().map_err(ValidationError::Rule)?;
        self.send_json(Method::PUT, &format!("/regattas/{}", regatta_id), request).await
    }

    pub async fn delete_regatta(&self, regatta_id: &str) -> Result<()> {
        self.delete(&format!("/regattas/{}", regatta_id)).await
    }

    pub async fn list_teams(&self, regatta_id: &str) -> Result<Vec<Team>> {
        self.get_list(&format!("/regattas/{}/teams", regatta_id)).await
    }

    pub async fn create_team(&self, regatta_id: &str, request: &TeamRequest) -> Result<Team> {
        request.validate().map_err(ValidationError::from)?;
        let path = format!("/regattas/{}/teams", regatta_id);
        self.send_json(Method::POST, &path, request).await
    }

    pub async fn update_team(
        &self,
        regatta_id: &str,
        team_id: &TeamId,
        request: &TeamRequest,
    ) -> Result<Team> {
        request.validate().map_err(ValidationError::from)?;
        let path = format!("/regattas/{}/teams/{}", regatta_id, team_id);
        self.send_json(Method::PUT, &path, request).await
    }

    pub async fn delete_team(&self, regatta_id: &str, team_id: &TeamId) -> Result<()> {
        self.delete(&format!("/regattas/{}/teams/{}", regatta_id, team_id)).await
    }

    /// The backend's own standings: only teams with results, unordered.
    pub async fn list_standings(&self, regatta_id: &str) -> Result<Vec<TeamStanding>> {
        self.get_list(&format!("/regattas/{}/standings", regatta_id)).await
    }

    /// Fetches roster and results concurrently.
    pub async fn fetch_snapshot(&self, regatta_id: &str) -> Result<RegattaSnapshot> {
        let (teams, standings) = tokio::try_join!(
            self.list_teams(regatta_id),
            self.list_standings(regatta_id)
        )?;
        Ok(RegattaSnapshot::from_backend_standings(teams, standings))
    }

    pub async fn submit_results(
        &self,
        regatta_id: &str,
        request: &SubmitResultsRequest,
    ) -> Result<()> {
        request.validate_race_numbers().map_err(ValidationError::Rule)?;

        let url = format!("{}/regattas/{}/results", self.base_url, regatta_id);
        debug!(
            "POST {} (race {}, {} results)",
            url,
            request.race_number,
            request.results.len()
        );

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status, &body));
        }

        Ok(())
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.get_json("/dashboard/stats").await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let response = self.client.request(method, &url).json(body).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::from_status(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status, &body));
        }

        Ok(())
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let list: Option<Vec<T>> = self.get_json(path).await?;
        Ok(list.unwrap_or_default())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::from_status(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use standings::dto::results::SubmittedResult;

    // Nothing listens on the discard port; every test here must fail before
    // a request is sent.
    fn offline_client() -> BackendClient {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:9/api");
        BackendClient::new(&config).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_blank_team_name_is_rejected_locally() {
        let client = offline_client();
        let err = client
            .create_team("r-1", &TeamRequest::new("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(ValidationError::Invalid(_))));

        let err = client
            .update_team("r-1", &TeamId::from("t-1"), &TeamRequest::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_regatta_dates_are_checked_locally() {
        let request = CreateRegattaRequest {
            name: "Spring Series".to_string(),
            start_date: date(2024, 4, 7),
            end_date: date(2024, 4, 6),
            location: "Marblehead".to_string(),
        };

        let client = offline_client();
        let err = client.create_regatta(&request).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ValidationError::Rule(_))));
    }

    #[tokio::test]
    async fn test_mismatched_race_numbers_are_rejected_locally() {
        let request = SubmitResultsRequest {
            race_number: 2,
            results: vec![SubmittedResult {
                team_id: TeamId::from("a"),
                regatta_id: None,
                race_number: 3,
                position: 1,
                points: 1,
            }],
        };

        let client = offline_client();
        let err = client.submit_results("r-1", &request).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ValidationError::Rule(_))));
    }

    #[test]
    fn test_base_url_from_config() {
        assert_eq!(offline_client().base_url(), "http://127.0.0.1:9/api");
    }
}
