use standings::dto::snapshot::RegattaSnapshot;
use tracing::info;

use crate::{BackendClient, Result, traits::ResultsSource};

#[async_trait::async_trait]
impl ResultsSource for BackendClient {
    async fn snapshot(&self, regatta_id: &str) -> Result<RegattaSnapshot> {
        let snapshot = self.fetch_snapshot(regatta_id).await?;
        info!(
            "Fetched {} teams and {} results for regatta {} from {}",
            snapshot.teams.len(),
            snapshot.results.len(),
            regatta_id,
            self.base_url()
        );
        Ok(snapshot)
    }

    fn name(&self) -> &'static str {
        "backend"
    }
}
