use standings::dto::snapshot::RegattaSnapshot;

use crate::Result;

/// Somewhere the roster and recorded results of a regatta can be read from.
#[async_trait::async_trait]
pub trait ResultsSource: Send + Sync {
    async fn snapshot(&self, regatta_id: &str) -> Result<RegattaSnapshot>;

    fn name(&self) -> &'static str;
}
