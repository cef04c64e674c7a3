use std::path::{Path, PathBuf};

use standings::dto::snapshot::RegattaSnapshot;
use tracing::info;

use crate::{Result, traits::ResultsSource};

/// A regatta exported to a JSON file as `{"teams": [...], "results": [...]}`.
///
/// The file holds one regatta, so the id passed to `snapshot` is only used
/// for logging.
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn write(&self, snapshot: &RegattaSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ResultsSource for SnapshotFile {
    async fn snapshot(&self, regatta_id: &str) -> Result<RegattaSnapshot> {
        let json = tokio::fs::read_to_string(&self.path).await?;
        let snapshot: RegattaSnapshot = serde_json::from_str(&json)?;
        info!(
            "Loaded {} teams and {} results for regatta {} from {}",
            snapshot.teams.len(),
            snapshot.results.len(),
            regatta_id,
            self.path.display()
        );
        Ok(snapshot)
    }

    fn name(&self) -> &'static str {
        "snapshot-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use standings::{RaceResult, Team};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}.json", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_reads_snapshot_file() {
        let path = temp_path("regatta-snapshot-read");
        tokio::fs::write(
            &path,
            r#"{
                "teams": [{"id": "a", "name": "Alpha", "regattaId": "r-1"}],
                "results": [{"teamId": "a", "raceNumber": 1, "position": 1, "points": 1}]
            }"#,
        )
        .await
        .unwrap();

        let snapshot = SnapshotFile::new(&path).snapshot("r-1").await.unwrap();
        assert_eq!(snapshot.teams[0].name, "Alpha");
        assert_eq!(snapshot.results, vec![RaceResult::new("a", 1, 1, 1)]);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let path = temp_path("regatta-snapshot-write");
        let file = SnapshotFile::new(&path);
        let snapshot = RegattaSnapshot::new(
            vec![Team::new("a", "Alpha"), Team::new("b", "Bravo")],
            vec![RaceResult::new("b", 2, 1, 1)],
        );

        file.write(&snapshot).await.unwrap();
        assert_eq!(file.snapshot("r-1").await.unwrap(), snapshot);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let file = SnapshotFile::new(temp_path("regatta-snapshot-missing"));
        assert!(matches!(
            file.snapshot("r-1").await,
            Err(crate::ClientError::Io(_))
        ));
    }
}
