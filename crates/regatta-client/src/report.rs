use serde::Serialize;
use standings::{
    RegattaSummary, ScoringSystem, StandingsGrid, TeamStanding, build_standings_grid,
    compute_standings_with,
};
use tracing::info;

use crate::{Result, traits::ResultsSource};

/// Ranked standings for one regatta, plus the grid and summary derived from them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsReport {
    pub regatta_id: String,
    pub scoring: &'static str,
    pub standings: Vec<TeamStanding>,
    pub grid: StandingsGrid,
    pub summary: RegattaSummary,
}

pub async fn fetch_report(
    source: &dyn ResultsSource,
    regatta_id: &str,
    scoring: &dyn ScoringSystem,
) -> Result<StandingsReport> {
    let snapshot = source.snapshot(regatta_id).await?;
    let standings = compute_standings_with(&snapshot.teams, &snapshot.results, scoring)?;
    let grid = build_standings_grid(&standings);
    let summary = RegattaSummary::from_standings(&standings);

    info!(
        "Standings for regatta {} via {}: {} teams, {} races",
        regatta_id,
        source.name(),
        summary.teams,
        summary.races_completed
    );

    Ok(StandingsReport {
        regatta_id: regatta_id.to_string(),
        scoring: scoring.name(),
        standings,
        grid,
        summary,
    })
}
