use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::models::{
    GridCell, GridRow, RaceResult, RankDirection, ScoringSystem, StandingsGrid, Team, TeamId,
    TeamStanding,
};

/// Ranks every team in `teams` by the points stored on `results`, lowest
/// total first. Teams with no results are included with a total of 0.
///
/// Equal totals go to countback; teams still level keep their order in
/// `teams`.
pub fn compute_standings(teams: &[Team], results: &[RaceResult]) -> Result<Vec<TeamStanding>> {
    aggregate(teams, results, RankDirection::Ascending)
}

/// Same as [`compute_standings`], but every result is re-scored from its
/// position under `scoring` first, and totals rank in the scoring system's
/// direction. Stored points are ignored.
pub fn compute_standings_with<S>(
    teams: &[Team],
    results: &[RaceResult],
    scoring: &S,
) -> Result<Vec<TeamStanding>>
where
    S: ScoringSystem + ?Sized,
{
    let rescored: Vec<RaceResult> = results
        .iter()
        .map(|r| RaceResult {
            points: scoring.points_for(r.position),
            ..r.clone()
        })
        .collect();

    debug!(scoring = scoring.name(), results = rescored.len(), "Re-scored results");

    aggregate(teams, &rescored, scoring.direction())
}

fn aggregate(
    teams: &[Team],
    results: &[RaceResult],
    direction: RankDirection,
) -> Result<Vec<TeamStanding>> {
    let mut by_team: HashMap<&TeamId, Vec<RaceResult>> = HashMap::with_capacity(teams.len());
    for team in teams {
        if by_team.insert(&team.id, Vec::new()).is_some() {
            return Err(ValidationError::DuplicateTeam(team.id.clone()));
        }
    }

    let mut seen = HashSet::with_capacity(results.len());
    for result in results {
        result.check_shape()?;

        let Some(team_results) = by_team.get_mut(&result.team_id) else {
            return Err(ValidationError::UnknownTeam(result.team_id.clone()));
        };

        if !seen.insert((&result.team_id, result.race_number)) {
            return Err(ValidationError::DuplicateResult {
                team_id: result.team_id.clone(),
                race_number: result.race_number,
            });
        }

        team_results.push(result.clone());
    }

    let mut ranked = Vec::with_capacity(teams.len());
    for team in teams {
        let mut team_results = by_team.remove(&team.id).unwrap_or_default();
        team_results.sort_by_key(|r| r.race_number);
        let standing = TeamStanding::new(team, team_results)?;
        let positions = standing.positions_best_first();
        ranked.push((standing, positions));
    }

    ranked.sort_by(|(a, a_positions), (b, b_positions)| {
        direction
            .compare(a.total_points, b.total_points)
            .then_with(|| countback(a_positions, b_positions))
    });

    debug!(
        teams = ranked.len(),
        results = results.len(),
        ?direction,
        "Computed standings"
    );

    Ok(ranked.into_iter().map(|(standing, _)| standing).collect())
}

/// Compares two teams' positions (each sorted best first). At the first
/// difference the better position wins; if one list runs out first, the
/// team with the extra finish wins.
fn countback(a: &[u32], b: &[u32]) -> Ordering {
    for (pa, pb) in a.iter().zip(b) {
        if pa != pb {
            return pa.cmp(pb);
        }
    }
    b.len().cmp(&a.len())
}

/// Lays standings out as a team-by-race table. Columns are every race
/// number any team has a result in, ascending.
pub fn build_standings_grid(standings: &[TeamStanding]) -> StandingsGrid {
    let race_numbers: Vec<u32> = standings
        .iter()
        .flat_map(|s| s.results.iter().map(|r| r.race_number))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rows = standings
        .iter()
        .map(|standing| GridRow {
            team_id: standing.team_id.clone(),
            team_name: standing.team_name.clone(),
            total_points: standing.total_points,
            cells: race_numbers
                .iter()
                .map(|&race| match standing.result_for(race) {
                    Some(r) => GridCell::Finished {
                        position: r.position,
                        points: r.points,
                    },
                    None => GridCell::NoResult,
                })
                .collect(),
        })
        .collect();

    StandingsGrid { race_numbers, rows }
}
