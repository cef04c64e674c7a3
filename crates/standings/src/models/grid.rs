use serde::{Deserialize, Serialize};

use super::TeamId;

/// Sparse race-by-team table built from sorted standings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsGrid {
    pub race_numbers: Vec<u32>,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub team_id: TeamId,
    pub team_name: String,
    pub total_points: i64,
    /// One cell per entry of [`StandingsGrid::race_numbers`], same order.
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum GridCell {
    Finished { position: u32, points: i64 },
    NoResult,
}

impl GridCell {
    pub fn position(&self) -> Option<u32> {
        match self {
            GridCell::Finished { position, .. } => Some(*position),
            GridCell::NoResult => None,
        }
    }
}

impl StandingsGrid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_of(&self, race_number: u32) -> Option<usize> {
        self.race_numbers.binary_search(&race_number).ok()
    }

    pub fn cell(&self, team_id: &TeamId, race_number: u32) -> Option<GridCell> {
        let column = self.column_of(race_number)?;
        self.rows
            .iter()
            .find(|row| &row.team_id == team_id)
            .and_then(|row| row.cells.get(column).copied())
    }
}
