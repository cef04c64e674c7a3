use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which way a points total ranks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankDirection {
    /// Lower total places higher (low-point scoring).
    #[default]
    Ascending,
    Descending,
}

impl RankDirection {
    /// Orders two totals so that the better one compares as `Less`.
    pub fn compare(&self, a: i64, b: i64) -> Ordering {
        match self {
            Self::Ascending => a.cmp(&b),
            Self::Descending => b.cmp(&a),
        }
    }
}

/// Maps a finishing position to the points it is worth and says how totals rank.
pub trait ScoringSystem {
    fn points_for(&self, position: u32) -> i64;

    fn direction(&self) -> RankDirection {
        RankDirection::Ascending
    }

    fn name(&self) -> &'static str;
}

/// Points equal the finishing position; lowest total wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowPoint;

impl ScoringSystem for LowPoint {
    fn points_for(&self, position: u32) -> i64 {
        i64::from(position)
    }

    fn name(&self) -> &'static str {
        "low-point"
    }
}

/// Points read from a fixed table, `table[0]` being first place.
///
/// Positions past the end of the table score `fallback`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsTable {
    table: Vec<i64>,
    fallback: i64,
    direction: RankDirection,
}

impl PointsTable {
    pub fn new(table: Vec<i64>, fallback: i64, direction: RankDirection) -> Self {
        Self {
            table,
            fallback,
            direction,
        }
    }

    /// A high-point table where anything outside the table scores nothing.
    pub fn high_point(table: Vec<i64>) -> Self {
        Self::new(table, 0, RankDirection::Descending)
    }
}

impl ScoringSystem for PointsTable {
    fn points_for(&self, position: u32) -> i64 {
        (position as usize)
            .checked_sub(1)
            .and_then(|idx| self.table.get(idx))
            .copied()
            .unwrap_or(self.fallback)
    }

    fn direction(&self) -> RankDirection {
        self.direction
    }

    fn name(&self) -> &'static str {
        "table"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_point_equals_position() {
        assert_eq!(LowPoint.points_for(1), 1);
        assert_eq!(LowPoint.points_for(17), 17);
        assert_eq!(LowPoint.direction(), RankDirection::Ascending);
    }

    #[test]
    fn test_points_table_lookup_and_fallback() {
        let table = PointsTable::high_point(vec![10, 6, 4]);
        assert_eq!(table.points_for(1), 10);
        assert_eq!(table.points_for(3), 4);
        assert_eq!(table.points_for(4), 0);
        assert_eq!(table.points_for(0), 0);
        assert_eq!(table.direction(), RankDirection::Descending);
    }

    #[test]
    fn test_direction_compare() {
        assert_eq!(RankDirection::Ascending.compare(2, 5), Ordering::Less);
        assert_eq!(RankDirection::Descending.compare(2, 5), Ordering::Greater);
        assert_eq!(RankDirection::Descending.compare(3, 3), Ordering::Equal);
    }
}
