pub mod grid;
pub mod race_result;
pub mod regatta;
pub mod scoring;
pub mod team;
pub mod team_standing;

pub use grid::{GridCell, GridRow, StandingsGrid};
pub use race_result::RaceResult;
pub use regatta::Regatta;
pub use scoring::{LowPoint, PointsTable, RankDirection, ScoringSystem};
pub use team::{Team, TeamId};
pub use team_standing::TeamStanding;
