pub mod dto;
pub mod error;
pub mod models;
pub mod services;

pub use error::{Result, ValidationError};
pub use models::{
    GridCell, GridRow, LowPoint, PointsTable, RaceResult, RankDirection, Regatta, ScoringSystem,
    StandingsGrid, Team, TeamId, TeamStanding,
};
pub use services::results_submission::ResultsBatch;
pub use services::standings_computation::{
    build_standings_grid, compute_standings, compute_standings_with,
};
pub use services::summary::RegattaSummary;
