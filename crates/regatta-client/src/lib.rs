pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod report;
pub mod sources;
pub mod traits;

pub use client::BackendClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use report::{StandingsReport, fetch_report};
pub use sources::SnapshotFile;
pub use traits::ResultsSource;
