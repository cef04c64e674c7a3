pub mod results_submission;
pub mod standings_computation;
pub mod summary;
