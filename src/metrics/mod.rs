pub mod game_metrics;
pub mod run_summary;

pub use game_metrics::GameMetrics;
pub use run_summary::RunSummary;
