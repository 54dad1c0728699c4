pub mod ranker;
pub mod report;
pub mod round_controller;

pub use ranker::rank_ideas;
pub use report::ReportGenerator;
pub use round_controller::{aggregate, format_check_digest, RoundController, RoundPhase};
