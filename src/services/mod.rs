pub mod criteria_scorer;
pub mod refinement_checker;

pub use criteria_scorer::CriteriaScorer;
pub use refinement_checker::RefinementChecker;
