pub mod check;
pub mod evaluation;
pub mod idea;
pub mod loaders;
pub mod message;

pub use check::CheckedIdea;
pub use evaluation::{Criterion, CriterionScores, Evaluation, IdeaScore, ScoredIdea};
pub use idea::{Idea, Review, ReviewBody};
pub use loaders::{load_all_idea_batches, load_idea_batch, IdeaBatch};
pub use message::{
    CheckRequest, Dispatch, EvaluateRequest, EvaluationPayload, Outbound, Response, RoundVerdict,
};
