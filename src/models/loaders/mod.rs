pub mod toml_loader;

pub use toml_loader::{load_all_idea_batches, load_idea_batch, IdeaBatch};
