pub mod llm;
pub mod prompts;
pub mod providers;
pub mod retry;
pub mod session;

pub use llm::{CompletionParams, GoalModel};
pub use session::BehaviorSession;
