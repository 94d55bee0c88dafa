pub mod goal;
pub mod graph;
pub mod literal;
pub mod sequence;

pub use goal::{parse_goals, Goal};
pub use graph::ActionGraph;
pub use sequence::{Sequence, SequenceBuilder, SequenceStep, SequencingStrategy};
