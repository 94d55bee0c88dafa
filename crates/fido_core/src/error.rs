//! Error taxonomy for the behavior sequencing engine.
//!
//! Parse and validation failures are distinct from collaborator failures so
//! callers can tell "the model never answered" from "the model answered badly".
//! None of these are retried here; retry is an orchestration concern.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    /// The raw model output did not contain a well-formed goal list literal.
    #[error("unparseable goal list: {0}")]
    Parse(String),

    /// The literal parsed, but the number of surviving goals is outside [1, max].
    #[error("{count} valid goals after filtering, allowed range is 1..={max}")]
    Validation { count: usize, max: usize },

    /// No path exists between two actions in the transition graph.
    #[error("no transition path from '{from}' to '{to}'")]
    Unreachable { from: String, to: String },

    /// The generative-text collaborator failed (network, timeout, empty reply).
    #[error("generative collaborator failed: {0}")]
    Collaborator(String),
}
