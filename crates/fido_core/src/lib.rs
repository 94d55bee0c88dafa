pub mod config;
pub mod emotion;
pub mod error;
pub mod profile;

pub use config::{BehaviorConfig, FidoConfig, LlmConfig, StoreConfig};
pub use emotion::EmotionState;
pub use error::BehaviorError;
pub use profile::{CompanionProfile, InputEvent};
