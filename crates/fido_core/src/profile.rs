//! The companion's per-session memory: personality text, emotion state,
//! input history, and the action it is currently holding.
//!
//! One profile belongs to exactly one sequencing session at a time. Nothing
//! here validates against the transition graph; that is the pathfinder's job.

use crate::config::BehaviorConfig;
use crate::emotion::EmotionState;
use serde::{Deserialize, Serialize};

/// A single interaction event from the outside world.
///
/// Free-form: no validation happens at this layer. Intensity is optional and
/// only used as a hint in the generative prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub event: String,
    pub intensity: Option<f32>,
}

impl InputEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            intensity: None,
        }
    }

    pub fn with_intensity(event: impl Into<String>, intensity: f32) -> Self {
        Self {
            event: event.into(),
            intensity: Some(intensity),
        }
    }

    /// One-line rendering for prompt assembly.
    pub fn summary(&self) -> String {
        match self.intensity {
            Some(i) => format!("{} (intensity: {:.2})", self.event, i),
            None => format!("{} (intensity: n/a)", self.event),
        }
    }
}

/// Mutable companion state carried across requests within a session.
#[derive(Debug, Clone)]
pub struct CompanionProfile {
    personality: String,
    emotions: EmotionState,
    inputs: Vec<InputEvent>,
    action: String,
}

impl CompanionProfile {
    /// Build a profile from behavior config: vocabulary, seed weights,
    /// initial action, and the default personality text.
    pub fn from_config(config: &BehaviorConfig) -> Self {
        Self {
            personality: config.personality.clone(),
            emotions: EmotionState::with_seed(config.emotions.iter().cloned(), &config.seed_emotions),
            inputs: Vec::new(),
            action: config.initial_action.clone(),
        }
    }

    pub fn personality(&self) -> &str {
        &self.personality
    }

    pub fn set_personality(&mut self, description: impl Into<String>) {
        self.personality = description.into();
    }

    /// Append an event to the history. Append-only, arrival order.
    ///
    /// History is unbounded by design; callers that run long-lived sessions
    /// should archive externally (see `recent` for the prompt window).
    pub fn record_input(&mut self, event: InputEvent) {
        self.inputs.push(event);
    }

    pub fn inputs(&self) -> &[InputEvent] {
        &self.inputs
    }

    /// The last `n` events, oldest first.
    pub fn recent(&self, n: usize) -> &[InputEvent] {
        let start = self.inputs.len().saturating_sub(n);
        &self.inputs[start..]
    }

    pub fn current_action(&self) -> &str {
        &self.action
    }

    pub fn set_action(&mut self, action: impl Into<String>) {
        self.action = action.into();
    }

    pub fn emotions(&self) -> &EmotionState {
        &self.emotions
    }

    pub fn emotions_mut(&mut self) -> &mut EmotionState {
        &mut self.emotions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BehaviorConfig;

    #[test]
    fn test_profile_seeds_from_config() {
        let profile = CompanionProfile::from_config(&BehaviorConfig::default());
        assert_eq!(profile.emotions().dominant(), Some("Happy"));
        assert_eq!(profile.current_action(), "Sit");
        assert!(!profile.personality().is_empty());
    }

    #[test]
    fn test_history_is_append_only_in_order() {
        let mut profile = CompanionProfile::from_config(&BehaviorConfig::default());
        profile.record_input(InputEvent::new("walks into the room"));
        profile.record_input(InputEvent::with_intensity("waves", 0.3));
        assert_eq!(profile.inputs().len(), 2);
        assert_eq!(profile.inputs()[0].event, "walks into the room");
        assert_eq!(profile.inputs()[1].intensity, Some(0.3));
    }

    #[test]
    fn test_recent_window() {
        let mut profile = CompanionProfile::from_config(&BehaviorConfig::default());
        for i in 0..5 {
            profile.record_input(InputEvent::new(format!("event {}", i)));
        }
        let recent = profile.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].event, "event 2");
        assert_eq!(recent[2].event, "event 4");
    }

    #[test]
    fn test_recent_larger_than_history() {
        let mut profile = CompanionProfile::from_config(&BehaviorConfig::default());
        profile.record_input(InputEvent::new("only one"));
        assert_eq!(profile.recent(10).len(), 1);
    }

    #[test]
    fn test_set_action_is_unvalidated() {
        let mut profile = CompanionProfile::from_config(&BehaviorConfig::default());
        profile.set_action("Moonwalk");
        assert_eq!(profile.current_action(), "Moonwalk");
    }

    #[test]
    fn test_event_summary() {
        let e = InputEvent::with_intensity("pets the dog", 0.5);
        assert_eq!(e.summary(), "pets the dog (intensity: 0.50)");
        let e = InputEvent::new("leaves");
        assert!(e.summary().ends_with("(intensity: n/a)"));
    }
}
