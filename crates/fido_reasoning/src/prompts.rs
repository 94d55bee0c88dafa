//! Prompt assembly for goal generation.
//!
//! The system prompt carries the personality plus the fixed ruleset: allowed
//! actions, allowed emotions, resting states, the goal cap, and the exact
//! output grammar the parser expects. The user prompt carries the freeform
//! event text plus a short window of recent history.

use fido_core::{BehaviorConfig, CompanionProfile, InputEvent};

/// How many recent history entries to surface in the user prompt.
const HISTORY_WINDOW: usize = 3;

/// Build the system prompt: personality + output ruleset.
pub fn system_prompt(personality: &str, config: &BehaviorConfig) -> String {
    let actions = config.actions().join(", ");
    let emotions = config.emotions.join(", ");
    let resting = config.resting_states.join(", ");
    format!(
        "You are a dog with the following personality: {personality}\n\
         \n\
         Just like a real dog you respond to the user's actions and inputs, but you also \
         have a mind and intent of your own. Think of the goal the dog is trying to achieve, \
         then plan the next 1 to {max} actions that demonstrate it. Be creative and diverse; \
         do not fall back on only Walk and Sit. Finish by choosing a resting state from: {resting}.\n\
         \n\
         For each action:\n\
         - Select emotions from this list: {emotions}\n\
         - Assign each emotion a weight between 0 and 1\n\
         - Use higher weights for more intense actions; a single action's weights must never \
         total more than 1.0 (around 0.25 per emotion is typical)\n\
         - Only use actions from this list: {actions}\n\
         - Output a list of 1 to {max} entries in exactly this format:\n\
         [\n\
         (\"Action1\", [(\"Emotion1\", weight1), (\"Emotion2\", weight2)]),\n\
         (\"Action2\", [(\"Emotion3\", weight3), (\"Emotion4\", weight4)]),\n\
         ]\n\
         - Do not use any actions or emotions outside the allowed lists.\n\
         - Do not include any explanation or extra text, only the list.",
        personality = personality,
        max = config.max_goals,
        resting = resting,
        emotions = emotions,
        actions = actions,
    )
}

/// Build the user prompt from the triggering event and recent history.
pub fn user_prompt(event: &InputEvent, recent: &[InputEvent]) -> String {
    let history = if recent.is_empty() {
        "No recent interactions.".to_string()
    } else {
        recent
            .iter()
            .map(|e| format!("- {}", e.summary()))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "The human just did this: {}\n\nRecent interactions:\n{}\n\n\
         React as a dog would: consider the tone of the input, what the human might want, \
         and how your personality shapes the response.",
        event.summary(),
        history
    )
}

/// Convenience: the history window for a profile, excluding nothing.
pub fn recent_history(profile: &CompanionProfile) -> &[InputEvent] {
    profile.recent(HISTORY_WINDOW)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fido_core::BehaviorConfig;

    #[test]
    fn test_system_prompt_names_vocabularies() {
        let config = BehaviorConfig::default();
        let prompt = system_prompt("A sleepy basset hound.", &config);
        assert!(prompt.contains("A sleepy basset hound."));
        assert!(prompt.contains("Downward Dog"));
        assert!(prompt.contains("Grievances"));
        assert!(prompt.contains("SitIdle"));
        assert!(prompt.contains("1 to 3"));
    }

    #[test]
    fn test_system_prompt_reflects_goal_cap() {
        let mut config = BehaviorConfig::default();
        config.max_goals = 5;
        let prompt = system_prompt("x", &config);
        assert!(prompt.contains("1 to 5"));
    }

    #[test]
    fn test_user_prompt_with_history() {
        let event = InputEvent::with_intensity("throws a ball", 0.8);
        let recent = vec![InputEvent::new("walks into the room")];
        let prompt = user_prompt(&event, &recent);
        assert!(prompt.contains("throws a ball (intensity: 0.80)"));
        assert!(prompt.contains("- walks into the room"));
    }

    #[test]
    fn test_user_prompt_without_history() {
        let event = InputEvent::new("waves");
        let prompt = user_prompt(&event, &[]);
        assert!(prompt.contains("No recent interactions."));
    }
}
