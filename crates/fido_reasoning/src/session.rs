//! End-to-end sequencing session: one input event in, one sequence out.
//!
//! Synchronous request/response — an event is processed start to finish
//! before the next is accepted. A session exclusively owns its profile;
//! run concurrent personalities as separate sessions.

use crate::llm::{CompletionParams, GoalModel};
use crate::prompts;
use fido_behavior::{parse_goals, ActionGraph, Sequence, SequenceBuilder, SequencingStrategy};
use fido_core::{BehaviorConfig, BehaviorError, CompanionProfile, InputEvent};
use std::sync::Arc;

pub struct BehaviorSession {
    config: BehaviorConfig,
    graph: ActionGraph,
    profile: CompanionProfile,
    model: Arc<dyn GoalModel>,
    params: CompletionParams,
    strategy: SequencingStrategy,
}

impl BehaviorSession {
    pub fn new(config: BehaviorConfig, model: Arc<dyn GoalModel>) -> Self {
        let graph = ActionGraph::from_config(&config);
        let profile = CompanionProfile::from_config(&config);
        Self {
            config,
            graph,
            profile,
            model,
            params: CompletionParams::default(),
            strategy: SequencingStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: SequencingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_params(mut self, params: CompletionParams) -> Self {
        self.params = params;
        self
    }

    pub fn profile(&self) -> &CompanionProfile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut CompanionProfile {
        &mut self.profile
    }

    /// Process one event: record it, ask the model for goals, validate them,
    /// and build the sequence.
    ///
    /// Failures leave the recorded input in place. With the pathfinder
    /// strategy a mid-build `Unreachable` can leave partial blends applied;
    /// see `SequenceBuilder::build`.
    pub async fn handle_event(&mut self, event: InputEvent) -> Result<Sequence, BehaviorError> {
        self.profile.record_input(event.clone());

        let system = prompts::system_prompt(self.profile.personality(), &self.config);
        let user = prompts::user_prompt(&event, prompts::recent_history(&self.profile));

        tracing::debug!("requesting goals for event '{}'", event.event);
        let raw = self
            .model
            .complete(&system, &user, &self.params)
            .await
            .map_err(|e| BehaviorError::Collaborator(e.to_string()))?;
        tracing::trace!("raw model output: {}", raw);

        let goals = parse_goals(
            &raw,
            &self.config.actions(),
            &self.config.emotions,
            self.config.max_goals,
        )?;
        tracing::info!(
            "validated {} goals: {:?}",
            goals.len(),
            goals.iter().map(|g| g.action.as_str()).collect::<Vec<_>>()
        );

        let builder = SequenceBuilder::with_strategy(&self.graph, self.strategy);
        builder.build(&mut self.profile, &goals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockModel;
    use anyhow::Result;
    use async_trait::async_trait;

    struct FailingModel;

    #[async_trait]
    impl GoalModel for FailingModel {
        async fn complete(&self, _: &str, _: &str, _: &CompletionParams) -> Result<String> {
            anyhow::bail!("connection reset by peer")
        }
    }

    fn session_with(response: &str) -> BehaviorSession {
        BehaviorSession::new(
            BehaviorConfig::default(),
            Arc::new(MockModel::with_response(response)),
        )
    }

    #[tokio::test]
    async fn test_event_to_sequence() {
        let mut session =
            session_with(r#"[("Jump", [("Excitement", 0.4)]), ("Sit", [("Happy", 0.25)])]"#);
        let seq = session
            .handle_event(InputEvent::with_intensity("walks into the room", 0.3))
            .await
            .unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.steps[0].action, "Jump");
        assert_eq!(session.profile().current_action(), "Sit");
        assert_eq!(session.profile().inputs().len(), 1);
    }

    #[tokio::test]
    async fn test_model_failure_is_collaborator_error() {
        let mut session =
            BehaviorSession::new(BehaviorConfig::default(), Arc::new(FailingModel));
        let err = session
            .handle_event(InputEvent::new("waves"))
            .await
            .unwrap_err();
        assert!(matches!(err, BehaviorError::Collaborator(_)));
        // The input stays recorded even when the request fails.
        assert_eq!(session.profile().inputs().len(), 1);
    }

    #[tokio::test]
    async fn test_bad_model_output_is_parse_error() {
        let mut session = session_with("I would rather chase squirrels.");
        let err = session
            .handle_event(InputEvent::new("sits down"))
            .await
            .unwrap_err();
        assert!(matches!(err, BehaviorError::Parse(_)));
    }

    #[tokio::test]
    async fn test_all_goals_filtered_is_validation_error() {
        let mut session = session_with(r#"[("Moonwalk", [("Happy", 0.5)])]"#);
        let err = session
            .handle_event(InputEvent::new("plays music"))
            .await
            .unwrap_err();
        assert!(matches!(err, BehaviorError::Validation { count: 0, .. }));
    }

    #[tokio::test]
    async fn test_history_accumulates_across_events() {
        let mut session = session_with(r#"[("Sit", [("Happy", 0.25)])]"#);
        for i in 0..3 {
            session
                .handle_event(InputEvent::new(format!("event {}", i)))
                .await
                .unwrap();
        }
        assert_eq!(session.profile().inputs().len(), 3);
        // Emotion state carried across requests within the session.
        let total: f32 = session
            .profile()
            .emotions()
            .snapshot()
            .values()
            .sum();
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn test_pathfinder_strategy_expands() {
        let mut session =
            session_with(r#"[("Sit", [("Curious", 0.3)]), ("Spin", [("Excitement", 0.4)])]"#)
                .with_strategy(SequencingStrategy::Pathfinder);
        let seq = session
            .handle_event(InputEvent::new("spins in a circle"))
            .await
            .unwrap();
        assert!(seq.len() > 2);
    }
}
