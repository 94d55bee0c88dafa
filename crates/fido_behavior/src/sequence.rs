//! Sequence building: goals in, ordered (action, emotion snapshot) steps out.
//!
//! Two strategies share one interface. `DirectBlend` (the default) treats
//! goals as already adjacent and emits exactly one step per goal.
//! `Pathfinder` inserts the shortest transition path between consecutive
//! goals, so the output can be longer than the goal list. In both, the
//! profile's emotion state mutates cumulatively across the call, so later
//! snapshots reflect all earlier blends.

use crate::goal::Goal;
use crate::graph::ActionGraph;
use fido_core::{BehaviorError, CompanionProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One renderable step: an action plus the emotion vector snapshot taken
/// right after that action's blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceStep {
    pub action: String,
    pub emotions: BTreeMap<String, f32>,
}

/// The final artifact handed to the store. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub steps: Vec<SequenceStep>,
}

impl Sequence {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequenceStep> {
        self.steps.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencingStrategy {
    /// One blend and one step per goal, in goal order.
    #[default]
    DirectBlend,
    /// Connect consecutive goals through the transition graph.
    Pathfinder,
}

pub struct SequenceBuilder<'a> {
    graph: &'a ActionGraph,
    strategy: SequencingStrategy,
}

impl<'a> SequenceBuilder<'a> {
    pub fn new(graph: &'a ActionGraph) -> Self {
        Self {
            graph,
            strategy: SequencingStrategy::default(),
        }
    }

    pub fn with_strategy(graph: &'a ActionGraph, strategy: SequencingStrategy) -> Self {
        Self { graph, strategy }
    }

    pub fn strategy(&self) -> SequencingStrategy {
        self.strategy
    }

    /// Build the sequence, blending each goal's emotions into the profile.
    ///
    /// On success the profile's current action is the last emitted action.
    /// On a pathfinder `Unreachable` error the profile keeps whatever blends
    /// were applied for the completed segments; callers that need rollback
    /// should snapshot the profile first.
    pub fn build(
        &self,
        profile: &mut CompanionProfile,
        goals: &[Goal],
    ) -> Result<Sequence, BehaviorError> {
        let steps = match (self.strategy, goals.len()) {
            (_, 0) => Vec::new(),
            // A single goal never needs pathfinding.
            (_, 1) | (SequencingStrategy::DirectBlend, _) => {
                let mut steps = Vec::with_capacity(goals.len());
                for goal in goals {
                    steps.push(blend_step(profile, &goal.action, &goal.emotions));
                }
                steps
            }
            (SequencingStrategy::Pathfinder, _) => self.build_pathfinder(profile, goals)?,
        };

        if let Some(last) = steps.last() {
            profile.set_action(last.action.clone());
        }
        tracing::debug!("built sequence with {} steps", steps.len());
        Ok(Sequence { steps })
    }

    /// Walk consecutive goal pairs through the graph. Every goal blends its
    /// own emotions exactly once, at its own node, and always emits a step
    /// (so the output is never shorter than the goal list, even for adjacent
    /// or repeated goals). Interior transition nodes between two goals carry
    /// the earlier goal's emotions.
    fn build_pathfinder(
        &self,
        profile: &mut CompanionProfile,
        goals: &[Goal],
    ) -> Result<Vec<SequenceStep>, BehaviorError> {
        let mut steps = Vec::with_capacity(goals.len());
        let first = &goals[0];
        steps.push(blend_step(profile, &first.action, &first.emotions));
        for pair in goals.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let path = self.graph.shortest_path(&from.action, &to.action).ok_or(
                BehaviorError::Unreachable {
                    from: from.action.clone(),
                    to: to.action.clone(),
                },
            )?;
            if path.len() > 2 {
                for node in &path[1..path.len() - 1] {
                    steps.push(blend_step(profile, node, &from.emotions));
                }
            }
            steps.push(blend_step(profile, &to.action, &to.emotions));
        }
        Ok(steps)
    }
}

fn blend_step(
    profile: &mut CompanionProfile,
    action: &str,
    emotions: &[(String, f32)],
) -> SequenceStep {
    profile
        .emotions_mut()
        .blend(emotions.iter().map(|(e, w)| (e.as_str(), *w)));
    SequenceStep {
        action: action.to_string(),
        emotions: profile.emotions().snapshot(),
    }
}
