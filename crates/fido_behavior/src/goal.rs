//! Goal extraction and validation from raw generative-model output.
//!
//! The model output is untrusted free text asserted to contain a goal list.
//! Validation is per-item: malformed or out-of-vocabulary items are dropped
//! silently so a partially bad response can still yield a usable subset.
//! Only the *surviving count* is strict: 1..=max or the request fails.

use crate::literal::{parse_literal, Literal};
use fido_core::BehaviorError;
use std::collections::HashSet;

/// Most emotion entries a single goal may carry.
const MAX_EMOTIONS_PER_GOAL: usize = 10;

/// Upper bound on a goal's emotion weight sum. The 0.05 over 1.0 absorbs
/// float drift from the generator, not a semantic allowance.
const WEIGHT_SUM_CEILING: f64 = 1.05;

/// A validated (action, emotion weights) pair. Only ever produced here.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub action: String,
    pub emotions: Vec<(String, f32)>,
}

/// Parse and validate raw model output into goals.
///
/// Pipeline: strip code fences, slice out the outermost `[...]`, parse the
/// literal, promote a bare tuple to a one-element list, filter items against
/// the vocabularies, then enforce the surviving-count bounds.
pub fn parse_goals(
    raw: &str,
    allowed_actions: &[String],
    allowed_emotions: &[String],
    max_goals: usize,
) -> Result<Vec<Goal>, BehaviorError> {
    let content = strip_code_fences(raw);

    let start = content
        .find('[')
        .ok_or_else(|| BehaviorError::Parse("no '[' in model output".to_string()))?;
    let end = content
        .rfind(']')
        .ok_or_else(|| BehaviorError::Parse("no ']' in model output".to_string()))?;
    if end < start {
        return Err(BehaviorError::Parse("']' precedes '['".to_string()));
    }
    let candidate = &content[start..=end];

    let literal =
        parse_literal(candidate).map_err(|e| BehaviorError::Parse(e.to_string()))?;

    // A bare singleton tuple is promoted to a one-element list.
    let items = match literal {
        Literal::List(items) => items,
        tuple @ Literal::Tuple(_) => vec![tuple],
        _ => return Err(BehaviorError::Parse("parsed value is not a list".to_string())),
    };

    let actions: HashSet<&str> = allowed_actions.iter().map(String::as_str).collect();
    let emotions: HashSet<&str> = allowed_emotions.iter().map(String::as_str).collect();

    let goals: Vec<Goal> = items
        .into_iter()
        .filter_map(|item| validate_item(item, &actions, &emotions))
        .collect();

    if goals.is_empty() || goals.len() > max_goals {
        return Err(BehaviorError::Validation {
            count: goals.len(),
            max: max_goals,
        });
    }
    Ok(goals)
}

/// Check one candidate item against the vocabularies and numeric bounds.
/// Returns `None` (silent drop) on any failure.
fn validate_item(
    item: Literal,
    actions: &HashSet<&str>,
    emotions: &HashSet<&str>,
) -> Option<Goal> {
    let Literal::Tuple(parts) = item else {
        tracing::debug!("dropping goal item: not a tuple");
        return None;
    };
    let [Literal::Str(action), Literal::List(entries)] = parts.as_slice() else {
        tracing::debug!("dropping goal item: not (action, emotion-list)");
        return None;
    };
    if !actions.contains(action.as_str()) {
        tracing::debug!("dropping goal item: unknown action '{}'", action);
        return None;
    }
    if entries.is_empty() || entries.len() > MAX_EMOTIONS_PER_GOAL {
        tracing::debug!("dropping goal '{}': {} emotion entries", action, entries.len());
        return None;
    }

    let mut weights = Vec::with_capacity(entries.len());
    for entry in entries {
        let Literal::Tuple(pair) = entry else {
            return None;
        };
        let [Literal::Str(emotion), Literal::Num(weight)] = pair.as_slice() else {
            return None;
        };
        if !emotions.contains(emotion.as_str()) {
            tracing::debug!("dropping goal '{}': unknown emotion '{}'", action, emotion);
            return None;
        }
        weights.push((emotion.clone(), *weight));
    }

    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    if !(0.0..=WEIGHT_SUM_CEILING).contains(&total) {
        tracing::debug!("dropping goal '{}': weight sum {} out of bounds", action, total);
        return None;
    }

    Some(Goal {
        action: action.clone(),
        emotions: weights.into_iter().map(|(e, w)| (e, w as f32)).collect(),
    })
}

/// Remove surrounding markdown code fences, if present.
fn strip_code_fences(raw: &str) -> &str {
    let mut content = raw.trim();
    if let Some(rest) = content.strip_prefix("```") {
        // Drop the fence line (possibly carrying a language tag). A one-line
        // fence has no newline; keep the remainder as-is in that case.
        content = rest.split_once('\n').map_or(rest, |(_, body)| body);
    }
    if let Some(rest) = content.trim_end().strip_suffix("```") {
        content = rest;
    }
    content.trim()
}
