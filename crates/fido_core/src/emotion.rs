//! Normalized emotion state over a closed vocabulary.
//!
//! The state is a weight distribution: after every mutating operation the
//! weights either sum to 1.0 (within float tolerance) or are all zero.
//! Unknown emotion names are ignored silently — strictness lives at the
//! parser boundary, not in the state holder.

use std::collections::{BTreeMap, HashMap};

/// Tolerance used when checking the normalization invariant in tests.
pub const NORM_TOLERANCE: f32 = 1e-5;

/// A mutable, always-normalized emotion weight vector.
///
/// Vocabulary order is fixed at construction and doubles as the deterministic
/// tie-break: `dominant` and `top` prefer the emotion that appears earlier in
/// the vocabulary when weights are exactly equal.
#[derive(Debug, Clone)]
pub struct EmotionState {
    vocabulary: Vec<String>,
    weights: HashMap<String, f32>,
}

impl EmotionState {
    /// All-zero state over the given vocabulary.
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vocabulary: Vec<String> = vocabulary.into_iter().map(Into::into).collect();
        let weights = vocabulary.iter().map(|e| (e.clone(), 0.0)).collect();
        Self { vocabulary, weights }
    }

    /// State seeded with initial weights, then normalized.
    pub fn with_seed<I, S>(vocabulary: I, seed: &BTreeMap<String, f32>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self::new(vocabulary);
        state.blend(seed.iter().map(|(k, v)| (k.clone(), *v)));
        state
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn contains(&self, emotion: &str) -> bool {
        self.weights.contains_key(emotion)
    }

    /// Current weight for one emotion (0.0 for unknown names).
    pub fn weight(&self, emotion: &str) -> f32 {
        self.weights.get(emotion).copied().unwrap_or(0.0)
    }

    /// Add the given weights into the state, then normalize.
    ///
    /// Accepts anything iterable as (emotion, weight) pairs, so both ordered
    /// lists and maps work. Unknown emotions are skipped without error.
    /// Each resulting weight is clamped at zero, so a negative input can
    /// drain an emotion but never push it below zero.
    pub fn blend<I, S>(&mut self, weights: I)
    where
        I: IntoIterator<Item = (S, f32)>,
        S: AsRef<str>,
    {
        for (emotion, value) in weights {
            if let Some(w) = self.weights.get_mut(emotion.as_ref()) {
                *w = (*w + value).max(0.0);
            } else {
                tracing::debug!("ignoring unknown emotion '{}'", emotion.as_ref());
            }
        }
        self.normalize();
    }

    /// Add `delta` to a single emotion, clamping at zero, then normalize.
    /// No-op if the emotion is not in the vocabulary.
    pub fn update(&mut self, emotion: &str, delta: f32) {
        if let Some(w) = self.weights.get_mut(emotion) {
            *w = (*w + delta).max(0.0);
            self.normalize();
        }
    }

    /// Shrink every non-dominant weight by `rate`, then normalize.
    ///
    /// The dominant emotion is left untouched, so its share of the total can
    /// only grow. Ties for dominance go to the earlier vocabulary entry.
    pub fn decay(&mut self, rate: f32) {
        let rate = rate.clamp(0.0, 1.0);
        let Some(dominant) = self.dominant().map(str::to_owned) else {
            return;
        };
        for emotion in &self.vocabulary {
            if *emotion != dominant {
                if let Some(w) = self.weights.get_mut(emotion) {
                    *w *= 1.0 - rate;
                }
            }
        }
        self.normalize();
    }

    /// The highest-weighted emotion, or `None` for an empty vocabulary.
    pub fn dominant(&self) -> Option<&str> {
        let mut best: Option<(&str, f32)> = None;
        for emotion in &self.vocabulary {
            let w = self.weight(emotion);
            match best {
                Some((_, bw)) if bw >= w => {}
                _ => best = Some((emotion.as_str(), w)),
            }
        }
        best.map(|(e, _)| e)
    }

    /// The `n` highest-weighted emotions, descending. Equal weights keep
    /// vocabulary order.
    pub fn top(&self, n: usize) -> Vec<(String, f32)> {
        let mut all: Vec<(String, f32)> = self
            .vocabulary
            .iter()
            .map(|e| (e.clone(), self.weight(e)))
            .collect();
        all.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        all.truncate(n);
        all
    }

    /// Immutable snapshot of the full vector, keyed by emotion name.
    pub fn snapshot(&self) -> BTreeMap<String, f32> {
        self.vocabulary
            .iter()
            .map(|e| (e.clone(), self.weight(e)))
            .collect()
    }

    /// Sum of all weights. 0.0 or ~1.0 between operations.
    pub fn total(&self) -> f32 {
        self.vocabulary.iter().map(|e| self.weight(e)).sum()
    }

    /// Divide every weight by the total. Guarded: an all-zero vector stays
    /// all-zero rather than dividing by zero.
    fn normalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            for w in self.weights.values_mut() {
                *w /= total;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vocab() -> Vec<&'static str> {
        vec!["Happy", "Sad", "Curious", "Fear"]
    }

    fn assert_normalized(state: &EmotionState) {
        let total = state.total();
        assert!(
            total == 0.0 || (total - 1.0).abs() < NORM_TOLERANCE,
            "total was {}",
            total
        );
        for e in state.vocabulary() {
            assert!(state.weight(e) >= 0.0, "{} went negative", e);
        }
    }

    #[test]
    fn test_new_is_all_zero() {
        let state = EmotionState::new(vocab());
        assert_eq!(state.total(), 0.0);
        assert_normalized(&state);
    }

    #[test]
    fn test_blend_normalizes() {
        let mut state = EmotionState::new(vocab());
        state.blend(vec![("Happy", 0.5), ("Curious", 0.3)]);
        assert_normalized(&state);
        assert!(state.weight("Happy") > state.weight("Curious"));
    }

    #[test]
    fn test_blend_ignores_unknown_emotion() {
        let mut state = EmotionState::new(vocab());
        state.blend(vec![("Happy", 0.5), ("Zoomies", 0.5)]);
        assert_normalized(&state);
        assert!((state.weight("Happy") - 1.0).abs() < NORM_TOLERANCE);
        assert_eq!(state.weight("Zoomies"), 0.0);
    }

    #[test]
    fn test_blend_clamps_negative_weights() {
        // A mixed-sign blend can have a plausible positive sum while one
        // entry tries to drive a weight negative; the weight floors at zero
        // instead of surviving (and being amplified by) normalization.
        let mut state = EmotionState::new(vocab());
        state.blend(vec![("Happy", -0.5), ("Curious", 1.0)]);
        assert_eq!(state.weight("Happy"), 0.0);
        assert_normalized(&state);
        assert!((state.weight("Curious") - 1.0).abs() < NORM_TOLERANCE);
    }

    #[test]
    fn test_blend_empty_is_idempotent() {
        let mut state = EmotionState::new(vocab());
        state.blend(vec![("Happy", 0.6), ("Sad", 0.4)]);
        let before = state.snapshot();
        state.blend(Vec::<(String, f32)>::new());
        assert_eq!(before, state.snapshot());
    }

    #[test]
    fn test_blend_accepts_map_input() {
        let mut state = EmotionState::new(vocab());
        let mut map = BTreeMap::new();
        map.insert("Fear".to_string(), 0.8);
        state.blend(map);
        assert!((state.weight("Fear") - 1.0).abs() < NORM_TOLERANCE);
    }

    #[test]
    fn test_update_clamps_at_zero() {
        let mut state = EmotionState::new(vocab());
        state.blend(vec![("Happy", 0.5), ("Sad", 0.5)]);
        state.update("Sad", -2.0);
        assert_eq!(state.weight("Sad"), 0.0);
        assert_normalized(&state);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut state = EmotionState::new(vocab());
        state.blend(vec![("Happy", 1.0)]);
        let before = state.snapshot();
        state.update("Zoomies", 0.9);
        assert_eq!(before, state.snapshot());
    }

    #[test]
    fn test_decay_preserves_dominance() {
        let mut state = EmotionState::new(vocab());
        state.blend(vec![("Happy", 0.5), ("Curious", 0.3), ("Sad", 0.2)]);
        let happy_before = state.weight("Happy");
        state.decay(0.2);
        assert_normalized(&state);
        // Only non-dominant weights shrank, so the dominant share grows.
        assert!(state.weight("Happy") > happy_before);
        assert_eq!(state.dominant(), Some("Happy"));
    }

    #[test]
    fn test_decay_tie_breaks_by_vocabulary_order() {
        let mut state = EmotionState::new(vocab());
        state.blend(vec![("Happy", 0.5), ("Sad", 0.5)]);
        state.decay(0.1);
        // "Happy" is earlier in the vocabulary, so it wins the tie and Sad decays.
        assert_eq!(state.dominant(), Some("Happy"));
        assert!(state.weight("Happy") > state.weight("Sad"));
    }

    #[test]
    fn test_decay_on_zero_vector() {
        let mut state = EmotionState::new(vocab());
        state.decay(0.5);
        assert_eq!(state.total(), 0.0);
    }

    #[test]
    fn test_top_orders_descending() {
        let mut state = EmotionState::new(vocab());
        state.blend(vec![("Sad", 0.6), ("Happy", 0.3), ("Fear", 0.1)]);
        let top = state.top(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, "Sad");
        assert_eq!(top[1].0, "Happy");
    }

    #[test]
    fn test_with_seed_normalizes() {
        let mut seed = BTreeMap::new();
        seed.insert("Happy".to_string(), 0.5);
        seed.insert("Curious".to_string(), 0.3);
        seed.insert("Fear".to_string(), 0.2);
        let state = EmotionState::with_seed(vocab(), &seed);
        assert_normalized(&state);
        assert_eq!(state.dominant(), Some("Happy"));
    }

    proptest! {
        /// Any sequence of blend/update/decay calls keeps the invariant:
        /// total is 0.0 or ~1.0, and no weight is negative.
        #[test]
        fn prop_operations_keep_normalization(
            ops in proptest::collection::vec((0u8..3, 0usize..4, -2.0f32..2.0), 0..40)
        ) {
            let names = vocab();
            let mut state = EmotionState::new(names.clone());
            for (op, idx, value) in ops {
                match op {
                    0 => state.blend(vec![(names[idx], value)]),
                    1 => state.update(names[idx], value),
                    _ => state.decay(value.abs().min(0.99)),
                }
                let total = state.total();
                prop_assert!(total == 0.0 || (total - 1.0).abs() < NORM_TOLERANCE);
                for e in names.iter() {
                    prop_assert!(state.weight(e) >= 0.0);
                }
            }
        }
    }
}
