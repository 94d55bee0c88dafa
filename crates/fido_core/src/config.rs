//! Static configuration: vocabularies, transition adjacency, model and store
//! settings. Loaded from TOML with per-section defaults, then env overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FidoConfig {
    pub llm: LlmConfig,
    pub store: StoreConfig,
    pub behavior: BehaviorConfig,
}

impl FidoConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// sections. Env var overrides are applied afterwards.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: FidoConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, fall back to
    /// defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("FIDO_PROVIDER") {
            self.llm.provider = v;
        }
        if let Ok(v) = std::env::var("FIDO_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("FIDO_BASE_URL") {
            self.llm.base_url = Some(v);
        }
        if let Ok(v) = std::env::var("FIDO_STORE_URL") {
            self.store.base_url = v;
        }
        if let Ok(v) = std::env::var("FIDO_MAX_GOALS") {
            if let Ok(n) = v.parse() {
                self.behavior.max_goals = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: None,
            max_tokens: 512,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL the client uses to reach the sequence store.
    pub base_url: String,
    /// Bind address for `fido --serve`.
    pub host: String,
    pub port: u16,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:50007".to_string(),
            host: "0.0.0.0".to_string(),
            port: 50007,
        }
    }
}

/// The closed vocabularies and sequencing limits consumed by the engine.
///
/// The action vocabulary is the key set of `transitions`; the adjacency is
/// declared destination-first (each action lists the actions it is directly
/// reachable from).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub personality: String,
    pub emotions: Vec<String>,
    pub transitions: BTreeMap<String, Vec<String>>,
    /// Idle states the prompt asks the model to finish on.
    pub resting_states: Vec<String>,
    pub initial_action: String,
    pub seed_emotions: BTreeMap<String, f32>,
    /// Maximum surviving goals per request.
    pub max_goals: usize,
}

impl BehaviorConfig {
    pub fn actions(&self) -> Vec<String> {
        self.transitions.keys().cloned().collect()
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        let transitions: BTreeMap<String, Vec<String>> = [
            ("Super Stand", vec!["Stand"]),
            (
                "Stand",
                vec![
                    "Super Stand",
                    "Sit",
                    "Jump",
                    "Walk",
                    "Spin",
                    "Kick",
                    "Shake",
                    "Retreat",
                    "Downward Dog",
                ],
            ),
            ("Sit", vec!["Stand", "Downward Dog", "Lie Face Down"]),
            ("Lie Face Down", vec!["Lie Face Up", "Roll", "Sit"]),
            ("Lie Face Up", vec!["Lie Face Down", "Roll", "Sit"]),
            ("Walk", vec!["Stand", "Spin", "Retreat"]),
            ("Spin", vec!["Stand", "Walk"]),
            ("Paw Up", vec!["Sit"]),
            ("Kick", vec!["Stand"]),
            ("Shake", vec!["Stand"]),
            ("Roll", vec!["Lie Face Down", "Lie Face Up"]),
            ("Jump", vec!["Stand"]),
            ("Retreat", vec!["Stand", "Walk"]),
            ("Downward Dog", vec!["Stand", "Sit"]),
        ]
        .into_iter()
        .map(|(to, froms)| {
            (
                to.to_string(),
                froms.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();

        let seed_emotions: BTreeMap<String, f32> = [
            ("Happy", 0.5_f32),
            ("Curious", 0.3),
            ("Excitement", 0.2),
        ]
        .into_iter()
        .map(|(e, w)| (e.to_string(), w))
        .collect();

        Self {
            personality: "A playful, loyal, and curious dog companion.".to_string(),
            emotions: [
                "Happy",
                "Sad",
                "Curious",
                "Vigilant",
                "Fear",
                "Intimacy",
                "Confusion",
                "Self confidence",
                "Boredom",
                "Grievances",
                "Excitement",
                "Tired",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            transitions,
            resting_states: ["StandIdle", "SitIdle", "LieIdle", "WalkIdle"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            initial_action: "Sit".to_string(),
            seed_emotions,
            max_goals: 3,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
