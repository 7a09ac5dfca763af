use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::signal::{SignalEncoding, SignalError};

/// Vehicles observed when `beta` is not given.
pub const DEFAULT_BETA: usize = 20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse parameters: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read parameters: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParam { name: String, reason: String },
    #[error(transparent)]
    Signal(#[from] SignalError),
}

/// Parameters shared by every environment, plus a free-form bag of
/// environment specific ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvParams {
    /// Steps per episode.
    pub horizon: u64,
    /// Simulation steps run after a reset before the first observation.
    #[serde(default)]
    pub warmup_steps: u64,
    /// Clamp actions into the action space before applying them.
    #[serde(default = "default_clip_actions")]
    pub clip_actions: bool,
    #[serde(default)]
    pub additional_params: Map<String, Value>,
}

fn default_clip_actions() -> bool {
    true
}

impl Default for EnvParams {
    fn default() -> Self {
        Self {
            horizon: 500,
            warmup_steps: 0,
            clip_actions: default_clip_actions(),
            additional_params: Map::new(),
        }
    }
}

impl EnvParams {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: EnvParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon == 0 {
            return Err(ConfigError::InvalidParam {
                name: "horizon".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn with_horizon(mut self, horizon: u64) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_additional_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.additional_params.insert(name.into(), value);
        self
    }

    pub fn get_additional_param(&self, name: &str) -> Option<&Value> {
        self.additional_params.get(name)
    }
}

/// Parameters of the Issy environments, read from
/// [`EnvParams::additional_params`].
#[derive(Debug, Clone, PartialEq)]
pub struct IssyParams {
    /// Model description handed over by the training setup. Kept as is.
    pub model_spec: Option<Value>,
    /// Maximum number of vehicles the agent observes.
    pub beta: usize,
    /// Reward subtracted per traffic light switched in a step.
    pub switch_penalty: f32,
    pub signal_encoding: SignalEncoding,
}

impl Default for IssyParams {
    fn default() -> Self {
        Self {
            model_spec: None,
            beta: DEFAULT_BETA,
            switch_penalty: 0.0,
            signal_encoding: SignalEncoding::Sumo,
        }
    }
}

impl IssyParams {
    pub fn from_env_params(params: &EnvParams) -> Result<Self, ConfigError> {
        let mut out = IssyParams {
            model_spec: params.get_additional_param("model_spec").cloned(),
            ..IssyParams::default()
        };

        if let Some(value) = params.get_additional_param("beta") {
            let beta = value.as_u64().filter(|b| *b > 0).ok_or_else(|| {
                invalid("beta", format!("expected a positive integer, got {value}"))
            })?;
            out.beta = usize::try_from(beta)
                .map_err(|_| invalid("beta", format!("{beta} does not fit in usize")))?;
        }

        if let Some(value) = params.get_additional_param("switch_penalty") {
            let penalty = value
                .as_f64()
                .filter(|p| p.is_finite() && *p >= 0.0)
                .ok_or_else(|| {
                    invalid(
                        "switch_penalty",
                        format!("expected a non-negative number, got {value}"),
                    )
                })?;
            out.switch_penalty = penalty as f32;
        }

        if let Some(value) = params.get_additional_param("signal_encoding") {
            let name = value.as_str().ok_or_else(|| {
                invalid("signal_encoding", format!("expected a string, got {value}"))
            })?;
            out.signal_encoding = name.parse()?;
        }

        Ok(out)
    }
}

fn invalid(name: &str, reason: String) -> ConfigError {
    ConfigError::InvalidParam {
        name: name.to_string(),
        reason,
    }
}
