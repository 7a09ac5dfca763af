use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step<O, A> {
    pub obs: O,
    pub act: A,
    pub rew: f32,
    pub done: bool,
    pub info: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryShard<O, A> {
    pub id: Uuid,
    pub steps: Vec<Step<O, A>>,
    pub version: u64,
}

impl<O, A> TrajectoryShard<O, A> {
    pub fn new(version: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            steps: Vec::new(),
            version,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Undiscounted sum of rewards.
    pub fn total_reward(&self) -> f32 {
        self.steps.iter().map(|s| s.rew).sum()
    }
}

/// Per-step diagnostics reported by the traffic environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Traffic lights switched by the action.
    pub switched: usize,
    /// Vehicles in the network after the step.
    pub vehicles: usize,
    /// Steps taken since the last reset.
    pub time_step: u64,
}
