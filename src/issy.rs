//! Traffic light control for the Issy-les-Moulineaux district study.
//!
//! States
//!     The first `beta` vehicles in kernel order, observed by position and
//!     speed: every position first, then every speed. The vector is zero
//!     padded when fewer vehicles are in the network.
//!
//! Actions
//!     One value in `[0, 1]` per traffic light, in kernel order. A value that
//!     rounds to 1 switches the light to its inverted state, 0 leaves it as
//!     is.
//!
//! Rewards
//!     Mean vehicle speed, minus `switch_penalty` per switched light
//!     (no penalty unless configured).
//!
//! Termination
//!     An episode ends once the horizon is reached.

use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{EnvParams, IssyParams};
use crate::env::{Env, EnvError, StepInfo};
use crate::kernel::{Kernel, TrafficLightKernel, VehicleKernel};
use crate::signal::invert_traffic_light;
use crate::spaces::{BoxSpace, DType};

pub struct IssyEnv<K> {
    kernel: K,
    env_params: EnvParams,
    params: IssyParams,
    slots: usize,
    time_step: u64,
    warned_truncation: AtomicBool,
}

impl<K: Kernel> IssyEnv<K> {
    pub fn new(kernel: K, env_params: EnvParams) -> Result<Self, EnvError> {
        env_params.validate()?;
        let params = IssyParams::from_env_params(&env_params)?;
        let slots = params.beta.min(kernel.scenario().num_vehicles);

        info!(
            beta = params.beta,
            slots,
            horizon = env_params.horizon,
            encoding = %params.signal_encoding,
            "created issy environment"
        );

        Ok(Self {
            kernel,
            env_params,
            params,
            slots,
            time_step: 0,
            warned_truncation: AtomicBool::new(false),
        })
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn kernel_mut(&mut self) -> &mut K {
        &mut self.kernel
    }

    pub fn into_kernel(self) -> K {
        self.kernel
    }

    pub fn env_params(&self) -> &EnvParams {
        &self.env_params
    }

    pub fn params(&self) -> &IssyParams {
        &self.params
    }

    pub fn model_spec(&self) -> Option<&Value> {
        self.params.model_spec.as_ref()
    }

    /// Number of vehicles the observation has room for.
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Steps taken since the last reset.
    pub fn time_step(&self) -> u64 {
        self.time_step
    }

    pub fn action_space(&self) -> Result<BoxSpace, EnvError> {
        let num_lights = self.kernel.traffic_light().num_traffic_lights()?;
        Ok(BoxSpace::new(0.0, 1.0, vec![num_lights], DType::F32))
    }

    pub fn observation_space(&self) -> BoxSpace {
        BoxSpace::new(0.0, f32::INFINITY, vec![2 * self.slots], DType::F32)
    }

    /// Positions then speeds of the observed vehicles, `2 * slots` long.
    pub fn get_state(&self) -> Result<Vec<f32>, EnvError> {
        let vehicle = self.kernel.vehicle();
        let ids = vehicle.get_ids()?;
        if ids.len() > self.slots && !self.warned_truncation.swap(true, Ordering::Relaxed) {
            warn!(
                vehicles = ids.len(),
                slots = self.slots,
                "more vehicles than observation slots, truncating observation"
            );
        }

        let mut obs = vec![0.0; 2 * self.slots];
        for (i, id) in ids.iter().take(self.slots).enumerate() {
            obs[i] = vehicle.get_x_by_id(id)? as f32;
            obs[self.slots + i] = vehicle.get_speed(id)? as f32;
        }
        Ok(obs)
    }

    /// Inverts every traffic light whose action rounds to a non-zero value.
    ///
    /// Returns the number of lights switched. Nothing is sent to the kernel
    /// unless the whole action vector is valid.
    pub fn apply_rl_actions(&mut self, actions: &[f32]) -> Result<usize, EnvError> {
        let tl_ids = self.kernel.traffic_light().get_ids()?;
        if actions.len() != tl_ids.len() {
            return Err(EnvError::ActionLength {
                expected: tl_ids.len(),
                got: actions.len(),
            });
        }
        let decisions = self.switch_decisions(actions)?;

        let mut switched = 0;
        for (id, switch) in tl_ids.iter().zip(decisions) {
            if !switch {
                continue;
            }
            let state = self.invert_tl_state(id)?;
            debug!(tl_id = %id, state = %state, "switching traffic light");
            self.kernel.traffic_light_mut().set_state(id, &state)?;
            switched += 1;
        }
        Ok(switched)
    }

    /// Mean vehicle speed, or 0 when the network is empty, minus the switch
    /// penalty for `actions`.
    pub fn compute_reward(&self, actions: &[f32]) -> Result<f32, EnvError> {
        let vehicle = self.kernel.vehicle();
        let ids = vehicle.get_ids()?;

        let mean_speed = if ids.is_empty() {
            warn!(time_step = self.time_step, "no vehicles in the network, reward falls back to 0");
            0.0
        } else {
            let speeds = vehicle.get_speeds(&ids)?;
            speeds.iter().sum::<f64>() / speeds.len() as f64
        };

        let penalty = if self.params.switch_penalty > 0.0 {
            let switches = self
                .switch_decisions(actions)?
                .into_iter()
                .filter(|s| *s)
                .count();
            self.params.switch_penalty * switches as f32
        } else {
            0.0
        };

        Ok(mean_speed as f32 - penalty)
    }

    /// Inverted state of traffic light `id`, not yet applied.
    pub fn invert_tl_state(&self, id: &str) -> Result<String, EnvError> {
        Ok(invert_traffic_light(
            &self.kernel,
            id,
            self.params.signal_encoding,
        )?)
    }

    fn switch_decisions(&self, actions: &[f32]) -> Result<Vec<bool>, EnvError> {
        actions
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                if !value.is_finite() {
                    return Err(EnvError::InvalidAction { index, value });
                }
                let value = if self.env_params.clip_actions {
                    value.clamp(0.0, 1.0)
                } else {
                    value
                };
                // numpy rounds halves to even: 0.5 stays off, 1.5 switches
                Ok(value.round_ties_even() != 0.0)
            })
            .collect()
    }
}

impl<K: Kernel + Send + 'static> Env for IssyEnv<K> {
    type Obs = Vec<f32>;
    type Act = Vec<f32>;
    type Info = StepInfo;

    fn reset(&mut self) -> Result<Self::Obs, EnvError> {
        self.kernel.reset()?;
        self.time_step = 0;
        for _ in 0..self.env_params.warmup_steps {
            self.kernel.simulation_step()?;
        }
        info!(warmup_steps = self.env_params.warmup_steps, "reset issy environment");
        self.get_state()
    }

    fn step(&mut self, act: Self::Act) -> Result<(Self::Obs, f32, bool, Self::Info), EnvError> {
        let switched = self.apply_rl_actions(&act)?;
        self.kernel.simulation_step()?;
        self.time_step += 1;

        let obs = self.get_state()?;
        let reward = self.compute_reward(&act)?;
        let done = self.time_step >= self.env_params.horizon;
        let info = StepInfo {
            switched,
            vehicles: self.kernel.vehicle().get_ids()?.len(),
            time_step: self.time_step,
        };

        debug!(
            time_step = self.time_step,
            reward,
            switched,
            done,
            "stepped issy environment"
        );
        Ok((obs, reward, done, info))
    }

    fn close(&mut self) -> Result<(), EnvError> {
        debug!(time_step = self.time_step, "closing issy environment");
        Ok(())
    }
}
