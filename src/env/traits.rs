use crate::env::errors::EnvError;

/// Episode lifecycle shared by every environment.
///
/// `step` returns `(observation, reward, done, info)`; `done` turns true on
/// the step that reaches the horizon, after which the caller resets.
pub trait Env: Send {
    type Obs: Send + Clone + 'static;
    type Act: Send + Clone + 'static;
    type Info: Send + Clone + 'static;

    /// Restarts the simulation and returns the first observation.
    fn reset(&mut self) -> Result<Self::Obs, EnvError>;
    fn step(&mut self, act: Self::Act) -> Result<(Self::Obs, f32, bool, Self::Info), EnvError>;
    fn close(&mut self) -> Result<(), EnvError>;
}
