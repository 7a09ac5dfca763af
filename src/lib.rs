//! Reinforcement-learning environments for traffic signal control.
//!
//! The simulator itself stays outside this crate: environments talk to it
//! through the [`kernel::Kernel`] trait, which a host implements on top of
//! its simulator connection.

pub mod config;
pub mod env;
pub mod issy;
pub mod kernel;
#[cfg(feature = "python")]
pub mod python;
pub mod rollout;
pub mod signal;
pub mod spaces;

pub use config::{ConfigError, EnvParams, IssyParams};
pub use env::{Env, EnvError, ErrorKind, StepInfo, TrajectoryShard, VecEnv};
pub use issy::IssyEnv;
pub use kernel::{Kernel, KernelError, MemoryKernel};
pub use signal::{SignalEncoding, SignalError, invert_state};
