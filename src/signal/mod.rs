//! Traffic light state strings and their inversion.
//!
//! A state string carries one character per controlled lane group, in the
//! order the simulator reports them. SUMO uses `r` (red), `y` (amber),
//! `g` (green, yielding), `G` (green, priority) and a handful of rarer
//! codes (`s`, `u`, `o`, `O`).
//! See <https://sumo.dlr.de/docs/Simulation/Traffic_Lights.html#signal_state_definitions>.

mod errors;

use std::fmt;
use std::str::FromStr;

use crate::kernel::{Kernel, KernelError, TrafficLightKernel};

pub use errors::SignalError;

/// Light state format understood by a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalEncoding {
    #[default]
    Sumo,
}

impl FromStr for SignalEncoding {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // TraCI is the SUMO control protocol and shares its state format
            "sumo" | "traci" => Ok(SignalEncoding::Sumo),
            other => Err(SignalError::UnsupportedEncoding(other.to_string())),
        }
    }
}

impl fmt::Display for SignalEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalEncoding::Sumo => f.write_str("sumo"),
        }
    }
}

/// Returns the state that opposes `state` as much as possible.
///
/// The result only uses red and green: every green (`g` or `G`) becomes
/// `r`, and every red or amber (`r`, `y`) becomes `G`. Other characters are
/// kept as they are. The output always has the same length as the input, so
/// intersections with any number of lane groups are handled the same way.
pub fn invert_state(state: &str, encoding: SignalEncoding) -> String {
    match encoding {
        SignalEncoding::Sumo => state.chars().map(invert_sumo_signal).collect(),
    }
}

/// Parses `api` and inverts `state` with it.
pub fn invert_state_with(state: &str, api: &str) -> Result<String, SignalError> {
    let encoding = api.parse::<SignalEncoding>()?;
    Ok(invert_state(state, encoding))
}

/// Reads the current state of traffic light `id` and returns its inversion.
///
/// Nothing is written back to the kernel.
pub fn invert_traffic_light<K: Kernel + ?Sized>(
    kernel: &K,
    id: &str,
    encoding: SignalEncoding,
) -> Result<String, KernelError> {
    let old_state = kernel.traffic_light().get_state(id)?;
    Ok(invert_state(&old_state, encoding))
}

fn invert_sumo_signal(c: char) -> char {
    match c {
        'g' | 'G' => 'r',
        'y' | 'r' => 'G',
        other => other,
    }
}
