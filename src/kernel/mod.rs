mod errors;
pub mod memory;
mod traits;

pub use errors::KernelError;
pub use memory::{MemoryKernel, MemoryTrafficLights, MemoryVehicle, MemoryVehicles};
pub use traits::{Kernel, ScenarioInfo, TrafficLightKernel, VehicleKernel};
