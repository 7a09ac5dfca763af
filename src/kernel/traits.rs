use super::errors::KernelError;

/// Read and command access to the traffic lights of the simulated network.
pub trait TrafficLightKernel {
    /// Ids of every traffic light, in a stable order.
    fn get_ids(&self) -> Result<Vec<String>, KernelError>;
    /// Current signal state string of light `id`.
    fn get_state(&self, id: &str) -> Result<String, KernelError>;
    /// Commands light `id` to display `state`.
    fn set_state(&mut self, id: &str, state: &str) -> Result<(), KernelError>;
    fn num_traffic_lights(&self) -> Result<usize, KernelError>;
}

/// Read access to the vehicles currently in the network.
pub trait VehicleKernel {
    /// Ids of the active vehicles in kernel iteration order.
    fn get_ids(&self) -> Result<Vec<String>, KernelError>;
    /// Longitudinal position of vehicle `id`.
    fn get_x_by_id(&self, id: &str) -> Result<f64, KernelError>;
    fn get_speed(&self, id: &str) -> Result<f64, KernelError>;

    /// Batched speed query. Kernels with a cheaper bulk call should override it.
    fn get_speeds(&self, ids: &[String]) -> Result<Vec<f64>, KernelError> {
        ids.iter().map(|id| self.get_speed(id)).collect()
    }
}

/// Static facts about the scenario the kernel was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioInfo {
    /// Number of vehicles the scenario is configured with.
    pub num_vehicles: usize,
}

/// Handle onto a running simulation.
///
/// The environment owns its kernel and is the only writer to it.
pub trait Kernel {
    type TrafficLight: TrafficLightKernel;
    type Vehicle: VehicleKernel;

    fn traffic_light(&self) -> &Self::TrafficLight;
    fn traffic_light_mut(&mut self) -> &mut Self::TrafficLight;
    fn vehicle(&self) -> &Self::Vehicle;
    fn scenario(&self) -> ScenarioInfo;

    /// Advances the simulation by one step.
    fn simulation_step(&mut self) -> Result<(), KernelError>;
    /// Restores the simulation to its initial configuration.
    fn reset(&mut self) -> Result<(), KernelError>;
}
