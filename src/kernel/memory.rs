//! A kernel that keeps the whole network in memory.
//!
//! Vehicles drive at constant speed along a single coordinate and traffic
//! lights only change when commanded. Good enough to exercise an
//! environment without a simulator process.

use super::errors::KernelError;
use super::traits::{Kernel, ScenarioInfo, TrafficLightKernel, VehicleKernel};

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryVehicle {
    pub id: String,
    pub x: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTrafficLights {
    lights: Vec<(String, String)>,
    set_state_log: Vec<(String, String)>,
}

impl MemoryTrafficLights {
    /// Every `set_state` call received so far, in order.
    pub fn set_state_log(&self) -> &[(String, String)] {
        &self.set_state_log
    }

    pub fn clear_log(&mut self) {
        self.set_state_log.clear();
    }

    fn position(&self, id: &str) -> Result<usize, KernelError> {
        self.lights
            .iter()
            .position(|(light_id, _)| light_id == id)
            .ok_or_else(|| KernelError::UnknownTrafficLight(id.to_string()))
    }
}

impl TrafficLightKernel for MemoryTrafficLights {
    fn get_ids(&self) -> Result<Vec<String>, KernelError> {
        Ok(self.lights.iter().map(|(id, _)| id.clone()).collect())
    }

    fn get_state(&self, id: &str) -> Result<String, KernelError> {
        let idx = self.position(id)?;
        Ok(self.lights[idx].1.clone())
    }

    fn set_state(&mut self, id: &str, state: &str) -> Result<(), KernelError> {
        let idx = self.position(id)?;
        self.lights[idx].1 = state.to_string();
        self.set_state_log.push((id.to_string(), state.to_string()));
        Ok(())
    }

    fn num_traffic_lights(&self) -> Result<usize, KernelError> {
        Ok(self.lights.len())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryVehicles {
    vehicles: Vec<MemoryVehicle>,
}

impl MemoryVehicles {
    fn find(&self, id: &str) -> Result<&MemoryVehicle, KernelError> {
        self.vehicles
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| KernelError::UnknownVehicle(id.to_string()))
    }
}

impl VehicleKernel for MemoryVehicles {
    fn get_ids(&self) -> Result<Vec<String>, KernelError> {
        Ok(self.vehicles.iter().map(|v| v.id.clone()).collect())
    }

    fn get_x_by_id(&self, id: &str) -> Result<f64, KernelError> {
        Ok(self.find(id)?.x)
    }

    fn get_speed(&self, id: &str) -> Result<f64, KernelError> {
        Ok(self.find(id)?.speed)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryKernel {
    traffic_lights: MemoryTrafficLights,
    vehicles: MemoryVehicles,
    initial_lights: Vec<(String, String)>,
    initial_vehicles: Vec<MemoryVehicle>,
    scenario_vehicles: Option<usize>,
    step_length: f64,
    time_step: u64,
}

impl Default for MemoryKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryKernel {
    pub fn new() -> Self {
        Self {
            traffic_lights: MemoryTrafficLights::default(),
            vehicles: MemoryVehicles::default(),
            initial_lights: Vec::new(),
            initial_vehicles: Vec::new(),
            scenario_vehicles: None,
            step_length: 1.0,
            time_step: 0,
        }
    }

    pub fn with_traffic_light(mut self, id: impl Into<String>, state: impl Into<String>) -> Self {
        let light = (id.into(), state.into());
        self.initial_lights.push(light.clone());
        self.traffic_lights.lights.push(light);
        self
    }

    pub fn with_vehicle(mut self, id: impl Into<String>, x: f64, speed: f64) -> Self {
        let vehicle = MemoryVehicle {
            id: id.into(),
            x,
            speed,
        };
        self.initial_vehicles.push(vehicle.clone());
        self.vehicles.vehicles.push(vehicle);
        self
    }

    /// Overrides the scenario vehicle count, which otherwise is the number
    /// of vehicles added with [`MemoryKernel::with_vehicle`].
    pub fn with_scenario_vehicles(mut self, num_vehicles: usize) -> Self {
        self.scenario_vehicles = Some(num_vehicles);
        self
    }

    /// Seconds of simulated time per [`Kernel::simulation_step`].
    pub fn with_step_length(mut self, step_length: f64) -> Self {
        self.step_length = step_length;
        self
    }

    /// Removes a vehicle from the live network (it reappears on reset).
    pub fn remove_vehicle(&mut self, id: &str) -> Result<MemoryVehicle, KernelError> {
        let idx = self
            .vehicles
            .vehicles
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| KernelError::UnknownVehicle(id.to_string()))?;
        Ok(self.vehicles.vehicles.remove(idx))
    }

    pub fn time_step(&self) -> u64 {
        self.time_step
    }
}

impl Kernel for MemoryKernel {
    type TrafficLight = MemoryTrafficLights;
    type Vehicle = MemoryVehicles;

    fn traffic_light(&self) -> &MemoryTrafficLights {
        &self.traffic_lights
    }

    fn traffic_light_mut(&mut self) -> &mut MemoryTrafficLights {
        &mut self.traffic_lights
    }

    fn vehicle(&self) -> &MemoryVehicles {
        &self.vehicles
    }

    fn scenario(&self) -> ScenarioInfo {
        ScenarioInfo {
            num_vehicles: self
                .scenario_vehicles
                .unwrap_or(self.initial_vehicles.len()),
        }
    }

    fn simulation_step(&mut self) -> Result<(), KernelError> {
        for vehicle in &mut self.vehicles.vehicles {
            vehicle.x += vehicle.speed * self.step_length;
        }
        self.time_step += 1;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), KernelError> {
        self.traffic_lights.lights = self.initial_lights.clone();
        self.vehicles.vehicles = self.initial_vehicles.clone();
        self.time_step = 0;
        Ok(())
    }
}
