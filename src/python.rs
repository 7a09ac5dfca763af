//! Python bindings.
//!
//! The Python host keeps owning the simulator connection: its kernel object
//! is wrapped in a [`PyKernel`] and every query goes back through the
//! interpreter.

use pyo3::exceptions::{PyKeyError, PyNotImplementedError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::EnvParams;
use crate::env::{Env, EnvError, ErrorKind};
use crate::issy::IssyEnv;
use crate::kernel::{Kernel, KernelError, ScenarioInfo, TrafficLightKernel, VehicleKernel};
use crate::signal;
use crate::spaces::BoxSpace;

fn backend(err: PyErr) -> KernelError {
    KernelError::Backend(err.to_string())
}

pub struct PyTrafficLights {
    inner: Py<PyAny>,
}

impl TrafficLightKernel for PyTrafficLights {
    fn get_ids(&self) -> Result<Vec<String>, KernelError> {
        Python::with_gil(|py| {
            self.inner
                .bind(py)
                .call_method0("get_ids")?
                .extract::<Vec<String>>()
        })
        .map_err(backend)
    }

    fn get_state(&self, id: &str) -> Result<String, KernelError> {
        Python::with_gil(|py| {
            self.inner
                .bind(py)
                .call_method1("get_state", (id,))?
                .extract::<String>()
        })
        .map_err(backend)
    }

    fn set_state(&mut self, id: &str, state: &str) -> Result<(), KernelError> {
        Python::with_gil(|py| {
            self.inner
                .bind(py)
                .call_method1("set_state", (id, state))
                .map(|_| ())
        })
        .map_err(backend)
    }

    fn num_traffic_lights(&self) -> Result<usize, KernelError> {
        Python::with_gil(|py| {
            self.inner
                .bind(py)
                .getattr("num_traffic_lights")?
                .extract::<usize>()
        })
        .map_err(backend)
    }
}

pub struct PyVehicles {
    inner: Py<PyAny>,
}

impl VehicleKernel for PyVehicles {
    fn get_ids(&self) -> Result<Vec<String>, KernelError> {
        Python::with_gil(|py| {
            self.inner
                .bind(py)
                .call_method0("get_ids")?
                .extract::<Vec<String>>()
        })
        .map_err(backend)
    }

    fn get_x_by_id(&self, id: &str) -> Result<f64, KernelError> {
        Python::with_gil(|py| {
            self.inner
                .bind(py)
                .call_method1("get_x_by_id", (id,))?
                .extract::<f64>()
        })
        .map_err(backend)
    }

    fn get_speed(&self, id: &str) -> Result<f64, KernelError> {
        Python::with_gil(|py| {
            self.inner
                .bind(py)
                .call_method1("get_speed", (id,))?
                .extract::<f64>()
        })
        .map_err(backend)
    }

    // The vehicle kernel accepts a list of ids and answers in one call.
    fn get_speeds(&self, ids: &[String]) -> Result<Vec<f64>, KernelError> {
        Python::with_gil(|py| {
            self.inner
                .bind(py)
                .call_method1("get_speed", (ids.to_vec(),))?
                .extract::<Vec<f64>>()
        })
        .map_err(backend)
    }
}

/// A kernel object living in the Python host.
///
/// Expects `traffic_light`, `vehicle` and `simulation` attributes, plus an
/// `update(reset)` method.
pub struct PyKernel {
    kernel: Py<PyAny>,
    simulation: Py<PyAny>,
    traffic_light: PyTrafficLights,
    vehicle: PyVehicles,
    num_vehicles: usize,
}

impl PyKernel {
    pub fn from_py(kernel: &Bound<'_, PyAny>, num_vehicles: usize) -> PyResult<Self> {
        Ok(Self {
            kernel: kernel.clone().unbind(),
            simulation: kernel.getattr("simulation")?.unbind(),
            traffic_light: PyTrafficLights {
                inner: kernel.getattr("traffic_light")?.unbind(),
            },
            vehicle: PyVehicles {
                inner: kernel.getattr("vehicle")?.unbind(),
            },
            num_vehicles,
        })
    }
}

impl Kernel for PyKernel {
    type TrafficLight = PyTrafficLights;
    type Vehicle = PyVehicles;

    fn traffic_light(&self) -> &PyTrafficLights {
        &self.traffic_light
    }

    fn traffic_light_mut(&mut self) -> &mut PyTrafficLights {
        &mut self.traffic_light
    }

    fn vehicle(&self) -> &PyVehicles {
        &self.vehicle
    }

    fn scenario(&self) -> ScenarioInfo {
        ScenarioInfo {
            num_vehicles: self.num_vehicles,
        }
    }

    fn simulation_step(&mut self) -> Result<(), KernelError> {
        Python::with_gil(|py| {
            self.simulation.bind(py).call_method0("simulation_step")?;
            self.kernel.bind(py).call_method1("update", (false,))?;
            Ok(())
        })
        .map_err(backend)
    }

    fn reset(&mut self) -> Result<(), KernelError> {
        Python::with_gil(|py| {
            self.kernel
                .bind(py)
                .call_method1("update", (true,))
                .map(|_| ())
        })
        .map_err(backend)
    }
}

impl From<EnvError> for PyErr {
    fn from(err: EnvError) -> Self {
        let msg = err.to_string();
        match err.kind() {
            ErrorKind::Unsupported => PyNotImplementedError::new_err(msg),
            ErrorKind::NotFound => PyKeyError::new_err(msg),
            ErrorKind::Backend | ErrorKind::Internal => PyRuntimeError::new_err(msg),
            ErrorKind::InvalidInput => PyValueError::new_err(msg),
        }
    }
}

fn space_to_dict<'py>(py: Python<'py>, space: &BoxSpace) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("low", space.low)?;
    dict.set_item("high", space.high)?;
    dict.set_item("shape", space.shape.clone())?;
    dict.set_item("dtype", "float32")?;
    Ok(dict)
}

#[pyclass(name = "IssyEnv")]
pub struct PyIssyEnv {
    env: IssyEnv<PyKernel>,
}

#[pymethods]
impl PyIssyEnv {
    #[new]
    #[pyo3(signature = (kernel, num_vehicles, params_json = None))]
    fn new(kernel: &Bound<'_, PyAny>, num_vehicles: usize, params_json: Option<&str>) -> PyResult<Self> {
        let env_params = match params_json {
            Some(json) => EnvParams::from_json(json).map_err(EnvError::from)?,
            None => EnvParams::default(),
        };
        let kernel = PyKernel::from_py(kernel, num_vehicles)?;
        Ok(Self {
            env: IssyEnv::new(kernel, env_params)?,
        })
    }

    #[getter]
    fn action_space<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        space_to_dict(py, &self.env.action_space()?)
    }

    #[getter]
    fn observation_space<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        space_to_dict(py, &self.env.observation_space())
    }

    /// JSON text of the model spec, if one was given.
    #[getter]
    fn model_spec(&self) -> Option<String> {
        self.env.model_spec().map(|spec| spec.to_string())
    }

    fn get_state(&self) -> PyResult<Vec<f32>> {
        Ok(self.env.get_state()?)
    }

    fn apply_rl_actions(&mut self, rl_actions: Vec<f32>) -> PyResult<usize> {
        Ok(self.env.apply_rl_actions(&rl_actions)?)
    }

    fn compute_reward(&self, rl_actions: Vec<f32>) -> PyResult<f32> {
        Ok(self.env.compute_reward(&rl_actions)?)
    }

    fn reset(&mut self) -> PyResult<Vec<f32>> {
        Ok(Env::reset(&mut self.env)?)
    }

    fn step<'py>(
        &mut self,
        py: Python<'py>,
        rl_actions: Vec<f32>,
    ) -> PyResult<(Vec<f32>, f32, bool, Bound<'py, PyDict>)> {
        let (obs, reward, done, info) = Env::step(&mut self.env, rl_actions)?;
        let dict = PyDict::new(py);
        dict.set_item("switched", info.switched)?;
        dict.set_item("vehicles", info.vehicles)?;
        dict.set_item("time_step", info.time_step)?;
        Ok((obs, reward, done, dict))
    }
}

/// Inverts a light state string. Raises `NotImplementedError` for an
/// unknown `api`.
#[pyfunction]
#[pyo3(signature = (state, api = "sumo"))]
fn invert_state(state: &str, api: &str) -> PyResult<String> {
    signal::invert_state_with(state, api).map_err(|err| PyNotImplementedError::new_err(err.to_string()))
}

/// The name of this function must match the lib.name in Cargo.toml
#[pymodule]
fn issy(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyIssyEnv>()?;
    m.add_function(wrap_pyfunction!(invert_state, m)?)?;
    Ok(())
}
