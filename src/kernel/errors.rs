use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("unknown vehicle: {0}")]
    UnknownVehicle(String),
    #[error("unknown traffic light: {0}")]
    UnknownTrafficLight(String),
    #[error("simulator backend error: {0}")]
    Backend(String),
}
