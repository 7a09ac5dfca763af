use thiserror::Error;

use crate::config::ConfigError;
use crate::kernel::KernelError;
use crate::signal::SignalError;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("signal error: {0}")]
    Signal(#[from] SignalError),
    #[error("failed to serialize step info: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("expected {expected} actions, got {got}")]
    ActionLength { expected: usize, got: usize },
    #[error("action count {got} doesn't match environment count {expected}")]
    ActionCount { expected: usize, got: usize },
    #[error("invalid action at index {index}: {value}")]
    InvalidAction { index: usize, value: f32 },
}

/// Broad category of an [`EnvError`], used to pick the error a host
/// language raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A feature the crate does not implement, such as a signal encoding.
    Unsupported,
    /// An id the kernel does not know.
    NotFound,
    /// The simulator backend failed.
    Backend,
    /// The caller passed bad input or configuration.
    InvalidInput,
    /// Data could not be encoded.
    Internal,
}

impl EnvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnvError::Signal(SignalError::UnsupportedEncoding(_))
            | EnvError::Config(ConfigError::Signal(SignalError::UnsupportedEncoding(_))) => {
                ErrorKind::Unsupported
            }
            EnvError::Kernel(KernelError::UnknownVehicle(_))
            | EnvError::Kernel(KernelError::UnknownTrafficLight(_)) => ErrorKind::NotFound,
            EnvError::Kernel(KernelError::Backend(_)) => ErrorKind::Backend,
            EnvError::Serialize(_) => ErrorKind::Internal,
            EnvError::Config(_)
            | EnvError::ActionLength { .. }
            | EnvError::ActionCount { .. }
            | EnvError::InvalidAction { .. } => ErrorKind::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_encoding_is_unsupported_wherever_it_surfaces() {
        let direct = EnvError::from(SignalError::UnsupportedEncoding("aimsun".into()));
        assert_eq!(direct.kind(), ErrorKind::Unsupported);

        let via_config = EnvError::from(ConfigError::from(SignalError::UnsupportedEncoding(
            "aimsun".into(),
        )));
        assert_eq!(via_config.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn kernel_errors_split_by_cause() {
        assert_eq!(
            EnvError::from(KernelError::UnknownVehicle("veh0".into())).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            EnvError::from(KernelError::UnknownTrafficLight("tl0".into())).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            EnvError::from(KernelError::Backend("connection reset".into())).kind(),
            ErrorKind::Backend
        );
    }

    #[test]
    fn caller_mistakes_are_invalid_input() {
        let bad_config = ConfigError::InvalidParam {
            name: "beta".into(),
            reason: "must be positive".into(),
        };
        assert_eq!(EnvError::from(bad_config).kind(), ErrorKind::InvalidInput);
        assert_eq!(
            EnvError::ActionLength { expected: 3, got: 2 }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            EnvError::ActionCount { expected: 2, got: 1 }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            EnvError::InvalidAction { index: 0, value: f32::NAN }.kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn serialization_failures_are_internal() {
        let err = serde_json::from_str::<u8>("not json").unwrap_err();
        assert_eq!(EnvError::from(err).kind(), ErrorKind::Internal);
    }
}
