use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("unsupported signal state encoding: {0}")]
    UnsupportedEncoding(String),
}
