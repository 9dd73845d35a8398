use roarm_protocol::{ProtocolError, ValidationError};
use roarm_transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Config(#[from] crate::ConfigError),
    /// Every attempt of the round trip came back empty. Deliberately
    /// generic: the link does not let us tell a dead cable from a busy
    /// controller.
    #[error("no response from the arm after {0} attempts")]
    NoResponse(u32),
    #[error("transport session lock poisoned")]
    LockPoisoned,
    #[error("response kind does not match the issued command")]
    UnexpectedResponse,
    #[error("{0} support not compiled into this build")]
    Unsupported(&'static str),
}
