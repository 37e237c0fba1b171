//! Error types for the Switchboard client library.

use tonic::{Code, Status};

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Failed to establish connection to the server.
    #[error("connection failed: {0}")]
    Connection(String),

    /// gRPC error from the server.
    #[error("grpc error: {0}")]
    Grpc(Box<Status>),

    /// The circuit breaker is open and the call was not attempted.
    #[error("circuit breaker open")]
    CircuitOpen,

    /// Invalid argument provided by caller.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<Status> for ClientError {
    fn from(status: Status) -> Self {
        ClientError::Grpc(Box::new(status))
    }
}

impl ClientError {
    /// Returns the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Connection(msg) => msg.clone(),
            ClientError::Grpc(s) => s.message().to_string(),
            ClientError::CircuitOpen => "circuit breaker open".to_string(),
            ClientError::InvalidArgument(msg) => msg.clone(),
        }
    }

    /// Returns the gRPC status code if this is a gRPC error.
    pub fn code(&self) -> Option<Code> {
        match self {
            ClientError::Grpc(s) => Some(s.code()),
            _ => None,
        }
    }

    /// Returns true if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self.code(), Some(Code::NotFound))
    }

    /// Returns true if this is an "already exists" error.
    pub fn is_already_exists(&self) -> bool {
        matches!(self.code(), Some(Code::AlreadyExists))
    }

    /// Returns true if this is a "precondition failed" error.
    pub fn is_precondition_failed(&self) -> bool {
        matches!(self.code(), Some(Code::FailedPrecondition))
    }

    /// Returns true if this is an "invalid argument" error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.code(), Some(Code::InvalidArgument))
            || matches!(self, ClientError::InvalidArgument(_))
    }

    /// Returns true if the call was rejected by the open circuit breaker.
    pub fn is_circuit_open(&self) -> bool {
        matches!(self, ClientError::CircuitOpen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_display() {
        let err = ClientError::Connection("refused".to_string());
        assert_eq!(err.to_string(), "connection failed: refused");
    }

    #[test]
    fn test_grpc_error_from_status() {
        let status = Status::not_found("");
        let err: ClientError = status.into();
        assert!(matches!(err, ClientError::Grpc(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_grpc_error_code() {
        let err: ClientError = Status::already_exists("").into();
        assert_eq!(err.code(), Some(Code::AlreadyExists));
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_precondition_failed() {
        let err: ClientError = Status::failed_precondition("enabled").into();
        assert!(err.is_precondition_failed());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_argument_both_forms() {
        let grpc: ClientError = Status::invalid_argument("bad key").into();
        assert!(grpc.is_invalid_argument());

        let local = ClientError::InvalidArgument("bad key".to_string());
        assert!(local.is_invalid_argument());
        assert_eq!(local.code(), None);
    }

    #[test]
    fn test_circuit_open() {
        let err = ClientError::CircuitOpen;
        assert!(err.is_circuit_open());
        assert_eq!(err.code(), None);
    }
}
