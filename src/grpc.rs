//! gRPC seam utilities.
//!
//! Domain errors map onto `tonic::Status` here; the endpoint wiring and the
//! in-process transport both use this conversion so clients see the same
//! status codes regardless of how the call traveled.

use tonic::Status;

use crate::error::ToggleError;

impl From<ToggleError> for Status {
    fn from(err: ToggleError) -> Self {
        match err {
            ToggleError::EmptyToggle | ToggleError::InvalidKey => {
                Status::invalid_argument(err.to_string())
            }
            ToggleError::NotFound => Status::not_found(err.to_string()),
            ToggleError::AlreadyExists => Status::already_exists(err.to_string()),
            ToggleError::ProhibitedToDelete => Status::failed_precondition(err.to_string()),
            ToggleError::Unavailable(_) => Status::unavailable(err.to_string()),
            ToggleError::Internal(_) => Status::internal(err.to_string()),
        }
    }
}
