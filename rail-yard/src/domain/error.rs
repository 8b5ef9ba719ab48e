//! Domain error types.
//!
//! Every failing yard operation reports one of these, and leaves the yard
//! exactly as it was before the call.

use super::{Direction, InvalidIdentifier, Kind};

/// Domain-level errors for validation and state transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum YardError {
    /// Malformed identifier or non-positive capacity
    #[error("validation failed: {0}")]
    Validation(String),

    /// Carriage kind does not match the train (or the requested operation)
    #[error("{subject} is {expected}, not {found}")]
    KindMismatch {
        subject: String,
        expected: Kind,
        found: Kind,
    },

    /// Operation not allowed in the current state
    #[error("not allowed: {0}")]
    State(String),

    /// Route traversal would leave the station sequence
    #[error("train {train} cannot move {direction} from {station}: end of route")]
    Boundary {
        train: String,
        direction: Direction,
        station: String,
    },

    /// Seat or volume ledger would be exceeded
    #[error("carriage {carriage} has {free} {unit} free, {requested} requested")]
    Capacity {
        carriage: String,
        unit: &'static str,
        requested: u32,
        free: u32,
    },

    /// Lookup by identifier failed
    #[error("no such {what}: {id}")]
    NotFound { what: &'static str, id: String },

    /// Attempt to remove a route's first or last station
    #[error("station {station} is an endpoint of route {route} and cannot be removed")]
    ProtectedEndpoint { route: String, station: String },
}

/// The category of a [`YardError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Type,
    State,
    Boundary,
    Capacity,
    NotFound,
}

impl YardError {
    pub(crate) fn not_found(what: &'static str, id: impl Into<String>) -> Self {
        YardError::NotFound {
            what,
            id: id.into(),
        }
    }

    pub(crate) fn state(message: impl Into<String>) -> Self {
        YardError::State(message.into())
    }

    /// Returns the error category.
    ///
    /// Endpoint removal is reported as a lookup failure: the station is not
    /// among the route's removable stations.
    pub fn kind(&self) -> ErrorKind {
        match self {
            YardError::Validation(_) => ErrorKind::Validation,
            YardError::KindMismatch { .. } => ErrorKind::Type,
            YardError::State(_) => ErrorKind::State,
            YardError::Boundary { .. } => ErrorKind::Boundary,
            YardError::Capacity { .. } => ErrorKind::Capacity,
            YardError::NotFound { .. } | YardError::ProtectedEndpoint { .. } => {
                ErrorKind::NotFound
            }
        }
    }
}

impl From<InvalidIdentifier> for YardError {
    fn from(err: InvalidIdentifier) -> Self {
        YardError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrainNumber;

    #[test]
    fn error_display() {
        let err = YardError::Validation("capacity must be positive".into());
        assert_eq!(err.to_string(), "validation failed: capacity must be positive");

        let err = YardError::KindMismatch {
            subject: "train T-100".into(),
            expected: Kind::Cargo,
            found: Kind::Passenger,
        };
        assert_eq!(err.to_string(), "train T-100 is cargo, not passenger");

        let err = YardError::Boundary {
            train: "T-100".into(),
            direction: Direction::Forward,
            station: "B".into(),
        };
        assert_eq!(
            err.to_string(),
            "train T-100 cannot move forward from B: end of route"
        );

        let err = YardError::Capacity {
            carriage: "C-001".into(),
            unit: "volume",
            requested: 4,
            free: 3,
        };
        assert_eq!(err.to_string(), "carriage C-001 has 3 volume free, 4 requested");

        let err = YardError::not_found("station", "Nowhere");
        assert_eq!(err.to_string(), "no such station: Nowhere");

        let err = YardError::ProtectedEndpoint {
            route: "R1".into(),
            station: "A".into(),
        };
        assert_eq!(
            err.to_string(),
            "station A is an endpoint of route R1 and cannot be removed"
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(YardError::state("moving").kind(), ErrorKind::State);
        assert_eq!(
            YardError::ProtectedEndpoint {
                route: "R1".into(),
                station: "A".into()
            }
            .kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn from_invalid_identifier() {
        let err: YardError = TrainNumber::parse("x").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("invalid train number"));
    }
}
