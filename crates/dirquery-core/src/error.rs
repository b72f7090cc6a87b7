use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Collaborators (connections, hydrators) report failures through this type
/// and the query layer carries it to the caller untouched.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a connection-origin transport failure.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Transport, ErrorOrigin::Connection, message)
    }

    /// Construct a hydrator-origin internal failure.
    pub fn hydrator(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Hydrator, message)
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvalidConfiguration,
    NotFound,
    Conflict,
    Transport,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidConfiguration => "invalid_configuration",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Transport => "transport",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Where an error was raised.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Query,
    Response,
    Connection,
    Hydrator,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Query => "query",
            Self::Response => "response",
            Self::Connection => "connection",
            Self::Hydrator => "hydrator",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_constructor_displays_only_the_message() {
        let err = InternalError::transport("server went away");

        assert_eq!(err.class, ErrorClass::Transport);
        assert_eq!(err.origin, ErrorOrigin::Connection);
        assert_eq!(err.to_string(), "server went away");
    }

    #[test]
    fn hydrator_constructor_is_internal() {
        let err = InternalError::hydrator("x");

        assert_eq!(err.class, ErrorClass::Internal);
        assert_eq!(err.origin, ErrorOrigin::Hydrator);
        assert_eq!(err.origin.to_string(), "hydrator");
    }
}
