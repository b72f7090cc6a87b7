use derive_more::Display;
use dirquery_core::{
    config::ConfigError,
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError},
    query::QueryError,
    response::ResponseError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match err.class {
            ErrorClass::InvalidConfiguration => {
                ErrorKind::Query(QueryErrorKind::InvalidConfiguration)
            }
            ErrorClass::Transport => ErrorKind::Transport,
            ErrorClass::NotFound | ErrorClass::Conflict | ErrorClass::Internal => {
                ErrorKind::Internal
            }
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(
            ErrorKind::Query(QueryErrorKind::InvalidConfiguration),
            ErrorOrigin::Config,
            err.to_string(),
        )
    }
}

impl From<ResponseError> for Error {
    fn from(err: ResponseError) -> Self {
        let kind = match err {
            ResponseError::EmptyResult => QueryErrorKind::EmptyResult,
            ResponseError::MultiResult { .. } => QueryErrorKind::MultiResult,
            ResponseError::AttributeMissing { .. } => QueryErrorKind::AttributeMissing,
        };

        Self::new(ErrorKind::Query(kind), ErrorOrigin::Response, err.to_string())
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidConfiguration(err) => err.into(),
            QueryError::Response(err) => err.into(),
            QueryError::Execute(err) => err.into(),
        }
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Query(QueryErrorKind),

    /// The directory could not be reached or rejected the request.
    Transport,

    /// The caller cannot remediate this.
    Internal,
}

///
/// QueryErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum QueryErrorKind {
    /// Scope, order direction, or hydrator type was rejected.
    InvalidConfiguration,

    /// A single result was required, but nothing matched.
    EmptyResult,

    /// A single result was required, but several entries matched.
    MultiResult,

    /// The selected attribute is absent from the single result.
    AttributeMissing,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Config,
    Connection,
    Hydrator,
    Query,
    Response,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Connection => Self::Connection,
            CoreErrorOrigin::Hydrator => Self::Hydrator,
            CoreErrorOrigin::Query => Self::Query,
            CoreErrorOrigin::Response => Self::Response,
        }
    }
}
