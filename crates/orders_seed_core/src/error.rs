use thiserror::Error;

/// Every way a lifecycle invocation can fail. The `Display` output becomes the
/// `Reason` of the FAILED envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("required resource property '{0}' not supplied")]
    MissingProperty(&'static str),
    #[error("unrecognized request type '{0}'")]
    UnrecognizedRequestType(String),
    #[error("malformed lifecycle event: {0}")]
    MalformedEvent(String),
    #[error("the following were unprocessed - {0}")]
    UnprocessedWrites(String),
    #[error("{0}")]
    Store(String),
}

impl SeedError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingProperty(_) => "missing_property",
            Self::UnrecognizedRequestType(_) => "unrecognized_request_type",
            Self::MalformedEvent(_) => "malformed_event",
            Self::UnprocessedWrites(_) => "unprocessed_writes",
            Self::Store(_) => "store_error",
        }
    }
}
