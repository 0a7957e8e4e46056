use thiserror::Error;

/// Failure to extract a coordinate pair from free-form text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// No pair of numeric tokens was found.
    #[error("coordinates not found in message")]
    NoMatch,

    /// A token matched the pattern but is not a finite number.
    #[error("invalid coordinate value '{token}'")]
    InvalidNumber { token: String },

    /// Both numbers parsed but lie outside geographic bounds.
    #[error("coordinates out of range: latitude {lat} must be within [-90, 90], longitude {lng} within [-180, 180]")]
    OutOfRange { lat: f64, lng: f64 },
}

/// Failure to render a backend payload.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("malformed {what} payload: {source}")]
    MalformedPayload {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure talking to the backend API.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with anything but 200 OK.
    #[error("backend returned non-200 status: {0}")]
    NonSuccessStatus(u16),

    /// Request could not be sent or the body could not be read.
    #[error("backend request failed: {0}")]
    TransportFailure(String),
}

/// Top-level error type for camscout.
#[derive(Debug, Error)]
pub enum CamscoutError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
