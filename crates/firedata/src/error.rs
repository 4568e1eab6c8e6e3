/// Error taxonomy for one fetch of the active-fires endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// Network unreachable or non-success HTTP status.
    Transport(String),
    /// The server answered with `success: false`.
    Application(String),
    /// Body was not valid JSON or did not match the envelope shape.
    Decode(String),
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Transport(msg) => write!(f, "transport error: {msg}"),
            DataError::Application(msg) => write!(f, "server error: {msg}"),
            DataError::Decode(msg) => write!(f, "malformed fire data: {msg}"),
        }
    }
}

impl std::error::Error for DataError {}
