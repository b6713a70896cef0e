//! Error types for command parsing and the network collaborators.

/// Reasons an inbound command payload is rejected.
///
/// Rejected payloads leave the display state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The payload is not valid UTF-8.
    #[error("payload is not valid UTF-8")]
    InvalidUtf8,

    /// The brightness payload is not an integer.
    #[error("invalid brightness payload")]
    InvalidBrightness,

    /// The color payload is not three comma separated integers.
    #[error("invalid color payload (expected \"R,G,B\")")]
    InvalidColor,

    /// The sensor payload is not a JSON object of name to status.
    #[error("invalid sensor map payload")]
    InvalidSensors,

    /// The door name taken from the topic is empty.
    #[error("invalid door name")]
    InvalidDoorName,
}

/// Pub/sub transport failures.
///
/// All of them are recoverable: the supervisor marks the session
/// disconnected and reconnects with backoff.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The broker refused the connection.
    #[error("connection refused (code {0})")]
    Refused(u8),

    /// The connection was closed or reset.
    #[error("connection lost")]
    ConnectionLost,

    /// The operation did not complete in time.
    #[error("operation timed out")]
    Timeout,

    /// The broker sent something that could not be decoded.
    #[error("protocol violation")]
    Protocol,

    /// An operation needed a session but none is established.
    #[error("not connected")]
    NotConnected,
}

/// Link-layer (station network) failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The network did not associate within the bounded wait.
    #[error("link association timed out")]
    Timeout,

    /// The access point rejected the credentials.
    #[error("link authentication failed")]
    AuthFailed,

    /// The requested network was not found.
    #[error("network not found")]
    NotFound,
}
