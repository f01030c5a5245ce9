use std::time::Duration;

/// Failures raised by the P18 codec and the link underneath it.
///
/// Field width mismatches are deliberately absent: they are logged while
/// decoding and never abort a decode.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid command id {0}")]
    InvalidCommand(u16),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid response: {0}")]
    MalformedResponse(String),

    #[error("inverter rejected the set command")]
    SetCommandFailure,

    #[error("CRC mismatch: received {actual:#06x}, calculated {expected:#06x}")]
    CrcMismatch { expected: u16, actual: u16 },

    #[error("no response within {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
