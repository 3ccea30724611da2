use thiserror::Error;

/// The errors that can occur for MIKEY key derivation and payload coding
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Key material or requested lengths are unusable
    #[error("Key derivation error: {0}")]
    KeyDerivation(&'static str),
    /// Fewer bytes remain than a length field declares
    #[error("Truncated payload: needed {needed} bytes, {available} available")]
    TruncatedPayload {
        /// Bytes the encoding calls for
        needed: usize,
        /// Bytes actually present
        available: usize,
    },
    /// The encoding is structurally invalid
    #[error("Malformed payload: {0}")]
    Malformed(&'static str),
    /// Malformed octet string input
    #[error(transparent)]
    Octets(#[from] octet_string::Error),
}

/// The result type for MIKEY operations
pub type Result<T> = core::result::Result<T, Error>;
