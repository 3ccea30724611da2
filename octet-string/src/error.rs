use thiserror::Error;

/// The errors that can occur when building or slicing an [`OctetString`](crate::OctetString)
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A slice reached past the end of the octet string
    #[error("range {start}..{start}+{len} exceeds octet string of length {available}")]
    Range {
        /// First requested index
        start: usize,
        /// Requested number of octets
        len: usize,
        /// Length of the octet string being sliced
        available: usize,
    },
    /// The length implied by a slice start was negative
    #[error("slice start {start} is past the end of an octet string of length {available}")]
    SizeComputation {
        /// Requested start index
        start: usize,
        /// Length of the octet string being sliced
        available: usize,
    },
    /// The input was not an even number of hexadecimal digits
    #[error("invalid hex string")]
    InvalidHex,
    /// The input contained a non-ASCII character
    #[error("non-ASCII data at offset {0}")]
    NonAscii(usize),
}

/// The result type for octet string operations
pub type Result<T> = core::result::Result<T, Error>;
