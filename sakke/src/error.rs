use thiserror::Error;

/// The errors that can occur for SAKKE
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// No parameter set is registered under this identifier
    #[error("Unsupported SAKKE parameter set: {0}")]
    UnsupportedParameterSet(u8),
    /// The coordinates do not satisfy the curve equation
    #[error("Point is not on the curve")]
    PointNotOnCurve,
    /// The octets are not an uncompressed point of the expected length
    #[error("Invalid point encoding")]
    InvalidPointEncoding,
    /// A precondition of a curve or field computation does not hold
    #[error("Crypto computation error: {0}")]
    Computation(&'static str),
    /// A lookup table was indexed past its end
    #[error("Lookup table index {index} out of range for table of size {size}")]
    TableIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of entries in the table
        size: usize,
    },
    /// The shared secret value is not `n` bits long
    #[error("Invalid shared secret value length: {0}")]
    InvalidSsvLength(usize),
    /// The encapsulated data has the wrong length
    #[error("Invalid encapsulated data length: {0}")]
    InvalidEncapsulatedDataLength(usize),
    /// The receiver secret key does not pair with the identifier to `g`
    #[error("Receiver secret key does not match identifier and KMS public key")]
    InvalidReceiverSecretKey,
    /// The recovered SSV does not reproduce the encapsulated point
    #[error("Decapsulation failed")]
    DecapsulationFailed,
    /// Malformed octet string input
    #[error(transparent)]
    Octets(#[from] octet_string::Error),
}

/// The result type for SAKKE
pub type Result<T> = core::result::Result<T, Error>;
