//! The MIKEY General Extension payload (RFC 3830 §6.15).
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ! Next payload  !     Type      !            Length             !
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ~                     Data                                      ~
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use crate::{Error, Result};
use octet_string::OctetString;

/// Size of the fixed header preceding the data
pub const HEADER_LEN: usize = 4;

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)*
            /// A code this crate does not name
            Other(u8),
        }

        impl From<u8> for $name {
            fn from(code: u8) -> Self {
                match code {
                    $($code => Self::$variant,)*
                    other => Self::Other(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                match value {
                    $($name::$variant => $code,)*
                    $name::Other(code) => code,
                }
            }
        }
    };
}

code_enum! {
    /// MIKEY "Next payload" codes (RFC 3830 §6.1, RFC 6043, RFC 6509)
    pub enum PayloadType {
        /// Last payload
        Last = 0,
        /// Key data transport
        Kemac = 1,
        /// Envelope data
        Pke = 2,
        /// Diffie-Hellman data
        Dh = 3,
        /// Signature
        Sign = 4,
        /// Timestamp
        Timestamp = 5,
        /// Identity
        Id = 6,
        /// Certificate
        Cert = 7,
        /// Certificate hash
        Chash = 8,
        /// Verification message
        Verification = 9,
        /// Security policy
        SecurityPolicy = 10,
        /// RAND
        Rand = 11,
        /// Error message
        ErrorMessage = 12,
        /// Identity with role (RFC 6043)
        Idr = 14,
        /// Key data sub-payload
        KeyData = 20,
        /// General extension
        GeneralExtension = 21,
        /// SAKKE encapsulated data (RFC 6509)
        Sakke = 26,
    }
}

code_enum! {
    /// General Extension type codes (RFC 3830 §6.15)
    pub enum GeneralExtensionType {
        /// Vendor specific
        VendorId = 0,
        /// SDP identifiers
        SdpIds = 1,
    }
}

/// A General Extension payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneralExtensionPayload {
    next_payload: PayloadType,
    ext_type: GeneralExtensionType,
    data: OctetString,
}

impl GeneralExtensionPayload {
    /// A vendor-specific extension that is the last payload of its message.
    #[must_use]
    pub fn new(data: impl Into<OctetString>) -> Self {
        Self::with_type(PayloadType::Last, GeneralExtensionType::VendorId, data)
    }

    /// An extension with explicit next-payload and type codes.
    #[must_use]
    pub fn with_type(
        next_payload: PayloadType,
        ext_type: GeneralExtensionType,
        data: impl Into<OctetString>,
    ) -> Self {
        Self {
            next_payload,
            ext_type,
            data: data.into(),
        }
    }

    /// Code of the payload that follows this one
    #[must_use]
    pub fn next_payload(&self) -> PayloadType {
        self.next_payload
    }

    /// Extension type
    #[must_use]
    pub fn ext_type(&self) -> GeneralExtensionType {
        self.ext_type
    }

    /// Length of the data in octets, as carried in the length field
    #[must_use]
    pub fn length(&self) -> usize {
        self.data.len()
    }

    /// The data section
    #[must_use]
    pub fn data(&self) -> &OctetString {
        &self.data
    }

    /// The leading `len` octets of a protected data section.
    ///
    /// # Errors
    /// Returns [`Error::Octets`] if the data is shorter than `len`.
    pub fn iv(&self, len: usize) -> Result<OctetString> {
        Ok(self.data.slice(0, len)?)
    }

    /// The data following a leading IV of `len` octets.
    ///
    /// # Errors
    /// Returns [`Error::Octets`] if the data is shorter than `len`.
    pub fn content(&self, iv_len: usize) -> Result<OctetString> {
        Ok(self.data.slice_from(iv_len)?)
    }

    /// Encode the header followed by the data.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the data does not fit the 16-bit length field.
    pub fn encode(&self) -> Result<OctetString> {
        let len = u16::try_from(self.data.len())
            .map_err(|_| Error::Malformed("general extension data exceeds 65535 octets"))?;

        let mut out = Vec::with_capacity(HEADER_LEN + self.data.len());
        out.push(self.next_payload.into());
        out.push(self.ext_type.into());
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&self.data);
        Ok(OctetString::new(out))
    }

    /// Decode one payload from the front of `bytes`, returning it with the unread remainder.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedPayload`] if the header or the declared data is cut short.
    pub fn decode(bytes: &[u8]) -> Result<(Self, &[u8])> {
        let truncated = |needed| Error::TruncatedPayload {
            needed,
            available: bytes.len(),
        };

        if bytes.len() < HEADER_LEN {
            return Err(truncated(HEADER_LEN));
        }
        let (header, rest) = bytes.split_at(HEADER_LEN);
        let len = usize::from(u16::from_be_bytes([header[2], header[3]]));
        if rest.len() < len {
            return Err(truncated(HEADER_LEN + len));
        }
        let (data, rest) = rest.split_at(len);

        Ok((
            Self::with_type(header[0].into(), header[1].into(), data),
            rest,
        ))
    }
}

impl TryFrom<&[u8]> for GeneralExtensionPayload {
    type Error = Error;

    /// Decode a payload that must span all of `bytes`.
    fn try_from(bytes: &[u8]) -> Result<Self> {
        match Self::decode(bytes)? {
            (payload, []) => Ok(payload),
            _ => Err(Error::Malformed("trailing octets after general extension")),
        }
    }
}
