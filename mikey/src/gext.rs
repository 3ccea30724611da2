//! MCPTT content carried in a General Extension payload's data section.
//!
//! ```text
//! status (8) | reserved (16) | sub-field*
//! sub-field = tag (8) | length (16) | value (length octets)
//! ```
//!
//! Sub-fields carry the group identifier, the activation time, free text and random padding.
//! Empty text fields and zero-length padding are left out of the encoding.

use crate::payload::GeneralExtensionPayload;
use crate::{Error, Result};
use octet_string::OctetString;
use rand_core::RngCore;

const FIXED_LEN: usize = 3;
const SUB_FIELD_HEADER_LEN: usize = 3;

const TAG_GROUP_ID: u8 = 1;
const TAG_ACTIVATION_TIME: u8 = 2;
const TAG_TEXT: u8 = 3;
const TAG_PADDING: u8 = 4;

/// Decoded MCPTT General Extension content.
///
/// Padding is kept as a length only: its octets are random and regenerated on every encode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GeneralExtensionData {
    status: u8,
    reserved: u16,
    group_id: String,
    activation_time: String,
    text: String,
    padding_len: usize,
}

impl GeneralExtensionData {
    /// Content for the given MCPTT group.
    #[must_use]
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            ..Self::default()
        }
    }

    /// Set the status octet.
    #[must_use]
    pub fn with_status(mut self, status: u8) -> Self {
        self.status = status;
        self
    }

    /// Set the reserved bit-field.
    #[must_use]
    pub fn with_reserved(mut self, reserved: u16) -> Self {
        self.reserved = reserved;
        self
    }

    /// Set the activation time.
    #[must_use]
    pub fn with_activation_time(mut self, activation_time: impl Into<String>) -> Self {
        self.activation_time = activation_time.into();
        self
    }

    /// Set the free text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Request `len` octets of random padding.
    #[must_use]
    pub fn with_padding(mut self, len: usize) -> Self {
        self.padding_len = len;
        self
    }

    /// Status octet
    #[must_use]
    pub fn status(&self) -> u8 {
        self.status
    }

    /// Reserved bit-field
    #[must_use]
    pub fn reserved(&self) -> u16 {
        self.reserved
    }

    /// MCPTT group identifier
    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Activation time
    #[must_use]
    pub fn activation_time(&self) -> &str {
        &self.activation_time
    }

    /// Free text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of padding octets
    #[must_use]
    pub fn padding_len(&self) -> usize {
        self.padding_len
    }

    /// Encode, filling the padding from `rng`.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if a sub-field is longer than 65535 octets.
    pub fn encode(&self, rng: &mut impl RngCore) -> Result<OctetString> {
        let mut out = Vec::with_capacity(FIXED_LEN);
        out.push(self.status);
        out.extend_from_slice(&self.reserved.to_be_bytes());

        for (tag, value) in [
            (TAG_GROUP_ID, &self.group_id),
            (TAG_ACTIVATION_TIME, &self.activation_time),
            (TAG_TEXT, &self.text),
        ] {
            if !value.is_empty() {
                push_sub_field(&mut out, tag, value.as_bytes())?;
            }
        }

        if self.padding_len > 0 {
            let mut padding = vec![0u8; self.padding_len];
            rng.fill_bytes(&mut padding);
            push_sub_field(&mut out, TAG_PADDING, &padding)?;
        }

        Ok(OctetString::new(out))
    }

    /// Decode content produced by [`GeneralExtensionData::encode`].
    ///
    /// # Errors
    /// - [`Error::TruncatedPayload`] if the fixed fields or a sub-field are cut short
    /// - [`Error::Malformed`] for an unknown or repeated tag, or text that is not UTF-8
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < FIXED_LEN {
            return Err(Error::TruncatedPayload {
                needed: FIXED_LEN,
                available: bytes.len(),
            });
        }

        let mut data = Self {
            status: bytes[0],
            reserved: u16::from_be_bytes([bytes[1], bytes[2]]),
            ..Self::default()
        };

        let mut seen = [false; 5];
        let mut offset = FIXED_LEN;
        while offset < bytes.len() {
            let header_end = offset + SUB_FIELD_HEADER_LEN;
            let header = bytes.get(offset..header_end).ok_or(Error::TruncatedPayload {
                needed: header_end,
                available: bytes.len(),
            })?;
            let tag = header[0];
            let len = usize::from(u16::from_be_bytes([header[1], header[2]]));
            let value = bytes
                .get(header_end..header_end + len)
                .ok_or(Error::TruncatedPayload {
                    needed: header_end + len,
                    available: bytes.len(),
                })?;

            let slot = seen
                .get_mut(usize::from(tag))
                .filter(|_| tag != 0)
                .ok_or(Error::Malformed("unknown general extension sub-field"))?;
            if *slot {
                return Err(Error::Malformed("repeated general extension sub-field"));
            }
            *slot = true;

            match tag {
                TAG_GROUP_ID => data.group_id = utf8(value)?,
                TAG_ACTIVATION_TIME => data.activation_time = utf8(value)?,
                TAG_TEXT => data.text = utf8(value)?,
                _ => data.padding_len = len,
            }
            offset = header_end + len;
        }

        Ok(data)
    }

    /// Wrap the encoding in a vendor-specific General Extension payload.
    ///
    /// # Errors
    /// As [`GeneralExtensionData::encode`].
    pub fn to_payload(&self, rng: &mut impl RngCore) -> Result<GeneralExtensionPayload> {
        Ok(GeneralExtensionPayload::new(self.encode(rng)?))
    }

    /// Decode the content of a General Extension payload.
    ///
    /// # Errors
    /// As [`GeneralExtensionData::decode`].
    pub fn from_payload(payload: &GeneralExtensionPayload) -> Result<Self> {
        Self::decode(payload.data())
    }
}

fn push_sub_field(out: &mut Vec<u8>, tag: u8, value: &[u8]) -> Result<()> {
    let len = u16::try_from(value.len())
        .map_err(|_| Error::Malformed("general extension sub-field exceeds 65535 octets"))?;
    out.push(tag);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(value);
    Ok(())
}

fn utf8(value: &[u8]) -> Result<String> {
    String::from_utf8(value.to_vec())
        .map_err(|_| Error::Malformed("general extension text is not UTF-8"))
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn layout() {
        let data = GeneralExtensionData::new("grp")
            .with_status(1)
            .with_reserved(0xA55A)
            .with_text("hi");
        let bytes = data.encode(&mut rand::thread_rng()).unwrap();
        assert_eq!(
            bytes.as_bytes(),
            &hex!("01 A55A 01 0003 677270 03 0002 6869")
        );
    }

    #[test]
    fn round_trip_keeps_padding_length() {
        let data = GeneralExtensionData::new("urn:mcptt:group:42")
            .with_activation_time("2024-10-01T00:00:00Z")
            .with_text("night shift")
            .with_padding(13)
            .with_status(2);
        let mut rng = rand::thread_rng();

        let first = data.encode(&mut rng).unwrap();
        let second = data.encode(&mut rng).unwrap();
        assert_eq!(first.len(), second.len());
        assert_eq!(GeneralExtensionData::decode(&first).unwrap(), data);
        assert_eq!(GeneralExtensionData::decode(&second).unwrap(), data);
    }

    #[test]
    fn empty_fields_are_omitted() {
        let bytes = GeneralExtensionData::default()
            .encode(&mut rand::thread_rng())
            .unwrap();
        assert_eq!(bytes.as_bytes(), &[0, 0, 0]);
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(
            GeneralExtensionData::decode(&hex!("00 00")).unwrap_err(),
            Error::TruncatedPayload {
                needed: 3,
                available: 2
            }
        );
        assert_eq!(
            GeneralExtensionData::decode(&hex!("00 0000 01 00")).unwrap_err(),
            Error::TruncatedPayload {
                needed: 6,
                available: 5
            }
        );
        assert_eq!(
            GeneralExtensionData::decode(&hex!("00 0000 01 0004 6162")).unwrap_err(),
            Error::TruncatedPayload {
                needed: 10,
                available: 8
            }
        );
        assert_eq!(
            GeneralExtensionData::decode(&hex!("00 0000 09 0000")).unwrap_err(),
            Error::Malformed("unknown general extension sub-field")
        );
        assert_eq!(
            GeneralExtensionData::decode(&hex!("00 0000 00 0000")).unwrap_err(),
            Error::Malformed("unknown general extension sub-field")
        );
        assert_eq!(
            GeneralExtensionData::decode(&hex!("00 0000 03 0001 61 03 0001 62")).unwrap_err(),
            Error::Malformed("repeated general extension sub-field")
        );
        assert_eq!(
            GeneralExtensionData::decode(&hex!("00 0000 03 0001 FF")).unwrap_err(),
            Error::Malformed("general extension text is not UTF-8")
        );
    }

    #[test]
    fn payload_wrapping() {
        let data = GeneralExtensionData::new("grp").with_padding(4);
        let payload = data.to_payload(&mut rand::thread_rng()).unwrap();
        assert_eq!(payload.length(), 3 + 6 + 7);
        assert_eq!(GeneralExtensionData::from_payload(&payload).unwrap(), data);
    }
}
