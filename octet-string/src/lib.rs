#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::pedantic)] // Be pedantic by default

mod error;
pub use error::{Error, Result};

use core::fmt;
use core::ops::Deref;
use core::str::FromStr;

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An owned sequence of octets.
///
/// Octet strings are never mutated in place: slicing, concatenation and XOR all allocate a fresh
/// backing buffer, so two values never alias each other's storage.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OctetString(Vec<u8>);

impl OctetString {
    /// Wrap raw bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// An octet string of `len` zero octets.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self(vec![0; len])
    }

    /// Parse a hexadecimal string. ASCII whitespace is ignored, so octet groups in the layout
    /// RFCs print them in (`"997ABB1F 0A563FDA"`) parse as-is.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHex`] if the digits do not form whole octets.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits: String = s.split_ascii_whitespace().collect();
        hex::decode(digits).map(Self).map_err(|_| Error::InvalidHex)
    }

    /// Encode an ASCII string, one octet per character.
    ///
    /// # Errors
    /// Returns [`Error::NonAscii`] with the offending byte offset.
    pub fn from_ascii(s: &str) -> Result<Self> {
        match s.bytes().position(|b| !b.is_ascii()) {
            Some(pos) => Err(Error::NonAscii(pos)),
            None => Ok(Self(s.as_bytes().to_vec())),
        }
    }

    /// Lowercase hexadecimal rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Decode the octets as ASCII text.
    ///
    /// # Errors
    /// Returns [`Error::NonAscii`] if any octet is above `0x7f`.
    pub fn to_ascii(&self) -> Result<String> {
        match self.0.iter().position(|b| !b.is_ascii()) {
            Some(pos) => Err(Error::NonAscii(pos)),
            // all bytes are ASCII, so this is valid UTF-8
            None => Ok(self.0.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Number of octets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no octets at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every octet is zero. An empty string is all-zero.
    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Borrow the octets.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume `self` and return the backing buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        #[cfg(feature = "zeroize")]
        {
            let mut this = core::mem::ManuallyDrop::new(self);
            core::mem::take(&mut this.0)
        }
        #[cfg(not(feature = "zeroize"))]
        self.0
    }

    /// Everything from `start` to the end.
    ///
    /// # Errors
    /// Returns [`Error::SizeComputation`] if `start` is past the end, i.e. the remaining length
    /// would be negative.
    pub fn slice_from(&self, start: usize) -> Result<Self> {
        self.0
            .get(start..)
            .map(|s| Self(s.to_vec()))
            .ok_or(Error::SizeComputation {
                start,
                available: self.len(),
            })
    }

    /// `len` octets starting at `start`.
    ///
    /// # Errors
    /// Returns [`Error::Range`] if `start` exceeds the length or fewer than `len` octets remain.
    pub fn slice(&self, start: usize, len: usize) -> Result<Self> {
        let range_error = Error::Range {
            start,
            len,
            available: self.len(),
        };
        let end = start.checked_add(len).ok_or(range_error)?;
        self.0
            .get(start..end)
            .map(|s| Self(s.to_vec()))
            .ok_or(range_error)
    }

    /// A new octet string holding `self` followed by `other`.
    #[must_use]
    pub fn concat(&self, other: &[u8]) -> Self {
        let mut out = Vec::with_capacity(self.len() + other.len());
        out.extend_from_slice(&self.0);
        out.extend_from_slice(other);
        Self(out)
    }

    /// A new octet string with a trailing `0x00`.
    #[must_use]
    pub fn append_null_terminator(&self) -> Self {
        self.concat(&[0])
    }

    /// Left pad with zero octets to exactly `len` octets (I2OSP style).
    ///
    /// # Errors
    /// Returns [`Error::Range`] if `self` is already longer than `len`.
    pub fn left_pad(&self, len: usize) -> Result<Self> {
        let pad = len.checked_sub(self.len()).ok_or(Error::Range {
            start: 0,
            len,
            available: self.len(),
        })?;
        Ok(Self::zeroed(pad).concat(&self.0))
    }

    /// XOR with `other`, aligned on the least significant (last) octet.
    #[must_use]
    pub fn xor(&self, other: &[u8]) -> Self {
        Self(xor_bytes(&self.0, other))
    }
}

/// XOR two byte strings aligned on their least significant (last) octet.
///
/// The output is as long as the longer input; octets of the longer input with no counterpart are
/// copied through unchanged.
#[must_use]
pub fn xor_bytes(a: &[u8], b: &[u8]) -> Vec<u8> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let offset = long.len() - short.len();

    let mut out = long.to_vec();
    for (o, s) in out[offset..].iter_mut().zip(short) {
        *o ^= s;
    }
    out
}

impl fmt::Debug for OctetString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OctetString({})", self.to_hex())
    }
}

impl fmt::Display for OctetString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for OctetString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Deref for OctetString {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for OctetString {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for OctetString {
    fn from(value: [u8; N]) -> Self {
        Self(value.to_vec())
    }
}

impl From<OctetString> for Vec<u8> {
    fn from(value: OctetString) -> Self {
        value.into_vec()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for OctetString {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl Drop for OctetString {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for OctetString {}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn ascii_hex_round_trip() {
        let s = OctetString::from_ascii("test").unwrap();
        assert_eq!(s.to_hex(), "74657374");
        assert_eq!(OctetString::from_hex("74657374").unwrap(), s);
        assert_eq!(s.to_ascii().unwrap(), "test");
    }

    #[test]
    fn hex_with_whitespace() {
        let s = OctetString::from_hex("997ABB1F 0A563FDA\n  65C61198").unwrap();
        assert_eq!(s.as_bytes(), &hex!("997ABB1F0A563FDA65C61198"));
    }

    #[test]
    fn bad_input() {
        assert_eq!(OctetString::from_hex("abc"), Err(Error::InvalidHex));
        assert_eq!(OctetString::from_hex("zz"), Err(Error::InvalidHex));
        assert_eq!(OctetString::from_ascii("tést"), Err(Error::NonAscii(1)));
        assert_eq!(
            OctetString::new(vec![b'a', 0x80]).to_ascii(),
            Err(Error::NonAscii(1))
        );
    }

    #[test]
    fn slicing() {
        let s = OctetString::from(hex!("0001020304"));
        assert_eq!(s.slice_from(2).unwrap().as_bytes(), &hex!("020304"));
        assert!(s.slice_from(5).unwrap().is_empty());
        assert_eq!(
            s.slice_from(6),
            Err(Error::SizeComputation {
                start: 6,
                available: 5
            })
        );

        assert_eq!(s.slice(1, 3).unwrap().as_bytes(), &hex!("010203"));
        assert_eq!(
            s.slice(3, 3),
            Err(Error::Range {
                start: 3,
                len: 3,
                available: 5
            })
        );
        assert!(matches!(s.slice(6, 0), Err(Error::Range { .. })));
        assert!(matches!(s.slice(1, usize::MAX), Err(Error::Range { .. })));
    }

    #[test]
    fn concat_does_not_alias() {
        let a = OctetString::from(hex!("0102"));
        let b = a.concat(&hex!("03"));
        assert_eq!(a.as_bytes(), &hex!("0102"));
        assert_eq!(b.as_bytes(), &hex!("010203"));
        assert_eq!(a.append_null_terminator().as_bytes(), &hex!("010200"));
    }

    #[test]
    fn zero_tests() {
        assert!(OctetString::default().is_empty());
        assert!(OctetString::default().is_all_zero());
        assert!(OctetString::zeroed(4).is_all_zero());
        assert!(!OctetString::from(hex!("000100")).is_all_zero());
    }

    #[test]
    fn left_pad() {
        let s = OctetString::from(hex!("abcd"));
        assert_eq!(s.left_pad(4).unwrap().as_bytes(), &hex!("0000abcd"));
        assert_eq!(s.left_pad(2).unwrap(), s);
        assert!(s.left_pad(1).is_err());
    }

    #[test]
    fn xor_right_aligned() {
        let out = xor_bytes(&hex!("ff00ff"), &hex!("0f0f"));
        assert_eq!(out, hex!("ff0ff0"));
        assert_eq!(xor_bytes(&hex!("0f0f"), &hex!("ff00ff")), out);
        assert_eq!(xor_bytes(&[], &hex!("1234")), hex!("1234"));
    }

    #[test]
    fn into_vec_keeps_contents() {
        let s = OctetString::from(hex!("deadbeef"));
        assert_eq!(s.into_vec(), hex!("deadbeef").to_vec());
    }
}
