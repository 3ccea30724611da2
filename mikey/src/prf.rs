//! The MIKEY PRF (RFC 3830 §4.1.3) over a configurable HMAC.
//!
//! The TGK is cut into chunks of half the hash block size. Each chunk keys the `P` function,
//! and the outputs are XORed together:
//!
//! ```text
//! P(s, label, m) = MAC(s, A_1) || ... || MAC(s, A_(m-1)),   A_1 = label, A_i = MAC(s, A_(i-1))
//! PRF(tgk, label) = P(s_1, label, m) XOR ... XOR P(s_n, label, m)
//! ```

use crate::{Error, Result};
use core::marker::PhantomData;
use hmac::digest::core_api::BlockSizeUser;
use hmac::digest::{Digest, Output};
use hmac::{Mac, SimpleHmac};
use octet_string::{xor_bytes, OctetString};
use sha1::Sha1;
use sha2::Sha256;

/// Zero every bit of `bytes` past the first `bits`, which must fall in the last octet.
fn clear_unused_bits(bytes: &mut [u8], bits: usize) {
    let rem = bits % 8;
    if rem != 0 {
        if let Some(last) = bytes.last_mut() {
            *last &= 0xFF << (8 - rem);
        }
    }
}

/// The PRF instantiated with the digest `D`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Prf<D> {
    _digest: PhantomData<D>,
}

/// PRF-HMAC-SHA-1 (RFC 3830)
pub type PrfHmacSha1 = Prf<Sha1>;

/// PRF-HMAC-SHA-256 (RFC 6043)
pub type PrfHmacSha256 = Prf<Sha256>;

impl<D> Prf<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    /// Output size of the MAC in bits
    #[must_use]
    pub fn mac_bits() -> usize {
        8 * <D as Digest>::output_size()
    }

    /// Size of one TGK chunk in bits: half the hash input block
    #[must_use]
    pub fn chunk_bits() -> usize {
        8 * D::block_size() / 2
    }

    fn mac(key: &[u8], data: &[u8]) -> Result<Output<D>> {
        let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(key)
            .map_err(|_| Error::KeyDerivation("invalid HMAC key"))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes())
    }

    /// `P(key, label, m)`: `m - 1` chained MAC blocks.
    ///
    /// # Errors
    /// Returns [`Error::KeyDerivation`] if `m < 2`, which would produce no output.
    pub fn p_function(key: &[u8], label: &[u8], m: usize) -> Result<OctetString> {
        if m < 2 {
            return Err(Error::KeyDerivation("P needs m >= 2"));
        }

        let mut out = Vec::with_capacity((m - 1) * <D as Digest>::output_size());
        let mut a = Self::mac(key, label)?;
        out.extend_from_slice(&a);
        for _ in 2..m {
            a = Self::mac(key, &a)?;
            out.extend_from_slice(&a);
        }
        Ok(OctetString::new(out))
    }

    /// Derive `out_bits` bits of key material from the first `tgk_bits` bits of `tgk`.
    ///
    /// Bits of `tgk` past `tgk_bits` do not affect the output. When `out_bits` is not a multiple
    /// of 8 the unused low bits of the last octet are zero.
    ///
    /// # Errors
    /// Returns [`Error::KeyDerivation`] if either length is zero or `tgk` is shorter than
    /// `tgk_bits`.
    pub fn generate_keys(
        tgk: &[u8],
        tgk_bits: usize,
        label: &[u8],
        out_bits: usize,
    ) -> Result<OctetString> {
        if tgk_bits == 0 || out_bits == 0 {
            return Err(Error::KeyDerivation("key lengths must be positive"));
        }
        let mut tgk = tgk
            .get(..tgk_bits.div_ceil(8))
            .ok_or(Error::KeyDerivation("TGK shorter than its declared length"))?
            .to_vec();
        clear_unused_bits(&mut tgk, tgk_bits);
        let tgk = OctetString::new(tgk);

        let m = out_bits.div_ceil(Self::mac_bits()) + 1;
        let folded = tgk
            .as_bytes()
            .chunks(Self::chunk_bits() / 8)
            .try_fold(Vec::new(), |acc, chunk| {
                Ok::<_, Error>(xor_bytes(&acc, &Self::p_function(chunk, label, m)?))
            })?;

        let mut out = folded;
        out.truncate(out_bits.div_ceil(8));
        clear_unused_bits(&mut out, out_bits);
        Ok(OctetString::new(out))
    }
}

/// Runtime selection of the PRF hash, as carried by the MIKEY "PRF func" field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrfFunction {
    /// PRF-HMAC-SHA-1, code 0
    HmacSha1,
    /// PRF-HMAC-SHA-256, code 1
    HmacSha256,
}

impl PrfFunction {
    /// See [`Prf::p_function`].
    ///
    /// # Errors
    /// As [`Prf::p_function`].
    pub fn p_function(self, key: &[u8], label: &[u8], m: usize) -> Result<OctetString> {
        match self {
            Self::HmacSha1 => PrfHmacSha1::p_function(key, label, m),
            Self::HmacSha256 => PrfHmacSha256::p_function(key, label, m),
        }
    }

    /// See [`Prf::generate_keys`].
    ///
    /// # Errors
    /// As [`Prf::generate_keys`].
    pub fn generate_keys(
        self,
        tgk: &[u8],
        tgk_bits: usize,
        label: &[u8],
        out_bits: usize,
    ) -> Result<OctetString> {
        match self {
            Self::HmacSha1 => PrfHmacSha1::generate_keys(tgk, tgk_bits, label, out_bits),
            Self::HmacSha256 => PrfHmacSha256::generate_keys(tgk, tgk_bits, label, out_bits),
        }
    }
}

impl TryFrom<u8> for PrfFunction {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::HmacSha1),
            1 => Ok(Self::HmacSha256),
            _ => Err(Error::Malformed("unknown PRF function")),
        }
    }
}

impl From<PrfFunction> for u8 {
    fn from(prf: PrfFunction) -> u8 {
        match prf {
            PrfFunction::HmacSha1 => 0,
            PrfFunction::HmacSha256 => 1,
        }
    }
}
