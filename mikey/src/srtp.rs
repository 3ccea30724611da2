//! SRTP master key material derived from a TGK (RFC 3830 §4.1.3, §4.1.4).

use crate::prf::Prf;
use crate::Result;
use hmac::digest::core_api::BlockSizeUser;
use hmac::digest::Digest;
use octet_string::OctetString;

#[cfg(feature = "zeroize")]
use zeroize::ZeroizeOnDrop;

/// Length of the SRTP master key in bits
pub const MASTER_KEY_BITS: usize = 128;

/// Length of the SRTP master salt in bits
pub const MASTER_SALT_BITS: usize = 112;

/// The purpose of a derived key, selecting the PRF label constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyLabel {
    /// TEK, used as the SRTP master key
    TrafficEncryptionKey,
    /// Salting key, used as the SRTP master salt
    SaltingKey,
    /// Authentication key for the MIKEY KEMAC
    AuthenticationKey,
    /// Key protecting a TEK inside the KEMAC
    TekEncryptionKey,
}

impl KeyLabel {
    /// The 32-bit label constant
    #[must_use]
    pub const fn constant(self) -> u32 {
        match self {
            Self::TrafficEncryptionKey => 0x2AD0_1C64,
            Self::SaltingKey => 0x39A2_C14B,
            Self::AuthenticationKey => 0x1B5C_7973,
            Self::TekEncryptionKey => 0x1579_8CEF,
        }
    }

    /// `constant || cs_id || csb_id || rand`
    #[must_use]
    #[allow(clippy::similar_names)]
    pub fn label(self, cs_id: u8, csb_id: u32, rand: &[u8]) -> OctetString {
        let mut label = Vec::with_capacity(9 + rand.len());
        label.extend_from_slice(&self.constant().to_be_bytes());
        label.push(cs_id);
        label.extend_from_slice(&csb_id.to_be_bytes());
        label.extend_from_slice(rand);
        OctetString::new(label)
    }
}

/// Derive `bits` bits of key material for `purpose` from the whole of `tgk`.
///
/// # Errors
/// Returns [`Error::KeyDerivation`](crate::Error::KeyDerivation) for an empty TGK or a zero
/// output length.
#[allow(clippy::similar_names)]
pub fn derive_key<D>(
    tgk: &[u8],
    rand: &[u8],
    cs_id: u8,
    csb_id: u32,
    purpose: KeyLabel,
    bits: usize,
) -> Result<OctetString>
where
    D: Digest + BlockSizeUser + Clone,
{
    let label = purpose.label(cs_id, csb_id, rand);
    Prf::<D>::generate_keys(tgk, tgk.len() * 8, &label, bits)
}

/// SRTP master key, master salt and the MKI they are announced under.
#[derive(Clone, PartialEq, Eq)]
pub struct SrtpKeys {
    master_key: OctetString,
    master_salt: OctetString,
    mki: OctetString,
}

impl SrtpKeys {
    /// Derive the master key and salt for crypto session `cs_id` of the session bundle `csb_id`.
    ///
    /// # Errors
    /// As [`derive_key`].
    #[allow(clippy::similar_names)]
    pub fn derive<D>(
        tgk: &[u8],
        rand: &[u8],
        cs_id: u8,
        csb_id: u32,
        mki: impl Into<OctetString>,
    ) -> Result<Self>
    where
        D: Digest + BlockSizeUser + Clone,
    {
        Ok(Self {
            master_key: derive_key::<D>(
                tgk,
                rand,
                cs_id,
                csb_id,
                KeyLabel::TrafficEncryptionKey,
                MASTER_KEY_BITS,
            )?,
            master_salt: derive_key::<D>(
                tgk,
                rand,
                cs_id,
                csb_id,
                KeyLabel::SaltingKey,
                MASTER_SALT_BITS,
            )?,
            mki: mki.into(),
        })
    }

    /// The 128-bit master key
    #[must_use]
    pub fn master_key(&self) -> &OctetString {
        &self.master_key
    }

    /// The 112-bit master salt
    #[must_use]
    pub fn master_salt(&self) -> &OctetString {
        &self.master_salt
    }

    /// The master key identifier, as supplied
    #[must_use]
    pub fn mki(&self) -> &OctetString {
        &self.mki
    }
}

impl core::fmt::Debug for SrtpKeys {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SrtpKeys")
            .field("mki", &self.mki)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for SrtpKeys {}
