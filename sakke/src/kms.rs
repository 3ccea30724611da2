//! Key Management Service side of SAKKE (RFC 6508 §6.1.1).
//!
//! The KMS owns the master secret `z`, publishes `Z = [z]P` and issues each user the receiver
//! secret key `K_b = [(b + z)^-1]P` for their identifier `b`.

use crate::curve::AffinePoint;
use crate::field::PrimeField;
use crate::param::ParameterSet;
use crate::{Error, Result};
use core::fmt;
use num_bigint::BigUint;
use num_traits::Zero;
use octet_string::OctetString;
use rand_core::CryptoRngCore;

#[cfg(feature = "zeroize")]
use zeroize::ZeroizeOnDrop;

/// The KMS master secret `z`, an integer in `[1, q)`.
///
/// Stored as its big-endian octets so the `zeroize` feature can wipe it on drop.
#[derive(Clone)]
pub struct MasterSecret {
    params: &'static ParameterSet,
    z: OctetString,
}

impl MasterSecret {
    /// Wrap an existing master secret.
    ///
    /// # Errors
    /// Returns [`Error::Computation`] unless `0 < z < q`.
    pub fn new(params: &'static ParameterSet, z: &[u8]) -> Result<Self> {
        let value = BigUint::from_bytes_be(z);
        if value.is_zero() || &value >= params.q() {
            return Err(Error::Computation("master secret out of range"));
        }
        Ok(Self {
            params,
            z: OctetString::new(z),
        })
    }

    /// Draw a master secret uniformly from `[1, q)` by rejection sampling.
    #[must_use]
    pub fn random(params: &'static ParameterSet, rng: &mut impl CryptoRngCore) -> Self {
        let len = params.element_len();
        let mut buf = vec![0u8; len];
        loop {
            rng.fill_bytes(&mut buf);
            // q is a 1022-bit number; keep the top two bits clear to make acceptance likely
            if let Some(first) = buf.first_mut() {
                *first &= 0x3F;
            }
            if let Ok(secret) = Self::new(params, &buf) {
                return secret;
            }
        }
    }

    fn value(&self) -> BigUint {
        BigUint::from_bytes_be(&self.z)
    }

    /// The KMS public key `Z = [z]P`.
    #[must_use]
    pub fn public_key(&self) -> AffinePoint<PrimeField> {
        self.params.multiply_base(&self.value())
    }

    /// The receiver secret key `K_b = [(b + z)^-1 mod q]P` for the identifier `b`.
    ///
    /// # Errors
    /// Returns [`Error::Computation`] in the negligible case `b + z ≡ 0 mod q`.
    pub fn extract_receiver_secret_key(
        &self,
        identifier: &[u8],
    ) -> Result<AffinePoint<PrimeField>> {
        let q = self.params.q();
        let b = BigUint::from_bytes_be(identifier);
        let inverse = ((b + self.value()) % q)
            .modinv(q)
            .ok_or(Error::Computation("identifier is the negated master secret"))?;
        Ok(self.params.multiply_base(&inverse))
    }
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterSecret")
            .field("params", &self.params.id())
            .finish_non_exhaustive()
    }
}

// `z` is an `OctetString`, which wipes itself
#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for MasterSecret {}
