//! The SAKKE engine (RFC 6508 §6.2) and its `kem` trait adaptors.

use crate::curve::AffinePoint;
use crate::field::{Fp2, PrimeField};
use crate::hash::hash_to_integer_range;
use crate::pairing::tate_lichtenbaum;
use crate::param::ParameterSet;
use crate::{Error, Result};
use core::fmt;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use octet_string::OctetString;
use rand_core::CryptoRngCore;
use sha2::Sha256;

#[cfg(feature = "zeroize")]
use zeroize::ZeroizeOnDrop;

// Re-export traits from the `kem` crate
pub use ::kem::{Decapsulate, Encapsulate};

/// Build a MIKEY-SAKKE identifier `date || 0x00 || uri || 0x00` (RFC 6509 §3.2), e.g.
/// `identifier("2011-02", "tel:+447700900123")`.
#[must_use]
pub fn identifier(date: &str, uri: &str) -> OctetString {
    OctetString::new(date.as_bytes())
        .append_null_terminator()
        .concat(uri.as_bytes())
        .append_null_terminator()
}

fn to_octets(n: &BigUint, len: usize) -> Result<OctetString> {
    Ok(OctetString::new(n.to_bytes_be()).left_pad(len)?)
}

/// The Shared Secret Value: `n` random bits transported by SAKKE.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecretValue(OctetString);

impl SharedSecretValue {
    /// Wrap raw SSV octets.
    #[must_use]
    pub fn new(bytes: impl Into<OctetString>) -> Self {
        Self(bytes.into())
    }

    /// The SSV octets
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Length in octets
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the SSV is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for SharedSecretValue {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SharedSecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecretValue(..)")
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for SharedSecretValue {}

/// SAKKE Encapsulated Data `(R_(b,S), H)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncapsulatedData {
    r: AffinePoint<PrimeField>,
    h: OctetString,
}

impl EncapsulatedData {
    /// The point `R_(b,S) = [r]([b]P + Z)`
    #[must_use]
    pub fn r(&self) -> &AffinePoint<PrimeField> {
        &self.r
    }

    /// The masked SSV `H`
    #[must_use]
    pub fn h(&self) -> &OctetString {
        &self.h
    }

    /// `0x04 || R_x || R_y || H`
    #[must_use]
    pub fn to_bytes(&self) -> OctetString {
        self.r.to_encoded().concat(&self.h)
    }

    /// Decode `0x04 || R_x || R_y || H` for the given parameter set.
    ///
    /// # Errors
    /// - [`Error::InvalidEncapsulatedDataLength`] if the length is not `1 + 2·len(p) + n/8`
    /// - [`Error::InvalidPointEncoding`] or [`Error::PointNotOnCurve`] for a bad `R`
    pub fn from_bytes(params: &ParameterSet, bytes: &[u8]) -> Result<Self> {
        let point_len = 1 + 2 * params.element_len();
        if bytes.len() != point_len + params.n() / 8 {
            return Err(Error::InvalidEncapsulatedDataLength(bytes.len()));
        }
        let (point, h) = bytes.split_at(point_len);
        Ok(Self {
            r: params.curve().decode_point(point)?,
            h: OctetString::new(h),
        })
    }
}

/// The SAKKE engine for one parameter set.
#[derive(Clone, Copy, Debug)]
pub struct Sakke {
    params: &'static ParameterSet,
}

impl Sakke {
    /// Engine for the parameter set registered under `id`.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedParameterSet`] for unknown identifiers.
    pub fn new(id: u8) -> Result<Self> {
        Ok(Self {
            params: ParameterSet::get(id)?,
        })
    }

    /// The parameter set in use
    #[must_use]
    pub fn params(&self) -> &'static ParameterSet {
        self.params
    }

    fn check_point(&self, point: &AffinePoint<PrimeField>) -> Result<()> {
        if point.is_identity() {
            return Err(Error::Computation("unexpected point at infinity"));
        }
        if !point.is_on(self.params.curve()) {
            return Err(Error::PointNotOnCurve);
        }
        Ok(())
    }

    /// `[b]P + Z` for the identifier `b` and KMS public key `Z`.
    ///
    /// # Errors
    /// Fails if `Z` is not a finite point of the parameter set's curve.
    pub fn identifier_point(
        &self,
        identifier: &[u8],
        kms_public_key: &AffinePoint<PrimeField>,
    ) -> Result<AffinePoint<PrimeField>> {
        self.check_point(kms_public_key)?;
        let b = BigUint::from_bytes_be(identifier) % self.params.q();
        Ok(self.params.multiply_base(&b).add(kms_public_key))
    }

    /// `[r]([b]P + Z)`.
    ///
    /// # Errors
    /// Returns [`Error::Computation`] unless `0 < r < q`, and fails like
    /// [`Sakke::identifier_point`] for a bad `Z`. Inputs are checked before any multiplication.
    pub fn multiply_identifier_point(
        &self,
        r: &BigUint,
        identifier: &[u8],
        kms_public_key: &AffinePoint<PrimeField>,
    ) -> Result<AffinePoint<PrimeField>> {
        if r.is_zero() || r >= self.params.q() {
            return Err(Error::Computation("scalar out of range"));
        }
        let point = self.identifier_point(identifier, kms_public_key)?;
        Ok(point.multiply(r))
    }

    /// `HashToIntegerRange(g^r, 2^n)` as `n/8` octets
    fn mask(&self, g_r: &BigUint) -> Result<OctetString> {
        let octets = to_octets(g_r, self.params.element_len())?;
        let range = BigUint::one() << self.params.n();
        let mask = hash_to_integer_range::<Sha256>(&octets, &range)?;
        to_octets(&mask, self.params.n() / 8)
    }

    /// `r = HashToIntegerRange(SSV || b, q)`
    fn derive_r(&self, ssv: &SharedSecretValue, identifier: &[u8]) -> Result<BigUint> {
        let input = OctetString::new(ssv.as_bytes()).concat(identifier);
        hash_to_integer_range::<Sha256>(&input, self.params.q())
    }

    /// Encapsulate a caller-chosen SSV for the identifier `b` (RFC 6508 §6.2.1).
    ///
    /// # Errors
    /// - [`Error::InvalidSsvLength`] if the SSV is not `n` bits
    /// - any error of [`Sakke::multiply_identifier_point`]
    pub fn encapsulate_with_ssv(
        &self,
        ssv: &SharedSecretValue,
        identifier: &[u8],
        kms_public_key: &AffinePoint<PrimeField>,
    ) -> Result<EncapsulatedData> {
        if ssv.len() * 8 != self.params.n() {
            return Err(Error::InvalidSsvLength(ssv.len()));
        }

        let r = self.derive_r(ssv, identifier)?;
        let point = self.multiply_identifier_point(&r, identifier, kms_public_key)?;

        let g_r = Fp2::from_pf_integer(self.params.g(), self.params.p())
            .pow(&r)
            .to_pf_integer()
            .ok_or(Error::Computation("g^r is not in PF_p"))?;
        let h = self.mask(&g_r)?.xor(ssv.as_bytes());

        Ok(EncapsulatedData { r: point, h })
    }

    /// Encapsulate a fresh random SSV for the identifier `b`.
    ///
    /// # Errors
    /// See [`Sakke::encapsulate_with_ssv`].
    pub fn encapsulate(
        &self,
        rng: &mut impl CryptoRngCore,
        identifier: &[u8],
        kms_public_key: &AffinePoint<PrimeField>,
    ) -> Result<(EncapsulatedData, SharedSecretValue)> {
        let mut bytes = vec![0u8; self.params.n() / 8];
        rng.fill_bytes(&mut bytes);
        let ssv = SharedSecretValue::new(bytes);
        let data = self.encapsulate_with_ssv(&ssv, identifier, kms_public_key)?;
        Ok((data, ssv))
    }

    /// Recover the SSV with the receiver secret key `K_b` (RFC 6508 §6.2.2).
    ///
    /// # Errors
    /// Returns [`Error::DecapsulationFailed`] if the recovered SSV does not reproduce `R_(b,S)`.
    pub fn decapsulate(
        &self,
        data: &EncapsulatedData,
        identifier: &[u8],
        kms_public_key: &AffinePoint<PrimeField>,
        receiver_secret_key: &AffinePoint<PrimeField>,
    ) -> Result<SharedSecretValue> {
        self.check_point(&data.r)?;
        self.check_point(receiver_secret_key)?;
        if data.h.len() * 8 != self.params.n() {
            return Err(Error::InvalidSsvLength(data.h.len()));
        }

        let w = tate_lichtenbaum(&data.r, receiver_secret_key)?
            .to_pf_integer()
            .ok_or(Error::DecapsulationFailed)?;
        let ssv = SharedSecretValue::new(data.h.xor(&self.mask(&w)?));

        let r = self.derive_r(&ssv, identifier)?;
        let expected = self
            .multiply_identifier_point(&r, identifier, kms_public_key)
            .map_err(|_| Error::DecapsulationFailed)?;
        if expected != data.r {
            return Err(Error::DecapsulationFailed);
        }
        Ok(ssv)
    }

    /// Check `<[b]P + Z, K_b> = g` (RFC 6508 §6.1.2).
    ///
    /// # Errors
    /// Returns [`Error::InvalidReceiverSecretKey`] if the key does not belong to the identifier.
    pub fn validate_receiver_secret_key(
        &self,
        identifier: &[u8],
        kms_public_key: &AffinePoint<PrimeField>,
        receiver_secret_key: &AffinePoint<PrimeField>,
    ) -> Result<()> {
        self.check_point(receiver_secret_key)
            .map_err(|_| Error::InvalidReceiverSecretKey)?;
        let point = self.identifier_point(identifier, kms_public_key)?;
        let paired = tate_lichtenbaum(&point, receiver_secret_key)?.to_pf_integer();
        if paired.as_ref() == Some(self.params.g()) {
            Ok(())
        } else {
            Err(Error::InvalidReceiverSecretKey)
        }
    }
}

impl PartialEq for Sakke {
    fn eq(&self, other: &Self) -> bool {
        self.params.id() == other.params.id()
    }
}

impl Eq for Sakke {}

/// The sender side of SAKKE: a peer identifier under a KMS public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncapsulationKey {
    sakke: Sakke,
    identifier: OctetString,
    kms_public_key: AffinePoint<PrimeField>,
}

impl EncapsulationKey {
    /// Bind an identifier to a KMS public key.
    ///
    /// # Errors
    /// Fails if the KMS public key is not a finite point of the parameter set's curve.
    pub fn new(
        sakke: Sakke,
        identifier: impl Into<OctetString>,
        kms_public_key: AffinePoint<PrimeField>,
    ) -> Result<Self> {
        sakke.check_point(&kms_public_key)?;
        Ok(Self {
            sakke,
            identifier: identifier.into(),
            kms_public_key,
        })
    }

    /// The identifier `b`
    #[must_use]
    pub fn identifier(&self) -> &OctetString {
        &self.identifier
    }

    /// The KMS public key `Z`
    #[must_use]
    pub fn kms_public_key(&self) -> &AffinePoint<PrimeField> {
        &self.kms_public_key
    }
}

impl Encapsulate<EncapsulatedData, SharedSecretValue> for EncapsulationKey {
    type Error = Error;

    fn encapsulate(
        &self,
        rng: &mut impl CryptoRngCore,
    ) -> Result<(EncapsulatedData, SharedSecretValue)> {
        self.sakke
            .encapsulate(rng, &self.identifier, &self.kms_public_key)
    }
}

/// The receiver side of SAKKE: an [`EncapsulationKey`] plus the matching receiver secret key.
#[derive(Clone)]
pub struct DecapsulationKey {
    ek: EncapsulationKey,
    rsk: AffinePoint<PrimeField>,
}

impl DecapsulationKey {
    /// Pair a receiver secret key with its identifier, validating it first.
    ///
    /// # Errors
    /// Returns [`Error::InvalidReceiverSecretKey`] if `K_b` does not match.
    pub fn new(
        ek: EncapsulationKey,
        receiver_secret_key: AffinePoint<PrimeField>,
    ) -> Result<Self> {
        ek.sakke.validate_receiver_secret_key(
            &ek.identifier,
            &ek.kms_public_key,
            &receiver_secret_key,
        )?;
        Ok(Self {
            ek,
            rsk: receiver_secret_key,
        })
    }

    /// The public half of this key
    #[must_use]
    pub fn encapsulation_key(&self) -> &EncapsulationKey {
        &self.ek
    }
}

impl fmt::Debug for DecapsulationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecapsulationKey")
            .field("ek", &self.ek)
            .finish_non_exhaustive()
    }
}

impl Decapsulate<EncapsulatedData, SharedSecretValue> for DecapsulationKey {
    type Error = Error;

    fn decapsulate(&self, encapsulated_key: &EncapsulatedData) -> Result<SharedSecretValue> {
        self.ek.sakke.decapsulate(
            encapsulated_key,
            &self.ek.identifier,
            &self.ek.kms_public_key,
            &self.rsk,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::curve::Curve;
    use crate::field::Field;
    use crate::kms::MasterSecret;
    use hex_literal::hex;
    use num_bigint::BigInt;
    use std::sync::Arc;

    const MASTER_SECRET: [u8; 20] = hex!("AFF429D35F84B110D094803B3595A6E2998BC99F");

    #[test]
    fn identifier_layout() {
        assert_eq!(
            identifier("2011-02", "tel:+447700900123").as_bytes(),
            b"2011-02\0tel:+447700900123\0"
        );
    }

    #[test]
    fn rejects_bad_inputs_before_multiplying() {
        let sakke = Sakke::new(1).unwrap();
        let params = sakke.params();
        let z = params.point().clone();
        let id = identifier("2011-02", "tel:+447700900123");

        assert_eq!(
            sakke
                .multiply_identifier_point(&BigUint::zero(), &id, &z)
                .unwrap_err(),
            Error::Computation("scalar out of range")
        );
        let q = params.q();
        assert!(sakke.multiply_identifier_point(q, &id, &z).is_err());
        assert!(sakke
            .multiply_identifier_point(&BigUint::one(), &id, &params.curve().identity())
            .is_err());
    }

    #[test]
    fn rejects_points_of_another_curve() {
        let sakke = Sakke::new(1).unwrap();
        let params = sakke.params();
        let kms = MasterSecret::new(params, &MASTER_SECRET).unwrap();
        let id = identifier("2011-02", "tel:+447700900123");
        let z = kms.public_key();
        let k = kms.extract_receiver_secret_key(&id).unwrap();

        // y^2 = x^3 - 3x + 1 over the same p, through (0, 1)
        let field = PrimeField::new(params.p().clone());
        let a = field.from_int(&BigInt::from(-3));
        let other = Arc::new(Curve::new(field, a, BigInt::one()));
        let foreign = other.point(BigInt::zero(), BigInt::one()).unwrap();

        assert_eq!(
            sakke.identifier_point(&id, &foreign).unwrap_err(),
            Error::PointNotOnCurve
        );
        assert_eq!(
            sakke
                .multiply_identifier_point(&BigUint::one(), &id, &foreign)
                .unwrap_err(),
            Error::PointNotOnCurve
        );
        assert_eq!(
            EncapsulationKey::new(sakke, id.clone(), foreign.clone()).unwrap_err(),
            Error::PointNotOnCurve
        );

        let data = EncapsulatedData {
            r: foreign,
            h: OctetString::new(vec![0u8; 16]),
        };
        assert_eq!(
            sakke.decapsulate(&data, &id, &z, &k).unwrap_err(),
            Error::PointNotOnCurve
        );
    }

    #[test]
    fn ssv_length_is_checked() {
        let sakke = Sakke::new(1).unwrap();
        let z = sakke.params().point().clone();
        let ssv = SharedSecretValue::new(vec![1u8; 15]);
        assert_eq!(
            sakke.encapsulate_with_ssv(&ssv, b"id", &z).unwrap_err(),
            Error::InvalidSsvLength(15)
        );
    }

    #[test]
    fn encapsulated_data_encoding() {
        let sakke = Sakke::new(1).unwrap();
        let params = sakke.params();
        let kms = MasterSecret::new(params, &MASTER_SECRET).unwrap();
        let id = identifier("2011-02", "tel:+447700900123");
        let ssv = SharedSecretValue::new(hex!("123456789ABCDEF0123456789ABCDEF0"));

        let data = sakke
            .encapsulate_with_ssv(&ssv, &id, &kms.public_key())
            .unwrap();
        let bytes = data.to_bytes();
        assert_eq!(bytes.len(), 273);
        assert_eq!(EncapsulatedData::from_bytes(params, &bytes).unwrap(), data);
        assert_eq!(
            EncapsulatedData::from_bytes(params, &bytes[1..]).unwrap_err(),
            Error::InvalidEncapsulatedDataLength(272)
        );
    }

    #[test]
    fn tampered_data_fails() {
        let sakke = Sakke::new(1).unwrap();
        let params = sakke.params();
        let kms = MasterSecret::new(params, &MASTER_SECRET).unwrap();
        let id = identifier("2011-02", "tel:+447700900123");
        let z = kms.public_key();
        let k = kms.extract_receiver_secret_key(&id).unwrap();

        let (data, _) = sakke.encapsulate(&mut rand::thread_rng(), &id, &z).unwrap();
        let mut bytes = data.to_bytes().into_vec();
        bytes[272] ^= 0x01;
        let tampered = EncapsulatedData::from_bytes(params, &bytes).unwrap();
        assert_eq!(
            sakke.decapsulate(&tampered, &id, &z, &k).unwrap_err(),
            Error::DecapsulationFailed
        );
    }

    #[cfg(feature = "zeroize")]
    #[test]
    fn secrets_zeroize_on_drop() {
        fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}
        assert_zeroize_on_drop::<SharedSecretValue>();
        assert_zeroize_on_drop::<MasterSecret>();
    }

    #[test]
    fn ssv_debug_is_redacted() {
        let ssv = SharedSecretValue::new(vec![0xAB; 16]);
        assert_eq!(format!("{ssv:?}"), "SharedSecretValue(..)");
    }
}
