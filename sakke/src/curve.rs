//! Short Weierstrass curves `y^2 = x^3 + a·x + b` and their affine points.
//!
//! A [`Curve`] owns its coordinate field and coefficients, plus the optional
//! [`Endomorphism`] capability. Points hold an `Arc` of the curve they live on, so curve logic is
//! never duplicated per point.

use crate::endomorphism::{Endomorphism, ScalarDecomposition};
use crate::field::{Field, PrimeField, QuadraticField};
use crate::{Error, Result};
use core::ops::{Add, Mul, Neg};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, Zero};
use octet_string::OctetString;
use std::sync::Arc;

/// SEC1 tag for an uncompressed point
const UNCOMPRESSED_TAG: u8 = 0x04;

/// SEC1 encoding of the point at infinity
const IDENTITY_TAG: u8 = 0x00;

/// An elliptic curve in short Weierstrass form over the field `F`.
#[derive(Debug)]
pub struct Curve<F: Field> {
    field: F,
    a: F::Elem,
    b: F::Elem,
    order: Option<BigUint>,
    endomorphism: Option<Arc<dyn Endomorphism<F>>>,
}

/// A curve over a prime field
pub type PrimeCurve = Curve<PrimeField>;

/// A curve over the quadratic extension `F_p^2`
pub type ExtensionCurve = Curve<QuadraticField>;

impl<F: Field> Curve<F> {
    /// The curve `y^2 = x^3 + a·x + b` over `field`.
    #[must_use]
    pub fn new(field: F, a: F::Elem, b: F::Elem) -> Self {
        Self {
            field,
            a,
            b,
            order: None,
            endomorphism: None,
        }
    }

    /// Record the order of the subgroup the curve is used with.
    #[must_use]
    pub fn with_order(mut self, order: BigUint) -> Self {
        self.order = Some(order);
        self
    }

    /// Attach an endomorphism used to accelerate scalar multiplication.
    #[must_use]
    pub fn with_endomorphism(mut self, endomorphism: Arc<dyn Endomorphism<F>>) -> Self {
        self.endomorphism = Some(endomorphism);
        self
    }

    /// Coordinate field
    #[must_use]
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Coefficient `a`
    #[must_use]
    pub fn a(&self) -> &F::Elem {
        &self.a
    }

    /// Coefficient `b`
    #[must_use]
    pub fn b(&self) -> &F::Elem {
        &self.b
    }

    /// Subgroup order, if known
    #[must_use]
    pub fn order(&self) -> Option<&BigUint> {
        self.order.as_ref()
    }

    /// The endomorphism capability, if the curve has one
    #[must_use]
    pub fn endomorphism(&self) -> Option<&dyn Endomorphism<F>> {
        self.endomorphism.as_deref()
    }

    /// Whether `(x, y)` satisfies the curve equation.
    #[must_use]
    pub fn contains(&self, x: &F::Elem, y: &F::Elem) -> bool {
        let f = &self.field;
        let lhs = f.square(y);
        let rhs = f.add(&f.mul(&f.add(&f.square(x), &self.a), x), &self.b);
        lhs == rhs
    }

    /// Whether two curves describe the same equation over the same field.
    #[must_use]
    pub fn same_equation(&self, other: &Self) -> bool {
        self.field == other.field && self.a == other.a && self.b == other.b
    }

    /// The affine point `(x, y)`.
    ///
    /// # Errors
    /// Returns [`Error::PointNotOnCurve`] if the coordinates do not satisfy the curve equation.
    pub fn point(self: &Arc<Self>, x: F::Elem, y: F::Elem) -> Result<AffinePoint<F>> {
        if !self.contains(&x, &y) {
            return Err(Error::PointNotOnCurve);
        }
        // canonical representatives, so coordinate equality is field equality
        let zero = self.field.zero();
        let (x, y) = (self.field.add(&x, &zero), self.field.add(&y, &zero));
        Ok(AffinePoint {
            coords: Some((x, y)),
            curve: Arc::clone(self),
        })
    }

    /// The point at infinity.
    #[must_use]
    pub fn identity(self: &Arc<Self>) -> AffinePoint<F> {
        AffinePoint {
            coords: None,
            curve: Arc::clone(self),
        }
    }
}

impl Curve<PrimeField> {
    /// Length in octets of one encoded coordinate.
    #[must_use]
    pub fn coordinate_len(&self) -> usize {
        let bits = self.field.characteristic().bits();
        usize::try_from(bits.div_ceil(8)).unwrap_or(usize::MAX)
    }

    /// The same equation over `F_p^2`, the home of distorted points.
    #[must_use]
    pub fn extension(&self) -> Curve<QuadraticField> {
        let ext = QuadraticField::new(self.field.characteristic().clone());
        let a = ext.from_int(&self.a);
        let b = ext.from_int(&self.b);
        let curve = Curve::new(ext, a, b);
        match &self.order {
            Some(order) => curve.with_order(order.clone()),
            None => curve,
        }
    }

    /// Decode `0x04 || x || y` (or `0x00` for the identity) and check the point is on the curve.
    ///
    /// # Errors
    /// - [`Error::InvalidPointEncoding`] for a wrong tag, length or out-of-range coordinate
    /// - [`Error::PointNotOnCurve`] if the coordinates are not a curve point
    pub fn decode_point(self: &Arc<Self>, bytes: &[u8]) -> Result<AffinePoint<PrimeField>> {
        let len = self.coordinate_len();
        match bytes.split_first() {
            Some((&IDENTITY_TAG, [])) => Ok(self.identity()),
            Some((&UNCOMPRESSED_TAG, rest)) if rest.len() == 2 * len => {
                let (xb, yb) = rest.split_at(len);
                let p = self.field.characteristic();
                let x = BigInt::from_bytes_be(Sign::Plus, xb);
                let y = BigInt::from_bytes_be(Sign::Plus, yb);
                if &x >= p || &y >= p {
                    return Err(Error::InvalidPointEncoding);
                }
                self.point(x, y)
            }
            _ => Err(Error::InvalidPointEncoding),
        }
    }
}

/// A point on a [`Curve`] in affine coordinates; `None` coordinates denote the point at
/// infinity.
#[derive(Clone, Debug)]
pub struct AffinePoint<F: Field> {
    coords: Option<(F::Elem, F::Elem)>,
    curve: Arc<Curve<F>>,
}

impl<F: Field> AffinePoint<F> {
    /// The curve this point lives on
    #[must_use]
    pub fn curve(&self) -> &Arc<Curve<F>> {
        &self.curve
    }

    /// Whether this is the point at infinity
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.coords.is_none()
    }

    /// `x` coordinate, `None` for the identity
    #[must_use]
    pub fn x(&self) -> Option<&F::Elem> {
        self.coords.as_ref().map(|(x, _)| x)
    }

    /// `y` coordinate, `None` for the identity
    #[must_use]
    pub fn y(&self) -> Option<&F::Elem> {
        self.coords.as_ref().map(|(_, y)| y)
    }

    /// Whether the point lies on `curve` (by equation, not by identity of the `Arc`).
    #[must_use]
    pub fn is_on(&self, curve: &Curve<F>) -> bool {
        self.curve.same_equation(curve)
            && match &self.coords {
                Some((x, y)) => curve.contains(x, y),
                None => true,
            }
    }

    fn identity(&self) -> Self {
        Self {
            coords: None,
            curve: Arc::clone(&self.curve),
        }
    }

    fn from_coords(&self, x: F::Elem, y: F::Elem) -> Self {
        Self {
            coords: Some((x, y)),
            curve: Arc::clone(&self.curve),
        }
    }

    /// Point addition.
    ///
    /// # Panics
    /// If `other` lives on a different curve.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        assert!(
            Arc::ptr_eq(&self.curve, &other.curve) || self.curve.same_equation(&other.curve),
            "points on different curves"
        );

        let (Some((x1, y1)), Some((x2, y2))) = (&self.coords, &other.coords) else {
            return if self.is_identity() {
                other.clone()
            } else {
                self.clone()
            };
        };

        let f = self.curve.field();
        if x1 == x2 {
            return if f.is_zero(&f.add(y1, y2)) {
                self.identity()
            } else {
                self.double()
            };
        }

        // x1 != x2, so the denominator is invertible
        let Some(lambda) = f.div(&f.sub(y2, y1), &f.sub(x2, x1)) else {
            return self.identity();
        };
        let x3 = f.sub(&f.sub(&f.square(&lambda), x1), x2);
        let y3 = f.sub(&f.mul(&lambda, &f.sub(x1, &x3)), y1);
        self.from_coords(x3, y3)
    }

    /// Point doubling.
    #[must_use]
    pub fn double(&self) -> Self {
        let Some((x, y)) = &self.coords else {
            return self.clone();
        };

        let f = self.curve.field();
        if f.is_zero(y) {
            return self.identity();
        }

        // λ = (3x^2 + a) / 2y
        let x2 = f.square(x);
        let num = f.add(&f.add(&f.add(&x2, &x2), &x2), self.curve.a());
        let Some(lambda) = f.div(&num, &f.add(y, y)) else {
            return self.identity();
        };
        let x3 = f.sub(&f.square(&lambda), &f.add(x, x));
        let y3 = f.sub(&f.mul(&lambda, &f.sub(x, &x3)), y);
        self.from_coords(x3, y3)
    }

    /// `-P`
    #[must_use]
    pub fn negate(&self) -> Self {
        match &self.coords {
            Some((x, y)) => self.from_coords(x.clone(), self.curve.field().neg(y)),
            None => self.clone(),
        }
    }

    /// `[k]P`.
    ///
    /// Uses GLV decomposition when the curve carries an endomorphism with an efficient point
    /// map, otherwise plain double-and-add. Both paths give the same point.
    #[must_use]
    pub fn multiply(&self, k: &BigUint) -> Self {
        match self
            .curve
            .endomorphism()
            .filter(|endo| endo.has_efficient_point_map())
        {
            Some(endo) => self.multiply_glv(endo, k),
            None => self.multiply_naive(k),
        }
    }

    /// `[k]P` by double-and-add over the bits of `k`, most significant first.
    #[must_use]
    pub fn multiply_naive(&self, k: &BigUint) -> Self {
        let mut acc = self.identity();
        for bit in (0..k.bits()).rev() {
            acc = acc.double();
            if k.bit(bit) {
                acc = acc.add(self);
            }
        }
        acc
    }

    /// `[k]P = [k1]P + [k2]φ(P)` with both limbs consumed in one double-and-add pass.
    ///
    /// The point must be in the subgroup on which `φ` acts as multiplication by `λ`.
    #[must_use]
    pub fn multiply_glv(&self, endo: &dyn Endomorphism<F>, k: &BigUint) -> Self {
        let Some((x, y)) = &self.coords else {
            return self.clone();
        };
        let (mx, my) = endo.map_point(self.curve.field(), x, y);
        let mapped = self.from_coords(mx, my);

        let ScalarDecomposition { k1, k2 } = endo.decompose_scalar(k);
        let p1 = if k1.is_negative() {
            self.negate()
        } else {
            self.clone()
        };
        let p2 = if k2.is_negative() {
            mapped.negate()
        } else {
            mapped
        };
        let (k1, k2) = (k1.magnitude(), k2.magnitude());
        let both = p1.add(&p2);

        let mut acc = self.identity();
        for bit in (0..k1.bits().max(k2.bits())).rev() {
            acc = acc.double();
            match (k1.bit(bit), k2.bit(bit)) {
                (true, true) => acc = acc.add(&both),
                (true, false) => acc = acc.add(&p1),
                (false, true) => acc = acc.add(&p2),
                (false, false) => {}
            }
        }
        acc
    }
}

impl AffinePoint<PrimeField> {
    /// Encode as `0x04 || x || y` with coordinates left padded to the length of `p`; the
    /// identity encodes as the single octet `0x00`.
    #[must_use]
    pub fn to_encoded(&self) -> OctetString {
        let Some((x, y)) = &self.coords else {
            return OctetString::new(vec![IDENTITY_TAG]);
        };
        let len = self.curve.coordinate_len();
        let mut out = Vec::with_capacity(1 + 2 * len);
        out.push(UNCOMPRESSED_TAG);
        for c in [x, y] {
            let (_, bytes) = c.to_bytes_be();
            out.resize(out.len() + len - bytes.len(), 0);
            out.extend_from_slice(&bytes);
        }
        OctetString::new(out)
    }

    /// The distortion map `ψ(x, y) = (-x, i·y)` from `E(F_p)` into `E(F_p^2)`.
    ///
    /// Defined for curves `y^2 = x^3 + a·x` over `p ≡ 3 mod 4`.
    ///
    /// # Errors
    /// Returns [`Error::Computation`] if the curve has `b ≠ 0`.
    pub fn distortion_map(
        &self,
        target: &Arc<Curve<QuadraticField>>,
    ) -> Result<AffinePoint<QuadraticField>> {
        if !self.curve.field().is_zero(self.curve.b()) {
            return Err(Error::Computation("distortion map requires b = 0"));
        }
        let Some((x, y)) = &self.coords else {
            return Ok(target.identity());
        };
        let ext = target.field();
        let x = ext.from_int(&-x);
        let y = ext.mul(&ext.i(), &ext.from_int(y));
        target.point(x, y)
    }
}

impl<F: Field> PartialEq for AffinePoint<F> {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
            && (Arc::ptr_eq(&self.curve, &other.curve) || self.curve.same_equation(&other.curve))
    }
}

impl<F: Field> Eq for AffinePoint<F> {}

impl<F: Field> Add for &AffinePoint<F> {
    type Output = AffinePoint<F>;

    fn add(self, rhs: Self) -> AffinePoint<F> {
        AffinePoint::add(self, rhs)
    }
}

impl<F: Field> Neg for &AffinePoint<F> {
    type Output = AffinePoint<F>;

    fn neg(self) -> AffinePoint<F> {
        self.negate()
    }
}

impl<F: Field> Mul<&BigUint> for &AffinePoint<F> {
    type Output = AffinePoint<F>;

    fn mul(self, k: &BigUint) -> AffinePoint<F> {
        self.multiply(k)
    }
}
