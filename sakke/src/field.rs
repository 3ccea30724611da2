//! Prime fields and the quadratic extension `F_p[i] / (i^2 + 1)`.
//!
//! [`Fp2`] is the raw extension element used by the SAKKE pairing and by exponentiation in
//! `PF_p`. Its `add`, `sub`, `mul` and `square` are lazy: the components grow as big integers
//! and are only brought back into `[0, p)` by [`Fp2::reduce`]. Comparison is always made on
//! reduced components.
//!
//! [`Field`] abstracts over the coordinate field of a curve so the same point arithmetic runs
//! over `F_p` ([`PrimeField`]) and `F_p^2` ([`QuadraticField`]).

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Arithmetic in a finite field of odd characteristic.
pub trait Field: Clone + Debug + PartialEq + Eq + Send + Sync {
    /// Representation of a field element
    type Elem: Clone + Debug + PartialEq + Eq + Send + Sync;

    /// The characteristic `p`
    fn characteristic(&self) -> &BigInt;

    /// The additive identity
    fn zero(&self) -> Self::Elem;

    /// The multiplicative identity
    fn one(&self) -> Self::Elem;

    /// Image of an integer under the canonical embedding `Z -> F`
    fn from_int(&self, n: &BigInt) -> Self::Elem;

    /// `a + b`
    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// `a - b`
    fn sub(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// `a * b`
    fn mul(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// `-a`
    fn neg(&self, a: &Self::Elem) -> Self::Elem;

    /// `a^-1`, or `None` for zero
    fn invert(&self, a: &Self::Elem) -> Option<Self::Elem>;

    /// Whether `a` is the additive identity
    fn is_zero(&self, a: &Self::Elem) -> bool;

    /// `a^2`
    fn square(&self, a: &Self::Elem) -> Self::Elem {
        self.mul(a, a)
    }

    /// `a / b`, or `None` if `b` is zero
    fn div(&self, a: &Self::Elem, b: &Self::Elem) -> Option<Self::Elem> {
        self.invert(b).map(|inv| self.mul(a, &inv))
    }
}

/// The prime field `F_p`. Elements are canonical integers in `[0, p)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    p: BigInt,
}

impl PrimeField {
    /// The field of integers modulo the odd prime `p`. Primality is the caller's responsibility.
    #[must_use]
    pub fn new(p: BigInt) -> Self {
        Self { p }
    }

    /// Reduce an arbitrary integer into `[0, p)`.
    #[must_use]
    pub fn reduce(&self, n: &BigInt) -> BigInt {
        n.mod_floor(&self.p)
    }

    /// `a^e mod p`
    #[must_use]
    pub fn pow(&self, a: &BigInt, e: &BigUint) -> BigInt {
        self.reduce(a).modpow(&BigInt::from(e.clone()), &self.p)
    }
}

impl Field for PrimeField {
    type Elem = BigInt;

    fn characteristic(&self) -> &BigInt {
        &self.p
    }

    fn zero(&self) -> BigInt {
        BigInt::zero()
    }

    fn one(&self) -> BigInt {
        BigInt::one()
    }

    fn from_int(&self, n: &BigInt) -> BigInt {
        self.reduce(n)
    }

    fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.reduce(&(a + b))
    }

    fn sub(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.reduce(&(a - b))
    }

    fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.reduce(&(a * b))
    }

    fn neg(&self, a: &BigInt) -> BigInt {
        self.reduce(&-a)
    }

    fn invert(&self, a: &BigInt) -> Option<BigInt> {
        self.reduce(a).modinv(&self.p)
    }

    fn is_zero(&self, a: &BigInt) -> bool {
        self.reduce(a).is_zero()
    }
}

/// An element `x1 + x2·i` of `F_p[i] / (i^2 + 1)`.
///
/// This is the representation RFC 6508 calls `PF_p` when taken up to an `F_p` multiple.
#[derive(Clone, Debug)]
pub struct Fp2 {
    x1: BigInt,
    x2: BigInt,
    p: BigInt,
}

impl Fp2 {
    /// `x1 + x2·i` over the prime `p`. The components are stored as given.
    #[must_use]
    pub fn new(x1: BigInt, x2: BigInt, p: BigInt) -> Self {
        Self { x1, x2, p }
    }

    /// `0 + 0·i`
    #[must_use]
    pub fn zero(p: &BigInt) -> Self {
        Self::new(BigInt::zero(), BigInt::zero(), p.clone())
    }

    /// `1 + 0·i`
    #[must_use]
    pub fn one(p: &BigInt) -> Self {
        Self::new(BigInt::one(), BigInt::zero(), p.clone())
    }

    /// Real component, possibly unreduced
    #[must_use]
    pub fn x1(&self) -> &BigInt {
        &self.x1
    }

    /// Imaginary component, possibly unreduced
    #[must_use]
    pub fn x2(&self) -> &BigInt {
        &self.x2
    }

    /// The prime this element is defined over
    #[must_use]
    pub fn modulus(&self) -> &BigInt {
        &self.p
    }

    /// Both components brought into `[0, p)`.
    #[must_use]
    pub fn reduce(&self) -> Self {
        Self::new(
            self.x1.mod_floor(&self.p),
            self.x2.mod_floor(&self.p),
            self.p.clone(),
        )
    }

    /// Componentwise sum, unreduced.
    #[must_use]
    pub fn add(&self, rhs: &Self) -> Self {
        debug_assert_eq!(self.p, rhs.p);
        Self::new(&self.x1 + &rhs.x1, &self.x2 + &rhs.x2, self.p.clone())
    }

    /// Componentwise difference, unreduced.
    #[must_use]
    pub fn sub(&self, rhs: &Self) -> Self {
        debug_assert_eq!(self.p, rhs.p);
        Self::new(&self.x1 - &rhs.x1, &self.x2 - &rhs.x2, self.p.clone())
    }

    /// `(a1 + a2·i)(b1 + b2·i) = (a1·b1 - a2·b2) + (a1·b2 + a2·b1)·i`, unreduced.
    #[must_use]
    pub fn mul(&self, rhs: &Self) -> Self {
        debug_assert_eq!(self.p, rhs.p);
        Self::new(
            &self.x1 * &rhs.x1 - &self.x2 * &rhs.x2,
            &self.x1 * &rhs.x2 + &self.x2 * &rhs.x1,
            self.p.clone(),
        )
    }

    /// `(x1^2 - x2^2) + 2·x1·x2·i`, unreduced.
    #[must_use]
    pub fn square(&self) -> Self {
        let x1x2 = &self.x1 * &self.x2;
        Self::new(
            (&self.x1 + &self.x2) * (&self.x1 - &self.x2),
            &x1x2 + &x1x2,
            self.p.clone(),
        )
    }

    /// `self^n` by square-and-multiply from the most significant bit of `n` down.
    ///
    /// Unlike [`Fp2::mul`] and [`Fp2::square`], every intermediate is reduced: the components
    /// returned by [`Fp2::x1`] and [`Fp2::x2`] are in `[0, p)` and equal, modulo `p`, to those of
    /// the lazy product. `pow(0)` is `1 + 0·i`.
    #[must_use]
    pub fn pow(&self, n: &BigUint) -> Self {
        let base = self.reduce();
        let mut acc = Self::one(&self.p);
        for bit in (0..n.bits()).rev() {
            acc = acc.square().reduce();
            if n.bit(bit) {
                acc = acc.mul(&base).reduce();
            }
        }
        acc
    }

    /// `-x1 - x2·i`, unreduced.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(-&self.x1, -&self.x2, self.p.clone())
    }

    /// `x1 - x2·i`, the image under the `p`-power Frobenius.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(self.x1.clone(), -&self.x2, self.p.clone())
    }

    /// Multiply both components by an integer, unreduced.
    #[must_use]
    pub fn scale(&self, k: &BigInt) -> Self {
        Self::new(&self.x1 * k, &self.x2 * k, self.p.clone())
    }

    /// Whether both components are `0 mod p`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        let r = self.reduce();
        r.x1.is_zero() && r.x2.is_zero()
    }

    /// Multiplicative inverse `(x1 - x2·i) / (x1^2 + x2^2)`, reduced. `None` for zero.
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let r = self.reduce();
        let norm = (&r.x1 * &r.x1 + &r.x2 * &r.x2).mod_floor(&self.p);
        let inv = PrimeField::new(self.p.clone()).invert(&norm)?;
        Some(r.conjugate().scale(&inv).reduce())
    }

    /// The integer representing this element of `PF_p`: `x2 / x1 mod p` (RFC 6508 §2.1).
    ///
    /// Returns `None` when `x1 ≡ 0`, which cannot happen for elements of the order-`q` subgroup.
    #[must_use]
    pub fn to_pf_integer(&self) -> Option<BigUint> {
        let field = PrimeField::new(self.p.clone());
        let ratio = field.div(&field.reduce(&self.x2), &field.reduce(&self.x1))?;
        ratio.to_biguint()
    }

    /// The element `1 + g·i` whose `PF_p` class the integer `g` represents.
    #[must_use]
    pub fn from_pf_integer(g: &BigUint, p: &BigInt) -> Self {
        Self::new(BigInt::one(), BigInt::from(g.clone()), p.clone())
    }
}

impl PartialEq for Fp2 {
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p
            && (&self.x1 - &other.x1).mod_floor(&self.p).is_zero()
            && (&self.x2 - &other.x2).mod_floor(&self.p).is_zero()
    }
}

impl Eq for Fp2 {}

impl Add for &Fp2 {
    type Output = Fp2;

    fn add(self, rhs: Self) -> Fp2 {
        Fp2::add(self, rhs)
    }
}

impl Sub for &Fp2 {
    type Output = Fp2;

    fn sub(self, rhs: Self) -> Fp2 {
        Fp2::sub(self, rhs)
    }
}

impl Mul for &Fp2 {
    type Output = Fp2;

    fn mul(self, rhs: Self) -> Fp2 {
        Fp2::mul(self, rhs)
    }
}

impl Neg for &Fp2 {
    type Output = Fp2;

    fn neg(self) -> Fp2 {
        Fp2::neg(self)
    }
}

/// The quadratic extension `F_p^2 = F_p[i] / (i^2 + 1)` for `p ≡ 3 mod 4`.
/// Elements are [`Fp2`] values kept reduced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuadraticField {
    p: BigInt,
}

impl QuadraticField {
    /// The extension of `F_p`. `p ≡ 3 mod 4` is required for `i^2 + 1` to be irreducible.
    #[must_use]
    pub fn new(p: BigInt) -> Self {
        Self { p }
    }

    /// The element `x1 + x2·i`, reduced.
    #[must_use]
    pub fn element(&self, x1: &BigInt, x2: &BigInt) -> Fp2 {
        Fp2::new(x1.clone(), x2.clone(), self.p.clone()).reduce()
    }

    /// The square root of `-1`.
    #[must_use]
    pub fn i(&self) -> Fp2 {
        Fp2::new(BigInt::zero(), BigInt::one(), self.p.clone())
    }
}

impl Field for QuadraticField {
    type Elem = Fp2;

    fn characteristic(&self) -> &BigInt {
        &self.p
    }

    fn zero(&self) -> Fp2 {
        Fp2::zero(&self.p)
    }

    fn one(&self) -> Fp2 {
        Fp2::one(&self.p)
    }

    fn from_int(&self, n: &BigInt) -> Fp2 {
        self.element(n, &BigInt::zero())
    }

    fn add(&self, a: &Fp2, b: &Fp2) -> Fp2 {
        a.add(b).reduce()
    }

    fn sub(&self, a: &Fp2, b: &Fp2) -> Fp2 {
        a.sub(b).reduce()
    }

    fn mul(&self, a: &Fp2, b: &Fp2) -> Fp2 {
        a.mul(b).reduce()
    }

    fn square(&self, a: &Fp2) -> Fp2 {
        a.square().reduce()
    }

    fn neg(&self, a: &Fp2) -> Fp2 {
        a.neg().reduce()
    }

    fn invert(&self, a: &Fp2) -> Option<Fp2> {
        a.invert()
    }

    fn is_zero(&self, a: &Fp2) -> bool {
        a.is_zero()
    }
}
