//! Optional curve capability: an efficiently computable endomorphism for GLV scalar
//! multiplication.

use crate::field::{Field, PrimeField};
use core::fmt::Debug;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;

/// A scalar `k` split as `k ≡ k1 + k2·λ (mod n)` with both limbs about half the size of `n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalarDecomposition {
    /// Limb multiplying the original point
    pub k1: BigInt,
    /// Limb multiplying the image of the point under the endomorphism
    pub k2: BigInt,
}

/// An endomorphism `φ` of a curve acting on its prime-order subgroup as multiplication by an
/// eigenvalue `λ`.
pub trait Endomorphism<F: Field>: Debug + Send + Sync {
    /// Whether `map_point` is cheap enough that splitting scalars pays off.
    fn has_efficient_point_map(&self) -> bool;

    /// `φ(x, y)` for an affine point other than the identity.
    fn map_point(&self, field: &F, x: &F::Elem, y: &F::Elem) -> (F::Elem, F::Elem);

    /// Split `k` into two limbs for simultaneous multiplication by `P` and `φ(P)`.
    fn decompose_scalar(&self, k: &BigUint) -> ScalarDecomposition;
}

/// The GLV endomorphism `(x, y) -> (β·x, y)` of a curve `y^2 = x^3 + b` with `β^3 = 1`.
///
/// Decomposition uses a reduced basis `v1 = (a1, b1)`, `v2 = (a2, b2)` of the lattice
/// `{(x, y) : x + y·λ ≡ 0 mod n}`.
#[derive(Clone, Debug)]
pub struct GlvEndomorphism {
    beta: BigInt,
    lambda: BigUint,
    order: BigInt,
    v1: (BigInt, BigInt),
    v2: (BigInt, BigInt),
}

impl GlvEndomorphism {
    /// Build the endomorphism from the cube root of unity `beta` in `F_p`, its eigenvalue
    /// `lambda` modulo the group order, and a reduced lattice basis.
    #[must_use]
    pub fn new(
        beta: BigInt,
        lambda: BigUint,
        order: &BigUint,
        v1: (BigInt, BigInt),
        v2: (BigInt, BigInt),
    ) -> Self {
        Self {
            beta,
            lambda,
            order: BigInt::from(order.clone()),
            v1,
            v2,
        }
    }

    /// The eigenvalue `λ`
    #[must_use]
    pub fn lambda(&self) -> &BigUint {
        &self.lambda
    }
}

/// `round(a / n)` for `n > 0`
fn round_div(a: &BigInt, n: &BigInt) -> BigInt {
    (a + a + n).div_floor(&(n + n))
}

impl Endomorphism<PrimeField> for GlvEndomorphism {
    fn has_efficient_point_map(&self) -> bool {
        true
    }

    fn map_point(&self, field: &PrimeField, x: &BigInt, y: &BigInt) -> (BigInt, BigInt) {
        (field.mul(&self.beta, x), y.clone())
    }

    fn decompose_scalar(&self, k: &BigUint) -> ScalarDecomposition {
        let k = BigInt::from(k.clone()).mod_floor(&self.order);
        let (a1, b1) = &self.v1;
        let (a2, b2) = &self.v2;

        let c1 = round_div(&(b2 * &k), &self.order);
        let c2 = round_div(&(-b1 * &k), &self.order);

        ScalarDecomposition {
            k1: &k - &c1 * a1 - &c2 * a2,
            k2: -(&c1 * b1) - &c2 * b2,
        }
    }
}
