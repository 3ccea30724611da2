//! Algebraic properties of `F_p^2` and of point multiplication

use num_bigint::{BigInt, BigUint};
use num_traits::One;
use proptest::prelude::*;
use sakke::{Fp2, ParameterSet};

/// RFC 6509 parameter set 1 prime
fn p() -> BigInt {
    ParameterSet::get(1).unwrap().p().clone()
}

fn element() -> impl Strategy<Value = Fp2> {
    (
        prop::collection::vec(any::<u8>(), 1..=128),
        prop::collection::vec(any::<u8>(), 1..=128),
    )
        .prop_map(|(a, b)| {
            Fp2::new(
                BigInt::from(BigUint::from_bytes_be(&a)),
                BigInt::from(BigUint::from_bytes_be(&b)),
                p(),
            )
        })
}

proptest! {
    #[test]
    fn multiplication_commutes(a in element(), b in element()) {
        prop_assert_eq!(a.mul(&b), b.mul(&a));
    }

    #[test]
    fn square_is_self_product(a in element()) {
        prop_assert_eq!(a.square(), a.mul(&a));
    }

    #[test]
    fn pow_steps(a in element(), n in 1u64..512) {
        let n = BigUint::from(n);
        let prev = a.pow(&(&n - BigUint::one()));
        prop_assert_eq!(a.pow(&n), prev.mul(&a));
        prop_assert_eq!(a.pow(&BigUint::from(0u8)), Fp2::one(&p()));
    }

    #[test]
    fn inverse(a in element()) {
        prop_assume!(!a.is_zero());
        let inv = a.invert().unwrap();
        prop_assert_eq!(a.mul(&inv), Fp2::one(&p()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn fixed_base_matches_double_and_add(k in prop::collection::vec(any::<u8>(), 1..32)) {
        let params = ParameterSet::get(1).unwrap();
        let k = BigUint::from_bytes_be(&k);
        prop_assert_eq!(params.multiply_base(&k), params.point().multiply_naive(&k));
    }

    #[test]
    fn scalar_multiplication_distributes(a in 1u64.., b in 1u64..) {
        let params = ParameterSet::get(1).unwrap();
        let (a, b) = (BigUint::from(a), BigUint::from(b));
        let p = params.point();
        prop_assert_eq!(p.multiply(&a).add(&p.multiply(&b)), p.multiply(&(a + b)));
    }
}
