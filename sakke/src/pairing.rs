//! The reduced Tate-Lichtenbaum pairing of RFC 6508 §3.2.
//!
//! `<R, Q> = e(R, ψ(Q))^c` for points `R, Q` of order `q` on `E(F_p): y^2 = x^3 - 3x`, where
//! `ψ(x, y) = (-x, i·y)` and `c = (p + 1) / q = 4`. The distortion map is applied implicitly by
//! evaluating each Miller line at `(-Qx, i·Qy)`.

use crate::curve::AffinePoint;
use crate::field::{Field, Fp2, PrimeField};
use crate::{Error, Result};
use num_bigint::BigInt;
use num_traits::One;

/// Compute `<r, q_point>` as an element of `PF_p` (an `F_p^2` element taken up to `F_p`
/// multiples; use [`Fp2::to_pf_integer`] for its integer form).
///
/// # Errors
/// Returns [`Error::Computation`] if either point is the identity or the curve has no order.
pub fn tate_lichtenbaum(
    r: &AffinePoint<PrimeField>,
    q_point: &AffinePoint<PrimeField>,
) -> Result<Fp2> {
    let curve = r.curve();
    let field = curve.field();
    let modulus = field.characteristic();
    let order = curve
        .order()
        .ok_or(Error::Computation("pairing needs the subgroup order"))?;

    let (Some(rx), Some(ry)) = (r.x(), r.y()) else {
        return Err(Error::Computation("pairing of the point at infinity"));
    };
    let (Some(qx), Some(qy)) = (q_point.x(), q_point.y()) else {
        return Err(Error::Computation("pairing of the point at infinity"));
    };

    let exponent = order - 1u8;
    let mut f = Fp2::one(modulus);
    let mut c = r.clone();

    for bit in (0..exponent.bits().saturating_sub(1)).rev() {
        let (Some(cx), Some(cy)) = (c.x(), c.y()) else {
            return Err(Error::Computation("Miller loop reached the point at infinity"));
        };

        // tangent at C, evaluated at ψ(Q)
        let three_cx2_minus_one = BigInt::from(3) * (field.square(cx) - BigInt::one());
        let tangent = Fp2::new(
            three_cx2_minus_one * (qx + cx) - BigInt::from(2) * field.square(cy),
            BigInt::from(2) * cy * qy,
            modulus.clone(),
        );
        f = f.square().reduce().mul(&tangent).reduce();
        c = c.double();

        if exponent.bit(bit) {
            let (Some(cx), Some(cy)) = (c.x(), c.y()) else {
                return Err(Error::Computation("Miller loop reached the point at infinity"));
            };

            // line through C and R, evaluated at ψ(Q)
            let chord = Fp2::new(
                (qx + rx) * cy - (qx + cx) * ry,
                (cx - rx) * qy,
                modulus.clone(),
            );
            f = f.mul(&chord).reduce();
            c = c.add(r);
        }
    }

    // c = (p + 1) / q = 4
    Ok(f.square().reduce().square().reduce())
}
