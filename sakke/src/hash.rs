//! `HashToIntegerRange` (RFC 6508 §5.1)

use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::One;
use sha2::digest::{Digest, Output};

/// Hash `input` to an integer in `[0, range)` with the digest `D`.
///
/// With `s` the input, `n` the range, `hashlen` the digest size in bits and
/// `l = ceil(bits(n - 1) / hashlen)`:
///
/// ```text
/// A   = H(s)
/// h_0 = 0^hashlen
/// h_i = H(h_{i-1}),  v_i = H(h_i || A)   for i = 1..=l
/// v   = v_1 || ... || v_l  mod n
/// ```
///
/// # Errors
/// Returns [`Error::Computation`] if `range` is less than 2.
pub fn hash_to_integer_range<D: Digest>(input: &[u8], range: &BigUint) -> Result<BigUint> {
    if *range < BigUint::from(2u8) {
        return Err(Error::Computation("hash range must be at least 2"));
    }

    let hash_bits = 8 * <D as Digest>::output_size() as u64;
    let blocks = (range - BigUint::one()).bits().div_ceil(hash_bits);

    let seed = D::digest(input);
    let mut chain = Output::<D>::default();
    let mut output = Vec::new();
    for _ in 0..blocks {
        chain = D::digest(&chain);
        let block = D::new()
            .chain_update(&chain)
            .chain_update(&seed)
            .finalize();
        output.extend_from_slice(&block);
    }

    Ok(BigUint::from_bytes_be(&output) % range)
}
