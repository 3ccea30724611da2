//! Precomputed multiples of a fixed point for windowed scalar multiplication.

use crate::curve::AffinePoint;
use crate::field::Field;
use crate::{Error, Result};
use num_bigint::BigUint;

/// The multiples `[0]P, [1]P, ..., [size - 1]P` of a base point `P`.
///
/// `size` is a power of two, so each lookup consumes a window of `log2(size)` scalar bits.
#[derive(Clone, Debug)]
pub struct LookupTable<F: Field> {
    entries: Vec<AffinePoint<F>>,
    window: u32,
}

impl<F: Field> LookupTable<F> {
    /// Precompute `size` multiples of `base`.
    ///
    /// # Errors
    /// Returns [`Error::Computation`] unless `size` is a power of two no smaller than 2.
    pub fn new(base: &AffinePoint<F>, size: usize) -> Result<Self> {
        if size < 2 || !size.is_power_of_two() {
            return Err(Error::Computation("table size must be a power of two"));
        }

        let mut entries = Vec::with_capacity(size);
        entries.push(base.curve().identity());
        for i in 1..size {
            entries.push(entries[i - 1].add(base));
        }

        Ok(Self {
            entries,
            window: size.trailing_zeros(),
        })
    }

    /// Number of entries
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// The base point `[1]P`
    #[must_use]
    pub fn base(&self) -> &AffinePoint<F> {
        &self.entries[1]
    }

    /// `[index]P`.
    ///
    /// # Errors
    /// Returns [`Error::TableIndexOutOfRange`] if `index >= size`.
    pub fn lookup(&self, index: usize) -> Result<&AffinePoint<F>> {
        self.entries.get(index).ok_or(Error::TableIndexOutOfRange {
            index,
            size: self.entries.len(),
        })
    }

    /// `[k]P` using fixed windows of `log2(size)` bits, most significant window first.
    #[must_use]
    pub fn multiply(&self, k: &BigUint) -> AffinePoint<F> {
        let w = u64::from(self.window);
        let windows = k.bits().div_ceil(w);

        let mut acc = self.entries[0].clone();
        for win in (0..windows).rev() {
            for _ in 0..w {
                acc = acc.double();
            }
            let digit = (0..w)
                .filter(|&j| k.bit(win * w + j))
                .fold(0usize, |d, j| d | (1 << j));
            if digit != 0 {
                acc = acc.add(&self.entries[digit]);
            }
        }
        acc
    }
}
