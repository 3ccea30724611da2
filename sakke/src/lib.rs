#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::pedantic)] // Be pedantic by default
#![allow(clippy::module_name_repetitions)]

//! # Structure
//!
//! - [`field`]: `F_p` and `F_p^2 = F_p[i] / (i^2 + 1)`
//! - [`curve`]: affine short Weierstrass arithmetic over either field, with the optional
//!   [`endomorphism`] and [`table`] accelerations
//! - [`param`]: RFC 6509 parameter sets
//! - [`pairing`] and [`hash`]: the two SAKKE-specific primitives of RFC 6508 §3.2 and §5.1
//! - [`kms`] and [`kem`]: key issuance, encapsulation and decapsulation

mod error;

pub mod curve;
pub mod endomorphism;
pub mod field;
pub mod hash;
pub mod kem;
pub mod kms;
pub mod pairing;
pub mod param;
pub mod table;

pub use error::{Error, Result};

pub use crate::curve::{AffinePoint, Curve};
pub use crate::field::{Field, Fp2, PrimeField, QuadraticField};
pub use crate::kem::{
    identifier, Decapsulate, DecapsulationKey, Encapsulate, EncapsulatedData, EncapsulationKey,
    Sakke, SharedSecretValue,
};
pub use crate::kms::MasterSecret;
pub use crate::param::ParameterSet;
