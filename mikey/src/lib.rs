#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::pedantic)] // Be pedantic by default
#![allow(clippy::module_name_repetitions)]

mod error;

pub mod gext;
pub mod payload;
pub mod prf;
pub mod srtp;

pub use error::{Error, Result};
pub use gext::GeneralExtensionData;
pub use payload::{GeneralExtensionPayload, GeneralExtensionType, PayloadType};
pub use prf::{Prf, PrfFunction, PrfHmacSha1, PrfHmacSha256};
pub use srtp::{derive_key, KeyLabel, SrtpKeys};

pub use octet_string::OctetString;
