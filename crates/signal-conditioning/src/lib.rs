//! Signal Conditioning
//!
//! Prepares batches of raw current samples for spectral analysis:
//! row-wise normalization and shape/window precondition checks.

mod error;
mod normalizer;
mod validator;

pub use error::ConditioningError;
pub use normalizer::{Normalizer, NormalizationMethod};
pub use validator::{default_window, Validator, ValidationConfig};
