#![deny(missing_docs)]
//! Image types for grayscale morphology

/// image representation for morphology purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
