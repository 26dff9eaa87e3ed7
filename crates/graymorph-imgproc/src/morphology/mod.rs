//! Grayscale morphology.
//!
//! Erosion is the max-under-mask reduction and dilation the min-under-mask
//! one, the inverse of the textbook naming. [`open`] and [`close`] compose
//! them in that order.

/// Error types used for morphological operations.
pub mod error;
pub use error::MorphologyError;

/// Kernel (structuring element) utilities.
pub mod kernel;
pub use kernel::{Kernel, KernelShape};

/// Border handling for the reducers.
pub mod border;
pub use border::{pad, BorderPolicy, PaddedBuffer, ReplicateExtent};

mod ops;
pub use ops::*;
