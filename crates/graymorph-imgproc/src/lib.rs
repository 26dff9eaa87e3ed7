#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// grayscale morphology module.
pub mod morphology;

/// image padding module.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;
