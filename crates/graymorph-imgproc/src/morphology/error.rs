use graymorph_image::ImageError;

use crate::parallel::ParallelError;

/// Errors related to morphological operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MorphologyError {
    /// The input image is not single-channel, i.e. it is not a rank 2 grid.
    #[error("expected a single-channel image, got {0} channels")]
    InvalidChannels(usize),

    /// The kernel shape does not describe a 2-dimensional grid.
    #[error("kernel must be 2-dimensional, got rank {0}")]
    InvalidKernelRank(usize),

    /// The input image has zero width or height.
    #[error("image must have a non-zero width and height")]
    EmptyImage,

    /// The provided kernel has zero width or height.
    #[error("kernel must have a non-zero width and height")]
    EmptyKernel,

    /// The kernel rows have inconsistent lengths.
    #[error("kernel rows must all have the same length")]
    NonRectangularKernel,

    /// The kernel data length does not match its shape.
    #[error("kernel data length ({0}) does not match the kernel shape ({1})")]
    KernelDataLength(usize, usize),

    /// A kernel weight is NaN or infinite.
    #[error("kernel weights must be finite")]
    NonFiniteWeight,

    /// Error from the image layer.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error from the row scheduling layer.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
