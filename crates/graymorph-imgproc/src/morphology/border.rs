use graymorph_image::{Image, ImageSize};

use super::{Kernel, MorphologyError};
use crate::padding::{spatial_padding, Padding2D, PaddingMode};

/// How far edge replication extends the source on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplicateExtent {
    /// Pad by the kernel half-extent `(height / 2, width / 2)`.
    ///
    /// The window anchored at `(r, c)` of the padded buffer is centered on
    /// source pixel `(r, c)`.
    #[default]
    Half,

    /// Pad by the full kernel extent `(height, width)`.
    ///
    /// The window anchored at `(r, c)` then covers source rows `r - height..r`
    /// and columns `c - width..c`, i.e. it sits above and to the left of the
    /// output pixel.
    Full,
}

/// Border handling policy used to build a [`PaddedBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderPolicy {
    /// Repeat the nearest border row/column outward.
    Replicate(ReplicateExtent),

    /// Surround the source with a single ring of zeros, whatever the kernel size.
    ///
    /// Only safe together with a reducer that bounds-checks every offset
    /// against the source grid.
    ZeroFill,
}

impl BorderPolicy {
    /// The padding this policy applies for `kernel`.
    pub fn padding(&self, kernel: &Kernel) -> Padding2D {
        match self {
            BorderPolicy::Replicate(ReplicateExtent::Half) => {
                let (pad_h, pad_w) = kernel.pad();
                Padding2D::symmetric(pad_h, pad_w)
            }
            BorderPolicy::Replicate(ReplicateExtent::Full) => {
                Padding2D::symmetric(kernel.height(), kernel.width())
            }
            BorderPolicy::ZeroFill => Padding2D::symmetric(1, 1),
        }
    }
}

/// A single-channel source extended by a border.
///
/// Owned by one erosion/dilation call and read-only once built.
#[derive(Debug, Clone)]
pub struct PaddedBuffer {
    data: Vec<u8>,
    size: ImageSize,
    padding: Padding2D,
}

impl PaddedBuffer {
    /// Size of the padded grid.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Padding applied around the source.
    pub fn padding(&self) -> Padding2D {
        self.padding
    }

    /// The padded samples in row-major order.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Row `py` of the padded grid.
    #[inline]
    pub fn row(&self, py: usize) -> &[u8] {
        let stride = self.size.width;
        &self.data[py * stride..(py + 1) * stride]
    }

    /// Sample at padded coordinates `(py, px)`.
    #[inline]
    pub fn get(&self, py: usize, px: usize) -> u8 {
        self.data[py * self.size.width + px]
    }
}

/// Extend `src` by the border `policy` implies for `kernel`.
///
/// # Arguments
///
/// * `src` - The single-channel source image.
/// * `kernel` - The structuring element the buffer is sized for.
/// * `policy` - The border handling policy.
///
/// # Errors
///
/// [`MorphologyError::InvalidChannels`] if `src` has more than one channel.
///
/// # Example
///
/// ```rust
/// use graymorph_image::{Image, ImageSize};
/// use graymorph_imgproc::morphology::{pad, BorderPolicy, Kernel};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![3, 7]).unwrap();
/// let kernel = Kernel::ones(3, 3).unwrap();
///
/// let padded = pad(&src, &kernel, BorderPolicy::ZeroFill).unwrap();
/// assert_eq!(padded.size(), ImageSize { width: 4, height: 3 });
/// assert_eq!(padded.row(1), &[0, 3, 7, 0]);
/// ```
pub fn pad<const C: usize>(
    src: &Image<u8, C>,
    kernel: &Kernel,
    policy: BorderPolicy,
) -> Result<PaddedBuffer, MorphologyError> {
    if C != 1 {
        return Err(MorphologyError::InvalidChannels(C));
    }

    let padding = policy.padding(kernel);
    let size = padding.padded_size(src.size());
    let mut padded = Image::<u8, C>::from_size_val(size, 0)?;

    let mode = match policy {
        BorderPolicy::Replicate(_) => PaddingMode::Replicate,
        BorderPolicy::ZeroFill => PaddingMode::Constant,
    };
    spatial_padding(src, &mut padded, padding, mode, [0; C])?;

    Ok(PaddedBuffer {
        data: padded.into_vec(),
        size,
        padding,
    })
}
