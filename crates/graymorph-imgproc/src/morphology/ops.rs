use graymorph_image::{Image, ImageError, ImageSize};

use super::border::{pad, BorderPolicy, PaddedBuffer, ReplicateExtent};
use super::{Kernel, MorphologyError};
use crate::parallel::{for_each_row, ExecutionStrategy};

/// Kernels wider or taller than this use the bounded scan under [`ReducerVariant::Auto`].
pub const AUTO_WINDOWED_MAX_EXTENT: usize = 3;

/// Selects the per-pixel reduction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReducerVariant {
    /// [`ReducerVariant::Windowed`] for kernels up to 3x3 without masked
    /// cells, [`ReducerVariant::BoundedScan`] otherwise.
    ///
    /// Cross and ellipse kernels always take the bounded scan, since the
    /// windowed products of their zero cells would pull every minimum to 0.
    #[default]
    Auto,

    /// Edge-replication padding; each window is multiplied by the kernel
    /// weights and reduced over all of its cells.
    ///
    /// A zero weight contributes a product of 0 instead of being skipped, and
    /// non-binary weights scale the samples before the reduction.
    Windowed,

    /// Zero padding of width 1 plus a bounds check of every offset against the
    /// source. Zero weights are skipped (true masking).
    BoundedScan,
}

impl ReducerVariant {
    /// The concrete variant used for `kernel`.
    pub fn resolve(self, kernel: &Kernel) -> ReducerVariant {
        match self {
            ReducerVariant::Auto => {
                if kernel.width() > AUTO_WINDOWED_MAX_EXTENT
                    || kernel.height() > AUTO_WINDOWED_MAX_EXTENT
                    || kernel.has_masked_cells()
                {
                    ReducerVariant::BoundedScan
                } else {
                    ReducerVariant::Windowed
                }
            }
            variant => variant,
        }
    }
}

/// Configuration shared by all morphological operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MorphConfig {
    /// The reduction algorithm.
    pub variant: ReducerVariant,
    /// Edge replication extent used by [`ReducerVariant::Windowed`].
    pub replicate_extent: ReplicateExtent,
    /// How output rows are scheduled.
    pub execution: ExecutionStrategy,
}

impl MorphConfig {
    /// Set the reduction algorithm.
    pub fn with_variant(mut self, variant: ReducerVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the edge replication extent.
    pub fn with_replicate_extent(mut self, extent: ReplicateExtent) -> Self {
        self.replicate_extent = extent;
        self
    }

    /// Set the row scheduling strategy.
    pub fn with_execution(mut self, execution: ExecutionStrategy) -> Self {
        self.execution = execution;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reduction {
    Max,
    Min,
}

impl Reduction {
    // value an empty neighborhood collapses to in the bounded scan
    fn seed(self) -> u8 {
        match self {
            Reduction::Max => u8::MIN,
            Reduction::Min => u8::MAX,
        }
    }

    #[inline]
    fn combine(self, acc: u8, val: u8) -> u8 {
        match self {
            Reduction::Max => acc.max(val),
            Reduction::Min => acc.min(val),
        }
    }

    #[inline]
    fn combine_f32(self, acc: f32, val: f32) -> f32 {
        match self {
            Reduction::Max => acc.max(val),
            Reduction::Min => acc.min(val),
        }
    }

    fn seed_f32(self) -> f32 {
        match self {
            Reduction::Max => f32::NEG_INFINITY,
            Reduction::Min => f32::INFINITY,
        }
    }
}

fn validate<const C: usize>(
    src: &Image<u8, C>,
    dst: &Image<u8, C>,
) -> Result<(), MorphologyError> {
    if C != 1 {
        return Err(MorphologyError::InvalidChannels(C));
    }

    if src.width() == 0 || src.height() == 0 {
        return Err(MorphologyError::EmptyImage);
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            src.width(),
            src.height(),
        )
        .into());
    }

    Ok(())
}

fn windowed_row(
    padded: &PaddedBuffer,
    kernel: &Kernel,
    reduction: Reduction,
    r: usize,
    dst_row: &mut [u8],
) {
    let (k_height, k_width) = (kernel.height(), kernel.width());

    debug_assert_eq!(
        padded.as_slice().len(),
        padded.size().width * padded.size().height
    );
    // a window anchored at any output pixel fits in the padded buffer
    debug_assert!(r + k_height <= padded.size().height);
    debug_assert!(dst_row.len() + k_width - 1 <= padded.size().width);

    for (c, out) in dst_row.iter_mut().enumerate() {
        let mut acc = reduction.seed_f32();
        for ky in 0..k_height {
            let window_row = &padded.row(r + ky)[c..c + k_width];
            let weights = &kernel.data()[ky * k_width..(ky + 1) * k_width];
            for (&sample, &weight) in window_row.iter().zip(weights) {
                acc = reduction.combine_f32(acc, sample as f32 * weight);
            }
        }
        *out = acc.round().clamp(0.0, 255.0) as u8;
    }
}

fn bounded_scan_row(
    padded: &PaddedBuffer,
    kernel: &Kernel,
    reduction: Reduction,
    size: ImageSize,
    r: usize,
    dst_row: &mut [u8],
) {
    let (pad_h, pad_w) = kernel.pad();
    let border = padded.padding();

    for (c, out) in dst_row.iter_mut().enumerate() {
        let mut acc = reduction.seed();
        for ky in 0..kernel.height() {
            let Some(sy) = (r + ky).checked_sub(pad_h).filter(|&y| y < size.height) else {
                continue;
            };
            for kx in 0..kernel.width() {
                if kernel.weight(ky, kx) == 0.0 {
                    continue;
                }
                let Some(sx) = (c + kx).checked_sub(pad_w).filter(|&x| x < size.width) else {
                    continue;
                };
                let sample = padded.get(sy + border.top, sx + border.left);
                acc = reduction.combine(acc, sample);
            }
        }
        *out = acc;
    }
}

fn reduce<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel: &Kernel,
    config: MorphConfig,
    reduction: Reduction,
) -> Result<(), MorphologyError> {
    validate(src, dst)?;

    let size = src.size();
    let variant = config.variant.resolve(kernel);
    let policy = match variant {
        ReducerVariant::BoundedScan => BorderPolicy::ZeroFill,
        _ => BorderPolicy::Replicate(config.replicate_extent),
    };
    let padded = pad(src, kernel, policy)?;

    log::debug!(
        "{:?} reduction: {:?} on {} with a {}x{} kernel, padded to {}",
        reduction,
        variant,
        size,
        kernel.height(),
        kernel.width(),
        padded.size()
    );
    if variant == ReducerVariant::BoundedScan && !kernel.is_binary() {
        log::debug!("bounded scan treats every non-zero weight as 1");
    }

    for_each_row(
        dst.as_slice_mut(),
        size.width,
        config.execution,
        |r, dst_row| match variant {
            ReducerVariant::BoundedScan => {
                bounded_scan_row(&padded, kernel, reduction, size, r, dst_row)
            }
            _ => windowed_row(&padded, kernel, reduction, r, dst_row),
        },
    )?;

    Ok(())
}

/// Erode an image using a [`Kernel`].
///
/// **Naming note:** in this crate erosion is the *max*-under-mask reduction,
/// the inverse of the textbook convention. Each pixel is replaced by the
/// maximum of the neighborhood values selected by the kernel, so bright
/// regions grow.
///
/// # Arguments
///
/// * `src` - The source image, single-channel.
/// * `dst` - The destination image (will be overwritten), same size as `src`.
/// * `kernel` - The morphological structuring element ([`Kernel`]).
/// * `config` - The reducer configuration ([`MorphConfig`]).
///
/// # Errors
///
/// [`MorphologyError::InvalidChannels`] if the images are not single-channel,
/// [`MorphologyError::EmptyImage`] for an empty source, and
/// [`MorphologyError::Image`] if `dst` does not match the size of `src`.
///
/// # Example
///
/// ```rust
/// use graymorph_image::{Image, ImageSize};
/// use graymorph_imgproc::morphology::{erode, Kernel, MorphConfig};
///
/// let size = ImageSize { width: 3, height: 3 };
/// let src = Image::<u8, 1>::new(size, vec![0, 0, 0, 0, 255, 0, 0, 0, 0]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// erode(&src, &mut dst, &Kernel::ones(3, 3).unwrap(), MorphConfig::default()).unwrap();
/// assert!(dst.as_slice().iter().all(|&v| v == 255));
/// ```
pub fn erode<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel: &Kernel,
    config: MorphConfig,
) -> Result<(), MorphologyError> {
    reduce(src, dst, kernel, config, Reduction::Max)
}

/// Dilate an image using a [`Kernel`].
///
/// **Naming note:** in this crate dilation is the *min*-under-mask reduction,
/// the inverse of the textbook convention. Each pixel is replaced by the
/// minimum of the neighborhood values selected by the kernel, so dark regions
/// grow. Under [`ReducerVariant::BoundedScan`] a neighborhood with no
/// in-bounds active cell yields 255.
///
/// # Arguments
///
/// * `src` - The source image, single-channel.
/// * `dst` - The destination image (will be overwritten), same size as `src`.
/// * `kernel` - The morphological structuring element ([`Kernel`]).
/// * `config` - The reducer configuration ([`MorphConfig`]).
///
/// # Errors
///
/// Same as [`erode`].
pub fn dilate<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel: &Kernel,
    config: MorphConfig,
) -> Result<(), MorphologyError> {
    reduce(src, dst, kernel, config, Reduction::Min)
}

/// Opening: [`erode`] followed by [`dilate`] on the eroded image.
///
/// With the max/min naming of this crate, opening fills dark specks smaller
/// than the kernel.
///
/// # Arguments
///
/// * `src` - The source image, single-channel.
/// * `dst` - The destination image (will be overwritten), same size as `src`.
/// * `kernel` - The morphological structuring element ([`Kernel`]).
/// * `config` - The reducer configuration ([`MorphConfig`]).
pub fn open<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel: &Kernel,
    config: MorphConfig,
) -> Result<(), MorphologyError> {
    validate(src, dst)?;
    let mut temp_img = Image::from_size_val(src.size(), 0)?;
    erode(src, &mut temp_img, kernel, config)?;
    dilate(&temp_img, dst, kernel, config)?;
    Ok(())
}

/// Closing: [`dilate`] followed by [`erode`] on the dilated image.
///
/// With the max/min naming of this crate, closing removes bright specks
/// smaller than the kernel.
///
/// # Arguments
///
/// * `src` - The source image, single-channel.
/// * `dst` - The destination image (will be overwritten), same size as `src`.
/// * `kernel` - The morphological structuring element ([`Kernel`]).
/// * `config` - The reducer configuration ([`MorphConfig`]).
pub fn close<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel: &Kernel,
    config: MorphConfig,
) -> Result<(), MorphologyError> {
    validate(src, dst)?;
    let mut temp_img = Image::from_size_val(src.size(), 0)?;
    dilate(src, &mut temp_img, kernel, config)?;
    erode(&temp_img, dst, kernel, config)?;
    Ok(())
}
