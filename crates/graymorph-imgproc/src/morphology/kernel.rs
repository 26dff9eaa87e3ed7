use super::MorphologyError;

/// Shapes of morphological [`Kernel`]s.
///
/// All kernels are centered at `(height / 2, width / 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelShape {
    /// A rectangular box structuring element.
    ///
    /// All pixels within the box are included in the morphological operation.
    Box {
        /// The side length of the square kernel (size x size).
        size: usize,
    },

    /// A cross (plus) shaped structuring element.
    ///
    /// Only pixels along the horizontal and vertical center lines are included.
    Cross {
        /// The side length of the square cross kernel (size x size).
        size: usize,
    },

    /// An ellipse (or circle) shaped structuring element.
    ///
    /// Pixels inside the elliptical boundary are included, defined by the
    /// equation: (x^2 / rx^2) + (y^2 / ry^2) <= 1.
    Ellipse {
        /// The width of the ellipse.
        width: usize,
        /// The height of the ellipse.
        height: usize,
    },
}

/// A morphological structuring element.
///
/// A dense `height x width` grid of weights stored in row-major order. Weights
/// are usually 0 or 1: a nonzero weight includes the offset in the
/// neighborhood, a zero weight excludes it. The windowed reducer multiplies the
/// samples by the weights, so non-binary weights change the result there.
///
/// # Example
///
/// ```rust
/// use graymorph_imgproc::morphology::{Kernel, KernelShape};
///
/// // Create a 3x3 box kernel
/// let kernel = Kernel::from_shape(KernelShape::Box { size: 3 }).unwrap();
/// assert_eq!(kernel.width(), 3);
/// assert_eq!(kernel.height(), 3);
/// assert_eq!(kernel.pad(), (1, 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Create a kernel from a shape and row-major weights.
    ///
    /// # Arguments
    ///
    /// * `shape` - The kernel shape as `[height, width]`.
    /// * `data` - The kernel weights, `height * width` values.
    ///
    /// # Errors
    ///
    /// [`MorphologyError::InvalidKernelRank`] if `shape` has any length other than 2.
    pub fn new(shape: &[usize], data: Vec<f32>) -> Result<Self, MorphologyError> {
        let &[height, width] = shape else {
            return Err(MorphologyError::InvalidKernelRank(shape.len()));
        };

        if height == 0 || width == 0 {
            return Err(MorphologyError::EmptyKernel);
        }

        if data.len() != height * width {
            return Err(MorphologyError::KernelDataLength(data.len(), height * width));
        }

        if data.iter().any(|w| !w.is_finite()) {
            return Err(MorphologyError::NonFiniteWeight);
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a kernel from a list of rows.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, MorphologyError> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(MorphologyError::NonRectangularKernel);
        }

        Self::new(&[rows.len(), width], rows.concat())
    }

    /// Create a morphological kernel from a shape.
    pub fn from_shape(shape: KernelShape) -> Result<Self, MorphologyError> {
        match shape {
            KernelShape::Box { size } => Self::ones(size, size),
            KernelShape::Cross { size } => cross_kernel(size),
            KernelShape::Ellipse { width, height } => ellipse_kernel(width, height),
        }
    }

    /// Create a `height x width` kernel filled with ones.
    pub fn ones(height: usize, width: usize) -> Result<Self, MorphologyError> {
        Self::new(&[height, width], vec![1.0; height * width])
    }

    /// Get a reference to the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get the width of the kernel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the kernel.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the padding for the kernel (offset from center) as `(pad_h, pad_w)`.
    pub fn pad(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }

    /// Get the weight at row `ky` and column `kx`.
    #[inline]
    pub fn weight(&self, ky: usize, kx: usize) -> f32 {
        self.data[ky * self.width + kx]
    }

    /// Whether any cell has weight 0, i.e. is excluded from the neighborhood.
    pub fn has_masked_cells(&self) -> bool {
        self.data.iter().any(|&w| w == 0.0)
    }

    /// Whether every weight is either 0 or 1.
    pub fn is_binary(&self) -> bool {
        self.data.iter().all(|&w| w == 0.0 || w == 1.0)
    }
}

fn cross_kernel(size: usize) -> Result<Kernel, MorphologyError> {
    let mut data = vec![0.0; size * size];
    let mid = size / 2;

    // fill horizontal line
    for j in 0..size {
        data[mid * size + j] = 1.0;
    }

    // fill vertical line
    for i in 0..size {
        data[i * size + mid] = 1.0;
    }

    Kernel::new(&[size, size], data)
}

fn ellipse_kernel(width: usize, height: usize) -> Result<Kernel, MorphologyError> {
    let mut data = vec![0.0; width * height];
    let cy = (height / 2) as f32;
    let cx = (width / 2) as f32;
    let ry = height as f32 / 2.0;
    let rx = width as f32 / 2.0;

    for i in 0..height {
        for j in 0..width {
            let dy = (i as f32 - cy) / ry;
            let dx = (j as f32 - cx) / rx;
            if dx * dx + dy * dy <= 1.0 {
                data[i * width + j] = 1.0;
            }
        }
    }

    Kernel::new(&[height, width], data)
}
