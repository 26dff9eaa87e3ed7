use argh::FromArgs;
use std::path::PathBuf;
use std::str::FromStr;

use graymorph::image::{Image, ImageSize};
use graymorph::imgproc::morphology::{
    self, Kernel, KernelShape, MorphConfig, MorphologyError, ReducerVariant, ReplicateExtent,
};
use graymorph::imgproc::parallel::ExecutionStrategy;

#[derive(Debug, Clone, Copy)]
enum Op {
    Erode,
    Dilate,
    Open,
    Close,
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "erode" => Ok(Op::Erode),
            "dilate" => Ok(Op::Dilate),
            "open" => Ok(Op::Open),
            "close" => Ok(Op::Close),
            _ => Err(format!("unknown operation: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    Box,
    Cross,
    Ellipse,
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "box" => Ok(Shape::Box),
            "cross" => Ok(Shape::Cross),
            "ellipse" => Ok(Shape::Ellipse),
            _ => Err(format!("unknown kernel shape: {s}")),
        }
    }
}

fn parse_variant(s: &str) -> Result<ReducerVariant, String> {
    match s {
        "auto" => Ok(ReducerVariant::Auto),
        "windowed" => Ok(ReducerVariant::Windowed),
        "bounded" => Ok(ReducerVariant::BoundedScan),
        _ => Err(format!("unknown variant: {s}")),
    }
}

#[derive(FromArgs)]
/// Apply grayscale morphology to an image and write the result
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// operation to apply: erode, dilate, open or close
    #[argh(option, default = "Op::Close")]
    op: Op,

    /// kernel shape: box, cross or ellipse
    #[argh(option, default = "Shape::Box")]
    kernel_shape: Shape,

    /// kernel side length in pixels
    #[argh(option, default = "3")]
    kernel_size: usize,

    /// reducer variant: auto (bounded for masked or large kernels), windowed or bounded
    #[argh(option, default = "ReducerVariant::Auto", from_str_fn(parse_variant))]
    variant: ReducerVariant,

    /// pad by the full kernel extent in the windowed reducer
    #[argh(switch)]
    replicate_full: bool,

    /// number of worker threads, defaults to the global pool
    #[argh(option)]
    threads: Option<usize>,
}

fn build_kernel(shape: Shape, size: usize) -> Result<Kernel, MorphologyError> {
    let shape = match shape {
        Shape::Box => KernelShape::Box { size },
        Shape::Cross => KernelShape::Cross { size },
        Shape::Ellipse => KernelShape::Ellipse {
            width: size,
            height: size,
        },
    };
    Kernel::from_shape(shape)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the image as a single luma plane
    let luma = image::open(&args.image_path)?.to_luma8();
    let size = ImageSize {
        width: luma.width() as usize,
        height: luma.height() as usize,
    };
    let src = Image::<u8, 1>::new(size, luma.into_raw())?;
    log::info!("loaded {} from {}", size, args.image_path.display());

    let kernel = build_kernel(args.kernel_shape, args.kernel_size)?;

    let config = MorphConfig::default()
        .with_variant(args.variant)
        .with_replicate_extent(if args.replicate_full {
            ReplicateExtent::Full
        } else {
            ReplicateExtent::Half
        })
        .with_execution(match args.threads {
            Some(n) => ExecutionStrategy::Fixed(n),
            None => ExecutionStrategy::ParallelRows,
        });

    let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;

    let start = std::time::Instant::now();
    match args.op {
        Op::Erode => morphology::erode(&src, &mut dst, &kernel, config)?,
        Op::Dilate => morphology::dilate(&src, &mut dst, &kernel, config)?,
        Op::Open => morphology::open(&src, &mut dst, &kernel, config)?,
        Op::Close => morphology::close(&src, &mut dst, &kernel, config)?,
    }
    log::info!("{:?} took {:?}", args.op, start.elapsed());

    let out = image::GrayImage::from_raw(size.width as u32, size.height as u32, dst.into_vec())
        .ok_or("output buffer does not match the image size")?;
    out.save(&args.output)?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}
