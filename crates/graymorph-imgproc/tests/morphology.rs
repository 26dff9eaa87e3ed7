use graymorph_image::{Image, ImageSize};
use graymorph_imgproc::morphology::{
    close, dilate, erode, open, Kernel, MorphConfig, MorphologyError, ReducerVariant,
};
use graymorph_imgproc::parallel::ExecutionStrategy;
use rand::{rngs::StdRng, Rng, SeedableRng};

type MorphOp = fn(
    &Image<u8, 1>,
    &mut Image<u8, 1>,
    &Kernel,
    MorphConfig,
) -> Result<(), MorphologyError>;

const VARIANTS: [ReducerVariant; 2] = [ReducerVariant::Windowed, ReducerVariant::BoundedScan];

fn random_image(
    rng: &mut StdRng,
    width: usize,
    height: usize,
) -> Result<Image<u8, 1>, MorphologyError> {
    let data = (0..width * height).map(|_| rng.random::<u8>()).collect();
    Ok(Image::new(ImageSize { width, height }, data)?)
}

fn apply(
    op: MorphOp,
    src: &Image<u8, 1>,
    kernel: &Kernel,
    config: MorphConfig,
) -> Result<Image<u8, 1>, MorphologyError> {
    let mut dst = Image::from_size_val(src.size(), 0)?;
    op(src, &mut dst, kernel, config)?;
    Ok(dst)
}

fn config(variant: ReducerVariant) -> MorphConfig {
    MorphConfig::default().with_variant(variant)
}

#[test]
fn preserves_shape() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(7);
    let kernel = Kernel::ones(3, 5)?;

    for (width, height) in [(1, 1), (1, 9), (7, 2), (16, 11)] {
        let src = random_image(&mut rng, width, height)?;
        for variant in VARIANTS {
            for op in [erode as MorphOp, dilate, open, close] {
                let dst = apply(op, &src, &kernel, config(variant))?;
                assert_eq!(dst.size(), src.size());
                assert_eq!(dst.as_slice().len(), width * height);
            }
        }
    }
    Ok(())
}

#[test]
fn unit_kernel_is_identity() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(11);
    let src = random_image(&mut rng, 13, 9)?;
    let kernel = Kernel::new(&[1, 1], vec![1.0])?;

    for variant in VARIANTS {
        assert_eq!(apply(erode, &src, &kernel, config(variant))?, src);
        assert_eq!(apply(dilate, &src, &kernel, config(variant))?, src);
    }
    Ok(())
}

#[test]
fn flat_image_is_unchanged() -> Result<(), MorphologyError> {
    let size = ImageSize {
        width: 3,
        height: 3,
    };
    let src = Image::<u8, 1>::from_size_val(size, 50)?;

    for (height, width) in [(1, 3), (3, 1), (1, 2), (3, 3)] {
        let kernel = Kernel::ones(height, width)?;
        for config in [MorphConfig::default(), config(ReducerVariant::Windowed)] {
            assert_eq!(apply(erode, &src, &kernel, config)?, src);
            assert_eq!(apply(dilate, &src, &kernel, config)?, src);
        }
    }
    Ok(())
}

#[test]
fn larger_kernel_is_monotonic() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(23);
    let src = random_image(&mut rng, 17, 12)?;
    let small = Kernel::ones(3, 3)?;
    let large = Kernel::ones(5, 5)?;

    for variant in VARIANTS {
        let config = config(variant);

        let eroded_small = apply(erode, &src, &small, config)?;
        let eroded_large = apply(erode, &src, &large, config)?;
        assert!(eroded_large
            .as_slice()
            .iter()
            .zip(eroded_small.as_slice())
            .all(|(l, s)| l >= s));

        let dilated_small = apply(dilate, &src, &small, config)?;
        let dilated_large = apply(dilate, &src, &large, config)?;
        assert!(dilated_large
            .as_slice()
            .iter()
            .zip(dilated_small.as_slice())
            .all(|(l, s)| l <= s));
    }
    Ok(())
}

/// A flat background with single-pixel specks, no two specks in the same 3x3 block.
fn speckled(
    rng: &mut StdRng,
    background: u8,
    speck: u8,
) -> Result<Image<u8, 1>, MorphologyError> {
    let (width, height) = (18, 15);
    let mut data = vec![background; width * height];
    for by in 0..height / 3 {
        for bx in 0..width / 3 {
            if rng.random_bool(0.5) {
                let y = by * 3 + rng.random_range(0..3);
                let x = bx * 3 + rng.random_range(0..3);
                data[y * width + x] = speck;
            }
        }
    }
    Ok(Image::new(ImageSize { width, height }, data)?)
}

#[test]
fn open_removes_dark_specks() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(31);
    let kernel = Kernel::ones(3, 3)?;

    for _ in 0..4 {
        let src = speckled(&mut rng, 128, 0)?;
        let opened = apply(open, &src, &kernel, config(ReducerVariant::BoundedScan))?;
        assert!(opened.as_slice().iter().all(|&v| v == 128));
    }
    Ok(())
}

#[test]
fn close_removes_bright_specks() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(37);
    let kernel = Kernel::ones(3, 3)?;

    for _ in 0..4 {
        let src = speckled(&mut rng, 128, 255)?;
        let closed = apply(close, &src, &kernel, config(ReducerVariant::BoundedScan))?;
        assert!(closed.as_slice().iter().all(|&v| v == 128));
    }
    Ok(())
}

#[test]
fn open_and_close_are_idempotent() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(41);
    let src = random_image(&mut rng, 20, 14)?;

    for size in [3, 5] {
        let kernel = Kernel::ones(size, size)?;
        for variant in VARIANTS {
            let config = config(variant);

            let opened = apply(open, &src, &kernel, config)?;
            assert_eq!(apply(open, &opened, &kernel, config)?, opened);

            let closed = apply(close, &src, &kernel, config)?;
            assert_eq!(apply(close, &closed, &kernel, config)?, closed);
        }
    }
    Ok(())
}

#[test]
fn execution_strategy_does_not_change_results() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(43);
    let src = random_image(&mut rng, 31, 19)?;
    let kernel = Kernel::ones(5, 3)?;

    for variant in VARIANTS {
        let serial = config(variant).with_execution(ExecutionStrategy::Serial);
        let expected = apply(erode, &src, &kernel, serial)?;

        for execution in [ExecutionStrategy::ParallelRows, ExecutionStrategy::Fixed(3)] {
            let parallel = serial.with_execution(execution);
            assert_eq!(apply(erode, &src, &kernel, parallel)?, expected);
        }
    }
    Ok(())
}

#[test]
fn fixed_zero_threads_is_an_error() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(47);
    let src = random_image(&mut rng, 4, 4)?;
    let kernel = Kernel::ones(3, 3)?;
    let config = MorphConfig::default().with_execution(ExecutionStrategy::Fixed(0));

    let res = apply(dilate, &src, &kernel, config);
    assert!(matches!(res, Err(MorphologyError::Parallel(_))));
    Ok(())
}

#[test]
fn box_kernel_variants_agree() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(53);
    let src = random_image(&mut rng, 12, 10)?;

    // edge replication and ignoring out-of-bounds offsets coincide for boxes
    for (height, width) in [(3, 3), (5, 5), (7, 7), (1, 3), (1, 5), (3, 1), (5, 1)] {
        let kernel = Kernel::ones(height, width)?;
        for op in [erode as MorphOp, dilate] {
            let windowed = apply(op, &src, &kernel, config(ReducerVariant::Windowed))?;
            let bounded = apply(op, &src, &kernel, config(ReducerVariant::BoundedScan))?;
            let auto = apply(op, &src, &kernel, MorphConfig::default())?;
            assert_eq!(windowed, bounded);
            assert_eq!(auto, bounded);
        }
    }
    Ok(())
}

#[test]
fn multi_channel_input_is_rejected() -> Result<(), MorphologyError> {
    let size = ImageSize {
        width: 4,
        height: 3,
    };
    let rgb = Image::<u8, 3>::from_size_val(size, 9)?;
    let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;
    let kernel = Kernel::ones(3, 3)?;

    let res = erode(&rgb, &mut dst, &kernel, MorphConfig::default());
    assert_eq!(res, Err(MorphologyError::InvalidChannels(3)));
    assert!(dst.as_slice().iter().all(|&v| v == 0));

    // a single plane goes through
    let plane = rgb.channel(1)?;
    let mut out = Image::<u8, 1>::from_size_val(size, 0)?;
    erode(&plane, &mut out, &kernel, MorphConfig::default())?;
    assert_eq!(out, plane);
    Ok(())
}
