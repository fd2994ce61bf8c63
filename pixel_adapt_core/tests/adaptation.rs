use ndarray::{Array3, Axis, ShapeBuilder};
use pixel_adapt_core::{
    adapt_pixel_distribution, apply_histogram, fourier_domain_adaptation, match_histograms,
    AdaptError, AdaptationConfig, DomainAdapter, Image, PixelDepth, TransformKind,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const KINDS: [TransformKind; 3] = [TransformKind::Pca, TransformKind::Standard, TransformKind::MinMax];

fn random_u8(seed: u64, height: usize, width: usize, lo: u8, hi: u8) -> Array3<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array3::from_shape_simple_fn((height, width, 3), || rng.gen_range(lo..=hi))
}

fn random_f32(seed: u64, height: usize, width: usize) -> Array3<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array3::from_shape_simple_fn((height, width, 3), || rng.gen::<f32>())
}

fn channel_cdf(samples: &Array3<u8>, channel: usize) -> Vec<f64> {
    let plane = samples.index_axis(Axis(2), channel);
    let mut counts = [0usize; 256];
    for &v in plane.iter() {
        counts[usize::from(v)] += 1;
    }
    let total = plane.len() as f64;
    let mut running = 0;
    counts
        .iter()
        .map(|&c| {
            running += c;
            running as f64 / total
        })
        .collect()
}

#[test]
fn weight_zero_reproduces_input_for_every_kind() {
    let image = Image::from_f32(random_f32(1, 24, 20));
    let reference = Image::from_f32(random_f32(2, 24, 20).mapv(|v| v * 0.3));
    for kind in KINDS {
        let out = adapt_pixel_distribution(&image, &reference, kind, 0.0).unwrap();
        assert_eq!(out, image, "{kind}");
    }
}

#[test]
fn weight_one_moves_toward_reference_for_every_kind() {
    let image = Image::from_u8(random_u8(3, 24, 24, 0, 90));
    let reference = Image::from_u8(random_u8(4, 24, 24, 150, 255));
    for kind in KINDS {
        let out = adapt_pixel_distribution(&image, &reference, kind, 1.0).unwrap();
        assert_ne!(out, image, "{kind}");
        let before = image.channel_means();
        let after = out.channel_means();
        let target = reference.channel_means();
        for c in 0..3 {
            assert!((after[c] - target[c]).abs() < (before[c] - target[c]).abs(), "{kind}");
        }
    }
}

#[test]
fn pca_self_adaptation_reproduces_reference() {
    let reference = random_u8(5, 32, 32, 0, 255);
    let image = Image::from_u8(reference.clone());
    let out = adapt_pixel_distribution(&image, &image, TransformKind::Pca, 1.0).unwrap();
    for (a, b) in reference.iter().zip(out.as_u8().unwrap().iter()) {
        assert!((i16::from(*a) - i16::from(*b)).abs() <= 1);
    }
}

#[test]
fn constant_images_under_minmax_take_reference_value() {
    let image = Image::from_u8(Array3::from_elem((8, 8, 3), 10));
    let reference = Image::from_u8(Array3::from_elem((8, 8, 3), 200));
    let out = adapt_pixel_distribution(&image, &reference, TransformKind::MinMax, 1.0).unwrap();
    assert!(out.as_u8().unwrap().iter().all(|&v| v == 200));
}

#[test]
fn fortran_and_permuted_layouts_adapt_like_standard_ones() {
    let standard = random_u8(25, 6, 5, 0, 255);
    let reference = random_u8(26, 6, 5, 60, 200);
    let mut fortran = Array3::<u8>::zeros((6, 5, 3).f());
    fortran.assign(&standard);
    let planar = standard.clone().permuted_axes([2, 0, 1]).as_standard_layout().into_owned();
    let permuted = planar.permuted_axes([1, 2, 0]);

    for kind in KINDS {
        let expected = adapt_pixel_distribution(
            &Image::from_u8(standard.clone()),
            &Image::from_u8(reference.clone()),
            kind,
            1.0,
        )
        .unwrap();
        for layout in [&fortran, &permuted] {
            let image = Image::from_u8(layout.clone());
            let out = adapt_pixel_distribution(&image, &image, kind, 1.0).unwrap();
            for (a, b) in standard.iter().zip(out.as_u8().unwrap().iter()) {
                assert!((i16::from(*a) - i16::from(*b)).abs() <= 1, "{kind}");
            }
            let out = adapt_pixel_distribution(&image, &Image::from_u8(reference.clone()), kind, 1.0)
                .unwrap();
            assert_eq!(out, expected, "{kind}");
        }
    }
}

#[test]
fn shared_adapter_is_usable_from_several_threads() {
    let reference = random_u8(6, 16, 16, 100, 200);
    let adapter = DomainAdapter::new(TransformKind::Pca.build(), &reference, None).unwrap();
    let sources: Vec<Array3<u8>> = (0..4).map(|seed| random_u8(10 + seed, 16, 16, 0, 120)).collect();

    let sequential: Vec<Array3<u8>> = sources.iter().map(|s| adapter.adapt(s).unwrap()).collect();
    let shared = &adapter;
    let parallel: Vec<Array3<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|s| scope.spawn(move || shared.adapt(s).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(sequential, parallel);
}

#[test]
fn fourier_beta_zero_returns_source() {
    let image = Image::from_f32(random_f32(7, 32, 24));
    let target = Image::from_f32(random_f32(8, 32, 24));
    let out = fourier_domain_adaptation(&image, &target, 0.0).unwrap();
    for (a, b) in image.as_f32().unwrap().iter().zip(out.as_f32().unwrap().iter()) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn fourier_self_adaptation_returns_input() {
    let image = Image::from_f32(random_f32(9, 64, 64));
    let out = fourier_domain_adaptation(&image, &image, 0.5).unwrap();
    assert_eq!(out.depth(), PixelDepth::F32);
    for (a, b) in image.as_f32().unwrap().iter().zip(out.as_f32().unwrap().iter()) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn fourier_moves_mean_toward_target() {
    let image = Image::from_u8(random_u8(11, 32, 32, 0, 80));
    let target = Image::from_u8(random_u8(12, 32, 32, 170, 255));
    let out = fourier_domain_adaptation(&image, &target, 0.1).unwrap();
    let before = image.channel_means();
    let after = out.channel_means();
    let goal = target.channel_means();
    for c in 0..3 {
        assert!((after[c] - goal[c]).abs() < (before[c] - goal[c]).abs());
    }
}

#[test]
fn fourier_rejects_shape_mismatch_instead_of_resizing() {
    let image = Image::from_u8(random_u8(13, 16, 16, 0, 255));
    let target = Image::from_u8(random_u8(14, 16, 20, 0, 255));
    assert!(matches!(
        fourier_domain_adaptation(&image, &target, 0.1),
        Err(AdaptError::ShapeMismatch { .. })
    ));
}

#[test]
fn histogram_matching_follows_reference_cdf() {
    let image = random_u8(15, 40, 40, 0, 255);
    let reference = random_u8(16, 40, 40, 60, 140);
    let matched = match_histograms(&image, &reference).unwrap();
    for c in 0..3 {
        let gap = channel_cdf(&matched, c)
            .iter()
            .zip(channel_cdf(&reference, c).iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        assert!(gap < 0.05, "channel {c} gap {gap}");
    }
}

#[test]
fn histogram_ratio_bounds() {
    let image = Image::from_u8(random_u8(17, 20, 20, 0, 255));
    let reference = Image::from_u8(random_u8(18, 20, 20, 30, 90));

    let untouched = apply_histogram(&image, &reference, 0.0).unwrap();
    assert_eq!(untouched, image);

    let full = apply_histogram(&image, &reference, 1.0).unwrap();
    let expected = match_histograms(image.as_u8().unwrap(), reference.as_u8().unwrap()).unwrap();
    assert_eq!(full.as_u8().unwrap(), &expected);
}

#[test]
fn differently_sized_references_are_resized() {
    let image = Image::from_u8(random_u8(19, 24, 16, 0, 255));
    let reference = Image::from_u8(random_u8(20, 48, 40, 0, 255));

    let adapted = adapt_pixel_distribution(&image, &reference, TransformKind::Standard, 0.7).unwrap();
    assert_eq!(adapted.shape(), image.shape());

    let matched = apply_histogram(&image, &reference, 0.7).unwrap();
    assert_eq!(matched.shape(), image.shape());
}

#[test]
fn depth_mismatch_is_reported() {
    let image = Image::from_u8(random_u8(21, 8, 8, 0, 255));
    let reference = Image::from_f32(random_f32(22, 8, 8));
    let err = adapt_pixel_distribution(&image, &reference, TransformKind::Pca, 0.5).unwrap_err();
    assert!(err.to_string().contains("same dtype"));
}

#[test]
fn configured_sections_drive_the_entry_points() {
    let config = AdaptationConfig::from_str(
        "[pixel_distribution]\ntransform = \"standard\"\nweight = 1.0\n[fourier]\nbeta = 0.0\n[histogram]\nblend_ratio = 0.0",
    )
    .unwrap();
    let image = Image::from_u8(random_u8(23, 16, 16, 0, 100));
    let reference = Image::from_u8(random_u8(24, 16, 16, 120, 255));

    assert_eq!(config.histogram.apply(&image, &reference).unwrap(), image);
    let adapted = config.pixel_distribution.apply(&image, &reference).unwrap();
    assert!(adapted.channel_means()[0] > image.channel_means()[0]);
    let fourier = config.fourier.apply(&image, &reference).unwrap();
    for (a, b) in image.as_u8().unwrap().iter().zip(fourier.as_u8().unwrap().iter()) {
        assert!((i16::from(*a) - i16::from(*b)).abs() <= 1);
    }
}
