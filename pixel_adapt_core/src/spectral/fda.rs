//! Fourier Domain Adaptation: low-frequency amplitude swap.
//!
//! Each channel of the source is moved to the centered frequency domain and
//! the amplitude inside a square window around the zero-frequency bin is
//! replaced by the target's. Phase is kept, so spatial structure survives
//! while global color and illumination follow the target.

use std::ops::Range;

use ndarray::{s, Array2, Array3, ArrayView2, Axis, Zip};
use rayon::prelude::*;
use rustfft::num_complex::Complex;

use super::fft::{fft2, fftshift, ifft2, ifftshift};
use crate::error::{AdaptError, AdaptResult};
use crate::image::blend::{ensure_not_empty, warn_if_outside_unit};
use crate::image::Image;

/// Low-frequency region of a centered spectrum.
///
/// Half-size `b = floor(min(H, W) · beta)`; the window covers rows
/// `[H/2 - b, H/2 + b]` and columns `[W/2 - b, W/2 + b]`, clamped to the
/// spectrum. `b = 0` (also for negative or NaN `beta`) is an empty window.
///
/// That is `2b + 1` bins per axis, one more than the half-open
/// `[(H-1)/2 - b, (H-1)/2 + b)` extent of the usual `low_freq_mutate`
/// formulation, so `beta = 0.5` always covers the whole spectrum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmplitudeWindow {
    rows: Range<usize>,
    cols: Range<usize>,
}

impl AmplitudeWindow {
    pub fn new(height: usize, width: usize, beta: f32) -> Self {
        let border = (height.min(width) as f32 * beta).floor();
        if !(border >= 1.0) {
            return Self {
                rows: 0..0,
                cols: 0..0,
            };
        }
        let border = border as usize;
        Self {
            rows: centered_span(height, border),
            cols: centered_span(width, border),
        }
    }

    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    pub fn cols(&self) -> Range<usize> {
        self.cols.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    /// Number of spectrum bins inside the window.
    pub fn area(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    /// Copy `target` amplitudes into `amplitude` inside the window.
    pub fn apply(&self, amplitude: &mut Array2<f64>, target: &Array2<f64>) {
        if self.is_empty() {
            return;
        }
        amplitude
            .slice_mut(s![self.rows(), self.cols()])
            .assign(&target.slice(s![self.rows(), self.cols()]));
    }
}

fn centered_span(len: usize, border: usize) -> Range<usize> {
    let center = len / 2;
    center.saturating_sub(border)..center.saturating_add(border).saturating_add(1).min(len)
}

/// Replace the low-frequency amplitude of `image` with that of `target`.
///
/// `target` must have exactly the shape of `image`; no resize is attempted.
/// Its samples are read in the scale of `image`'s depth. The result keeps
/// the depth, channel count and 2-D form of `image` and is clipped to the
/// depth's valid range.
pub fn fourier_domain_adaptation(image: &Image, target: &Image, beta: f32) -> AdaptResult<Image> {
    warn_if_outside_unit("beta", beta);
    if image.shape() != target.shape() {
        return Err(AdaptError::ShapeMismatch {
            expected: image.shape(),
            got: target.shape(),
            context: "fourier_domain_adaptation".into(),
        });
    }
    ensure_not_empty(image, "fourier_domain_adaptation")?;

    let (height, width, channels) = image.shape();
    let depth = image.depth();
    let source = image.to_f32_samples();
    let reference = target.to_f32_samples_in(depth);
    let window = AmplitudeWindow::new(height, width, beta);
    tracing::debug!(
        "fourier adaptation on {}x{}x{} with window rows {:?} cols {:?}",
        height,
        width,
        channels,
        window.rows(),
        window.cols()
    );

    let planes: Vec<Array2<f64>> = (0..channels)
        .into_par_iter()
        .map(|channel| {
            swap_low_frequencies(
                source.index_axis(Axis(2), channel),
                reference.index_axis(Axis(2), channel),
                &window,
            )
        })
        .collect();

    let mut adapted = Array3::<f32>::zeros((height, width, channels));
    for (mut dst, plane) in adapted.axis_iter_mut(Axis(2)).zip(planes.iter()) {
        Zip::from(&mut dst)
            .and(plane)
            .for_each(|d, &v| *d = v as f32);
    }
    Ok(Image::from_f32_samples(&adapted, depth, image.is_mono_2d()))
}

fn swap_low_frequencies(
    source: ArrayView2<'_, f32>,
    target: ArrayView2<'_, f32>,
    window: &AmplitudeWindow,
) -> Array2<f64> {
    let source_spectrum = fftshift(&fft2(source.mapv(f64::from).view()));
    let target_spectrum = fftshift(&fft2(target.mapv(f64::from).view()));

    let mut amplitude = source_spectrum.mapv(|z| z.norm());
    let phase = source_spectrum.mapv(|z| z.arg());
    window.apply(&mut amplitude, &target_spectrum.mapv(|z| z.norm()));

    let recombined = Zip::from(&amplitude)
        .and(&phase)
        .map_collect(|&a, &p| Complex::from_polar(a, p));
    ifft2(&ifftshift(&recombined)).mapv(|z| z.re)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textured(height: usize, width: usize, channels: usize) -> Array3<f32> {
        Array3::from_shape_fn((height, width, channels), |(y, x, c)| {
            0.5 + 0.3 * ((y as f32 * 0.7 + x as f32 * 1.3 + c as f32).sin())
        })
    }

    #[test]
    fn window_is_empty_for_small_or_invalid_beta() {
        assert!(AmplitudeWindow::new(16, 16, 0.0).is_empty());
        assert!(AmplitudeWindow::new(16, 16, 0.05).is_empty());
        assert!(AmplitudeWindow::new(16, 16, -0.3).is_empty());
        assert!(AmplitudeWindow::new(16, 16, f32::NAN).is_empty());
    }

    #[test]
    fn window_is_centered_on_zero_frequency() {
        let window = AmplitudeWindow::new(16, 20, 0.125);
        assert_eq!(window.rows(), 6..11);
        assert_eq!(window.cols(), 8..13);
    }

    #[test]
    fn window_grows_with_beta_and_saturates() {
        let mut previous = 0;
        for step in 0..=10 {
            let area = AmplitudeWindow::new(12, 20, step as f32 / 10.0).area();
            assert!(area >= previous);
            previous = area;
        }
        let half = AmplitudeWindow::new(12, 20, 0.5);
        assert_eq!(half.rows(), 0..12);
        assert_eq!(half.cols(), 4..17);
        let square = AmplitudeWindow::new(9, 9, 0.5);
        assert_eq!(square.area(), 81);
    }

    #[test]
    fn beta_zero_returns_source() {
        let image = Image::from_f32(textured(8, 10, 3));
        let target = Image::from_f32(Array3::from_elem((8, 10, 3), 0.9));
        let adapted = fourier_domain_adaptation(&image, &target, 0.0).unwrap();
        for (a, b) in image.as_f32().unwrap().iter().zip(adapted.as_f32().unwrap().iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn full_window_takes_target_dc() {
        let image = Image::from_u8(Array3::from_elem((6, 6, 1), 40));
        let target = Image::from_u8(Array3::from_elem((6, 6, 1), 180));
        let adapted = fourier_domain_adaptation(&image, &target, 1.0).unwrap();
        assert!(adapted.as_u8().unwrap().iter().all(|&v| v == 180));
    }

    #[test]
    fn mono_2d_input_stays_2d() {
        let image = Image::gray_u8(Array2::from_shape_fn((8, 8), |(y, x)| (y * 16 + x) as u8));
        let target = Image::gray_u8(Array2::from_elem((8, 8), 128));
        let adapted = fourier_domain_adaptation(&image, &target, 0.25).unwrap();
        assert!(adapted.is_mono_2d());
        assert_eq!(adapted.shape(), (8, 8, 1));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let image = Image::from_f32(textured(8, 8, 3));
        let target = Image::from_f32(textured(8, 9, 3));
        assert!(matches!(
            fourier_domain_adaptation(&image, &target, 0.1),
            Err(AdaptError::ShapeMismatch { .. })
        ));
    }
}
