//! Two-dimensional DFT helpers over `ndarray` planes.
//!
//! Transforms run separably: every row, then every column, each through a
//! one-dimensional `rustfft` plan. The inverse is normalized by `1/(H·W)` so
//! `ifft2(fft2(x)) == x` up to rounding.

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use rustfft::{num_complex::Complex, FftDirection, FftPlanner};

/// Forward 2-D DFT of a real plane.
pub fn fft2(data: ArrayView2<'_, f64>) -> Array2<Complex<f64>> {
    let mut spectrum = data.mapv(|v| Complex::new(v, 0.0));
    transform_2d(&mut spectrum, FftDirection::Forward);
    spectrum
}

/// Normalized inverse 2-D DFT.
pub fn ifft2(spectrum: &Array2<Complex<f64>>) -> Array2<Complex<f64>> {
    let mut data = spectrum.clone();
    transform_2d(&mut data, FftDirection::Inverse);
    let scale = 1.0 / data.len().max(1) as f64;
    data.mapv_inplace(|z| z * scale);
    data
}

/// Move the zero-frequency bin from `(0, 0)` to `(H/2, W/2)`.
pub fn fftshift<T: Clone>(data: &Array2<T>) -> Array2<T> {
    let (rows, cols) = data.dim();
    roll2(data, rows / 2, cols / 2)
}

/// Undo [`fftshift`], also for odd sizes.
pub fn ifftshift<T: Clone>(data: &Array2<T>) -> Array2<T> {
    let (rows, cols) = data.dim();
    roll2(data, rows - rows / 2, cols - cols / 2)
}

/// Circular shift: element `(i, j)` moves to `((i + dy) % H, (j + dx) % W)`.
fn roll2<T: Clone>(data: &Array2<T>, dy: usize, dx: usize) -> Array2<T> {
    let (rows, cols) = data.dim();
    if rows == 0 || cols == 0 {
        return data.clone();
    }
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        data[[(i + rows - dy % rows) % rows, (j + cols - dx % cols) % cols]].clone()
    })
}

fn transform_2d(data: &mut Array2<Complex<f64>>, direction: FftDirection) {
    let (rows, cols) = data.dim();
    if rows == 0 || cols == 0 {
        return;
    }

    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft(cols, direction);
    let fft_col = planner.plan_fft(rows, direction);

    let mut buffer = Vec::with_capacity(rows.max(cols));
    for mut row in data.axis_iter_mut(Axis(0)) {
        buffer.clear();
        buffer.extend(row.iter().copied());
        fft_row.process(&mut buffer);
        row.assign(&ArrayView1::from(&buffer[..]));
    }
    for mut col in data.axis_iter_mut(Axis(1)) {
        buffer.clear();
        buffer.extend(col.iter().copied());
        fft_col.process(&mut buffer);
        col.assign(&ArrayView1::from(&buffer[..]));
    }
}
