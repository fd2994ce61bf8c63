//! Frequency-domain adaptation.
//!
//! [`fft`] wraps `rustfft` into 2-D transforms with centering helpers;
//! [`fda`] swaps low-frequency amplitude between images.

pub mod fda;
pub mod fft;

pub use fda::{fourier_domain_adaptation, AmplitudeWindow};
pub use fft::{fft2, fftshift, ifft2, ifftshift};
