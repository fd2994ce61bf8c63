//! Deterministic sRGB ↔ CIELAB conversions.
//!
//! Fixed-parameter transforms using the CIE 1931 2° standard observer and the
//! D65 illuminant, independent of any platform color management.

const D65_WHITE_POINT: [f32; 3] = [0.95047, 1.0, 1.08883];
const EPSILON: f32 = 0.008856_452; // 216/24389
const KAPPA: f32 = 903.296_3; // 24389/27

fn srgb_to_linear(channel: f32) -> f32 {
    if channel <= 0.04045 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(channel: f32) -> f32 {
    if channel <= 0.003_130_8 {
        channel * 12.92
    } else {
        1.055 * channel.powf(1.0 / 2.4) - 0.055
    }
}

fn srgb_to_xyz(rgb: [f32; 3]) -> [f32; 3] {
    let r = srgb_to_linear(rgb[0]);
    let g = srgb_to_linear(rgb[1]);
    let b = srgb_to_linear(rgb[2]);

    let x = 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b;
    let y = 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b;
    let z = 0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b;

    [x, y, z]
}

fn xyz_to_srgb(xyz: [f32; 3]) -> [f32; 3] {
    let [x, y, z] = xyz;
    let r = 3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z;
    let g = -0.969_266_0 * x + 1.876_010_8 * y + 0.041_556_0 * z;
    let b = 0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z;

    [
        linear_to_srgb(r.clamp(0.0, 1.0)),
        linear_to_srgb(g.clamp(0.0, 1.0)),
        linear_to_srgb(b.clamp(0.0, 1.0)),
    ]
}

fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.powf(1.0 / 3.0)
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

fn lab_f_inv(f: f32) -> f32 {
    let cube = f * f * f;
    if cube > EPSILON {
        cube
    } else {
        (116.0 * f - 16.0) / KAPPA
    }
}

/// Convert an sRGB color in [0, 1] to CIELAB coordinates (L*, a*, b*).
pub fn srgb_to_lab(rgb: [f32; 3]) -> [f32; 3] {
    let xyz = srgb_to_xyz(rgb);
    let fx = lab_f(xyz[0] / D65_WHITE_POINT[0]);
    let fy = lab_f(xyz[1] / D65_WHITE_POINT[1]);
    let fz = lab_f(xyz[2] / D65_WHITE_POINT[2]);

    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Convert CIELAB coordinates back to sRGB in [0, 1]; out-of-gamut colors
/// are clipped in linear light.
pub fn lab_to_srgb(lab: [f32; 3]) -> [f32; 3] {
    let fy = (lab[0] + 16.0) / 116.0;
    let fx = fy + lab[1] / 500.0;
    let fz = fy - lab[2] / 200.0;

    let yr = if lab[0] > KAPPA * EPSILON {
        fy * fy * fy
    } else {
        lab[0] / KAPPA
    };

    xyz_to_srgb([
        lab_f_inv(fx) * D65_WHITE_POINT[0],
        yr * D65_WHITE_POINT[1],
        lab_f_inv(fz) * D65_WHITE_POINT[2],
    ])
}
