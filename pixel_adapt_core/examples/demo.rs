use ndarray::Array3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pixel_adapt_core::config::ConfigError;
use pixel_adapt_core::logging;
use pixel_adapt_core::{AdaptationConfig, Image};

const JOURNAL: &str = "logs/adaptations.jsonl";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    println!(
        "Loaded config: transform={} weight={} beta={} blend_ratio={}",
        config.pixel_distribution.transform,
        config.pixel_distribution.weight,
        config.fourier.beta,
        config.histogram.blend_ratio
    );

    let source = scene(7, 96, 128, [40, 60, 110]);
    let reference = scene(11, 72, 96, [190, 150, 90]);
    let target = scene(13, 96, 128, [170, 120, 60]);

    let adapted = config.pixel_distribution.apply(&source, &reference)?;
    logging::log_adaptation(
        JOURNAL,
        "adapt_pixel_distribution",
        config.pixel_distribution.weight,
        &source,
        &adapted,
    )?;

    let fourier = config.fourier.apply(&source, &target)?;
    logging::log_adaptation(
        JOURNAL,
        "fourier_domain_adaptation",
        config.fourier.beta,
        &source,
        &fourier,
    )?;

    let matched = config.histogram.apply(&source, &reference)?;
    logging::log_adaptation(
        JOURNAL,
        "apply_histogram",
        config.histogram.blend_ratio,
        &source,
        &matched,
    )?;

    println!("source means      {:?}", source.channel_means());
    println!("distribution      {:?}", adapted.channel_means());
    println!("fourier           {:?}", fourier.channel_means());
    println!("histogram         {:?}", matched.channel_means());
    println!("Demo complete. Journal written to {JOURNAL}");
    Ok(())
}

/// Smooth gradient around `base` with per-pixel noise.
fn scene(seed: u64, height: usize, width: usize, base: [u8; 3]) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    Image::from_u8(Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        let ramp = (y + x) as f32 / (height + width) as f32 * 60.0;
        let noise: f32 = rng.gen_range(-12.0..12.0);
        (f32::from(base[c]) + ramp + noise).clamp(0.0, 255.0) as u8
    }))
}

fn load_config() -> Result<AdaptationConfig, ConfigError> {
    AdaptationConfig::load_from_file("config/adaptation.toml").or_else(|err| {
        eprintln!("Falling back to default config: {err}");
        Ok(AdaptationConfig::default())
    })
}
