//! Test helpers and fixtures for ModalShift integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (passthrough, unity gain)
//! - `DSP_EPSILON` (1e-4): DSP processing (filters, shifters)
//! - `PERCEPTUAL_EPSILON` (0.001): Perceptual equivalence (-60dB)
//! - `SILENCE_THRESHOLD` (0.0001): Silence detection (-80dB)

#![allow(dead_code)]

pub mod tolerances;

use modalshift::prelude::*;
use rustfft::{num_complex::Complex, FftPlanner};

/// Default test sample rate (matches common hardware)
pub const TEST_SAMPLE_RATE: f64 = 48000.0;

/// Standard buffer size for deterministic testing
pub const TEST_BUFFER_SIZE: usize = 512;

/// FFT length for spectral checks.
pub const FFT_SIZE: usize = 16384;

/// Prepared engine with the test sample rate and buffer size.
pub fn test_engine(channels: usize) -> ModalShiftEngine {
    ModalShiftEngine::builder()
        .sample_rate(TEST_SAMPLE_RATE)
        .max_block_size(TEST_BUFFER_SIZE)
        .channels(channels)
        .build()
        .expect("Failed to create test engine")
}

/// Send `tracing` output to the test harness. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate silence (zero samples).
pub fn generate_silence(num_samples: usize) -> Vec<f32> {
    vec![0.0; num_samples]
}

/// Generate white noise (random samples in -1..1).
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    // Simple LCG for reproducible "random" noise
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((rng >> 33) as f32 / (1u64 << 31) as f32) * 2.0 - 1.0
        })
        .collect()
}

/// Run a mono signal through `engine` in `TEST_BUFFER_SIZE` blocks.
/// `midi` is delivered with the first block only.
pub fn render_mono(engine: &mut ModalShiftEngine, input: &[f32], midi: &[MidiEvent]) -> Vec<f32> {
    let mut output = input.to_vec();
    for (i, chunk) in output.chunks_mut(TEST_BUFFER_SIZE).enumerate() {
        let events = if i == 0 { midi } else { &[] };
        engine.process(&mut [chunk], events);
    }
    output
}

pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |m, &s| m.max(s.abs()))
}

pub fn is_silent(samples: &[f32], threshold: f32) -> bool {
    peak(samples) < threshold
}

pub fn assert_is_silent(samples: &[f32], threshold: f32, context: &str) {
    let p = peak(samples);
    assert!(p < threshold, "{}: expected silence, peak {}", context, p);
}

pub fn assert_not_silent(samples: &[f32], min_peak: f32, context: &str) {
    let p = peak(samples);
    assert!(p >= min_peak, "{}: expected audio, peak {}", context, p);
}

/// Hann-windowed magnitude spectrum of the last `FFT_SIZE` samples.
pub fn spectrum(signal: &[f32]) -> Vec<f32> {
    assert!(signal.len() >= FFT_SIZE, "signal shorter than FFT_SIZE");
    let tail = &signal[signal.len() - FFT_SIZE..];
    let mut bins: Vec<Complex<f32>> = tail
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let w = 0.5 - 0.5 * (std::f32::consts::TAU * i as f32 / FFT_SIZE as f32).cos();
            Complex::new(x * w, 0.0)
        })
        .collect();
    FftPlanner::new().plan_fft_forward(FFT_SIZE).process(&mut bins);
    bins[..FFT_SIZE / 2].iter().map(|c| c.norm()).collect()
}

pub fn bin_of(frequency: f32) -> usize {
    (frequency * FFT_SIZE as f32 / TEST_SAMPLE_RATE as f32).round() as usize
}

/// Largest magnitude within two bins of `bin`.
pub fn peak_near(spectrum: &[f32], bin: usize) -> f32 {
    spectrum[bin.saturating_sub(2)..=(bin + 2).min(spectrum.len() - 1)]
        .iter()
        .copied()
        .fold(0.0, f32::max)
}

/// Index of the largest bin.
pub fn dominant_bin(spectrum: &[f32]) -> usize {
    spectrum
        .iter()
        .enumerate()
        .fold((0, 0.0f32), |best, (i, &m)| if m > best.1 { (i, m) } else { best })
        .0
}

pub fn ratio_db(a: f32, b: f32) -> f32 {
    20.0 * (a / b.max(f32::MIN_POSITIVE)).log10()
}
