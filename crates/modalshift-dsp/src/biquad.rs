//! Second-order IIR sections for the harmonic bandpass bank.
//!
//! For the formulae, see the Audio EQ Cookbook:
//! https://www.w3.org/TR/audio-eq-cookbook/

use std::f32::consts::TAU;

use modalshift_core::Complex32;

/// Highest usable center frequency as a fraction of the sample rate.
pub const MAX_CENTER_RATIO: f32 = 0.49;

const MIN_CENTER_HZ: f64 = 10.0;
const MIN_Q: f64 = 1.0e-3;

/// Magnitudes below this are flushed to zero after each block.
const DENORMAL_THRESHOLD: f32 = 1.0e-30;

/// Biquad coefficients in normalized form (`a0 == 1`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BiquadCoefs {
    pub a1: f32,
    pub a2: f32,
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
}

impl BiquadCoefs {
    /// Constant 0 dB peak gain bandpass.
    ///
    /// Sample rate and center frequency are in Hz. The center is clamped to
    /// `[10 Hz, 0.49 · sample_rate]` and `q` to a small positive minimum, so the
    /// result is always a stable filter. Designed in double precision.
    #[inline]
    pub fn bandpass(sample_rate: f32, center: f32, q: f32) -> Self {
        let sample_rate = sample_rate as f64;
        let center = if center.is_nan() {
            MIN_CENTER_HZ
        } else {
            (center as f64)
                .min(MAX_CENTER_RATIO as f64 * sample_rate)
                .max(MIN_CENTER_HZ)
        };
        let q = if q.is_nan() { MIN_Q } else { (q as f64).max(MIN_Q) };

        let omega = std::f64::consts::TAU * center / sample_rate;
        let alpha = omega.sin() / (2.0 * q);
        let beta = omega.cos();
        let a0r = 1.0 / (1.0 + alpha);
        let a1 = -2.0 * beta * a0r;
        let a2 = (1.0 - alpha) * a0r;
        let b0 = alpha * a0r;
        Self {
            a1: a1 as f32,
            a2: a2 as f32,
            b0: b0 as f32,
            b1: 0.0,
            b2: -b0 as f32,
        }
    }

    /// Pass-through.
    #[inline]
    pub fn identity() -> Self {
        Self {
            a1: 0.0,
            a2: 0.0,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
        }
    }

    /// Frequency response at `omega`, expressed as a fraction of the sample rate.
    pub fn response(&self, omega: f32) -> Complex32 {
        let z1 = Complex32::from_polar(1.0, -TAU * omega);
        let z2 = z1 * z1;
        (self.b0 + z1 * self.b1 + z2 * self.b2) / (1.0f32 + z1 * self.a1 + z2 * self.a2)
    }
}

impl Default for BiquadCoefs {
    fn default() -> Self {
        Self::identity()
    }
}

/// 2nd order IIR filter state in transposed Direct Form II.
///
/// Coefficients live outside the state so one set can drive every channel and
/// cascade stage of a harmonic.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Biquad {
    s1: f32,
    s2: f32,
}

impl Biquad {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }

    #[inline]
    pub fn tick(&mut self, coefs: &BiquadCoefs, x0: f32) -> f32 {
        let y0 = coefs.b0 * x0 + self.s1;
        self.s1 = self.s2 + coefs.b1 * x0 - coefs.a1 * y0;
        self.s2 = coefs.b2 * x0 - coefs.a2 * y0;
        y0
    }

    /// Filter `samples` in place.
    pub fn process(&mut self, coefs: &BiquadCoefs, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample = self.tick(coefs, *sample);
        }
        self.flush_denormals();
    }

    #[inline]
    fn flush_denormals(&mut self) {
        if self.s1.abs() < DENORMAL_THRESHOLD {
            self.s1 = 0.0;
        }
        if self.s2.abs() < DENORMAL_THRESHOLD {
            self.s2 = 0.0;
        }
    }
}
