//! IIR Hilbert transformer producing an analytic signal.
//!
//! Twelve complex one-pole sections run in parallel; their summed output is a
//! complex signal whose imaginary part is the real part shifted by 90° across
//! the design band. The prototype is designed for a normalized band and scaled
//! to the runtime sample rate by `freq_factor = min(0.46, 20000 / fs)`, which
//! keeps the upper edge of the 90° band at ~20 kHz (or 0.46·fs, whichever is
//! lower). Below roughly 20 Hz the phase accuracy falls off.
//!
//! Positive-frequency content passes with gain `passband_gain`, negative
//! frequencies are rejected. A unit-amplitude real sine therefore comes out
//! with magnitude `passband_gain / 2`.

use modalshift_core::{Complex32, ProcessSpec, MAX_CHANNELS};

/// Number of parallel one-pole sections.
pub const HILBERT_ORDER: usize = 12;

// Prototype design for a normalized band.
const PROTOTYPE_COEFFS: [(f32, f32); HILBERT_ORDER] = [
    (-0.000_224_352_093_802, 0.005_434_990_182_01),
    (0.010_750_055_781_5, -0.017_389_068_568_1),
    (-0.045_679_587_391_7, 0.022_916_693_142_9),
    (0.112_825_005_82, 0.002_784_136_612_37),
    (-0.208_067_578_452, -0.104_628_958_675),
    (0.287_178_375_01, 0.336_192_397_19),
    (-0.254_675_294_431, -0.683_033_899_655),
    (0.048_108_183_502_6, 0.954_061_589_374),
    (0.227_861_357_867, -0.891_273_574_569),
    (-0.365_411_839_137, 0.525_088_317_271),
    (0.280_729_061_131, -0.155_131_206_606),
    (-0.093_506_178_772_8, 0.005_122_458_554_04),
];

const PROTOTYPE_POLES: [(f32, f32); HILBERT_ORDER] = [
    (-0.004_953_359_764_78, 0.009_257_987_687_2),
    (-0.017_859_491_302, 0.027_349_372_554_3),
    (-0.041_371_437_315_5, 0.074_475_691_028_7),
    (-0.088_214_840_888_5, 0.178_349_677_457),
    (-0.179_229_658_12, 0.396_013_402_23),
    (-0.338_261_800_753, 0.829_229_533_354),
    (-0.557_688_699_732, 1.612_985_383_28),
    (-0.735_157_736_148, 2.799_873_986_82),
    (-0.719_057_381_172, 4.163_961_661_28),
    (-0.517_871_025_209, 5.297_248_268_04),
    (-0.280_197_469_471, 5.995_986_023_88),
    (-0.085_275_135_453_1, 6.304_849_237_7),
];

const PROTOTYPE_DIRECT: f32 = 0.000_262_057_212_648;

/// Upper bound of the scaled band as a fraction of the sample rate.
const MAX_FREQ_FACTOR: f32 = 0.46;

/// Upper edge of the 90° band in Hz when the sample rate allows it.
const BAND_TOP_HZ: f32 = 20000.0;

/// Sample-rate specific coefficients, split into real and imaginary arrays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HilbertCoeffs {
    pub coeffs_re: [f32; HILBERT_ORDER],
    pub coeffs_im: [f32; HILBERT_ORDER],
    pub poles_re: [f32; HILBERT_ORDER],
    pub poles_im: [f32; HILBERT_ORDER],
    pub direct: f32,
}

impl HilbertCoeffs {
    /// Scale the prototype to `sample_rate` with the given passband gain.
    pub fn design(sample_rate: f64, passband_gain: f32) -> Self {
        let freq_factor = freq_factor(sample_rate);
        let mut coeffs = Self {
            direct: PROTOTYPE_DIRECT * 2.0 * passband_gain * freq_factor,
            ..Self::default()
        };

        for i in 0..HILBERT_ORDER {
            let (re, im) = PROTOTYPE_COEFFS[i];
            let coeff = Complex32::new(re, im) * (freq_factor * passband_gain);
            coeffs.coeffs_re[i] = coeff.re;
            coeffs.coeffs_im[i] = coeff.im;

            let (re, im) = PROTOTYPE_POLES[i];
            let pole = (Complex32::new(re, im) * freq_factor).exp();
            coeffs.poles_re[i] = pole.re;
            coeffs.poles_im[i] = pole.im;
        }

        coeffs
    }
}

impl Default for HilbertCoeffs {
    /// All-zero coefficients: silence until designed.
    fn default() -> Self {
        Self {
            coeffs_re: [0.0; HILBERT_ORDER],
            coeffs_im: [0.0; HILBERT_ORDER],
            poles_re: [0.0; HILBERT_ORDER],
            poles_im: [0.0; HILBERT_ORDER],
            direct: 0.0,
        }
    }
}

/// Band scaling for `sample_rate`.
#[inline]
pub fn freq_factor(sample_rate: f64) -> f32 {
    MAX_FREQ_FACTOR.min(BAND_TOP_HZ / sample_rate as f32)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct HilbertState {
    re: [f32; HILBERT_ORDER],
    im: [f32; HILBERT_ORDER],
}

/// Real (or complex) to analytic signal converter with per-channel state.
#[derive(Debug, Clone)]
pub struct AnalyticSignalGenerator {
    coeffs: HilbertCoeffs,
    states: [HilbertState; MAX_CHANNELS],
    channels: usize,
}

impl AnalyticSignalGenerator {
    pub fn new() -> Self {
        Self {
            coeffs: HilbertCoeffs::default(),
            states: [HilbertState::default(); MAX_CHANNELS],
            channels: 0,
        }
    }

    /// Design coefficients for `spec` and clear all state.
    pub fn prepare(&mut self, spec: &ProcessSpec, passband_gain: f32) {
        debug_assert!(
            spec.channels <= MAX_CHANNELS,
            "channel count {} exceeds {}",
            spec.channels,
            MAX_CHANNELS
        );
        self.coeffs = HilbertCoeffs::design(spec.sample_rate, passband_gain);
        self.channels = spec.channels.min(MAX_CHANNELS);
        self.reset();
    }

    /// Zero every channel's state. Coefficients are kept.
    pub fn reset(&mut self) {
        self.states = [HilbertState::default(); MAX_CHANNELS];
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn coeffs(&self) -> &HilbertCoeffs {
        &self.coeffs
    }

    /// Process one real sample on `channel`.
    ///
    /// `channel` must be below the prepared channel count.
    #[inline]
    pub fn process_sample(&mut self, x: f32, channel: usize) -> Complex32 {
        debug_assert!(
            channel < self.channels,
            "channel {} out of range ({} prepared)",
            channel,
            self.channels
        );
        let c = &self.coeffs;
        let state = &mut self.states[channel];

        let mut out_re = x * c.direct;
        let mut out_im = 0.0;

        // state[i] = state[i] * pole[i] + x * coeff[i]
        for i in 0..HILBERT_ORDER {
            let re = state.re[i] * c.poles_re[i] - state.im[i] * c.poles_im[i] + x * c.coeffs_re[i];
            let im = state.re[i] * c.poles_im[i] + state.im[i] * c.poles_re[i] + x * c.coeffs_im[i];
            state.re[i] = re;
            state.im[i] = im;
            out_re += re;
            out_im += im;
        }

        Complex32::new(out_re, out_im)
    }

    /// Process one complex sample on `channel`, for chained analytic stages.
    #[inline]
    pub fn process_complex(&mut self, x: Complex32, channel: usize) -> Complex32 {
        debug_assert!(
            channel < self.channels,
            "channel {} out of range ({} prepared)",
            channel,
            self.channels
        );
        let c = &self.coeffs;
        let state = &mut self.states[channel];

        let mut out_re = x.re * c.direct;
        let mut out_im = x.im * c.direct;

        for i in 0..HILBERT_ORDER {
            let re = state.re[i] * c.poles_re[i] - state.im[i] * c.poles_im[i]
                + x.re * c.coeffs_re[i]
                - x.im * c.coeffs_im[i];
            let im = state.re[i] * c.poles_im[i]
                + state.im[i] * c.poles_re[i]
                + x.re * c.coeffs_im[i]
                + x.im * c.coeffs_re[i];
            state.re[i] = re;
            state.im[i] = im;
            out_re += re;
            out_im += im;
        }

        Complex32::new(out_re, out_im)
    }
}

impl Default for AnalyticSignalGenerator {
    fn default() -> Self {
        Self::new()
    }
}
