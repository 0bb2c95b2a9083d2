//! Single-sideband frequency shifter.
//!
//! Real input is turned into an analytic signal, rotated by `e^{iφ}` and
//! projected back to the real axis through a second analytic stage that drops
//! whatever was rotated into negative frequencies. Every partial moves by the
//! same number of Hz, so harmonic ratios are not preserved.

use std::f32::consts::TAU;
use std::sync::Arc;

use modalshift_core::{AtomicFloat, Complex32, ProcessSpec};

use crate::hilbert::AnalyticSignalGenerator;

/// Passband gain of the input stage. Compensates the half-amplitude of a real
/// sine's positive-frequency component.
pub const HILBERT_PASSBAND_GAIN: f32 = 2.0;

/// Frequency shifter bound to an externally owned shift frequency in Hz.
///
/// The frequency is read once per block with relaxed ordering; writers may
/// update it at any time from any thread.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use modalshift_core::{AtomicFloat, ProcessSpec};
/// use modalshift_dsp::FrequencyShifter;
///
/// let shift = Arc::new(AtomicFloat::new(100.0));
/// let mut shifter = FrequencyShifter::new(Arc::clone(&shift));
/// shifter.prepare(&ProcessSpec::new(48000.0, 256, 1));
///
/// let mut samples = vec![0.0f32; 256];
/// shifter.process(&mut [&mut samples[..]], true);
/// ```
pub struct FrequencyShifter {
    frequency: Arc<AtomicFloat>,
    hilbert: AnalyticSignalGenerator,
    anti_alias: AnalyticSignalGenerator,
    passband_gain: f32,
    radians_per_hz: f32,
    phase: f32,
}

impl FrequencyShifter {
    pub fn new(frequency: Arc<AtomicFloat>) -> Self {
        Self {
            frequency,
            hilbert: AnalyticSignalGenerator::new(),
            anti_alias: AnalyticSignalGenerator::new(),
            passband_gain: HILBERT_PASSBAND_GAIN,
            radians_per_hz: 0.0,
            phase: 0.0,
        }
    }

    /// Override the input stage's passband gain. Takes effect on the next
    /// [`prepare`](Self::prepare).
    pub fn with_passband_gain(mut self, gain: f32) -> Self {
        self.passband_gain = gain;
        self
    }

    pub fn prepare(&mut self, spec: &ProcessSpec) {
        self.hilbert.prepare(spec, self.passband_gain);
        self.anti_alias.prepare(spec, 1.0);
        self.radians_per_hz = TAU / spec.sample_rate as f32;
        self.phase = 0.0;
    }

    /// Clear both analytic stages and the phase accumulator.
    pub fn reset(&mut self) {
        self.hilbert.reset();
        self.anti_alias.reset();
        self.phase = 0.0;
    }

    /// Shift `block` in place. One slice per channel, all the same length.
    ///
    /// Every channel starts from the same phase. The accumulator only advances
    /// when `anti_alias` is set; the bypass path rotates by a fixed phase.
    pub fn process(&mut self, block: &mut [&mut [f32]], anti_alias: bool) {
        let frequency = self.frequency.get_relaxed();
        let frequency = if frequency.is_finite() { frequency } else { 0.0 };
        let phase_delta = frequency * self.radians_per_hz;
        let start_phase = self.phase;
        let mut end_phase = start_phase;

        for (channel, samples) in block.iter_mut().enumerate() {
            let mut phase = start_phase;

            for sample in samples.iter_mut() {
                let analytic = self.hilbert.process_sample(*sample, channel);
                let rotated = analytic * Complex32::from_polar(1.0, phase);

                if anti_alias {
                    *sample = self.anti_alias.process_complex(rotated, channel).re;
                    phase = step_phase(phase, phase_delta);
                } else {
                    *sample = rotated.re;
                }
            }

            end_phase = phase;
        }

        self.phase = wrap_phase(end_phase);
    }

    /// Phase accumulator in radians, always in `[0, 2π)`.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    #[inline]
    pub fn frequency(&self) -> &Arc<AtomicFloat> {
        &self.frequency
    }
}

#[inline]
fn step_phase(phase: f32, delta: f32) -> f32 {
    let next = phase + delta;
    if (0.0..TAU).contains(&next) {
        next
    } else {
        wrap_phase(next)
    }
}

/// Wrap into `[0, 2π)`. `rem_euclid` can round up to exactly 2π for tiny
/// negative inputs.
#[inline]
fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase.rem_euclid(TAU);
    if wrapped.is_finite() && wrapped < TAU {
        wrapped
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rustfft::{num_complex::Complex, FftPlanner};

    const SR: f64 = 48000.0;
    const FFT_SIZE: usize = 16384;

    fn shifter(shift: f32) -> FrequencyShifter {
        let mut shifter = FrequencyShifter::new(Arc::new(AtomicFloat::new(shift)));
        shifter.prepare(&ProcessSpec::new(SR, 512, 1));
        shifter
    }

    fn sine(freq: f32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| (TAU * freq * i as f32 / SR as f32).sin())
            .collect()
    }

    fn run(shifter: &mut FrequencyShifter, input: &[f32], anti_alias: bool) -> Vec<f32> {
        let mut output = input.to_vec();
        for chunk in output.chunks_mut(512) {
            shifter.process(&mut [chunk], anti_alias);
        }
        output
    }

    /// Hann-windowed magnitude spectrum of the last `FFT_SIZE` samples.
    fn spectrum(signal: &[f32]) -> Vec<f32> {
        let tail = &signal[signal.len() - FFT_SIZE..];
        let mut bins: Vec<Complex<f32>> = tail
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let w = 0.5 - 0.5 * (TAU * i as f32 / FFT_SIZE as f32).cos();
                Complex::new(x * w, 0.0)
            })
            .collect();
        FftPlanner::new().plan_fft_forward(FFT_SIZE).process(&mut bins);
        bins[..FFT_SIZE / 2].iter().map(|c| c.norm()).collect()
    }

    fn bin_of(freq: f32) -> usize {
        (freq * FFT_SIZE as f32 / SR as f32).round() as usize
    }

    fn peak_near(spectrum: &[f32], bin: usize) -> f32 {
        spectrum[bin.saturating_sub(2)..=bin + 2]
            .iter()
            .copied()
            .fold(0.0, f32::max)
    }

    fn to_db(ratio: f32) -> f32 {
        20.0 * ratio.log10()
    }

    #[test]
    fn test_upward_shift_moves_peak() {
        let mut shifter = shifter(200.0);
        let output = run(&mut shifter, &sine(1000.0, 4 * FFT_SIZE), true);
        let spectrum = spectrum(&output);

        let (peak_bin, _) = spectrum
            .iter()
            .enumerate()
            .fold((0, 0.0f32), |best, (i, &m)| if m > best.1 { (i, m) } else { best });
        assert!(
            peak_bin.abs_diff(bin_of(1200.0)) <= 1,
            "peak at bin {} expected {}",
            peak_bin,
            bin_of(1200.0)
        );

        let target = peak_near(&spectrum, bin_of(1200.0));
        let image = peak_near(&spectrum, bin_of(800.0));
        assert!(to_db(target / image) > 40.0, "image only {} dB down", to_db(target / image));
    }

    #[test]
    fn test_downward_shift_moves_peak() {
        let mut shifter = shifter(-300.0);
        let output = run(&mut shifter, &sine(2000.0, 4 * FFT_SIZE), true);
        let spectrum = spectrum(&output);

        let target = peak_near(&spectrum, bin_of(1700.0));
        let image = peak_near(&spectrum, bin_of(2300.0));
        let original = peak_near(&spectrum, bin_of(2000.0));
        assert!(to_db(target / image) > 40.0);
        assert!(to_db(target / original) > 40.0);
    }

    #[test]
    fn test_shifted_tone_keeps_unit_amplitude() {
        let mut shifter = shifter(150.0);
        let output = run(&mut shifter, &sine(1000.0, 48000), true);
        let peak = output[24000..].iter().fold(0.0f32, |m, &x| m.max(x.abs()));
        // Ripple of both analytic stages compounds
        assert!((peak - 1.0).abs() < 0.07, "peak {}", peak);
    }

    #[test]
    fn test_zero_shift_passes_tone() {
        let mut shifter = shifter(0.0);
        let output = run(&mut shifter, &sine(1000.0, 4 * FFT_SIZE), true);
        let spectrum = spectrum(&output);
        let (peak_bin, _) = spectrum
            .iter()
            .enumerate()
            .fold((0, 0.0f32), |best, (i, &m)| if m > best.1 { (i, m) } else { best });
        assert!(peak_bin.abs_diff(bin_of(1000.0)) <= 1);
    }

    #[test]
    fn test_phase_advances_by_delta() {
        let mut shifter = shifter(1000.0);
        let mut block = vec![0.0f32; 12];
        shifter.process(&mut [&mut block[..]], true);
        let expected = TAU * 1000.0 / SR as f32 * 12.0;
        assert!((shifter.phase() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_channels_share_start_phase() {
        let mut shifter = FrequencyShifter::new(Arc::new(AtomicFloat::new(440.0)));
        shifter.prepare(&ProcessSpec::new(SR, 512, 2));

        let input = sine(1000.0, 512);
        let mut left = input.clone();
        let mut right = input.clone();
        shifter.process(&mut [&mut left[..], &mut right[..]], true);

        assert_eq!(left, right);
    }

    #[test]
    fn test_bypass_does_not_advance_phase() {
        let mut shifter = shifter(1000.0);
        let mut block = sine(300.0, 512);
        shifter.process(&mut [&mut block[..]], false);
        assert_eq!(shifter.phase(), 0.0);

        shifter.process(&mut [&mut block[..]], true);
        let advanced = shifter.phase();
        assert!(advanced > 0.0);

        shifter.process(&mut [&mut block[..]], false);
        assert_eq!(shifter.phase(), advanced);
    }

    #[test]
    fn test_reset_restores_initial_output() {
        let input = sine(500.0, 2048);

        let mut fresh = shifter(75.0);
        let expected = run(&mut fresh, &input, true);

        let mut used = shifter(75.0);
        run(&mut used, &sine(3000.0, 4096), true);
        used.reset();
        assert_eq!(used.phase(), 0.0);
        let actual = run(&mut used, &input, true);

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_frequency_is_read_per_block() {
        let shift = Arc::new(AtomicFloat::new(0.0));
        let mut shifter = FrequencyShifter::new(Arc::clone(&shift));
        shifter.prepare(&ProcessSpec::new(SR, 64, 1));

        let mut block = vec![0.0f32; 64];
        shifter.process(&mut [&mut block[..]], true);
        assert_eq!(shifter.phase(), 0.0);

        shift.set_relaxed(480.0);
        shifter.process(&mut [&mut block[..]], true);
        let expected = TAU * 480.0 / SR as f32 * 64.0;
        assert!((shifter.phase() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_non_finite_frequency_holds_phase() {
        let mut shifter = shifter(f32::NAN);
        let mut block = sine(300.0, 128);
        shifter.process(&mut [&mut block[..]], true);
        assert_eq!(shifter.phase(), 0.0);
        assert!(block.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_wrap_phase_edges() {
        assert_eq!(wrap_phase(0.0), 0.0);
        assert_eq!(wrap_phase(TAU), 0.0);
        assert!(wrap_phase(-1e-9) < TAU);
        assert!((wrap_phase(TAU + 1.0) - 1.0).abs() < 1e-5);
        assert!((wrap_phase(-1.0) - (TAU - 1.0)).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn test_phase_stays_wrapped(
            shift in -20000.0f32..20000.0,
            frames in 1usize..1024,
            blocks in 1usize..8,
        ) {
            let mut shifter = FrequencyShifter::new(Arc::new(AtomicFloat::new(shift)));
            shifter.prepare(&ProcessSpec::new(SR, 1024, 1));
            let mut block = vec![0.25f32; frames];
            for _ in 0..blocks {
                shifter.process(&mut [&mut block[..]], true);
                let phase = shifter.phase();
                prop_assert!((0.0..TAU).contains(&phase), "phase {}", phase);
            }
        }
    }
}
