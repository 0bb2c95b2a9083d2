//! Per-harmonic bandpass isolation.
//!
//! Each active harmonic gets a private copy of the input block, filtered by a
//! cascade of identical bandpass sections centred on `root · (h + 1)`. Filter
//! state is held in fixed arrays sized to the compile-time maxima, so changing
//! the harmonic count or filter order never allocates.

use modalshift_core::{ChannelBuffer, ProcessSpec, MAX_CHANNELS, MAX_HARMONICS, MAX_ORDER};

use crate::biquad::{Biquad, BiquadCoefs};

type StageGrid = [[[Biquad; MAX_ORDER]; MAX_HARMONICS]; MAX_CHANNELS];

/// Cascaded bandpass bank with one output band per harmonic.
#[derive(Debug, Clone)]
pub struct HarmonicBandpassBank {
    stages: StageGrid,
    coefs: [BiquadCoefs; MAX_HARMONICS],
    bands: [ChannelBuffer; MAX_HARMONICS],
    active: [bool; MAX_HARMONICS],
    sample_rate: f32,
    channels: usize,
}

impl HarmonicBandpassBank {
    pub fn new() -> Self {
        Self {
            stages: [[[Biquad::default(); MAX_ORDER]; MAX_HARMONICS]; MAX_CHANNELS],
            coefs: [BiquadCoefs::identity(); MAX_HARMONICS],
            bands: std::array::from_fn(|_| ChannelBuffer::default()),
            active: [false; MAX_HARMONICS],
            sample_rate: 0.0,
            channels: 0,
        }
    }

    /// Allocate band buffers for `spec` and clear filter state. Not real-time safe.
    pub fn prepare(&mut self, spec: &ProcessSpec) {
        debug_assert!(spec.channels <= MAX_CHANNELS);
        self.sample_rate = spec.sample_rate as f32;
        self.channels = spec.channels.min(MAX_CHANNELS);
        for band in &mut self.bands {
            band.resize(self.channels, spec.max_block_size);
        }
        self.reset();

        tracing::debug!(
            sample_rate = spec.sample_rate,
            channels = self.channels,
            max_block_size = spec.max_block_size,
            "harmonic bank prepared"
        );
    }

    pub fn reset(&mut self) {
        for stage in self.stages.iter_mut().flatten().flatten() {
            stage.reset();
        }
        for band in &mut self.bands {
            band.clear();
        }
        self.active = [false; MAX_HARMONICS];
    }

    /// Filter `frames` samples of `input` starting at `offset` into the bands of
    /// harmonics `0..num_harmonics`.
    ///
    /// Only the first `filter_order` cascade stages run; the rest are cleared
    /// so a later increase starts from silence. A harmonic at or above Nyquist
    /// yields a silent band; one just below it is filtered at the design
    /// routine's clamped centre.
    #[allow(clippy::too_many_arguments)]
    pub fn process<S: AsRef<[f32]>>(
        &mut self,
        input: &[S],
        offset: usize,
        frames: usize,
        root: f32,
        resonance: f32,
        num_harmonics: usize,
        filter_order: usize,
    ) {
        let num_harmonics = num_harmonics.min(MAX_HARMONICS);
        let order = filter_order.clamp(1, MAX_ORDER);
        let nyquist = 0.5 * self.sample_rate;

        for harmonic in 0..MAX_HARMONICS {
            let center = root * (harmonic as f32 + 1.0);
            let audible = harmonic < num_harmonics && center > 0.0 && center < nyquist;

            if !audible {
                if self.active[harmonic] {
                    self.clear_harmonic(harmonic);
                }
                self.bands[harmonic].copy_from::<&[f32]>(&[], 0, frames);
                self.active[harmonic] = false;
                continue;
            }

            let coefs = BiquadCoefs::bandpass(self.sample_rate, center, resonance);
            self.coefs[harmonic] = coefs;
            self.active[harmonic] = true;

            let band = &mut self.bands[harmonic];
            band.copy_from(input, offset, frames);

            for channel in 0..self.channels {
                let stages = &mut self.stages[channel][harmonic];
                let samples = band.channel_mut(channel);
                for stage in stages[..order].iter_mut() {
                    stage.process(&coefs, samples);
                }
                for stage in stages[order..].iter_mut() {
                    stage.reset();
                }
            }
        }
    }

    /// Filtered block of `harmonic` from the last [`process`](Self::process).
    #[inline]
    pub fn band(&self, harmonic: usize) -> &ChannelBuffer {
        &self.bands[harmonic]
    }

    #[inline]
    pub fn band_mut(&mut self, harmonic: usize) -> &mut ChannelBuffer {
        &mut self.bands[harmonic]
    }

    /// All bands, active or not.
    #[inline]
    pub fn bands(&self) -> &[ChannelBuffer] {
        &self.bands
    }

    /// Whether `harmonic` was filtered (rather than silenced) in the last block.
    #[inline]
    pub fn is_active(&self, harmonic: usize) -> bool {
        self.active[harmonic]
    }

    #[inline]
    pub fn coefs(&self, harmonic: usize) -> &BiquadCoefs {
        &self.coefs[harmonic]
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    fn clear_harmonic(&mut self, harmonic: usize) {
        for channel in self.stages.iter_mut() {
            for stage in channel[harmonic].iter_mut() {
                stage.reset();
            }
        }
    }
}

impl Default for HarmonicBandpassBank {
    fn default() -> Self {
        Self::new()
    }
}
