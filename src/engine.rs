//! ModalShiftEngine: tracker, bandpass bank, shifters and mixer wired together.

use std::sync::Arc;

use modalshift_core::{
    AtomicFloat, EngineConfig, EngineParams, HarmonicShiftTable, ParamSnapshot, ProcessSpec,
    MAX_CHANNELS, MAX_HARMONICS,
};
use modalshift_dsp::{mix_into, FrequencyShifter, HarmonicBandpassBank};
use modalshift_midi::{MidiEvent, PitchTracker};

use crate::{ParamHandle, Result};

type ShifterGrid = [[FrequencyShifter; MAX_HARMONICS]; MAX_CHANNELS];

/// Harmonic-tracking frequency-shift resynthesis engine.
///
/// Per block the pitch tracker republishes per-harmonic shift targets, the
/// bandpass bank isolates each harmonic into its own copy of the input, every
/// (channel, harmonic) pair runs through its own [`FrequencyShifter`], and the
/// shifted bands are summed back into the host buffer.
///
/// `prepare` allocates; `process` and `reset` do not.
///
/// # Example
///
/// ```
/// use modalshift::prelude::*;
///
/// let mut engine = ModalShiftEngine::builder()
///     .sample_rate(48000.0)
///     .max_block_size(256)
///     .channels(1)
///     .build()?;
///
/// let params = engine.params();
/// params.set_root(220.0);
///
/// let mut samples = vec![0.0f32; 256];
/// engine.process(&mut [&mut samples[..]], &[MidiEvent::note_on(0, 0, 57, 100)]);
/// assert!((params.tracked_hz() - 220.0).abs() < 0.01);
/// # Ok::<(), modalshift::Error>(())
/// ```
pub struct ModalShiftEngine {
    config: EngineConfig,
    prepared: bool,

    params: Arc<EngineParams>,
    shifts: Arc<HarmonicShiftTable>,
    tracked_hz: Arc<AtomicFloat>,

    tracker: PitchTracker,
    bank: HarmonicBandpassBank,
    shifters: ShifterGrid,
    /// Harmonic count of the previous block.
    active_harmonics: usize,
}

impl ModalShiftEngine {
    pub fn builder() -> crate::ModalShiftEngineBuilder {
        crate::ModalShiftEngineBuilder::default()
    }

    /// Unprepared engine. Call [`prepare`](Self::prepare) before processing.
    pub fn new(config: EngineConfig) -> Self {
        let shifts = Arc::new(HarmonicShiftTable::new());
        let passband_gain = config.hilbert_passband_gain;
        let shifters = std::array::from_fn(|channel| {
            std::array::from_fn(|harmonic| {
                FrequencyShifter::new(shifts.slot(channel, harmonic))
                    .with_passband_gain(passband_gain)
            })
        });

        let tracker = PitchTracker::new();
        let tracked_hz = Arc::new(AtomicFloat::new(tracker.tracked_hz()));

        Self {
            config,
            prepared: false,
            params: Arc::new(EngineParams::new()),
            shifts,
            tracked_hz,
            tracker,
            bank: HarmonicBandpassBank::new(),
            shifters,
            active_harmonics: 0,
        }
    }

    /// Prepare every component for the given stream format. Not real-time safe.
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize, channels: usize) -> Result<()> {
        let spec = ProcessSpec::new(sample_rate, max_block_size, channels);
        spec.validate()?;

        self.config.sample_rate = sample_rate;
        self.config.max_block_size = max_block_size;
        self.config.channels = channels;

        self.bank.prepare(&spec);
        let mono = spec.mono();
        for shifter in self.shifters.iter_mut().flatten() {
            shifter.prepare(&mono);
        }
        self.tracker.reset();
        self.active_harmonics = 0;
        self.prepared = true;

        tracing::debug!(
            sample_rate,
            max_block_size,
            channels,
            anti_alias = self.config.anti_alias,
            "engine prepared"
        );
        Ok(())
    }

    /// Prepare from the stored configuration.
    pub(crate) fn prepare_from_config(&mut self) -> Result<()> {
        let spec = self.config.spec();
        self.prepare(spec.sample_rate, spec.max_block_size, spec.channels)
    }

    /// Clear all filter state and phase. Parameters and the tracked note are
    /// kept; the next block republishes the shift table.
    pub fn reset(&mut self) {
        self.bank.reset();
        for shifter in self.shifters.iter_mut().flatten() {
            shifter.reset();
        }
        self.tracker.reset();
        self.active_harmonics = 0;
        tracing::debug!("engine reset");
    }

    /// Process `buffer` in place, one slice per channel.
    ///
    /// All `midi` events apply at block start. Blocks longer than the prepared
    /// maximum are processed in chunks. Channels beyond the prepared count are
    /// cleared.
    pub fn process(&mut self, buffer: &mut [&mut [f32]], midi: &[MidiEvent]) {
        debug_assert!(self.prepared, "process called before prepare");
        if !self.prepared {
            for channel in buffer.iter_mut() {
                channel.fill(0.0);
            }
            return;
        }

        let snapshot = self.params.snapshot();
        let num_harmonics = snapshot.num_harmonics.min(MAX_HARMONICS);
        let tracked = self.tracker.process(
            midi,
            &self.shifts,
            snapshot.root,
            snapshot.stretch,
            num_harmonics,
        );
        self.tracked_hz.set_relaxed(tracked);

        // Harmonics leaving the count restart from silence when they return
        for harmonic in num_harmonics..self.active_harmonics {
            for row in self.shifters.iter_mut() {
                row[harmonic].reset();
            }
        }
        self.active_harmonics = num_harmonics;

        let channels = buffer.len().min(self.config.channels);
        let frames = buffer[..channels].iter().map(|c| c.len()).min().unwrap_or(0);
        let max_block = self.config.max_block_size;

        let mut offset = 0;
        while offset < frames {
            let len = (frames - offset).min(max_block);
            self.process_chunk(&mut buffer[..channels], offset, len, &snapshot, num_harmonics);
            offset += len;
        }

        for extra in buffer.iter_mut().skip(channels) {
            extra.fill(0.0);
        }
    }

    fn process_chunk(
        &mut self,
        buffer: &mut [&mut [f32]],
        offset: usize,
        frames: usize,
        snapshot: &ParamSnapshot,
        num_harmonics: usize,
    ) {
        self.bank.process(
            &*buffer,
            offset,
            frames,
            snapshot.root,
            snapshot.resonance,
            num_harmonics,
            snapshot.filter_order,
        );

        let anti_alias = self.config.anti_alias;
        for harmonic in 0..num_harmonics {
            let band = self.bank.band_mut(harmonic);
            for (channel, row) in self.shifters.iter_mut().enumerate().take(buffer.len()) {
                row[harmonic].process(&mut [band.channel_mut(channel)], anti_alias);
            }
        }

        let bands = &self.bank.bands()[..num_harmonics];
        for (channel, samples) in buffer.iter_mut().enumerate() {
            mix_into(
                &mut samples[offset..offset + frames],
                bands,
                channel,
                snapshot.wet_gain,
            );
        }
    }

    /// Control-thread handle onto this engine's parameters.
    pub fn params(&self) -> ParamHandle {
        ParamHandle::new(Arc::clone(&self.params), Arc::clone(&self.tracked_hz))
    }

    /// Shared per-harmonic shift table, as last published by the tracker.
    pub fn shift_table(&self) -> &Arc<HarmonicShiftTable> {
        &self.shifts
    }

    /// Note frequency the tracker settled on in the last block.
    pub fn tracked_hz(&self) -> f32 {
        self.tracked_hz.get_relaxed()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> f64 {
        self.config.sample_rate
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(channels: usize) -> ModalShiftEngine {
        let mut engine = ModalShiftEngine::new(EngineConfig::default());
        engine.prepare(48000.0, 128, channels).unwrap();
        engine
    }

    #[test]
    fn test_prepare_rejects_invalid_spec() {
        let mut engine = ModalShiftEngine::new(EngineConfig::default());
        assert!(engine.prepare(48000.0, 0, 1).is_err());
        assert!(engine.prepare(48000.0, 128, MAX_CHANNELS + 1).is_err());
        assert!(!engine.is_prepared());
    }

    #[test]
    fn test_shifters_are_bound_to_table_slots() {
        let engine = engine(2);
        for channel in 0..MAX_CHANNELS {
            for harmonic in 0..MAX_HARMONICS {
                let slot = engine.shift_table().slot(channel, harmonic);
                assert!(Arc::ptr_eq(
                    engine.shifters[channel][harmonic].frequency(),
                    &slot
                ));
            }
        }
    }

    #[test]
    fn test_long_block_is_chunked() {
        let mut engine = engine(1);
        let mut samples = vec![0.5f32; 1000];
        engine.process(&mut [&mut samples[..]], &[]);
        assert!(samples.iter().all(|s| s.is_finite()));
        assert_eq!(engine.bank.band(0).frames(), 1000 % 128);
    }

    #[test]
    fn test_dropped_harmonic_shifters_are_cleared() {
        let mut engine = engine(2);
        engine.params().set_num_harmonics(3);
        let mut left: Vec<f32> = (0..128).map(|i| (i as f32 * 0.37).sin()).collect();
        let mut right: Vec<f32> = (0..128).map(|i| (i as f32 * 0.11).cos()).collect();
        let note = [MidiEvent::note_on(0, 0, 76, 100)];
        engine.process(&mut [&mut left[..], &mut right[..]], &note);
        assert!(engine.shifters[0][2].phase() > 0.0);

        engine.params().set_num_harmonics(1);
        engine.process(&mut [&mut left[..], &mut right[..]], &[]);

        for row in engine.shifters.iter_mut() {
            for harmonic in 1..3 {
                assert_eq!(row[harmonic].phase(), 0.0);
                // No stored tail: silence in, silence out
                let mut block = vec![0.0f32; 64];
                row[harmonic].process(&mut [&mut block[..]], true);
                assert!(block.iter().all(|&s| s == 0.0));
            }
        }
        assert!(engine.shifters[0][0].phase() > 0.0);
    }

    #[test]
    fn test_extra_channels_are_cleared() {
        let mut engine = engine(1);
        let mut left = vec![0.1f32; 64];
        let mut right = vec![0.7f32; 64];
        engine.process(&mut [&mut left[..], &mut right[..]], &[]);
        assert!(right.iter().all(|&s| s == 0.0));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "before prepare"))]
    fn test_unprepared_engine_outputs_silence() {
        let mut engine = ModalShiftEngine::new(EngineConfig::default());
        let mut samples = vec![1.0f32; 32];
        engine.process(&mut [&mut samples[..]], &[]);
        assert!(samples.iter().all(|&s| s == 0.0));
    }
}
