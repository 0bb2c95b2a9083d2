//! Control-surface parameters shared between the control and audio threads.

use crate::lockfree::AtomicFloat;
use crate::parameter::ParameterRange;
use crate::{MAX_HARMONICS, MAX_ORDER};

/// Lowest and highest root frequencies (MIDI notes 0 and 127).
pub const ROOT_MIN_HZ: f32 = 8.175_799;
pub const ROOT_MAX_HZ: f32 = 12_543.854;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// Frequency (Hz) the input's fundamental is assumed to sit on.
    Root,
    /// Bandpass Q.
    Resonance,
    NumHarmonics,
    /// Number of cascaded bandpass stages per harmonic.
    FilterOrder,
    /// Inharmonic stretch applied on top of the tracked shift.
    Stretch,
    /// Output gain in dB.
    WetGain,
}

impl ParamId {
    pub fn all() -> &'static [ParamId] {
        &[
            ParamId::Root,
            ParamId::Resonance,
            ParamId::NumHarmonics,
            ParamId::FilterOrder,
            ParamId::Stretch,
            ParamId::WetGain,
        ]
    }

    pub fn range(&self) -> ParameterRange {
        match self {
            ParamId::Root => ParameterRange::with_centre(ROOT_MIN_HZ, ROOT_MAX_HZ, 440.0),
            ParamId::Resonance => ParameterRange::linear(0.707, 20.0, 2.66),
            ParamId::NumHarmonics => ParameterRange::integer(1, MAX_HARMONICS as i32, 8),
            ParamId::FilterOrder => ParameterRange::integer(1, MAX_ORDER as i32, 2),
            ParamId::Stretch => ParameterRange::linear(0.0, 2.0, 0.0),
            ParamId::WetGain => ParameterRange::linear(-12.0, 12.0, 0.0),
        }
    }
}

/// One block's worth of parameter values, read once at block start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    pub root: f32,
    pub resonance: f32,
    pub num_harmonics: usize,
    pub filter_order: usize,
    pub stretch: f32,
    /// Linear output gain.
    pub wet_gain: f32,
}

/// Atomic parameter cells. The control surface is the only writer.
#[derive(Debug)]
pub struct EngineParams {
    root: AtomicFloat,
    resonance: AtomicFloat,
    num_harmonics: AtomicFloat,
    filter_order: AtomicFloat,
    stretch: AtomicFloat,
    wet_gain_db: AtomicFloat,
}

impl EngineParams {
    pub fn new() -> Self {
        Self {
            root: AtomicFloat::new(ParamId::Root.range().default),
            resonance: AtomicFloat::new(ParamId::Resonance.range().default),
            num_harmonics: AtomicFloat::new(ParamId::NumHarmonics.range().default),
            filter_order: AtomicFloat::new(ParamId::FilterOrder.range().default),
            stretch: AtomicFloat::new(ParamId::Stretch.range().default),
            wet_gain_db: AtomicFloat::new(ParamId::WetGain.range().default),
        }
    }

    fn cell(&self, id: ParamId) -> &AtomicFloat {
        match id {
            ParamId::Root => &self.root,
            ParamId::Resonance => &self.resonance,
            ParamId::NumHarmonics => &self.num_harmonics,
            ParamId::FilterOrder => &self.filter_order,
            ParamId::Stretch => &self.stretch,
            ParamId::WetGain => &self.wet_gain_db,
        }
    }

    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        self.cell(id).get_relaxed()
    }

    /// Store a real value, clamped to the parameter's range.
    #[inline]
    pub fn set(&self, id: ParamId, value: f32) {
        self.cell(id).set_relaxed(id.range().clamp(value));
    }

    /// Store a host-normalized (0.0-1.0) value.
    #[inline]
    pub fn set_normalized(&self, id: ParamId, normalized: f32) {
        self.cell(id).set_relaxed(id.range().denormalize(normalized));
    }

    #[inline]
    pub fn get_normalized(&self, id: ParamId) -> f32 {
        id.range().normalize(self.get(id))
    }

    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            root: self.root.get_relaxed(),
            resonance: self.resonance.get_relaxed(),
            num_harmonics: self.num_harmonics.get_relaxed() as usize,
            filter_order: self.filter_order.get_relaxed() as usize,
            stretch: self.stretch.get_relaxed(),
            wet_gain: ParameterRange::db_to_linear(self.wet_gain_db.get_relaxed()),
        }
    }
}

impl Default for EngineParams {
    fn default() -> Self {
        Self::new()
    }
}
