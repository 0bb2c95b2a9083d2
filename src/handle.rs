//! Control-thread handle onto a running engine.

use std::sync::Arc;

use modalshift_core::{AtomicFloat, EngineParams, ParamId};

/// Cheap, cloneable access to an engine's parameters from any thread.
///
/// Setters clamp to each parameter's range and store with relaxed ordering;
/// the audio thread picks the values up at the start of its next block.
#[derive(Debug, Clone)]
pub struct ParamHandle {
    params: Arc<EngineParams>,
    tracked_hz: Arc<AtomicFloat>,
}

impl ParamHandle {
    pub(crate) fn new(params: Arc<EngineParams>, tracked_hz: Arc<AtomicFloat>) -> Self {
        Self { params, tracked_hz }
    }

    pub fn set(&self, id: ParamId, value: f32) -> &Self {
        self.params.set(id, value);
        self
    }

    pub fn get(&self, id: ParamId) -> f32 {
        self.params.get(id)
    }

    /// Host automation path: `normalized` in 0.0-1.0.
    pub fn set_normalized(&self, id: ParamId, normalized: f32) -> &Self {
        self.params.set_normalized(id, normalized);
        self
    }

    pub fn get_normalized(&self, id: ParamId) -> f32 {
        self.params.get_normalized(id)
    }

    /// Root frequency in Hz.
    pub fn set_root(&self, hz: f32) -> &Self {
        self.set(ParamId::Root, hz)
    }

    pub fn root(&self) -> f32 {
        self.get(ParamId::Root)
    }

    /// Bandpass Q.
    pub fn set_resonance(&self, q: f32) -> &Self {
        self.set(ParamId::Resonance, q)
    }

    pub fn resonance(&self) -> f32 {
        self.get(ParamId::Resonance)
    }

    pub fn set_num_harmonics(&self, count: usize) -> &Self {
        self.set(ParamId::NumHarmonics, count as f32)
    }

    pub fn num_harmonics(&self) -> usize {
        self.get(ParamId::NumHarmonics) as usize
    }

    pub fn set_filter_order(&self, order: usize) -> &Self {
        self.set(ParamId::FilterOrder, order as f32)
    }

    pub fn filter_order(&self) -> usize {
        self.get(ParamId::FilterOrder) as usize
    }

    pub fn set_stretch(&self, stretch: f32) -> &Self {
        self.set(ParamId::Stretch, stretch)
    }

    pub fn stretch(&self) -> f32 {
        self.get(ParamId::Stretch)
    }

    /// Output gain in dB.
    pub fn set_wet_gain_db(&self, db: f32) -> &Self {
        self.set(ParamId::WetGain, db)
    }

    pub fn wet_gain_db(&self) -> f32 {
        self.get(ParamId::WetGain)
    }

    /// Note frequency the engine tracked in its last block.
    pub fn tracked_hz(&self) -> f32 {
        self.tracked_hz.get_relaxed()
    }
}
