//! Per-channel, per-harmonic shift frequencies shared between the pitch tracker
//! and the frequency shifters.

use std::sync::Arc;

use crate::lockfree::AtomicFloat;
use crate::{MAX_CHANNELS, MAX_HARMONICS};

/// Plain copy of every slot, in `[channel][harmonic]` order.
pub type ShiftSnapshot = [[f32; MAX_HARMONICS]; MAX_CHANNELS];

/// Channel × harmonic table of shift frequencies in Hz.
///
/// Slots are individually shared (`Arc<AtomicFloat>`) so each shifter can hold
/// the one cell it reads. Reads and writes are relaxed: a reader may observe a
/// mix of old and new slots mid-update, never a torn value.
#[derive(Debug)]
pub struct HarmonicShiftTable {
    slots: [[Arc<AtomicFloat>; MAX_HARMONICS]; MAX_CHANNELS],
}

impl HarmonicShiftTable {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| {
                std::array::from_fn(|_| Arc::new(AtomicFloat::default()))
            }),
        }
    }

    /// Shared handle to one slot.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= MAX_CHANNELS` or `harmonic >= MAX_HARMONICS`.
    pub fn slot(&self, channel: usize, harmonic: usize) -> Arc<AtomicFloat> {
        Arc::clone(&self.slots[channel][harmonic])
    }

    #[inline]
    pub fn get(&self, channel: usize, harmonic: usize) -> f32 {
        self.slots[channel][harmonic].get_relaxed()
    }

    #[inline]
    pub fn set(&self, channel: usize, harmonic: usize, hz: f32) {
        self.slots[channel][harmonic].set_relaxed(hz);
    }

    pub fn snapshot(&self) -> ShiftSnapshot {
        std::array::from_fn(|channel| std::array::from_fn(|harmonic| self.get(channel, harmonic)))
    }
}

impl Default for HarmonicShiftTable {
    fn default() -> Self {
        Self::new()
    }
}
