//! Monophonic pitch tracking: MIDI note-ons to per-harmonic shift targets.

use modalshift_core::{HarmonicShiftTable, MAX_CHANNELS, MAX_HARMONICS};

use crate::event::MidiEvent;
use crate::utils::note_to_hz;

/// Inputs the shift table was last computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchState {
    pub note_hz: f32,
    pub root: f32,
    pub stretch: f32,
    pub num_harmonics: usize,
}

impl Default for PitchState {
    fn default() -> Self {
        Self {
            note_hz: 440.0,
            root: 440.0,
            stretch: 0.0,
            num_harmonics: MAX_HARMONICS,
        }
    }
}

/// Tracks the most recent note-on and republishes the harmonic shift table
/// whenever the note, root, stretch or harmonic count changes.
///
/// For harmonic `h` (zero-based) the published shift is
///
/// ```text
/// (note - root) * (h + 1) + root * (h / num_harmonics) * stretch
/// ```
///
/// written identically for every channel. The table is left untouched on
/// blocks where nothing changed.
#[derive(Debug, Clone)]
pub struct PitchTracker {
    state: PitchState,
    publish_pending: bool,
}

impl PitchTracker {
    /// The first call to [`process`](Self::process) always publishes.
    pub fn new() -> Self {
        Self {
            state: PitchState::default(),
            publish_pending: true,
        }
    }

    /// Apply this block's events and parameters. Returns the tracked note
    /// frequency in Hz.
    pub fn process(
        &mut self,
        events: &[MidiEvent],
        shifts: &HarmonicShiftTable,
        root: f32,
        stretch: f32,
        num_harmonics: usize,
    ) -> f32 {
        let mut changed = std::mem::take(&mut self.publish_pending);

        for event in events.iter().filter(|e| e.is_note_on()) {
            if let Some(note) = event.note() {
                self.state.note_hz = note_to_hz(note as f32);
                changed = true;
            }
        }

        if root.is_finite() && root != self.state.root {
            self.state.root = root;
            changed = true;
        }

        if stretch.is_finite() && stretch != self.state.stretch {
            self.state.stretch = stretch;
            changed = true;
        }

        if num_harmonics != self.state.num_harmonics {
            self.state.num_harmonics = num_harmonics;
            changed = true;
        }

        if changed {
            self.publish(shifts);
        }

        self.state.note_hz
    }

    #[inline]
    pub fn tracked_hz(&self) -> f32 {
        self.state.note_hz
    }

    #[inline]
    pub fn state(&self) -> PitchState {
        self.state
    }

    /// Force the next block to republish, keeping the tracked note.
    pub fn reset(&mut self) {
        self.publish_pending = true;
    }

    /// Shift for one harmonic under the current state.
    pub fn shift_for(&self, harmonic: usize) -> f32 {
        let PitchState {
            note_hz,
            root,
            stretch,
            num_harmonics,
        } = self.state;

        // No harmonics means no stretch term, not a division by zero.
        let stretch_term = if num_harmonics == 0 {
            0.0
        } else {
            root * (harmonic as f32 / num_harmonics as f32) * stretch
        };

        (note_hz - root) * (harmonic as f32 + 1.0) + stretch_term
    }

    fn publish(&self, shifts: &HarmonicShiftTable) {
        for harmonic in 0..MAX_HARMONICS {
            let shift = self.shift_for(harmonic);
            for channel in 0..MAX_CHANNELS {
                shifts.set(channel, harmonic, shift);
            }
        }
    }
}

impl Default for PitchTracker {
    fn default() -> Self {
        Self::new()
    }
}
