//! MIDI input for ModalShift.
//!
//! Provides RT-safe event types and the monophonic [`PitchTracker`] that turns
//! note-ons into per-harmonic shift targets.
//!
//! # Example
//!
//! ```
//! use modalshift_core::HarmonicShiftTable;
//! use modalshift_midi::{MidiEvent, PitchTracker};
//!
//! let table = HarmonicShiftTable::new();
//! let mut tracker = PitchTracker::new();
//!
//! // Play A#4 against an A4 root: every harmonic moves up by (h + 1) * 26.16 Hz
//! let tracked = tracker.process(&[MidiEvent::note_on(0, 0, 70, 100)], &table, 440.0, 0.0, 8);
//! assert!((tracked - 466.16).abs() < 0.01);
//! assert!((table.get(0, 0) - 26.16).abs() < 0.01);
//! ```

pub mod error;
pub use error::{Error, Result};

pub use event::MidiEvent;
pub use pitch_tracker::{PitchState, PitchTracker};
pub use utils::note_to_hz;

// Re-export essential upstream types
pub use midi_msg::{Channel, ChannelVoiceMsg};

pub(crate) mod event;
mod pitch_tracker;
pub(crate) mod utils;
