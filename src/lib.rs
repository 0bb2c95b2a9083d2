//! # ModalShift - harmonic-tracking frequency-shift resynthesis
//!
//! Splits an audio input into harmonic bands around a root frequency, shifts
//! each band by a single-sideband frequency shifter so that the root lands on
//! the most recent MIDI note, and sums the bands back together.
//!
//! ## Architecture
//!
//! ModalShift is an umbrella crate that coordinates:
//! - **modalshift-core** - Lock-free parameters, shift table, process spec, buffers
//! - **modalshift-midi** - MIDI events and the monophonic pitch tracker
//! - **modalshift-dsp** - Hilbert transformer, frequency shifter, bandpass bank, mixer
//!
//! ## Quick Start
//!
//! ```
//! use modalshift::prelude::*;
//!
//! let mut engine = ModalShiftEngine::builder()
//!     .sample_rate(48000.0)
//!     .max_block_size(512)
//!     .channels(2)
//!     .build()?;
//!
//! // Control thread
//! let params = engine.params();
//! params.set_root(110.0).set_num_harmonics(6).set_resonance(8.0);
//!
//! // Audio thread
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! let midi = [MidiEvent::note_on(0, 0, 48, 100)];
//! engine.process(&mut [&mut left[..], &mut right[..]], &midi);
//! # Ok::<(), modalshift::Error>(())
//! ```

/// Re-export of modalshift-core for direct access
pub use modalshift_core as core;

/// Re-export of modalshift-midi for direct access
pub use modalshift_midi as midi;

/// Re-export of modalshift-dsp for direct access
pub use modalshift_dsp as dsp;

pub use modalshift_core::{
    AtomicFloat, ChannelBuffer, EngineConfig, HarmonicShiftTable, ParamId, ParameterRange,
    ProcessSpec, MAX_CHANNELS, MAX_HARMONICS, MAX_ORDER,
};

pub use modalshift_midi::{MidiEvent, PitchTracker};

pub use modalshift_dsp::{AnalyticSignalGenerator, FrequencyShifter, HarmonicBandpassBank};

mod error;
pub use error::{Error, Result};

mod builder;
mod engine;
mod handle;

pub use builder::ModalShiftEngineBuilder;
pub use engine::ModalShiftEngine;
pub use handle::ParamHandle;

/// Convenience prelude for common imports
pub mod prelude {
    // Main engine
    pub use crate::{ModalShiftEngine, ModalShiftEngineBuilder, ParamHandle};

    // Configuration
    pub use crate::core::{EngineConfig, ParamId};

    // MIDI
    pub use crate::midi::MidiEvent;
}
