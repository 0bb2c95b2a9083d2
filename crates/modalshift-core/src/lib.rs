//! Core runtime types for the ModalShift resynthesis engine.
//!
//! # Primary API
//!
//! - [`AtomicFloat`]: single-writer atomic `f32` cell
//! - [`HarmonicShiftTable`]: channel × harmonic shift frequencies
//! - [`EngineParams`] / [`ParamId`]: control-surface parameters
//! - [`ProcessSpec`] / [`EngineConfig`]: preparation settings
//! - [`ChannelBuffer`]: planar scratch buffer

pub mod error;
pub use error::{Error, Result};

mod buffer;
pub use buffer::ChannelBuffer;

pub mod config;
pub use config::{EngineConfig, ProcessSpec};

pub(crate) mod lockfree;
pub use lockfree::AtomicFloat;

pub mod parameter;
pub use parameter::{ParameterRange, ParameterScale};

pub mod params;
pub use params::{EngineParams, ParamId, ParamSnapshot};

mod shift_table;
pub use shift_table::{HarmonicShiftTable, ShiftSnapshot};

pub use num_complex::Complex32;

/// Maximum number of harmonic bands.
pub const MAX_HARMONICS: usize = 8;

/// Maximum bandpass cascade depth per harmonic.
pub const MAX_ORDER: usize = 4;

/// Maximum audio channel count.
pub const MAX_CHANNELS: usize = 2;
