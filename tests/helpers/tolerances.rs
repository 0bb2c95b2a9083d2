//! Tolerance constants for audio testing.
//!
//! Different operations require different precision levels.

/// Floating point rounding errors (for passthrough, exact gain).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// DSP processing tolerance (filters may have slight variations).
pub const DSP_EPSILON: f32 = 1e-4;

/// Audio perceptual tolerance (~-60dB, inaudible differences).
pub const PERCEPTUAL_EPSILON: f32 = 0.001;

/// Silence threshold (~-80dB).
/// Values below this are considered silent.
pub const SILENCE_THRESHOLD: f32 = 0.0001;

/// Minimum attenuation of the unwanted sideband, in dB.
pub const IMAGE_REJECTION_DB: f32 = 40.0;
