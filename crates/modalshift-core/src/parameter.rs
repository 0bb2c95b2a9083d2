//! Parameter range and scaling for host automation.
//!
//! Hosts deliver automation as normalized (0.0-1.0) values; the engine works in
//! real units (Hz, Q, counts). [`ParameterRange`] converts between the two.
//!
//! # Example
//!
//! ```
//! use modalshift_core::{ParameterRange, ParameterScale};
//!
//! // Resonance: 0.707 to 20, linear
//! let q = ParameterRange::linear(0.707, 20.0, 2.66);
//! assert!((q.denormalize(1.0) - 20.0).abs() < 1e-4);
//!
//! // Root frequency centred on A4
//! let root = ParameterRange::with_centre(8.1758, 12543.85, 440.0);
//! assert!((root.denormalize(0.5) - 440.0).abs() < 0.5);
//! ```

/// How a parameter value is scaled between normalized (0-1) and real values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParameterScale {
    /// `real = min + normalized * (max - min)`
    #[default]
    Linear,

    /// Power curve: `real = min + normalized^curve * (max - min)`
    ///
    /// `curve > 1.0`: More resolution at low end
    /// `curve < 1.0`: More resolution at high end
    Exponential {
        /// Curve shape factor
        curve: f32,
    },

    /// Values are quantized to integers between `min` and `max`.
    Integer,
}

/// Parameter range with scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRange {
    /// Minimum real value
    pub min: f32,
    /// Maximum real value
    pub max: f32,
    /// Default real value
    pub default: f32,
    /// Scaling algorithm
    pub scale: ParameterScale,
}

impl ParameterRange {
    /// Create a new parameter range. `default` is clamped to `[min, max]`.
    pub fn new(min: f32, max: f32, default: f32, scale: ParameterScale) -> Self {
        debug_assert!(max > min, "max must be greater than min");

        Self {
            min,
            max,
            default: default.clamp(min, max),
            scale,
        }
    }

    pub fn linear(min: f32, max: f32, default: f32) -> Self {
        Self::new(min, max, default, ParameterScale::Linear)
    }

    pub fn exponential(min: f32, max: f32, default: f32, curve: f32) -> Self {
        Self::new(min, max, default, ParameterScale::Exponential { curve })
    }

    /// Power-curve range whose normalized midpoint lands on `centre`.
    ///
    /// `centre` also becomes the default.
    pub fn with_centre(min: f32, max: f32, centre: f32) -> Self {
        let span = max - min;
        let position = ((centre - min) / span).clamp(f32::EPSILON, 1.0 - f32::EPSILON);
        // 0.5^curve == position
        let curve = position.ln() / 0.5_f32.ln();
        Self::exponential(min, max, centre, curve)
    }

    pub fn integer(min: i32, max: i32, default: i32) -> Self {
        Self::new(
            min as f32,
            max as f32,
            default as f32,
            ParameterScale::Integer,
        )
    }

    /// Convert a real value to normalized (0.0-1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let value = value.clamp(self.min, self.max);
        let range = self.max - self.min;

        if range <= 0.0 {
            return 0.0;
        }

        match self.scale {
            ParameterScale::Linear => (value - self.min) / range,

            ParameterScale::Exponential { curve } => {
                let linear = (value - self.min) / range;
                if curve <= 0.0 || curve == 1.0 {
                    linear
                } else {
                    linear.powf(1.0 / curve)
                }
            }

            ParameterScale::Integer => (value.round() - self.min) / range,
        }
    }

    /// Convert a normalized value (0.0-1.0) to a real value.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        let range = self.max - self.min;

        let value = match self.scale {
            ParameterScale::Linear => self.min + normalized * range,

            ParameterScale::Exponential { curve } => {
                let shaped = if curve <= 0.0 || curve == 1.0 {
                    normalized
                } else {
                    normalized.powf(curve)
                };
                self.min + shaped * range
            }

            ParameterScale::Integer => (self.min + normalized * range).round(),
        };
        value.clamp(self.min, self.max)
    }

    /// Clamp a real value to this parameter's range. NaN maps to the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let value = value.clamp(self.min, self.max);
        match self.scale {
            ParameterScale::Integer => value.round(),
            _ => value,
        }
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Convert dB value to linear amplitude.
    #[inline]
    pub fn db_to_linear(db: f32) -> f32 {
        10.0_f32.powf(db / 20.0)
    }
}

impl Default for ParameterRange {
    fn default() -> Self {
        Self::linear(0.0, 1.0, 0.5)
    }
}
