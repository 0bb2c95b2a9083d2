//! Builder for configuring and constructing a `ModalShiftEngine`.

use modalshift_core::{EngineConfig, MAX_CHANNELS};

use crate::{ModalShiftEngine, Result};

/// Produces a prepared engine, ready for [`ModalShiftEngine::process`].
///
/// A channel count outside `1..=MAX_CHANNELS` is clamped with a warning; every
/// other setting is validated and rejected with an error.
///
/// # Example
///
/// ```
/// use modalshift::prelude::*;
///
/// let engine = ModalShiftEngine::builder()
///     .sample_rate(44100.0)
///     .max_block_size(512)
///     .channels(2)
///     .build()?;
///
/// assert!(engine.is_prepared());
/// # Ok::<(), modalshift::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModalShiftEngineBuilder {
    config: EngineConfig,
}

impl ModalShiftEngineBuilder {
    /// Start from an existing configuration, e.g. one loaded with serde.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Default: 48000
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    /// Default: 512
    pub fn max_block_size(mut self, frames: usize) -> Self {
        self.config.max_block_size = frames;
        self
    }

    /// Default: 2
    pub fn channels(mut self, count: usize) -> Self {
        self.config.channels = count;
        self
    }

    /// Default: true
    pub fn anti_alias(mut self, enabled: bool) -> Self {
        self.config.anti_alias = enabled;
        self
    }

    /// Default: 2.0
    pub fn hilbert_passband_gain(mut self, gain: f32) -> Self {
        self.config.hilbert_passband_gain = gain;
        self
    }

    pub fn build(self) -> Result<ModalShiftEngine> {
        let mut config = self.config;

        let channels = config.channels.clamp(1, MAX_CHANNELS);
        if channels != config.channels {
            tracing::warn!(
                requested = config.channels,
                using = channels,
                "channel count out of range, clamping"
            );
            config.channels = channels;
        }

        config.validate()?;
        tracing::debug!(?config, "building engine");

        let mut engine = ModalShiftEngine::new(config);
        engine.prepare_from_config()?;
        Ok(engine)
    }
}
