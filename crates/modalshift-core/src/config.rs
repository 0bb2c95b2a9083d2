//! Engine configuration and the processing spec handed to every DSP component.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, MAX_CHANNELS};

/// Sample rate, block size and channel count a component is prepared for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    pub sample_rate: f64,
    pub max_block_size: usize,
    pub channels: usize,
}

impl ProcessSpec {
    pub fn new(sample_rate: f64, max_block_size: usize, channels: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            channels,
        }
    }

    /// Same spec restricted to a single channel.
    pub fn mono(&self) -> Self {
        Self {
            channels: 1,
            ..*self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(8000.0..=384_000.0).contains(&self.sample_rate) {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }
        if self.max_block_size == 0 {
            return Err(Error::InvalidBlockSize(self.max_block_size));
        }
        if self.channels == 0 || self.channels > MAX_CHANNELS {
            return Err(Error::InvalidChannelCount {
                channels: self.channels,
                max: MAX_CHANNELS,
            });
        }
        Ok(())
    }
}

impl Default for ProcessSpec {
    fn default() -> Self {
        Self::new(48000.0, 512, 2)
    }
}

/// Configuration for the resynthesis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub sample_rate: f64,
    pub max_block_size: usize,
    pub channels: usize,
    /// Run the rotated signal through the anti-alias stage.
    pub anti_alias: bool,
    /// Passband gain of the Hilbert stage feeding each shifter.
    pub hilbert_passband_gain: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            max_block_size: 512,
            channels: 2,
            anti_alias: true,
            hilbert_passband_gain: 2.0,
        }
    }
}

impl EngineConfig {
    pub fn spec(&self) -> ProcessSpec {
        ProcessSpec::new(self.sample_rate, self.max_block_size, self.channels)
    }

    pub fn validate(&self) -> Result<()> {
        self.spec().validate()?;
        if !self.hilbert_passband_gain.is_finite() || self.hilbert_passband_gain <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "hilbert_passband_gain {} must be finite and positive",
                self.hilbert_passband_gain
            )));
        }
        Ok(())
    }
}
