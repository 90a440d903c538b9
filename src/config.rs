use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::Path;

use crate::constants::{
    DEFAULT_CORRUPTION_RATE, DEFAULT_FRAMES, DEFAULT_MAX_TRANSMISSIONS, DEFAULT_WINDOW_SIZE,
};
use crate::error::{ArqError, Result};

/// Whether retransmitted frames may be corrupted again.
#[derive(Serialize, Deserialize, clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Retransmission {
    /// Retransmissions skip the channel and always arrive.
    #[default]
    Reliable,
    /// Retransmissions go through the channel like any other frame.
    Lossy,
}

impl Retransmission {
    /// Cap on transmissions per frame. Reliable copies always arrive, so
    /// nothing caps them.
    pub fn limit(self, max_transmissions: u32) -> Option<u32> {
        match self {
            Retransmission::Reliable => None,
            Retransmission::Lossy => Some(max_transmissions.max(1)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub window_size: NonZeroU32,
    pub frames: u32,
    pub corruption_rate: f64,
    pub retransmission: Retransmission,
    pub max_transmissions: u32,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            frames: DEFAULT_FRAMES,
            corruption_rate: DEFAULT_CORRUPTION_RATE,
            retransmission: Retransmission::Reliable,
            max_transmissions: DEFAULT_MAX_TRANSMISSIONS,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)?;
        Self::parse(&toml_str)
    }

    pub fn parse(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.corruption_rate) {
            return Err(ArqError::InvalidCorruptionRate(self.corruption_rate));
        }
        Ok(())
    }
}
