//! Animator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FoldError;
use crate::transitions::Easing;

/// Per-instance configuration.
///
/// Loadable from JSON; omitted fields fall back to [`FoldConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldConfig {
    /// Number of fold panels the container is split into.
    pub folds: u16,

    /// Length of one open or close cycle in milliseconds. The host
    /// stylesheet reads it back through the transitions set on each panel.
    pub duration_ms: u64,

    /// Delay before the state class is flipped, so the initial panel
    /// heights are painted once before transitioning.
    pub flip_delay_ms: u64,

    /// Easing curves per direction.
    pub easing: EasingSet,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            folds: 5,
            duration_ms: 1000,
            flip_delay_ms: 10,
            easing: EasingSet::default(),
        }
    }
}

impl FoldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, FoldError> {
        let config: FoldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the fold count.
    pub fn folds(mut self, folds: u16) -> Self {
        self.folds = folds;
        self
    }

    /// Set the cycle duration in milliseconds.
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn flip_delay_ms(mut self, flip_delay_ms: u64) -> Self {
        self.flip_delay_ms = flip_delay_ms;
        self
    }

    pub fn easing(mut self, easing: EasingSet) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn flip_delay(&self) -> Duration {
        Duration::from_millis(self.flip_delay_ms)
    }

    pub fn validate(&self) -> Result<(), FoldError> {
        if self.folds == 0 {
            return Err(FoldError::InvalidConfiguration(
                "fold count must be positive".into(),
            ));
        }
        if self.duration_ms == 0 {
            return Err(FoldError::InvalidConfiguration(
                "duration must be positive".into(),
            ));
        }
        self.easing.opening.validate()?;
        self.easing.closing.validate()
    }
}

/// Easing pairs for both directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EasingSet {
    pub opening: EasingPair,
    pub closing: EasingPair,
}

impl Default for EasingSet {
    fn default() -> Self {
        Self {
            opening: EasingPair {
                height: Easing::cubic_bezier(0.1, 0.0, 0.75, 1.0),
                rotate: Easing::cubic_bezier(0.15, 0.0, 1.0, 0.95),
            },
            closing: EasingPair {
                height: Easing::cubic_bezier(0.2, 0.0, 0.95, 1.0),
                rotate: Easing::cubic_bezier(0.0, 0.15, 0.95, 1.0),
            },
        }
    }
}

impl EasingSet {
    /// Pair used for the given direction.
    pub fn for_closing(&self, closing: bool) -> EasingPair {
        if closing { self.closing } else { self.opening }
    }
}

/// Height and rotation curves for one direction. Shading always fades linearly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EasingPair {
    pub height: Easing,
    pub rotate: Easing,
}

impl EasingPair {
    fn validate(&self) -> Result<(), FoldError> {
        self.height.validate()?;
        self.rotate.validate()
    }
}
