//! Speed generation.

use pm_core::AgentRng;

use crate::error::{MobilityError, MobilityResult};

/// Draws a walking speed for each new path.
///
/// Shared by every agent behind an `Arc`; the agent passes its own RNG.
pub trait SpeedPolicy: Send + Sync {
    fn generate(&self, rng: &mut AgentRng) -> f64;
}

/// Uniform speed in `[min, max]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformSpeed {
    min: f64,
    max: f64,
}

impl UniformSpeed {
    pub fn new(min: f64, max: f64) -> MobilityResult<Self> {
        check_speed(min)?;
        check_speed(max)?;
        if min > max {
            return Err(MobilityError::EmptyRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for UniformSpeed {
    /// Typical walking pace in map units per tick.
    fn default() -> Self {
        Self { min: 0.5, max: 1.5 }
    }
}

impl SpeedPolicy for UniformSpeed {
    fn generate(&self, rng: &mut AgentRng) -> f64 {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

/// Every path walks at the same speed.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedSpeed(f64);

impl FixedSpeed {
    pub fn new(speed: f64) -> MobilityResult<Self> {
        check_speed(speed)?;
        Ok(Self(speed))
    }
}

impl SpeedPolicy for FixedSpeed {
    #[inline]
    fn generate(&self, _rng: &mut AgentRng) -> f64 {
        self.0
    }
}

fn check_speed(v: f64) -> MobilityResult<()> {
    if v > 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(MobilityError::InvalidSpeed(v))
    }
}
