//! Behavior-group tag carried by every agent.
//!
//! The host assigns the tag when it spawns an agent.  It decides the branch
//! taken on arrival (independent agents head for the coffee queue) and which
//! outcome counters a queue event lands in.

use std::str::FromStr;

use crate::PmError;

/// Coarse classification of a simulated person.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorGroup {
    /// Goes for coffee on its own initiative.
    Independent,
    /// Wanders until something (or someone) changes its mind.
    #[default]
    Dependent,
}

impl BehaviorGroup {
    pub const ALL: [BehaviorGroup; 2] = [BehaviorGroup::Independent, BehaviorGroup::Dependent];

    /// Short tag used in host configuration and report columns.
    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorGroup::Independent => "ind",
            BehaviorGroup::Dependent   => "dep",
        }
    }

    #[inline]
    pub fn is_independent(self) -> bool {
        matches!(self, BehaviorGroup::Independent)
    }
}

impl FromStr for BehaviorGroup {
    type Err = PmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ind" | "independent" => Ok(BehaviorGroup::Independent),
            "dep" | "dependent"   => Ok(BehaviorGroup::Dependent),
            other => Err(PmError::UnknownGroup(other.to_owned())),
        }
    }
}

impl std::fmt::Display for BehaviorGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
