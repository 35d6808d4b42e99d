//! Per-tick input handed to [`AgentMovement::next_path`](crate::AgentMovement::next_path).

use pm_core::Tick;

use crate::HostFlags;

/// The host's tick value plus mutable access to this agent's flags.
///
/// Built by the host once per agent per tick; never outlives the call.
pub struct TickContext<'a> {
    pub tick:  Tick,
    pub flags: &'a mut HostFlags,
}

impl<'a> TickContext<'a> {
    #[inline]
    pub fn new(tick: Tick, flags: &'a mut HostFlags) -> Self {
        Self { tick, flags }
    }
}
