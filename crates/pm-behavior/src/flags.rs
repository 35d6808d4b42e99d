//! Flags shared between the movement core and the routing layer.
//!
//! Each field has exactly one writer:
//!
//! | Flag                 | Written by | Read by  |
//! |----------------------|------------|----------|
//! | `can_be_influenced`  | movement   | routing  |
//! | `is_drinking_coffee` | movement   | routing  |
//! | `saw_coffee`         | routing    | movement (consumed and cleared) |

/// Per-agent host flags.  Owned by the host, lent to the agent each tick
/// through [`TickContext`](crate::TickContext).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HostFlags {
    can_be_influenced:  bool,
    is_drinking_coffee: bool,
    saw_coffee:         bool,
}

impl HostFlags {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn can_be_influenced(&self) -> bool {
        self.can_be_influenced
    }

    #[inline]
    pub fn is_drinking_coffee(&self) -> bool {
        self.is_drinking_coffee
    }

    #[inline]
    pub fn saw_coffee(&self) -> bool {
        self.saw_coffee
    }

    /// Routing side: this agent has just seen someone drinking coffee.
    pub fn notify_saw_coffee(&mut self) {
        self.saw_coffee = true;
    }

    /// Movement side: read and clear the trigger.
    pub fn take_saw_coffee(&mut self) -> bool {
        std::mem::take(&mut self.saw_coffee)
    }

    pub(crate) fn set_can_be_influenced(&mut self, v: bool) {
        self.can_be_influenced = v;
    }

    pub(crate) fn set_drinking_coffee(&mut self, v: bool) {
        self.is_drinking_coffee = v;
    }
}
