//! Per-call context: who is calling and what time it is.

use streamlog_core::Principal;

/// The caller identity and logical clock for one operation.
///
/// The logger never reads ambient time or identity; every operation receives
/// both explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// Identity of the caller.
    pub caller: Principal,
    /// Current logical time. Non-decreasing across calls.
    pub now: u64,
}

impl CallContext {
    /// Create a context.
    pub fn new(caller: impl Into<Principal>, now: u64) -> Self {
        Self {
            caller: caller.into(),
            now,
        }
    }

    /// The same caller at a different time.
    pub fn at(&self, now: u64) -> Self {
        Self {
            caller: self.caller.clone(),
            now,
        }
    }

    /// A different caller at the same time.
    pub fn as_caller(&self, caller: impl Into<Principal>) -> Self {
        Self {
            caller: caller.into(),
            now: self.now,
        }
    }
}
