use time::PrimitiveDateTime;

use crate::util::timezone::local_now;

/// Source of the naive local time used to stamp new posts.
pub trait Clock: Send + Sync {
    fn now(&self) -> PrimitiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> PrimitiveDateTime {
        local_now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub PrimitiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> PrimitiveDateTime {
        self.0
    }
}
