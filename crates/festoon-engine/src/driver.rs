//! Shared animation-frame driver
//!
//! One driver serves every slot. It is an explicit two-state machine:
//! Idle → Running when a burst leaves any field non-empty, Running →
//! Idle when a full frame pass finds all fields empty. Running it
//! unconditionally would burn cycles forever; never stopping it would
//! leak a perpetual 10 ms task.

use crate::scheduler::TaskHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

/// Owns the single shared frame-tick handle.
pub struct AnimationDriver {
    state: DriverState,
    handle: Option<TaskHandle>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            state: DriverState::Idle,
            handle: None,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Record the transition to Running. Idempotent: returns false (and
    /// keeps the existing handle) if already running, so a second
    /// concurrent instance can never be installed.
    pub fn set_running(&mut self, handle: TaskHandle) -> bool {
        if self.state == DriverState::Running {
            return false;
        }
        self.state = DriverState::Running;
        self.handle = Some(handle);
        true
    }

    /// Record the transition back to Idle, yielding the frame-tick
    /// handle for cancellation.
    pub fn set_idle(&mut self) -> Option<TaskHandle> {
        self.state = DriverState::Idle;
        self.handle.take()
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}
