//! Ordered, resizable collection of timer slots

use crate::slot::TimerSlot;
use festoon_core::{FestoonError, Result};

/// Owns the slot sequence. Index is the stable identity the UI
/// collaborator addresses slots by: growth appends, shrinking removes
/// from the tail only, and surviving slots are never reinitialized, so
/// indices held by in-flight callbacks stay valid.
pub struct TimerRegistry {
    slots: Vec<TimerSlot>,
}

impl TimerRegistry {
    pub fn new(count: usize) -> Self {
        let mut slots = Vec::with_capacity(count);
        slots.resize_with(count, TimerSlot::new);
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<&TimerSlot> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut TimerSlot> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimerSlot> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TimerSlot> {
        self.slots.iter_mut()
    }

    /// Validate a requested slot count. Non-positive requests are
    /// rejected without mutating anything.
    pub fn validate_count(requested: i64) -> Result<usize> {
        if requested <= 0 {
            return Err(FestoonError::InvalidSlotCount { requested });
        }
        Ok(requested as usize)
    }

    /// Grow to `count` by appending fresh default slots. No-op if the
    /// registry is already at least that large.
    pub fn grow_to(&mut self, count: usize) {
        if count > self.slots.len() {
            self.slots.resize_with(count, TimerSlot::new);
        }
    }

    /// Shrink to `count`, returning the removed tail slots so the
    /// caller can cancel their scheduler handles. No-op (empty vec) if
    /// already at most `count`.
    pub fn truncate_to(&mut self, count: usize) -> Vec<TimerSlot> {
        if count >= self.slots.len() {
            return Vec::new();
        }
        self.slots.split_off(count)
    }
}
