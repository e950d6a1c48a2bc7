//! One timer-plus-field unit

use crate::field::ParticleField;
use crate::scheduler::TaskHandle;

/// One independent count-up timer with its own particle field.
///
/// At most one counter handle is ever live; installing a new counter
/// always cancels the old one first. Pending burst handles from earlier
/// starts are tracked so a registry shrink can cancel them.
pub struct TimerSlot {
    /// Whole seconds counted since the last `start`
    pub elapsed_seconds: u64,
    /// Free-form label, owned by the UI collaborator; opaque here
    pub title: String,
    pub(crate) counter: Option<TaskHandle>,
    pub(crate) pending_bursts: Vec<TaskHandle>,
    pub(crate) field: ParticleField,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self {
            elapsed_seconds: 0,
            title: String::new(),
            counter: None,
            pending_bursts: Vec::new(),
            field: ParticleField::new(),
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Every scheduler handle this slot still owns. Used when the slot
    /// is discarded so none of its callbacks ever fire again.
    pub(crate) fn live_handles(&self) -> impl Iterator<Item = TaskHandle> + '_ {
        self.counter.iter().copied().chain(self.pending_bursts.iter().copied())
    }

    /// "HH:MM:SS" with zero-padded fields; hours grow without bound.
    pub fn elapsed_formatted(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

impl Default for TimerSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a second count as "HH:MM:SS" (no rollover past 99 hours)
pub fn format_elapsed(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_zero() {
        assert_eq!(format_elapsed(0), "00:00:00");
    }

    #[test]
    fn format_carries() {
        assert_eq!(format_elapsed(59), "00:00:59");
        assert_eq!(format_elapsed(60), "00:01:00");
        assert_eq!(format_elapsed(3599), "00:59:59");
        assert_eq!(format_elapsed(3600), "01:00:00");
        assert_eq!(format_elapsed(3661), "01:01:01");
    }

    #[test]
    fn hours_do_not_roll_over() {
        assert_eq!(format_elapsed(100 * 3600), "100:00:00");
        assert_eq!(format_elapsed(100 * 3600 + 62), "100:01:02");
    }

    #[test]
    fn fresh_slot_state() {
        let slot = TimerSlot::new();
        assert_eq!(slot.elapsed_seconds, 0);
        assert!(slot.title.is_empty());
        assert!(slot.counter.is_none());
        assert!(slot.field().is_empty());
        assert_eq!(slot.live_handles().count(), 0);
    }
}
