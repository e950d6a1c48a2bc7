//! The engine facade: wires clock, scheduler, registry and driver

use crate::clock::EngineClock;
use crate::config::EngineConfig;
use crate::driver::AnimationDriver;
use crate::field::ParticleSprite;
use crate::rand::FestoonRng;
use crate::registry::TimerRegistry;
use crate::scheduler::{Scheduler, TaskHandle};
use festoon_core::{Result, Viewport};
use log::debug;

/// Messages delivered by the event pump. Every scheduled callback is
/// one of these; dispatch applies them as plain state transitions.
#[derive(Debug, Clone, Copy)]
enum Callback {
    /// One-second counter tick for a slot
    CounterTick { slot: usize },
    /// Delayed burst in a start's burst sequence
    Burst { slot: usize, viewport: Viewport },
    /// Shared animation-frame tick
    FrameTick,
}

/// Timer & streamer engine.
///
/// Single-threaded and cooperative: all callbacks run sequentially
/// inside [`FestoonEngine::advance`] / [`FestoonEngine::pump`], one at
/// a time in timestamp order, so no two ever overlap. The UI
/// collaborator feeds in `start` presses and viewport sizes and reads
/// back formatted elapsed times and particle snapshots.
pub struct FestoonEngine {
    clock: EngineClock,
    scheduler: Scheduler<Callback>,
    rng: FestoonRng,
    config: EngineConfig,
    registry: TimerRegistry,
    driver: AnimationDriver,
}

impl FestoonEngine {
    /// Engine with the default configuration and a single slot.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            clock: EngineClock::new(),
            scheduler: Scheduler::new(),
            rng: FestoonRng::new(config.rng_seed),
            config,
            registry: TimerRegistry::new(1),
            driver: AnimationDriver::new(),
        }
    }

    /// Current engine time in seconds.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn slot_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of callbacks still waiting in the scheduler.
    pub fn pending_callbacks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn animation_running(&self) -> bool {
        self.driver.is_running()
    }

    // ── Input surface ──

    /// Handle a start press for a slot.
    ///
    /// Resets and restarts the slot's counter, fires one burst
    /// immediately, schedules the rest of the burst sequence, and makes
    /// sure the animation driver is running. An out-of-range index is
    /// silently ignored; a degenerate viewport is clamped. Particles
    /// already in flight from an earlier start are left alone.
    pub fn start(&mut self, slot_index: usize, viewport: Viewport) {
        let now = self.clock.now();
        let viewport = viewport.clamped();

        let Some(slot) = self.registry.slot_mut(slot_index) else {
            debug!("start ignored: slot {slot_index} out of range");
            return;
        };

        // The old counter must die before the new one is installed:
        // two live counters for one slot is an invariant violation.
        if let Some(handle) = slot.counter.take() {
            self.scheduler.cancel(handle);
        }
        slot.elapsed_seconds = 0;
        slot.counter = Some(self.scheduler.schedule_repeating(
            now,
            self.config.counter_interval,
            Callback::CounterTick { slot: slot_index },
        ));

        // Burst sequence: one burst now, K more at fixed delays.
        slot.field
            .spawn_burst(&mut self.rng, &self.config.burst, viewport, now);
        for k in 1..=self.config.burst.sequence_len {
            let delay = f64::from(k) * self.config.burst.sequence_spacing;
            let handle = self.scheduler.schedule_once(
                now,
                delay,
                Callback::Burst {
                    slot: slot_index,
                    viewport,
                },
            );
            slot.pending_bursts.push(handle);
        }

        debug!("slot {slot_index} started at t={now:.3}");
        self.ensure_driver_running();
    }

    /// Resize the slot collection.
    ///
    /// Growing appends fresh slots; shrinking removes tail slots only,
    /// canceling every scheduler callback they still own. Non-positive
    /// requests are rejected with the registry untouched.
    pub fn resize(&mut self, requested: i64) -> Result<()> {
        let count = TimerRegistry::validate_count(requested)?;
        if count >= self.registry.len() {
            self.registry.grow_to(count);
        } else {
            for slot in self.registry.truncate_to(count) {
                for handle in slot.live_handles() {
                    self.scheduler.cancel(handle);
                }
            }
        }
        debug!("registry resized to {count} slot(s)");
        Ok(())
    }

    pub fn set_title(&mut self, slot_index: usize, title: impl Into<String>) {
        match self.registry.slot_mut(slot_index) {
            Some(slot) => slot.title = title.into(),
            None => debug!("set_title ignored: slot {slot_index} out of range"),
        }
    }

    // ── Output surface ──

    pub fn title(&self, slot_index: usize) -> Option<&str> {
        self.registry.slot(slot_index).map(|s| s.title.as_str())
    }

    pub fn elapsed_seconds(&self, slot_index: usize) -> Option<u64> {
        self.registry.slot(slot_index).map(|s| s.elapsed_seconds)
    }

    /// "HH:MM:SS" for the slot, or None if the index is out of range.
    pub fn elapsed_formatted(&self, slot_index: usize) -> Option<String> {
        self.registry.slot(slot_index).map(|s| s.elapsed_formatted())
    }

    /// Fresh render list for the slot; empty for an out-of-range index.
    pub fn snapshot(&self, slot_index: usize) -> Vec<ParticleSprite> {
        self.registry
            .slot(slot_index)
            .map(|s| s.field().snapshot())
            .unwrap_or_default()
    }

    pub fn particle_count(&self, slot_index: usize) -> usize {
        self.registry
            .slot(slot_index)
            .map(|s| s.field().len())
            .unwrap_or(0)
    }

    // ── Event pump ──

    /// Advance engine time by exactly `dt` seconds, delivering every
    /// due callback in timestamp order along the way. Deterministic;
    /// this is the only place callbacks ever run.
    pub fn advance(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let target = self.clock.now() + dt;
        self.run_until(target);
    }

    /// Advance engine time from wall time. Call once per UI frame.
    pub fn pump(&mut self) {
        self.clock.tick();
        let target = self.clock.now();
        self.run_until(target);
    }

    fn run_until(&mut self, target: f64) {
        loop {
            let Some(due) = self.scheduler.next_due_at() else {
                break;
            };
            if due > target {
                break;
            }
            let now = self.clock.now();
            if due > now {
                self.clock.advance(due - now);
            }
            if let Some((handle, message)) = self.scheduler.pop_due(self.clock.now()) {
                self.dispatch(handle, message);
            }
        }
        let now = self.clock.now();
        if target > now {
            self.clock.advance(target - now);
        }
    }

    fn dispatch(&mut self, handle: TaskHandle, message: Callback) {
        match message {
            Callback::CounterTick { slot } => {
                if let Some(s) = self.registry.slot_mut(slot) {
                    // Only the slot's live counter may increment it
                    if s.counter == Some(handle) {
                        s.elapsed_seconds += 1;
                    }
                }
            }
            Callback::Burst { slot, viewport } => {
                let now = self.clock.now();
                if let Some(s) = self.registry.slot_mut(slot) {
                    s.pending_bursts.retain(|h| *h != handle);
                    s.field
                        .spawn_burst(&mut self.rng, &self.config.burst, viewport, now);
                }
                self.ensure_driver_running();
            }
            Callback::FrameTick => {
                let now = self.clock.now();
                for s in self.registry.iter_mut() {
                    if !s.field.is_empty() {
                        s.field.tick(now, &self.config.burst);
                    }
                }
                if self.registry.iter().all(|s| s.field().is_empty()) {
                    if let Some(h) = self.driver.set_idle() {
                        self.scheduler.cancel(h);
                        debug!("animation driver stopped at t={now:.3}");
                    }
                }
            }
        }
    }

    /// Idle → Running when any field has particles. Idempotent; never
    /// installs a second frame-tick task.
    fn ensure_driver_running(&mut self) {
        if self.driver.is_running() {
            return;
        }
        if self.registry.iter().all(|s| s.field().is_empty()) {
            return;
        }
        let now = self.clock.now();
        let handle =
            self.scheduler
                .schedule_repeating(now, self.config.frame_interval, Callback::FrameTick);
        self.driver.set_running(handle);
        debug!("animation driver started at t={now:.3}");
    }
}

impl Default for FestoonEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BurstConfig, BurstKind, ScalePolicy};

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn start_resets_then_counts_whole_seconds() {
        let mut engine = FestoonEngine::new();
        engine.start(0, viewport());
        assert_eq!(engine.elapsed_seconds(0), Some(0));

        engine.advance(0.9);
        assert_eq!(engine.elapsed_seconds(0), Some(0));

        engine.advance(0.2);
        assert_eq!(engine.elapsed_seconds(0), Some(1));

        engine.advance(3.0);
        assert_eq!(engine.elapsed_seconds(0), Some(4));
        assert_eq!(engine.elapsed_formatted(0).unwrap(), "00:00:04");
    }

    #[test]
    fn double_start_leaves_exactly_one_counter() {
        let mut engine = FestoonEngine::new();
        engine.start(0, viewport());
        let after_first = engine.pending_callbacks();

        engine.start(0, viewport());
        // Old counter canceled, new one installed, one more burst
        // sequence queued; no second frame-tick task.
        let extra_bursts = engine.pending_callbacks() - after_first;
        assert_eq!(extra_bursts as u32, BurstConfig::default().sequence_len);

        engine.advance(1.0);
        assert_eq!(engine.elapsed_seconds(0), Some(1));
        engine.advance(1.0);
        assert_eq!(engine.elapsed_seconds(0), Some(2));
    }

    #[test]
    fn restart_mid_count_resets_to_zero() {
        let mut engine = FestoonEngine::new();
        engine.start(0, viewport());
        engine.advance(5.0);
        assert_eq!(engine.elapsed_seconds(0), Some(5));

        engine.start(0, viewport());
        assert_eq!(engine.elapsed_seconds(0), Some(0));
        engine.advance(1.0);
        assert_eq!(engine.elapsed_seconds(0), Some(1));
    }

    #[test]
    fn restart_does_not_disturb_in_flight_particles() {
        let mut engine = FestoonEngine::new();
        engine.start(0, viewport());
        engine.advance(0.5);
        let in_flight = engine.particle_count(0);
        assert!(in_flight > 0);

        engine.start(0, viewport());
        // Old particles survive; a fresh burst joins them
        assert_eq!(
            engine.particle_count(0),
            in_flight + BurstConfig::default().particles_per_burst
        );
    }

    #[test]
    fn burst_sequence_fires_at_fixed_delays() {
        let mut engine = FestoonEngine::new();
        let per_burst = BurstConfig::default().particles_per_burst;
        engine.start(0, viewport());
        assert_eq!(engine.particle_count(0), per_burst);

        // Bursts land at 0.1, 0.2, 0.3, 0.4; no culling that early
        engine.advance(0.15);
        assert_eq!(engine.particle_count(0), 2 * per_burst);
        engine.advance(0.3);
        assert_eq!(engine.particle_count(0), 5 * per_burst);
    }

    #[test]
    fn scenario_full_run_drains_and_stops_driver() {
        let mut engine = FestoonEngine::new();
        engine.start(0, viewport());

        let n = engine.particle_count(0);
        assert!((30..=60).contains(&n));
        assert_eq!(engine.elapsed_seconds(0), Some(0));
        assert!(engine.animation_running());

        engine.advance(1.0);
        assert_eq!(engine.elapsed_seconds(0), Some(1));

        engine.advance(10.0);
        assert_eq!(engine.particle_count(0), 0);
        assert!(!engine.animation_running());
        assert_eq!(engine.elapsed_seconds(0), Some(11));

        // Only the counter is left in the queue
        assert_eq!(engine.pending_callbacks(), 1);
    }

    #[test]
    fn driver_restarts_for_a_new_burst_after_idle() {
        let mut engine = FestoonEngine::new();
        engine.start(0, viewport());
        engine.advance(20.0);
        assert!(!engine.animation_running());

        engine.start(0, viewport());
        assert!(engine.animation_running());
        engine.advance(20.0);
        assert!(!engine.animation_running());
    }

    #[test]
    fn radial_oscillate_configuration_drains_by_bounds() {
        let config = EngineConfig {
            burst: BurstConfig {
                kind: BurstKind::Radial,
                scale_policy: ScalePolicy::Oscillate {
                    onset: 4.0,
                    rate: 4.0,
                    depth: 0.5,
                },
                ..BurstConfig::default()
            },
            ..EngineConfig::default()
        };
        let mut engine = FestoonEngine::with_config(config);
        engine.start(0, Viewport::new(100.0, 100.0));
        assert!(engine.particle_count(0) > 0);

        // Slowest particle moves 1 unit/tick; the 50-unit half-bound is
        // crossed well inside 30 simulated seconds.
        engine.advance(30.0);
        assert_eq!(engine.particle_count(0), 0);
        assert!(!engine.animation_running());
    }

    #[test]
    fn resize_grows_and_preserves_existing_slots() {
        let mut engine = FestoonEngine::new();
        engine.start(0, viewport());
        engine.advance(3.0);
        let particles_before = engine.particle_count(0);

        engine.resize(4).unwrap();
        assert_eq!(engine.slot_count(), 4);
        assert_eq!(engine.elapsed_seconds(0), Some(3));
        assert_eq!(engine.particle_count(0), particles_before);
        assert_eq!(engine.elapsed_seconds(3), Some(0));
    }

    #[test]
    fn resize_rejects_non_positive_without_mutating() {
        let mut engine = FestoonEngine::new();
        engine.resize(3).unwrap();
        engine.start(1, viewport());
        engine.advance(2.0);

        assert!(engine.resize(0).is_err());
        assert!(engine.resize(-3).is_err());
        assert_eq!(engine.slot_count(), 3);
        assert_eq!(engine.elapsed_seconds(1), Some(2));
    }

    #[test]
    fn shrink_cancels_removed_slots_callbacks() {
        let mut engine = FestoonEngine::new();
        engine.resize(5).unwrap();
        engine.start(0, viewport());
        engine.start(1, viewport());
        engine.advance(2.0);
        engine.start(4, viewport());

        engine.resize(2).unwrap();
        assert_eq!(engine.slot_count(), 2);
        // Survivors keep counting
        assert_eq!(engine.elapsed_seconds(0), Some(2));
        assert_eq!(engine.elapsed_seconds(1), Some(2));

        // Slot 4's counter and pending bursts are gone: the only tasks
        // left are the two surviving counters plus the frame tick.
        assert_eq!(engine.pending_callbacks(), 3);

        // And nothing faults as time moves past their old deadlines
        engine.advance(30.0);
        assert_eq!(engine.elapsed_seconds(0), Some(32));
        assert_eq!(engine.elapsed_seconds(4), None);
    }

    #[test]
    fn out_of_range_operations_are_silently_ignored() {
        let mut engine = FestoonEngine::new();
        engine.start(7, viewport());
        engine.set_title(7, "ghost");

        assert_eq!(engine.particle_count(7), 0);
        assert!(engine.snapshot(7).is_empty());
        assert_eq!(engine.elapsed_formatted(7), None);
        assert_eq!(engine.title(7), None);
        assert_eq!(engine.pending_callbacks(), 0);
        assert!(!engine.animation_running());
    }

    #[test]
    fn titles_are_opaque_passthrough() {
        let mut engine = FestoonEngine::new();
        engine.resize(2).unwrap();
        engine.set_title(1, "soup of the day");
        assert_eq!(engine.title(1), Some("soup of the day"));
        assert_eq!(engine.title(0), Some(""));

        // Unchanged by starts and resizes
        engine.start(1, viewport());
        engine.resize(3).unwrap();
        assert_eq!(engine.title(1), Some("soup of the day"));
    }

    #[test]
    fn snapshots_are_fresh_and_consistent() {
        let mut engine = FestoonEngine::new();
        engine.start(0, viewport());
        engine.advance(0.5);

        let a = engine.snapshot(0);
        let b = engine.snapshot(0);
        assert_eq!(a.len(), b.len());
        assert_eq!(a.len(), engine.particle_count(0));
    }

    #[test]
    fn zero_sequence_len_means_single_burst() {
        let config = EngineConfig {
            burst: BurstConfig {
                sequence_len: 0,
                ..BurstConfig::default()
            },
            ..EngineConfig::default()
        };
        let mut engine = FestoonEngine::with_config(config);
        engine.start(0, viewport());
        let n = engine.particle_count(0);

        engine.advance(0.5);
        // No scheduled follow-up bursts; population can only shrink
        assert!(engine.particle_count(0) <= n);
    }

    #[test]
    fn degenerate_viewport_does_not_fault() {
        let mut engine = FestoonEngine::new();
        engine.start(0, Viewport::new(-5.0, 0.0));
        assert!(engine.particle_count(0) > 0);
        engine.advance(20.0);
        assert_eq!(engine.particle_count(0), 0);
    }
}
