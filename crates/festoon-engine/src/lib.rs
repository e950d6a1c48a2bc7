//! Festoon Engine - timer & streamer particle animation
//!
//! A decorative stopwatch engine:
//! - `FestoonEngine` — the facade the UI collaborator talks to
//! - `TimerRegistry` / `TimerSlot` — resizable count-up timer slots
//! - `ParticleField` — per-slot streamer simulation with burst spawning,
//!   late-life scale kick, and permanent culling
//! - `Scheduler` / `EngineClock` — cancelable message-based scheduling
//!   over a monotonic clock, drained single-threaded by the event pump
//! - `AnimationDriver` — the shared Idle/Running frame-tick state machine

pub mod clock;
pub mod config;
pub mod driver;
pub mod engine;
pub mod field;
pub mod particle;
pub mod rand;
pub mod registry;
pub mod scheduler;
pub mod slot;

pub use clock::EngineClock;
pub use config::{BurstConfig, BurstKind, EngineConfig, ScalePolicy};
pub use driver::{AnimationDriver, DriverState};
pub use engine::FestoonEngine;
pub use field::{ParticleField, ParticleSprite};
pub use particle::{Motion, Particle};
pub use rand::FestoonRng;
pub use registry::TimerRegistry;
pub use scheduler::{Scheduler, TaskHandle};
pub use slot::{format_elapsed, TimerSlot};
