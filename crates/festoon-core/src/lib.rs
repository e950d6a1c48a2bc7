//! Festoon Core - Foundational types for the festoon engine
//!
//! This crate provides the types that the engine crate depends on:
//! - `ParticleId` - Stable particle identifiers
//! - `Vec2`, `Viewport` - Spatial types
//! - `Color` and the streamer `PALETTE`
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{FestoonError, Result};
pub use id::ParticleId;
pub use types::{Color, Vec2, Viewport, PALETTE};
