//! Per-slot particle collection: spawn, advance, cull, snapshot

use crate::config::BurstConfig;
use crate::particle::Particle;
use crate::rand::FestoonRng;
use festoon_core::{Color, Vec2, Viewport, PALETTE};

/// Render data for one particle, produced fresh per frame and never
/// read back by the engine.
#[derive(Debug, Clone, Copy)]
pub struct ParticleSprite {
    pub position: Vec2,
    pub color: Color,
    pub visual_scale: f32,
}

/// Owns the live particles of one slot.
///
/// Bursts accumulate; particles are removed only by culling and removal
/// is final. No particle is ever shared across fields.
pub struct ParticleField {
    particles: Vec<Particle>,
    /// Bounds used for culling; refreshed on every spawn
    viewport: Viewport,
}

impl ParticleField {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            viewport: Viewport::default(),
        }
    }

    /// Add one burst of particles without touching the ones already live.
    pub fn spawn_burst(
        &mut self,
        rng: &mut FestoonRng,
        config: &BurstConfig,
        viewport: Viewport,
        now: f64,
    ) {
        let viewport = viewport.clamped();
        self.viewport = viewport;
        self.particles.reserve(config.particles_per_burst);
        for _ in 0..config.particles_per_burst {
            self.particles
                .push(Particle::spawn(rng, config, viewport, now));
        }
    }

    /// Advance every particle exactly once, apply the burst-scale phase,
    /// and cull expired or out-of-bounds particles.
    ///
    /// Culling is swap-remove; the particle swapped into the vacated
    /// index had not yet been visited this pass, so nothing is skipped
    /// or double-processed.
    pub fn tick(&mut self, now: f64, config: &BurstConfig) {
        let mut i = 0;
        while i < self.particles.len() {
            let p = &mut self.particles[i];
            p.step(now);
            let age = p.age(now);
            p.visual_scale = config.scale_policy.scale_at(age);

            let dead = config.scale_policy.expired(age) || !self.viewport.contains(p.position);
            if dead {
                self.particles.swap_remove(i);
                // Don't increment i — the swapped-in particle needs processing
            } else {
                i += 1;
            }
        }
    }

    /// Fresh render list for the UI collaborator.
    pub fn snapshot(&self) -> Vec<ParticleSprite> {
        self.particles
            .iter()
            .map(|p| ParticleSprite {
                position: p.position,
                color: PALETTE[p.color_index % PALETTE.len()],
                visual_scale: p.visual_scale,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Live particles, for inspection
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}
