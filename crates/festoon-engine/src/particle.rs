//! Particle types: one streamer's kinematic and visual state

use crate::config::{BurstConfig, BurstKind};
use crate::rand::FestoonRng;
use festoon_core::{ParticleId, Vec2, Viewport};

/// Per-particle motion parameters, fixed at spawn
#[derive(Debug, Clone, Copy)]
pub enum Motion {
    /// Fixed vertical fall; horizontal offset is an absolute sine of age
    FallingWave {
        origin_x: f32,
        /// Units per tick
        fall_speed: f32,
        amplitude: f32,
        /// Radians per second of age
        frequency: f32,
    },
    /// Linear ballistic motion along a fixed angle
    Radial {
        angle: f32,
        /// Units per tick
        speed: f32,
    },
}

/// One live streamer. Once culled from its field it is never resurrected.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    /// Offset from the slot's visual center
    pub position: Vec2,
    pub motion: Motion,
    pub visual_scale: f32,
    /// Engine time at creation; `age = now - spawn_time`
    pub spawn_time: f64,
    /// Index into the fixed palette
    pub color_index: usize,
}

impl Particle {
    /// Sample a fresh particle for one burst.
    ///
    /// Falling-wave particles start on the top edge at a uniform-random
    /// x; radial particles start anywhere in the viewport.
    pub fn spawn(
        rng: &mut FestoonRng,
        config: &BurstConfig,
        viewport: Viewport,
        now: f64,
    ) -> Self {
        let half_w = viewport.width / 2.0;
        let half_h = viewport.height / 2.0;

        let (position, motion) = match config.kind {
            BurstKind::FallingWave => {
                let amplitude = rng.range(config.amplitude_min, config.amplitude_max);
                // Inset the spawn range by the wave amplitude so the
                // oscillation alone can't carry a newborn streamer out
                // of bounds on its first tick.
                let margin = amplitude.min(half_w);
                let origin_x = rng.range(-(half_w - margin), half_w - margin);
                (
                    Vec2::new(origin_x, -half_h),
                    Motion::FallingWave {
                        origin_x,
                        fall_speed: rng.range(config.fall_speed_min, config.fall_speed_max),
                        amplitude,
                        frequency: rng.range(config.frequency_min, config.frequency_max),
                    },
                )
            }
            BurstKind::Radial => (
                Vec2::new(rng.range(-half_w, half_w), rng.range(-half_h, half_h)),
                Motion::Radial {
                    angle: rng.angle(),
                    speed: rng.range(config.speed_min, config.speed_max),
                },
            ),
        };

        Self {
            id: ParticleId::new(),
            position,
            motion,
            visual_scale: 1.0,
            spawn_time: now,
            color_index: rng.palette_index(),
        }
    }

    /// Seconds since spawn at the given engine time.
    pub fn age(&self, now: f64) -> f64 {
        now - self.spawn_time
    }

    /// Advance kinematics by one tick.
    pub fn step(&mut self, now: f64) {
        match self.motion {
            Motion::FallingWave {
                origin_x,
                fall_speed,
                amplitude,
                frequency,
            } => {
                self.position.y += fall_speed;
                let age = self.age(now) as f32;
                self.position.x = origin_x + amplitude * (age * frequency).sin();
            }
            Motion::Radial { angle, speed } => {
                self.position.x += angle.cos() * speed;
                self.position.y += angle.sin() * speed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn falling_wave_spawns_on_top_edge() {
        let mut rng = FestoonRng::new(7);
        let config = BurstConfig::default();
        for _ in 0..100 {
            let p = Particle::spawn(&mut rng, &config, viewport(), 0.0);
            assert_eq!(p.position.y, -300.0);
            assert!(p.position.x.abs() <= 400.0);
            assert_eq!(p.visual_scale, 1.0);
        }
    }

    #[test]
    fn radial_spawns_inside_viewport() {
        let mut rng = FestoonRng::new(7);
        let config = BurstConfig {
            kind: BurstKind::Radial,
            ..BurstConfig::default()
        };
        for _ in 0..100 {
            let p = Particle::spawn(&mut rng, &config, viewport(), 0.0);
            assert!(viewport().contains(p.position));
        }
    }

    #[test]
    fn falling_wave_oscillation_is_bounded() {
        let mut rng = FestoonRng::new(11);
        let config = BurstConfig::default();
        let mut p = Particle::spawn(&mut rng, &config, viewport(), 0.0);
        let (origin_x, amplitude) = match p.motion {
            Motion::FallingWave {
                origin_x,
                amplitude,
                ..
            } => (origin_x, amplitude),
            _ => panic!("expected falling-wave motion"),
        };

        let mut now = 0.0;
        for _ in 0..200 {
            now += 0.01;
            p.step(now);
            // Absolute-offset variant: never drifts past the amplitude
            assert!((p.position.x - origin_x).abs() <= amplitude + 1e-3);
        }
        // And it fell the whole time
        assert!(p.position.y > -300.0);
    }

    #[test]
    fn radial_step_is_ballistic() {
        let mut p = Particle {
            id: ParticleId::new(),
            position: Vec2::ZERO,
            motion: Motion::Radial {
                angle: 0.0,
                speed: 2.0,
            },
            visual_scale: 1.0,
            spawn_time: 0.0,
            color_index: 0,
        };
        p.step(0.01);
        p.step(0.02);
        assert!((p.position.x - 4.0).abs() < 1e-5);
        assert!(p.position.y.abs() < 1e-5);
    }
}
