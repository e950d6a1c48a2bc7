//! Engine configuration (parsed from TOML)

use festoon_core::{FestoonError, Result};

/// Batch size bounds for one burst
const BURST_COUNT_MIN: usize = 30;
const BURST_COUNT_MAX: usize = 60;

/// Upper bound on extra bursts scheduled per `start`
const SEQUENCE_LEN_MAX: u32 = 40;

/// How a burst's particles move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    /// Spawn along the top edge, fall at a per-particle speed while the
    /// horizontal offset oscillates as an absolute sine of age
    /// (bounded oscillation, not accumulated drift).
    FallingWave,
    /// Spawn anywhere in the viewport, move ballistically along a fixed
    /// random angle at a fixed speed.
    Radial,
}

/// How `visual_scale` behaves late in a particle's life.
///
/// Exactly one policy is active per field configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalePolicy {
    /// Scale ramps linearly 1.0 → 1.5 while `start <= age < end`; a
    /// particle whose age reaches `end` is expired. This is the
    /// terminal-window variant: fields always drain by age even when
    /// bounds would never be crossed.
    RampWindow { start: f64, end: f64 },
    /// For `age >= onset`, scale oscillates as
    /// `1.0 + depth * sin((age - onset) * rate)`. No age expiry;
    /// particles leave by bounds exit only.
    Oscillate { onset: f64, rate: f64, depth: f32 },
}

impl ScalePolicy {
    /// Visual scale for a particle of the given age.
    pub fn scale_at(&self, age: f64) -> f32 {
        match *self {
            ScalePolicy::RampWindow { start, end } => {
                if age >= start && age < end && end > start {
                    let t = ((age - start) / (end - start)) as f32;
                    1.0 + 0.5 * t
                } else {
                    1.0
                }
            }
            ScalePolicy::Oscillate { onset, rate, depth } => {
                if age >= onset {
                    1.0 + depth * (((age - onset) * rate).sin() as f32)
                } else {
                    1.0
                }
            }
        }
    }

    /// True if the policy marks a particle of this age as expired.
    pub fn expired(&self, age: f64) -> bool {
        match *self {
            ScalePolicy::RampWindow { end, .. } => age >= end,
            ScalePolicy::Oscillate { .. } => false,
        }
    }
}

/// Configuration for the bursts a field spawns
#[derive(Debug, Clone)]
pub struct BurstConfig {
    pub kind: BurstKind,
    /// Particles added per burst, clamped to [30, 60]
    pub particles_per_burst: usize,
    /// Extra bursts scheduled after the immediate one, clamped to [0, 40]
    pub sequence_len: u32,
    /// Delay step between scheduled bursts, in seconds
    pub sequence_spacing: f64,
    pub amplitude_min: f32,
    pub amplitude_max: f32,
    /// Lateral oscillation frequency range, rad/s
    pub frequency_min: f32,
    pub frequency_max: f32,
    /// Fall speed range for the falling-wave kind, units/tick
    pub fall_speed_min: f32,
    pub fall_speed_max: f32,
    /// Ballistic speed range for the radial kind, units/tick
    pub speed_min: f32,
    pub speed_max: f32,
    pub scale_policy: ScalePolicy,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            kind: BurstKind::FallingWave,
            particles_per_burst: 40,
            sequence_len: 4,
            sequence_spacing: 0.1,
            amplitude_min: 20.0,
            amplitude_max: 50.0,
            frequency_min: 3.0,
            frequency_max: 6.0,
            fall_speed_min: 1.5,
            fall_speed_max: 3.0,
            speed_min: 1.0,
            speed_max: 4.0,
            scale_policy: ScalePolicy::RampWindow {
                start: 4.0,
                end: 4.5,
            },
        }
    }
}

impl BurstConfig {
    /// Parse a BurstConfig from a TOML table, defaulting missing keys
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();

        if let Some(v) = table.get("kind") {
            config.kind = match v.as_str().unwrap_or("falling_wave") {
                "radial" => BurstKind::Radial,
                _ => BurstKind::FallingWave,
            };
        }
        if let Some(v) = table.get("particles_per_burst") {
            let n = v.as_integer().unwrap_or(40) as usize;
            config.particles_per_burst = n.clamp(BURST_COUNT_MIN, BURST_COUNT_MAX);
        }
        if let Some(v) = table.get("sequence_len") {
            let n = v.as_integer().unwrap_or(4).max(0) as u32;
            config.sequence_len = n.min(SEQUENCE_LEN_MAX);
        }
        if let Some(v) = table.get("sequence_spacing") {
            config.sequence_spacing = toml_f64(v, config.sequence_spacing).max(0.0);
        }
        if let Some(v) = table.get("amplitude_min") {
            config.amplitude_min = toml_f32(v, config.amplitude_min);
        }
        if let Some(v) = table.get("amplitude_max") {
            config.amplitude_max = toml_f32(v, config.amplitude_max);
        }
        if let Some(v) = table.get("frequency_min") {
            config.frequency_min = toml_f32(v, config.frequency_min);
        }
        if let Some(v) = table.get("frequency_max") {
            config.frequency_max = toml_f32(v, config.frequency_max);
        }
        if let Some(v) = table.get("fall_speed_min") {
            config.fall_speed_min = toml_f32(v, config.fall_speed_min);
        }
        if let Some(v) = table.get("fall_speed_max") {
            config.fall_speed_max = toml_f32(v, config.fall_speed_max);
        }
        if let Some(v) = table.get("speed_min") {
            config.speed_min = toml_f32(v, config.speed_min);
        }
        if let Some(v) = table.get("speed_max") {
            config.speed_max = toml_f32(v, config.speed_max);
        }

        // Scale policy
        let policy_str = table
            .get("scale_policy")
            .and_then(|v| v.as_str())
            .unwrap_or("ramp_window");
        let onset = table
            .get("scale_onset")
            .map(|v| toml_f64(v, 4.0))
            .unwrap_or(4.0);
        config.scale_policy = match policy_str {
            "oscillate" => {
                let rate = table
                    .get("scale_rate")
                    .map(|v| toml_f64(v, 4.0))
                    .unwrap_or(4.0);
                let depth = table
                    .get("scale_depth")
                    .map(|v| toml_f32(v, 0.5))
                    .unwrap_or(0.5);
                ScalePolicy::Oscillate { onset, rate, depth }
            }
            _ => {
                let window = table
                    .get("scale_window")
                    .map(|v| toml_f64(v, 0.5))
                    .unwrap_or(0.5)
                    .max(0.0);
                ScalePolicy::RampWindow {
                    start: onset,
                    end: onset + window,
                }
            }
        };

        config
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub burst: BurstConfig,
    /// Counter increment interval, in seconds
    pub counter_interval: f64,
    /// Shared animation-frame interval, in seconds
    pub frame_interval: f64,
    /// Seed for the particle RNG
    pub rng_seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            burst: BurstConfig::default(),
            counter_interval: 1.0,
            frame_interval: 0.01,
            rng_seed: 0xDEAD_BEEF,
        }
    }
}

impl EngineConfig {
    /// Parse an EngineConfig from a TOML table
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();

        if let Some(burst) = table.get("burst").and_then(|v| v.as_table()) {
            config.burst = BurstConfig::from_toml(burst);
        }
        if let Some(v) = table.get("counter_interval") {
            config.counter_interval = toml_f64(v, config.counter_interval).max(0.001);
        }
        if let Some(v) = table.get("frame_interval") {
            config.frame_interval = toml_f64(v, config.frame_interval).max(0.001);
        }
        if let Some(v) = table.get("rng_seed") {
            config.rng_seed = v.as_integer().unwrap_or(0xDEAD_BEEF) as u32;
        }

        config
    }

    /// Parse an EngineConfig from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(text).map_err(FestoonError::from)?;
        Ok(Self::from_toml(&table))
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_f64(v: &toml::Value, default: f64) -> f64 {
    v.as_float()
        .or_else(|| v.as_integer().map(|i| i as f64))
        .unwrap_or(default)
}
