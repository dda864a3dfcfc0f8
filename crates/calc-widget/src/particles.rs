//! Ambient particle background
//!
//! [`advance`] is the pure per-frame step. [`ParticleField`] spawns from a seeded RNG and owns
//! the bounds and the running flag. It is ticked by the host loop. Nothing
//! here reads calculator state; colour comes from the theme at render time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of particles
pub const DEFAULT_PARTICLE_COUNT: usize = 50;

/// A single drifting dot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Particle {
    /// Stable identity across frames
    pub id: u32,
    /// Horizontal position, `0 <= x < width`
    pub x: f64,
    /// Vertical position, `0 <= y < height`
    pub y: f64,
    /// Diameter, `1 <= size < 4`
    pub size: f64,
    /// Horizontal velocity per frame, `-1 <= speed_x < 1`
    pub speed_x: f64,
    /// Vertical velocity per frame, `-1 <= speed_y < 1`
    pub speed_y: f64,
    /// Alpha, `0.2 <= opacity < 0.7`
    pub opacity: f64,
}

impl Particle {
    /// Spawns a particle at a random position inside `bounds`
    pub fn random<R: Rng + ?Sized>(id: u32, bounds: Bounds, rng: &mut R) -> Self {
        Self {
            id,
            x: rng.gen::<f64>() * bounds.width,
            y: rng.gen::<f64>() * bounds.height,
            size: rng.gen::<f64>() * 3.0 + 1.0,
            speed_x: (rng.gen::<f64>() - 0.5) * 2.0,
            speed_y: (rng.gen::<f64>() - 0.5) * 2.0,
            opacity: rng.gen::<f64>() * 0.5 + 0.2,
        }
    }
}

/// Drawing area the particles wrap around
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Width, at least 1
    pub width: f64,
    /// Height, at least 1
    pub height: f64,
}

impl Bounds {
    /// Creates bounds, clamping each extent to at least 1
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let clamp = |v: f64| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
        Self {
            width: clamp(width),
            height: clamp(height),
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(80.0, 24.0)
    }
}

/// Wraps `v` into `[0, extent)`
fn wrap(v: f64, extent: f64) -> f64 {
    let wrapped = v.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Moves every particle one frame, wrapping at the edges
///
/// Only positions change; ids, sizes, speeds and opacity are carried over.
#[must_use]
pub fn advance(particles: &[Particle], bounds: Bounds) -> Vec<Particle> {
    particles
        .iter()
        .map(|p| Particle {
            x: wrap(p.x + p.speed_x, bounds.width),
            y: wrap(p.y + p.speed_y, bounds.height),
            ..*p
        })
        .collect()
}

/// Owns the particles and drives them frame by frame
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
    running: bool,
}

impl ParticleField {
    /// Spawns `count` particles inside `bounds` from a seeded RNG
    #[must_use]
    pub fn new(count: usize, bounds: Bounds, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..count)
            .map(|i| Particle::random(u32::try_from(i).unwrap_or(u32::MAX), bounds, &mut rng))
            .collect();
        debug!(count, seed, "particle field spawned");
        Self {
            particles,
            bounds,
            running: true,
        }
    }

    /// A field with no particles that never animates
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            particles: Vec::new(),
            bounds: Bounds::default(),
            running: false,
        }
    }

    /// Advances one frame; no-op once halted
    pub fn tick(&mut self) {
        if self.running {
            self.particles = advance(&self.particles, self.bounds);
        }
    }

    /// Changes the bounds and re-wraps every position into them
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        for p in &mut self.particles {
            p.x = wrap(p.x, bounds.width);
            p.y = wrap(p.y, bounds.height);
        }
    }

    /// Stops the animation loop (teardown)
    pub fn halt(&mut self) {
        if self.running {
            debug!("particle field halted");
        }
        self.running = false;
    }

    /// Returns true until [`halt`](Self::halt) is called
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current particles
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current bounds
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of particles
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True if there are no particles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Serializes the particles for a JS host
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.particles)
    }
}
