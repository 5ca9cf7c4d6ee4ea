//! Drifting particle field with pointer interaction and proximity links.
//!
//! The field owns a fixed-size particle collection and advances it once per
//! frame: integrate, pointer force, wrap-around, damping, minimum-speed
//! floor. Link geometry for the O(n²) proximity pass is computed here so the
//! render layer only draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::ParticleSettings;

/// Multiplicative velocity decay applied every tick.
const DAMPING: f32 = 0.99;
/// Speed below which a corrective impulse is injected.
const SPEED_FLOOR: f32 = 0.1;
/// Per-axis magnitude range of the corrective impulse.
const FLOOR_IMPULSE: f32 = 0.1;
/// Gain of the pointer force.
const POINTER_FORCE: f32 = 0.02;
/// Overall dimming applied to link alphas.
const LINK_DIM: f32 = 0.3;
/// Spawn opacity is uniform in [MIN_OPACITY, 1.0].
const MIN_OPACITY: f32 = 0.3;
/// The two hues particles draw from: golden yellow and violet.
const HUES: [f32; 2] = [50.0, 280.0];

/// One particle of the field. Plain state, mutated in place every tick.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub opacity: f32,
    pub hue: f32,
}

impl Particle {
    /// Spawns a particle with randomized position, velocity, size, opacity
    /// and hue, uniform over the given bounds.
    fn spawn(rng: &mut StdRng, width: f32, height: f32, settings: &ParticleSettings) -> Self {
        Self {
            x: rng.gen::<f32>() * width,
            y: rng.gen::<f32>() * height,
            vx: (rng.gen::<f32>() - 0.5) * settings.max_speed,
            vy: (rng.gen::<f32>() - 0.5) * settings.max_speed,
            size: settings.min_size + rng.gen::<f32>() * (settings.max_size - settings.min_size),
            opacity: MIN_OPACITY + rng.gen::<f32>() * (1.0 - MIN_OPACITY),
            hue: if rng.gen_bool(0.5) { HUES[0] } else { HUES[1] },
        }
    }

    /// Advances the particle by one tick.
    fn tick(
        &mut self,
        cursor: Option<(f32, f32)>,
        width: f32,
        height: f32,
        settings: &ParticleSettings,
        rng: &mut StdRng,
    ) {
        self.x += self.vx;
        self.y += self.vy;

        if let Some((cx, cy)) = cursor {
            let dx = cx - self.x;
            let dy = cy - self.y;
            let dist = (dx * dx + dy * dy).sqrt();

            // Skip the degenerate zero-distance case instead of producing NaN.
            if dist < settings.pointer_radius && dist > f32::EPSILON {
                let force = (settings.pointer_radius - dist) / settings.pointer_radius;
                self.vx -= dx / dist * force * POINTER_FORCE;
                self.vy -= dy / dist * force * POINTER_FORCE;
            }
        }

        // Wrap to the opposite edge, never clamp.
        if self.x < 0.0 {
            self.x = width;
        }
        if self.x > width {
            self.x = 0.0;
        }
        if self.y < 0.0 {
            self.y = height;
        }
        if self.y > height {
            self.y = 0.0;
        }

        self.vx *= DAMPING;
        self.vy *= DAMPING;

        // One corrective impulse the tick speed drops below the floor. The
        // new speed is intentionally not re-checked.
        let speed = (self.vx * self.vx + self.vy * self.vy).sqrt();
        if speed < SPEED_FLOOR {
            self.vx += (rng.gen::<f32>() - 0.5) * FLOOR_IMPULSE;
            self.vy += (rng.gen::<f32>() - 0.5) * FLOOR_IMPULSE;
        }
    }
}

/// A proximity link between two particles, ready to stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub ax: f32,
    pub ay: f32,
    pub bx: f32,
    pub by: f32,
    /// Stroke alpha in [0, 0.3], linear in distance
    pub alpha: f32,
}

/// The particle field: a fixed-cardinality collection plus cursor tracking.
#[derive(Debug)]
pub struct ParticleField {
    settings: ParticleSettings,
    particles: Vec<Particle>,
    cursor: Option<(f32, f32)>,
    width: f32,
    height: f32,
    rng: StdRng,
}

impl ParticleField {
    /// Creates a field with an entropy-seeded RNG.
    pub fn new(settings: ParticleSettings, width: f32, height: f32) -> Self {
        Self::with_rng(settings, width, height, StdRng::from_entropy())
    }

    /// Creates a field with an injected RNG so tests can pin the geometry.
    pub fn with_rng(settings: ParticleSettings, width: f32, height: f32, rng: StdRng) -> Self {
        let mut field = Self {
            settings,
            particles: Vec::new(),
            cursor: None,
            width,
            height,
            rng,
        };
        field.rebuild();
        field
    }

    fn rebuild(&mut self) {
        self.particles = (0..self.settings.count)
            .map(|_| Particle::spawn(&mut self.rng, self.width, self.height, &self.settings))
            .collect();
        debug!(
            count = self.particles.len(),
            width = self.width,
            height = self.height,
            "particle field rebuilt"
        );
    }

    /// Resizes the bounds and recreates the whole collection. No particle
    /// state survives a resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.rebuild();
    }

    /// Tracks the pointer in surface coordinates.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.cursor = Some((x, y));
    }

    /// Clears pointer tracking when the pointer leaves the surface.
    pub fn pointer_left(&mut self) {
        self.cursor = None;
    }

    /// Advances every particle by one tick.
    pub fn tick(&mut self) {
        let cursor = self.cursor;
        for particle in &mut self.particles {
            particle.tick(cursor, self.width, self.height, &self.settings, &mut self.rng);
        }
    }

    /// The live particles, for the render layer.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Every unordered pair closer than the connection distance. O(n²) over
    /// the particle count; n is tens, by design.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for i in 0..self.particles.len() {
            for j in i + 1..self.particles.len() {
                let a = &self.particles[i];
                let b = &self.particles[j];
                let dx = a.x - b.x;
                let dy = a.y - b.y;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < self.settings.connection_distance {
                    links.push(Link {
                        ax: a.x,
                        ay: a.y,
                        bx: b.x,
                        by: b.y,
                        alpha: (1.0 - dist / self.settings.connection_distance) * LINK_DIM,
                    });
                }
            }
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_field(count: usize, width: f32, height: f32) -> ParticleField {
        let settings = ParticleSettings {
            count,
            ..ParticleSettings::default()
        };
        ParticleField::with_rng(settings, width, height, StdRng::seed_from_u64(7))
    }

    fn still_particle(x: f32, y: f32) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            size: 2.0,
            opacity: 1.0,
            hue: 50.0,
        }
    }

    #[test]
    fn collection_size_matches_configured_count() {
        for count in [0, 1, 80] {
            let field = test_field(count, 640.0, 480.0);
            assert_eq!(field.particles().len(), count);
        }
    }

    #[test]
    fn resize_rebuilds_at_configured_count_within_new_bounds() {
        let mut field = test_field(40, 640.0, 480.0);
        field.resize(200.0, 100.0);

        assert_eq!(field.particles().len(), 40);
        for p in field.particles() {
            assert!(p.x >= 0.0 && p.x <= 200.0);
            assert!(p.y >= 0.0 && p.y <= 100.0);
        }
    }

    #[test]
    fn spawn_ranges_hold() {
        let field = test_field(80, 640.0, 480.0);
        for p in field.particles() {
            assert!(p.vx.abs() <= 0.25 && p.vy.abs() <= 0.25);
            assert!(p.size >= 1.0 && p.size <= 3.0);
            assert!(p.opacity >= 0.3 && p.opacity <= 1.0);
            assert!(p.hue == 50.0 || p.hue == 280.0);
        }
    }

    #[test]
    fn exiting_the_top_wraps_to_the_bottom_edge() {
        let mut field = test_field(1, 640.0, 480.0);
        field.particles[0] = Particle {
            vy: -1.0,
            ..still_particle(0.0, -1.0)
        };

        field.tick();

        let p = &field.particles()[0];
        assert_eq!(p.y, 480.0);
        assert_eq!(p.x, 0.0);
    }

    #[test]
    fn exiting_the_right_wraps_to_the_left_edge() {
        let mut field = test_field(1, 640.0, 480.0);
        field.particles[0] = Particle {
            vx: 2.0,
            ..still_particle(639.5, 100.0)
        };

        field.tick();

        assert_eq!(field.particles()[0].x, 0.0);
    }

    #[test]
    fn damping_decays_velocity() {
        let mut field = test_field(1, 640.0, 480.0);
        field.particles[0] = Particle {
            vx: 1.0,
            ..still_particle(100.0, 100.0)
        };

        field.tick();

        assert!((field.particles()[0].vx - 0.99).abs() < 1e-6);
    }

    #[test]
    fn stalled_particle_gets_an_impulse_the_same_tick() {
        let mut field = test_field(1, 640.0, 480.0);
        field.particles[0] = still_particle(100.0, 100.0);

        field.tick();

        let p = &field.particles()[0];
        let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
        assert!(speed > 0.0, "corrective impulse was not injected");
        assert!(speed <= FLOOR_IMPULSE, "impulse exceeds its per-axis bound");
    }

    #[test]
    fn pointer_force_pushes_particles_away() {
        let mut field = test_field(1, 640.0, 480.0);
        // Perpendicular drift keeps the speed above the floor so the
        // corrective impulse stays out of the picture.
        field.particles[0] = Particle {
            vy: 1.0,
            ..still_particle(100.0, 100.0)
        };
        field.pointer_moved(150.0, 101.0);

        field.tick();

        // After integration the particle sits at (100, 101), 50px left of
        // the pointer, radius 200: force = 0.75, so
        // vx = -(1.0 * 0.75 * 0.02) * 0.99 after damping.
        let p = &field.particles()[0];
        assert!((p.vx - (-0.015 * DAMPING)).abs() < 1e-6);
        assert!((p.vy - DAMPING).abs() < 1e-6);
    }

    #[test]
    fn pointer_outside_radius_has_no_effect() {
        let mut field = test_field(1, 640.0, 480.0);
        field.particles[0] = still_particle(100.0, 100.0);
        field.pointer_moved(350.0, 100.0);

        field.tick();

        // Only the speed-floor impulse applies, bounded well below the
        // pointer force would have been at that distance.
        let p = &field.particles()[0];
        assert!(p.vx.abs() <= FLOOR_IMPULSE / 2.0 + 1e-6);
    }

    #[test]
    fn pointer_left_clears_tracking() {
        let mut field = test_field(1, 640.0, 480.0);
        field.particles[0] = Particle {
            vx: 1.0,
            ..still_particle(100.0, 100.0)
        };
        field.pointer_moved(150.0, 100.0);
        field.pointer_left();

        field.tick();

        // Pure integrate + damp, no pointer term.
        assert!((field.particles()[0].vx - 0.99).abs() < 1e-6);
    }

    #[test]
    fn links_form_below_connection_distance_with_linear_alpha() {
        let mut field = test_field(3, 640.0, 480.0);
        field.particles[0] = still_particle(0.0, 0.0);
        field.particles[1] = still_particle(30.0, 0.0);
        field.particles[2] = still_particle(500.0, 400.0);

        let links = field.links();

        assert_eq!(links.len(), 1);
        let link = links[0];
        assert_eq!((link.ax, link.ay, link.bx, link.by), (0.0, 0.0, 30.0, 0.0));
        assert!((link.alpha - (1.0 - 30.0 / 150.0) * 0.3).abs() < 1e-6);
    }

    #[test]
    fn coincident_particles_link_at_full_strength() {
        let mut field = test_field(2, 640.0, 480.0);
        field.particles[0] = still_particle(10.0, 10.0);
        field.particles[1] = still_particle(10.0, 10.0);

        let links = field.links();
        assert_eq!(links.len(), 1);
        assert!((links[0].alpha - LINK_DIM).abs() < 1e-6);
    }
}
