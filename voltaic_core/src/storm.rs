//! Procedural lightning: jagged-path synthesis, branch bolts, per-frame
//! fading and a jittered spawn scheduler.
//!
//! The engine owns the live bolt collection. Ambient bolts come from the
//! scheduler; `create_bolt` is the external trigger (the desktop wires it to
//! mouse clicks). Fading is per draw step, not per elapsed second, so a bolt
//! lives ~20 frames regardless of frame rate.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::LightningSettings;

/// Opacity lost per fade step.
const FADE_RATE: f32 = 0.05;
/// Main bolt geometry.
const MAIN_SEGMENTS: usize = 12;
const MAIN_SPREAD: f32 = 80.0;
const MAIN_WIDTH: f32 = 2.0;
/// Branch bolt geometry.
const BRANCH_SEGMENTS: usize = 6;
const BRANCH_SPREAD: f32 = 30.0;
const BRANCH_WIDTH: f32 = 1.0;
/// Branch endpoints land within ±BRANCH_SPAN/2 horizontally and
/// [0, BRANCH_DROP) below their root, so branches grow downward.
const BRANCH_SPAN: f32 = 200.0;
const BRANCH_DROP: f32 = 150.0;
/// Fraction of a main path eligible to root a branch.
const BRANCH_ROOT_SPAN: f32 = 0.7;

/// A vertex of a bolt path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltPoint {
    pub x: f32,
    pub y: f32,
}

/// Geometry parameters for one bolt.
#[derive(Debug, Clone, Copy)]
pub struct BoltOptions {
    /// The path has `segments + 1` points
    pub segments: usize,
    /// Interior points are perturbed by ±spread/2 on both axes
    pub spread: f32,
    pub width: f32,
}

impl BoltOptions {
    /// Geometry of an ambient or triggered main bolt.
    pub fn main() -> Self {
        Self {
            segments: MAIN_SEGMENTS,
            spread: MAIN_SPREAD,
            width: MAIN_WIDTH,
        }
    }

    /// Geometry of a branch bolt.
    pub fn branch() -> Self {
        Self {
            segments: BRANCH_SEGMENTS,
            spread: BRANCH_SPREAD,
            width: BRANCH_WIDTH,
        }
    }
}

/// One jagged-path bolt. The path is fixed at construction; only opacity
/// changes afterwards.
#[derive(Debug, Clone)]
pub struct LightningBolt {
    points: Vec<BoltPoint>,
    opacity: f32,
    width: f32,
}

impl LightningBolt {
    /// Builds a bolt by linear interpolation from start to end, perturbing
    /// every interior point. Endpoints are never perturbed.
    pub fn new(start: BoltPoint, end: BoltPoint, options: BoltOptions, rng: &mut StdRng) -> Self {
        let mut points = Vec::with_capacity(options.segments + 1);
        points.push(start);

        let dx = end.x - start.x;
        let dy = end.y - start.y;
        for i in 1..options.segments {
            let t = i as f32 / options.segments as f32;
            points.push(BoltPoint {
                x: start.x + dx * t + (rng.gen::<f32>() - 0.5) * options.spread,
                y: start.y + dy * t + (rng.gen::<f32>() - 0.5) * options.spread,
            });
        }
        points.push(end);

        Self {
            points,
            opacity: 1.0,
            width: options.width,
        }
    }

    /// One fade step. Reports whether the bolt is still visible; an already
    /// invisible bolt reports false without side effects and must never be
    /// drawn again.
    pub fn step_fade(&mut self) -> bool {
        if self.opacity <= 0.0 {
            return false;
        }
        self.opacity -= FADE_RATE;
        self.opacity > 0.0
    }

    pub fn points(&self) -> &[BoltPoint] {
        &self.points
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

/// Countdown controller for ambient bolt spawns.
///
/// Replaces a self-re-arming timer with explicit state: the frame loop feeds
/// elapsed time into `advance`, and a `running` flag gates re-arming so the
/// storm has a real stop/start lifecycle.
#[derive(Debug)]
pub struct BoltScheduler {
    interval: Duration,
    remaining: Duration,
    running: bool,
}

impl BoltScheduler {
    /// Creates the scheduler, armed with a jittered delay when enabled.
    pub fn new(interval: Duration, enabled: bool, rng: &mut StdRng) -> Self {
        let mut scheduler = Self {
            interval,
            remaining: Duration::ZERO,
            running: enabled,
        };
        if enabled {
            scheduler.rearm(rng);
        }
        scheduler
    }

    /// Picks the next delay uniformly in [interval/2, 3·interval/2].
    fn rearm(&mut self, rng: &mut StdRng) {
        self.remaining = self.interval.mul_f32(0.5 + rng.gen::<f32>());
    }

    /// Counts down by `dt`. Returns true when a bolt should fire, re-arming
    /// for the next one.
    pub fn advance(&mut self, dt: Duration, rng: &mut StdRng) -> bool {
        if !self.running {
            return false;
        }
        if dt < self.remaining {
            self.remaining -= dt;
            return false;
        }
        self.rearm(rng);
        true
    }

    /// Halts further firing until `start`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Resumes with a fresh jittered delay.
    pub fn start(&mut self, rng: &mut StdRng) {
        if !self.running {
            self.running = true;
            self.rearm(rng);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// The lightning engine: live bolts, surface bounds, scheduler and RNG.
#[derive(Debug)]
pub struct LightningEngine {
    settings: LightningSettings,
    bolts: Vec<LightningBolt>,
    width: f32,
    height: f32,
    scheduler: BoltScheduler,
    rng: StdRng,
}

impl LightningEngine {
    /// Creates an engine with an entropy-seeded RNG.
    pub fn new(settings: LightningSettings, width: f32, height: f32) -> Self {
        Self::with_rng(settings, width, height, StdRng::from_entropy())
    }

    /// Creates an engine with an injected RNG so tests can pin the geometry.
    pub fn with_rng(settings: LightningSettings, width: f32, height: f32, mut rng: StdRng) -> Self {
        let scheduler = BoltScheduler::new(
            Duration::from_millis(settings.interval_ms),
            settings.enabled,
            &mut rng,
        );
        Self {
            settings,
            bolts: Vec::new(),
            width,
            height,
            scheduler,
            rng,
        }
    }

    /// The external trigger: one main bolt from start to end, plus the
    /// configured number of branches.
    pub fn create_bolt(&mut self, start_x: f32, start_y: f32, end_x: f32, end_y: f32) {
        self.create_bolt_with(
            BoltPoint { x: start_x, y: start_y },
            BoltPoint { x: end_x, y: end_y },
            BoltOptions::main(),
            self.settings.branches,
        );
    }

    /// Builds one main bolt with explicit geometry, then up to `branches`
    /// branch bolts rooted on its interior points. A root index past the end
    /// of the path skips that branch rather than failing.
    pub fn create_bolt_with(
        &mut self,
        start: BoltPoint,
        end: BoltPoint,
        options: BoltOptions,
        branches: usize,
    ) {
        let main = LightningBolt::new(start, end, options, &mut self.rng);

        let mut spawned = Vec::new();
        for _ in 0..branches {
            // Root somewhere in the first ~70% of the path, never on the
            // first two points.
            let index = (self.rng.gen::<f32>() * main.points.len() as f32 * BRANCH_ROOT_SPAN)
                as usize
                + 2;
            let Some(root) = main.points.get(index).copied() else {
                continue;
            };
            let branch_end = BoltPoint {
                x: root.x + (self.rng.gen::<f32>() - 0.5) * BRANCH_SPAN,
                y: root.y + self.rng.gen::<f32>() * BRANCH_DROP,
            };
            spawned.push(LightningBolt::new(
                root,
                branch_end,
                BoltOptions::branch(),
                &mut self.rng,
            ));
        }

        self.bolts.push(main);
        self.bolts.extend(spawned);
        debug!(live = self.bolts.len(), "bolt created");
    }

    /// Synthesizes an ambient bolt from one of four origin regions: the top
    /// edge, the right edge, the left edge, or a top corner aimed at the
    /// screen center.
    pub fn create_random_bolt(&mut self) {
        let (width, height) = (self.width, self.height);
        let (start_x, start_y, end_x, end_y) = match self.rng.gen_range(0u8..4) {
            0 => {
                let start_x = self.rng.gen::<f32>() * width;
                (
                    start_x,
                    0.0,
                    start_x + (self.rng.gen::<f32>() - 0.5) * 400.0,
                    height * (0.3 + self.rng.gen::<f32>() * 0.5),
                )
            }
            1 => {
                let start_y = self.rng.gen::<f32>() * height * 0.5;
                (
                    width,
                    start_y,
                    width * (0.5 + self.rng.gen::<f32>() * 0.3),
                    start_y + self.rng.gen::<f32>() * 300.0,
                )
            }
            2 => {
                let start_y = self.rng.gen::<f32>() * height * 0.5;
                (
                    0.0,
                    start_y,
                    width * (0.2 + self.rng.gen::<f32>() * 0.3),
                    start_y + self.rng.gen::<f32>() * 300.0,
                )
            }
            _ => (
                if self.rng.gen_bool(0.5) { 0.0 } else { width },
                0.0,
                width / 2.0 + (self.rng.gen::<f32>() - 0.5) * 200.0,
                height / 2.0 + (self.rng.gen::<f32>() - 0.5) * 200.0,
            ),
        };
        self.create_bolt(start_x, start_y, end_x, end_y);
    }

    /// One frame: advance the scheduler by `dt`, spawn if it fired, then
    /// fade every live bolt and discard the ones that went invisible.
    pub fn tick(&mut self, dt: Duration) {
        if self.scheduler.advance(dt, &mut self.rng) {
            self.create_random_bolt();
        }
        self.bolts.retain_mut(|bolt| bolt.step_fade());
    }

    /// Updates the bounds ambient bolts spawn within.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Halts ambient spawning. Triggered bolts still work.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        debug!("lightning scheduler stopped");
    }

    /// Resumes ambient spawning.
    pub fn start(&mut self) {
        self.scheduler.start(&mut self.rng);
        debug!("lightning scheduler started");
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// The live bolts, for the render layer.
    pub fn bolts(&self) -> &[LightningBolt] {
        &self.bolts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn quiet_engine(branches: usize) -> LightningEngine {
        let settings = LightningSettings {
            enabled: false,
            branches,
            ..LightningSettings::default()
        };
        LightningEngine::with_rng(settings, 800.0, 600.0, seeded_rng())
    }

    #[test]
    fn zero_spread_path_is_the_exact_linear_interpolation() {
        let mut engine = quiet_engine(0);
        engine.create_bolt_with(
            BoltPoint { x: 0.0, y: 0.0 },
            BoltPoint { x: 100.0, y: 0.0 },
            BoltOptions { segments: 4, spread: 0.0, width: 2.0 },
            0,
        );

        assert_eq!(engine.bolts().len(), 1);
        let points = engine.bolts()[0].points();
        assert_eq!(points.len(), 5);
        let xs: Vec<f32> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert!(points.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn endpoints_are_never_perturbed() {
        let start = BoltPoint { x: 10.0, y: 20.0 };
        let end = BoltPoint { x: 300.0, y: 500.0 };
        let bolt = LightningBolt::new(start, end, BoltOptions::main(), &mut seeded_rng());

        assert_eq!(bolt.points().len(), MAIN_SEGMENTS + 1);
        assert_eq!(bolt.points()[0], start);
        assert_eq!(*bolt.points().last().unwrap(), end);
    }

    #[test]
    fn fade_is_visible_for_exactly_nineteen_steps() {
        let mut bolt = LightningBolt::new(
            BoltPoint { x: 0.0, y: 0.0 },
            BoltPoint { x: 10.0, y: 10.0 },
            BoltOptions { segments: 2, spread: 0.0, width: 1.0 },
            &mut seeded_rng(),
        );

        for step in 1..=19 {
            assert!(bolt.step_fade(), "expected visibility at step {step}");
        }
        assert!(!bolt.step_fade(), "expected invisibility at step 20");
        // Already-invisible bolts keep reporting invisible, no side effects.
        let opacity = bolt.opacity();
        assert!(!bolt.step_fade());
        assert_eq!(bolt.opacity(), opacity);
    }

    #[test]
    fn opacity_strictly_decreases_until_removal() {
        let mut engine = quiet_engine(0);
        engine.create_bolt(0.0, 0.0, 200.0, 200.0);

        let mut last = engine.bolts()[0].opacity();
        let mut ticks = 0;
        while !engine.bolts().is_empty() {
            engine.tick(Duration::from_millis(16));
            if let Some(bolt) = engine.bolts().first() {
                assert!(bolt.opacity() < last);
                last = bolt.opacity();
            }
            ticks += 1;
            assert!(ticks <= 20, "bolt outlived its fade window");
        }
        assert_eq!(ticks, 20);
    }

    #[test]
    fn branch_roots_are_points_of_the_parent_path() {
        let mut engine = quiet_engine(3);
        engine.create_bolt(100.0, 0.0, 400.0, 500.0);

        let bolts = engine.bolts();
        // 12 main segments give 13 points, so every root index in
        // [2, 0.7 * 13 + 2) is in range and all three branches spawn.
        assert_eq!(bolts.len(), 4);
        let main_points = bolts[0].points().to_vec();
        for branch in &bolts[1..] {
            let root = branch.points()[0];
            assert!(
                main_points.contains(&root),
                "branch root {root:?} not on the main path"
            );
            assert!(branch.points().len() == BRANCH_SEGMENTS + 1);
        }
    }

    #[test]
    fn branch_endpoints_are_biased_downward() {
        let mut engine = quiet_engine(3);
        engine.create_bolt(100.0, 0.0, 400.0, 500.0);

        let bolts = engine.bolts();
        for branch in &bolts[1..] {
            let root = branch.points()[0];
            let end = *branch.points().last().unwrap();
            assert!(end.y >= root.y, "branch should extend downward");
            assert!((end.x - root.x).abs() <= BRANCH_SPAN / 2.0);
        }
    }

    #[test]
    fn short_main_path_skips_unrootable_branches() {
        let mut engine = quiet_engine(0);
        // A one-segment main has only 2 points; every root index (≥ 2) is
        // out of range, so both branch attempts are skipped.
        engine.create_bolt_with(
            BoltPoint { x: 0.0, y: 0.0 },
            BoltPoint { x: 50.0, y: 50.0 },
            BoltOptions { segments: 1, spread: 0.0, width: 2.0 },
            2,
        );

        assert_eq!(engine.bolts().len(), 1);
    }

    #[test]
    fn branch_count_appends_main_plus_branches() {
        let mut engine = quiet_engine(0);
        engine.create_bolt_with(
            BoltPoint { x: 0.0, y: 0.0 },
            BoltPoint { x: 300.0, y: 300.0 },
            BoltOptions::main(),
            2,
        );

        assert_eq!(engine.bolts().len(), 3);
    }

    #[test]
    fn random_bolts_start_on_an_edge_and_stay_finite() {
        let mut engine = quiet_engine(3);
        for _ in 0..50 {
            engine.create_random_bolt();
        }

        assert!(!engine.bolts().is_empty());
        for bolt in engine.bolts() {
            for point in bolt.points() {
                assert!(point.x.is_finite() && point.y.is_finite());
            }
        }
        // Ambient mains always originate on the top, left or right edge.
        // Mains are every bolt whose width matches the main geometry.
        for bolt in engine.bolts().iter().filter(|b| b.width() == MAIN_WIDTH) {
            let start = bolt.points()[0];
            assert!(
                start.x == 0.0 || start.x == 800.0 || start.y == 0.0,
                "ambient bolt started off-edge at {start:?}"
            );
        }
    }

    #[test]
    fn scheduler_delay_is_jittered_around_the_interval() {
        let mut rng = seeded_rng();
        for _ in 0..20 {
            let scheduler = BoltScheduler::new(Duration::from_millis(4000), true, &mut rng);
            assert!(scheduler.remaining >= Duration::from_millis(2000));
            assert!(scheduler.remaining <= Duration::from_millis(6000));
        }
    }

    #[test]
    fn scheduler_fires_then_rearms() {
        let mut rng = seeded_rng();
        let mut scheduler = BoltScheduler::new(Duration::from_millis(4000), true, &mut rng);

        assert!(!scheduler.advance(Duration::from_millis(1), &mut rng));
        assert!(scheduler.advance(Duration::from_millis(6000), &mut rng));
        assert!(scheduler.remaining >= Duration::from_millis(2000));
        assert!(!scheduler.advance(Duration::from_millis(1), &mut rng));
    }

    #[test]
    fn stopped_scheduler_never_fires() {
        let mut rng = seeded_rng();
        let mut scheduler = BoltScheduler::new(Duration::from_millis(100), true, &mut rng);
        scheduler.stop();

        assert!(!scheduler.advance(Duration::from_secs(3600), &mut rng));
        assert!(!scheduler.is_running());

        scheduler.start(&mut rng);
        assert!(scheduler.is_running());
        assert!(scheduler.advance(Duration::from_secs(3600), &mut rng));
    }

    #[test]
    fn disabled_engine_spawns_nothing_on_its_own() {
        let mut engine = quiet_engine(3);
        for _ in 0..100 {
            engine.tick(Duration::from_secs(60));
        }
        assert!(engine.bolts().is_empty());
    }

    #[test]
    fn enabled_engine_spawns_ambient_bolts() {
        let settings = LightningSettings::default();
        let mut engine = LightningEngine::with_rng(settings, 800.0, 600.0, seeded_rng());

        // Each tick advances a full jitter window, so the first tick fires.
        engine.tick(Duration::from_millis(6000));
        assert!(!engine.bolts().is_empty());

        engine.stop();
        engine.bolts.clear();
        for _ in 0..10 {
            engine.tick(Duration::from_millis(6000));
        }
        assert!(engine.bolts().is_empty());
    }
}
