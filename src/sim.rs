//! Simulation state and the per-frame driver
//!
//! Everything the game mutates lives in [`SimulationState`]; input handlers
//! and the frame loop reach it through `&mut` only.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::collision::{Hit, resolve_collisions};
use crate::entities::{ExplosionSet, FormationSet, Player, ProjectileSet, Starfield};
use crate::surface::{NullSurface, Surface};

/// Current drawable area in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "viewport must have area");
        Self { width, height }
    }
}

pub struct SimulationState {
    pub viewport: Viewport,
    pub starfield: Starfield,
    pub player: Player,
    pub projectiles: ProjectileSet,
    pub formations: FormationSet,
    pub explosions: ExplosionSet,
    pub frame_count: u64,
    rng: Pcg32,
}

impl SimulationState {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let viewport = Viewport::new(width, height);
        let mut rng = Pcg32::seed_from_u64(seed);
        log::info!("simulation started at {width}x{height} with seed {seed}");

        Self {
            starfield: Starfield::new(&viewport, &mut rng),
            player: Player::new(&viewport),
            projectiles: ProjectileSet::new(),
            formations: FormationSet::new(),
            explosions: ExplosionSet::new(),
            frame_count: 0,
            viewport,
            rng,
        }
    }

    /// New viewport size: keep the ship on its row and re-scatter the stars
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.player.on_resize(&self.viewport);
        self.starfield.reseed(&self.viewport, &mut self.rng);
        log::info!("viewport resized to {width}x{height}");
    }

    pub fn pointer_moved(&mut self, x: f32) {
        self.player.follow_pointer(x);
    }

    /// Run one frame, drawing each layer right after it updates. The order
    /// matters: collisions see this frame's bullet and enemy positions, and
    /// the ship is painted over everything.
    pub fn frame(&mut self, surface: &mut impl Surface) -> Vec<Hit> {
        surface.clear();

        self.starfield.update(&self.viewport, &mut self.rng);
        self.starfield.draw(surface);

        self.projectiles.tick_spawn(&self.player);
        self.projectiles.update(&self.viewport);
        self.projectiles.draw(surface);

        self.formations.tick_spawn(&mut self.rng, &self.viewport);
        self.formations.update(&self.viewport);
        self.formations.draw(surface);

        self.explosions.update(&mut self.rng);
        self.explosions.draw(surface);

        let hits = resolve_collisions(
            &mut self.formations,
            &mut self.projectiles,
            &mut self.explosions,
            &mut self.rng,
        );

        self.player.draw(surface);
        self.frame_count += 1;
        hits
    }

    /// Run one frame without drawing
    pub fn step(&mut self) -> Vec<Hit> {
        self.frame(&mut NullSurface)
    }
}
