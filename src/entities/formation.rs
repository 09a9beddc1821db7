use rand::Rng;
use std::f32::consts::TAU;

use crate::consts::{
    ENEMY_BASE_SPEED, ENEMY_MAX_ANGULAR_SPEED, ENEMY_MAX_RADIUS, ENEMY_MIN_ANGULAR_SPEED,
    ENEMY_MIN_RADIUS, ENEMY_SPAWN_INTERVAL, ENEMY_SPEED_MAX_SCALE, ENEMY_SPEED_MIN_SCALE,
    FOLLOW_SPACING, FOLLOWER_COUNT, SIDE_ENTRY_PADDING, TOP_ENTRY_PADDING,
};
use crate::entities::{Enemy, EntryMode};
use crate::sim::Viewport;
use crate::surface::{Color, Glyph, Paint, Sprite, Surface};

/// Randomized curve parameters for one formation's leader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryParams {
    pub mode: EntryMode,
    pub radius: f32,
    pub start_angle: f32,
    pub speed: f32,
    pub angular_speed: f32,
}

impl EntryParams {
    /// Half of all formations fall from the top, a quarter enter from each side
    pub fn roll(rng: &mut impl Rng, viewport: &Viewport) -> Self {
        let pick: f32 = rng.random();
        let mode = if pick < 0.5 {
            let span = (viewport.width - 2.0 * TOP_ENTRY_PADDING).max(0.0);
            EntryMode::Top {
                cx: rng.random::<f32>() * span + TOP_ENTRY_PADDING,
            }
        } else {
            let span = (viewport.height - 2.0 * SIDE_ENTRY_PADDING).max(0.0);
            let cy = rng.random::<f32>() * span + SIDE_ENTRY_PADDING;
            if pick < 0.75 {
                EntryMode::Left { cy }
            } else {
                EntryMode::Right { cy }
            }
        };

        Self {
            mode,
            radius: rng.random_range(ENEMY_MIN_RADIUS..ENEMY_MAX_RADIUS),
            start_angle: rng.random::<f32>() * TAU,
            speed: ENEMY_BASE_SPEED * rng.random_range(ENEMY_SPEED_MIN_SCALE..ENEMY_SPEED_MAX_SCALE),
            angular_speed: rng.random_range(ENEMY_MIN_ANGULAR_SPEED..ENEMY_MAX_ANGULAR_SPEED),
        }
    }
}

/// One leader followed by a snake of followers replaying its trail
#[derive(Debug, Clone, PartialEq)]
pub struct Formation {
    /// Index 0 is the leader
    pub enemies: Vec<Enemy>,
}

impl Formation {
    pub fn spawn(params: &EntryParams, viewport: &Viewport) -> Self {
        let leader = Enemy::leader(params, viewport);
        let mut enemies = Vec::with_capacity(FOLLOWER_COUNT + 1);
        enemies.extend((1..=FOLLOWER_COUNT).map(|i| leader.follower(i * FOLLOW_SPACING)));
        enemies.insert(0, leader);
        Self { enemies }
    }

    pub fn leader(&self) -> Option<&Enemy> {
        self.enemies.first()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Leader moves along its curve, then every follower samples the trail
    pub fn update(&mut self) {
        let Some((leader, followers)) = self.enemies.split_first_mut() else {
            return;
        };
        leader.advance_leader();
        for follower in followers {
            follower.follow(&leader.trail);
        }
    }

    /// Whether the leader has left through the far edge
    pub fn has_exited(&self, viewport: &Viewport) -> bool {
        self.leader().is_some_and(|leader| leader.has_exited(viewport))
    }

    /// Drop the enemy at `index`, handing the lead to the next in line
    pub fn remove(&mut self, index: usize) -> Enemy {
        let removed = self.enemies.remove(index);
        if index == 0
            && let Some(next) = self.enemies.first_mut()
        {
            next.promote();
        }
        removed
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        let tail = (FOLLOWER_COUNT * FOLLOW_SPACING).max(1) as f32;
        for enemy in &self.enemies {
            let t = enemy.follow_index().unwrap_or(0) as f32 / tail;
            let (x, y) = enemy.center();
            surface.fill_glyph(&Glyph {
                sprite: Sprite::Bug,
                x,
                y,
                rotation: enemy.facing(),
                size: enemy.width,
                paint: Paint::solid(Color::ENEMY_BLUE.lerp(Color::ENEMY_YELLOW, t)),
            });
        }
    }
}

/// Active formations plus the spawn cadence
#[derive(Debug, Clone, Default)]
pub struct FormationSet {
    pub formations: Vec<Formation>,
    pub timer: u32,
}

impl FormationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the spawn timer and launch a formation once it runs past the
    /// interval. Returns whether one was spawned.
    pub fn tick_spawn(&mut self, rng: &mut impl Rng, viewport: &Viewport) -> bool {
        self.timer += 1;
        if self.timer <= ENEMY_SPAWN_INTERVAL {
            return false;
        }
        self.timer = 0;

        let params = EntryParams::roll(rng, viewport);
        log::debug!("spawning formation {:?}", params.mode);
        self.formations.push(Formation::spawn(&params, viewport));
        true
    }

    pub fn update(&mut self, viewport: &Viewport) {
        for formation in &mut self.formations {
            formation.update();
        }
        self.formations.retain(|f| {
            let exited = f.has_exited(viewport);
            if exited {
                log::debug!("formation left the screen with {} enemies", f.len());
            }
            !exited
        });
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for formation in &self.formations {
            formation.draw(surface);
        }
    }

    pub fn len(&self) -> usize {
        self.formations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formations.is_empty()
    }

    pub fn enemy_count(&self) -> usize {
        self.formations.iter().map(Formation::len).sum()
    }
}
