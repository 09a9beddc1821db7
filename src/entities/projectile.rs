use crate::consts::{
    BULLET_HEIGHT, BULLET_INTERVAL, BULLET_SIDE_MARGIN, BULLET_SPEED, BULLET_SPREAD_DEG,
    BULLET_WIDTH,
};
use crate::entities::Player;
use crate::sim::Viewport;
use crate::surface::{Color, Paint, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

impl Projectile {
    /// Straight-up bullet
    pub fn new(x: f32, y: f32) -> Self {
        Self::with_velocity(x, y, 0.0, -BULLET_SPEED)
    }

    pub fn with_velocity(x: f32, y: f32, velocity_x: f32, velocity_y: f32) -> Self {
        Self {
            x,
            y,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            velocity_x,
            velocity_y,
        }
    }

    /// Bullet launched `degrees` off vertical (positive leans right)
    pub fn at_angle(x: f32, y: f32, degrees: f32) -> Self {
        let rad = degrees.to_radians();
        Self::with_velocity(x, y, rad.sin() * BULLET_SPEED, -rad.cos() * BULLET_SPEED)
    }

    pub fn update(&mut self) {
        self.x += self.velocity_x;
        self.y += self.velocity_y;
    }

    /// Gone above the top edge, or past either side by more than the margin
    pub fn is_out_of_bounds(&self, viewport: &Viewport) -> bool {
        self.y + self.height < 0.0
            || self.x < -BULLET_SIDE_MARGIN
            || self.x > viewport.width + BULLET_SIDE_MARGIN
    }
}

/// Player bullets plus the auto-fire cadence
#[derive(Debug, Clone, Default)]
pub struct ProjectileSet {
    pub projectiles: Vec<Projectile>,
    pub timer: u32,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the fire timer and emit a spread volley when it comes due.
    /// Returns the number of bullets spawned.
    pub fn tick_spawn(&mut self, player: &Player) -> usize {
        self.timer += 1;
        if self.timer < BULLET_INTERVAL {
            return 0;
        }
        self.timer = 0;

        let x = player.center_x() - BULLET_WIDTH / 2.0;
        let y = player.y;
        self.projectiles.extend(
            BULLET_SPREAD_DEG
                .iter()
                .map(|&deg| Projectile::at_angle(x, y, deg)),
        );
        BULLET_SPREAD_DEG.len()
    }

    pub fn update(&mut self, viewport: &Viewport) {
        for projectile in &mut self.projectiles {
            projectile.update();
        }
        self.projectiles.retain(|p| !p.is_out_of_bounds(viewport));
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        let paint = Paint::solid(Color::YELLOW);
        for p in &self.projectiles {
            surface.fill_rect(p.x, p.y, p.width, p.height, paint);
        }
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }
}
