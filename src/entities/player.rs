use crate::consts::{PLAYER_BOTTOM_OFFSET, PLAYER_SIZE, PLAYER_SPEED};
use crate::sim::Viewport;
use crate::surface::{Color, Glyph, Paint, Sprite, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Player {
    /// Centered horizontally, parked near the bottom edge
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            x: viewport.width / 2.0,
            y: viewport.height - PLAYER_BOTTOM_OFFSET,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            speed: PLAYER_SPEED,
        }
    }

    /// Keep the ship on its row after the viewport changes height
    pub fn on_resize(&mut self, viewport: &Viewport) {
        self.y = viewport.height - PLAYER_BOTTOM_OFFSET;
    }

    /// Center the ship under an absolute pointer position. No clamping.
    pub fn follow_pointer(&mut self, pointer_x: f32) {
        self.x = pointer_x - self.width / 2.0;
    }

    /// Step sideways by `speed`; `direction` is -1 for left, 1 for right
    pub fn nudge(&mut self, direction: f32) {
        self.x += direction.signum() * self.speed;
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.fill_glyph(&Glyph {
            sprite: Sprite::Ship,
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
            rotation: 0.0,
            size: self.width,
            paint: Paint::solid(Color::PLAYER_CYAN),
        });
    }
}
