use rand::Rng;

use crate::consts::{STAR_COUNT, STAR_MAX_SIZE, STAR_MAX_SPEED, STAR_MIN_SIZE, STAR_MIN_SPEED};
use crate::sim::Viewport;
use crate::surface::{Color, Paint, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub size: f32,
}

impl Star {
    pub fn random(viewport: &Viewport, rng: &mut impl Rng) -> Self {
        Self {
            x: rng.random::<f32>() * viewport.width,
            y: rng.random::<f32>() * viewport.height,
            speed: rng.random_range(STAR_MIN_SPEED..STAR_MAX_SPEED),
            size: rng.random_range(STAR_MIN_SIZE..STAR_MAX_SIZE),
        }
    }

    /// Drift down, wrapping to the top at a fresh column once past the bottom
    pub fn update(&mut self, viewport: &Viewport, rng: &mut impl Rng) {
        self.y += self.speed;
        if self.y > viewport.height {
            self.y = 0.0;
            self.x = rng.random::<f32>() * viewport.width;
        }
    }
}

/// Decorative background layer, independent of gameplay
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(viewport: &Viewport, rng: &mut impl Rng) -> Self {
        let mut field = Self::default();
        field.reseed(viewport, rng);
        field
    }

    /// Throw away every star and scatter a fresh set over the viewport
    pub fn reseed(&mut self, viewport: &Viewport, rng: &mut impl Rng) {
        self.stars.clear();
        self.stars
            .extend((0..STAR_COUNT).map(|_| Star::random(viewport, rng)));
    }

    pub fn update(&mut self, viewport: &Viewport, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.update(viewport, rng);
        }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        let paint = Paint::solid(Color::WHITE);
        for star in &self.stars {
            surface.fill_circle(star.x, star.y, star.size, paint);
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
