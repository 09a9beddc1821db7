use rand::Rng;
use std::f32::consts::TAU;

use crate::consts::{
    EXPLOSION_MAX_PARTICLES, EXPLOSION_MIN_PARTICLES, PARTICLE_ALPHA_DECAY, PARTICLE_ALPHA_JITTER,
    PARTICLE_DAMPING, PARTICLE_JITTER, PARTICLE_LIGHTNESS, PARTICLE_MAX_HUE, PARTICLE_MAX_RADIUS,
    PARTICLE_MAX_SPEED, PARTICLE_MIN_RADIUS, PARTICLE_MIN_SPEED, PARTICLE_SATURATION,
    PARTICLE_VISIBLE_RADIUS,
};
use crate::surface::{Color, Paint, Shadow, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub radius: f32,
    pub alpha: f32,
    /// Hue in degrees; saturation and lightness are fixed
    pub hue: f32,
    pub glow: bool,
}

impl Particle {
    pub fn new(x: f32, y: f32, velocity_x: f32, velocity_y: f32, radius: f32, hue: f32) -> Self {
        Self {
            x,
            y,
            velocity_x,
            velocity_y,
            radius,
            alpha: 1.0,
            hue,
            glow: false,
        }
    }

    /// Drift, slow down, shrink and fade by `fade`
    pub fn update(&mut self, fade: f32) {
        self.x += self.velocity_x;
        self.y += self.velocity_y;
        self.velocity_x *= PARTICLE_DAMPING;
        self.velocity_y *= PARTICLE_DAMPING;
        self.radius *= PARTICLE_DAMPING;
        self.alpha -= fade;
    }

    /// Faded out or shrunk below the visible size
    pub fn is_spent(&self) -> bool {
        self.alpha <= 0.0 || self.radius < PARTICLE_VISIBLE_RADIUS
    }

    pub fn color(&self) -> Color {
        Color::from_hsl(self.hue, PARTICLE_SATURATION, PARTICLE_LIGHTNESS)
    }

    fn paint(&self) -> Paint {
        let shadow = if self.glow {
            Shadow {
                color: Color::WHITE,
                blur: 40.0,
            }
        } else {
            Shadow {
                color: Color::YELLOW,
                blur: 16.0,
            }
        };
        Paint {
            color: self.color(),
            alpha: self.alpha,
            shadow: Some(shadow),
        }
    }
}

/// One burst of particles
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub particles: Vec<Particle>,
}

impl Explosion {
    /// Particles spread evenly around the circle, each with some jitter
    pub fn burst(x: f32, y: f32, rng: &mut impl Rng) -> Self {
        let count = rng.random_range(EXPLOSION_MIN_PARTICLES..=EXPLOSION_MAX_PARTICLES);
        let mut particles = Vec::with_capacity(count);
        for i in 0..count {
            let angle = TAU * (i as f32 / count as f32);
            let speed =
                PARTICLE_MIN_SPEED + rng.random::<f32>() * (PARTICLE_MAX_SPEED - PARTICLE_MIN_SPEED);
            let hue = rng.random::<f32>() * PARTICLE_MAX_HUE;
            let vx = angle.cos() * speed + (rng.random::<f32>() - 0.5) * PARTICLE_JITTER;
            let vy = angle.sin() * speed + (rng.random::<f32>() - 0.5) * PARTICLE_JITTER;
            let radius = PARTICLE_MIN_RADIUS
                + rng.random::<f32>() * (PARTICLE_MAX_RADIUS - PARTICLE_MIN_RADIUS);
            particles.push(Particle::new(x, y, vx, vy, radius, hue));
        }
        Self { particles }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for particle in &mut self.particles {
            let fade = PARTICLE_ALPHA_DECAY + rng.random::<f32>() * PARTICLE_ALPHA_JITTER;
            particle.update(fade);
        }
    }

    /// Finished once every particle is spent
    pub fn is_finished(&self) -> bool {
        self.particles.iter().all(Particle::is_spent)
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for p in self.particles.iter().filter(|p| !p.is_spent()) {
            surface.fill_circle(p.x, p.y, p.radius, p.paint());
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExplosionSet {
    pub explosions: Vec<Explosion>,
}

impl ExplosionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, x: f32, y: f32, rng: &mut impl Rng) {
        self.explosions.push(Explosion::burst(x, y, rng));
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for explosion in &mut self.explosions {
            explosion.update(rng);
        }
        self.explosions.retain(|e| !e.is_finished());
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for explosion in &self.explosions {
            explosion.draw(surface);
        }
    }

    pub fn len(&self) -> usize {
        self.explosions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explosions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, DrawList};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particle_new() {
        let particle = Particle::new(10.0, 20.0, 1.0, -1.0, 3.0, 15.0);
        assert_eq!(particle.alpha, 1.0);
        assert!(!particle.glow);
        assert!(!particle.is_spent());
    }

    #[test]
    fn test_particle_update_damps() {
        let mut particle = Particle::new(10.0, 10.0, 2.0, -1.0, 3.0, 0.0);
        particle.update(0.03);
        assert_eq!(particle.x, 12.0);
        assert_eq!(particle.y, 9.0);
        assert!((particle.velocity_x - 1.92).abs() < 1e-6);
        assert!((particle.velocity_y + 0.96).abs() < 1e-6);
        assert!((particle.radius - 2.88).abs() < 1e-6);
        assert!((particle.alpha - 0.97).abs() < 1e-6);
    }

    #[test]
    fn test_particle_spent_when_tiny() {
        let mut particle = Particle::new(0.0, 0.0, 0.0, 0.0, 0.49, 0.0);
        assert!(particle.is_spent());
        particle.radius = 1.0;
        particle.alpha = 0.0;
        assert!(particle.is_spent());
    }

    #[test]
    fn test_burst_shape() {
        let mut rng = Pcg32::seed_from_u64(9);
        let explosion = Explosion::burst(100.0, 100.0, &mut rng);
        let count = explosion.particles.len();
        assert!((EXPLOSION_MIN_PARTICLES..=EXPLOSION_MAX_PARTICLES).contains(&count));

        for (i, p) in explosion.particles.iter().enumerate() {
            assert_eq!((p.x, p.y), (100.0, 100.0));
            assert_eq!(p.alpha, 1.0);
            assert!(!p.glow);
            assert!(p.radius >= PARTICLE_MIN_RADIUS && p.radius < PARTICLE_MAX_RADIUS);
            assert!(p.hue >= 0.0 && p.hue < PARTICLE_MAX_HUE);

            // Direction stays close to its even slot around the circle
            let angle = TAU * (i as f32 / count as f32);
            let along = p.velocity_x * angle.cos() + p.velocity_y * angle.sin();
            assert!(along > PARTICLE_MIN_SPEED - PARTICLE_JITTER);
        }
    }

    #[test]
    fn test_explosion_lingers_until_all_spent() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut set = ExplosionSet::new();
        set.spawn(100.0, 100.0, &mut rng);

        let mut frames = 0;
        while !set.is_empty() {
            let all_spent = set.explosions[0].is_finished();
            assert!(!all_spent);
            set.update(&mut rng);
            frames += 1;
            assert!(frames < 100);
        }
        // Alpha drops at least 0.025 per frame, so 40 frames is the ceiling
        assert!(frames <= 40);
    }

    #[test]
    fn test_spent_particles_not_drawn() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut explosion = Explosion::burst(50.0, 50.0, &mut rng);
        explosion.particles[0].alpha = 0.0;
        let mut list = DrawList::new();
        explosion.draw(&mut list);
        assert_eq!(list.len(), explosion.particles.len() - 1);
        assert!(!explosion.is_finished());

        match &list.commands()[0] {
            DrawCommand::Circle { paint, .. } => {
                let shadow = paint.shadow.unwrap();
                assert_eq!(shadow.color, Color::YELLOW);
                assert_eq!(shadow.blur, 16.0);
            }
            other => panic!("expected particle circle, got {other:?}"),
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_alpha_and_radius_only_shrink(seed in any::<u64>(), frames in 1usize..60) {
                let mut rng = Pcg32::seed_from_u64(seed);
                let mut explosion = Explosion::burst(0.0, 0.0, &mut rng);
                for _ in 0..frames {
                    let before = explosion.particles.clone();
                    explosion.update(&mut rng);
                    for (old, new) in before.iter().zip(&explosion.particles) {
                        let fade = old.alpha - new.alpha;
                        prop_assert!(fade >= PARTICLE_ALPHA_DECAY - 1e-6);
                        prop_assert!(fade <= PARTICLE_ALPHA_DECAY + PARTICLE_ALPHA_JITTER + 1e-6);
                        prop_assert!(new.radius < old.radius);
                    }
                }
            }
        }
    }
}
