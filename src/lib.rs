// Library exports for the binary and for testing
pub use collision::{Hit, resolve_collisions};
pub use entities::{
    Enemy, EntryMode, EntryParams, Explosion, ExplosionSet, Formation, FormationSet, GameState,
    Particle, Player, Projectile, ProjectileSet, Role, Star, Starfield, Trail,
};
pub use sim::{SimulationState, Viewport};
pub use surface::{Color, DrawCommand, DrawList, Glyph, Paint, Shadow, Sprite, Surface};

pub mod app;
pub mod collision;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod surface;

/// Gameplay tunables. Units are surface pixels and frames.
pub mod consts {
    use std::time::Duration;

    /// Target frame period (~60 Hz)
    pub const FRAME_DURATION: Duration = Duration::from_millis(16);

    /// Pixel size of one terminal cell, used to map the terminal onto a surface
    pub const CELL_WIDTH_PX: f32 = 8.0;
    pub const CELL_HEIGHT_PX: f32 = 16.0;

    /// Starfield
    pub const STAR_COUNT: usize = 100;
    pub const STAR_MIN_SPEED: f32 = 0.5;
    pub const STAR_MAX_SPEED: f32 = 2.0;
    pub const STAR_MIN_SIZE: f32 = 0.5;
    pub const STAR_MAX_SIZE: f32 = 2.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Distance from the bottom edge of the viewport to the ship's top
    pub const PLAYER_BOTTOM_OFFSET: f32 = 60.0;

    /// Player bullets
    pub const BULLET_SPEED: f32 = 8.0;
    /// Frames between volleys
    pub const BULLET_INTERVAL: u32 = 8;
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
    /// Launch angles from vertical, in degrees
    pub const BULLET_SPREAD_DEG: [f32; 3] = [-15.0, 0.0, 15.0];
    /// How far past the left/right edge a bullet may travel before removal
    pub const BULLET_SIDE_MARGIN: f32 = 20.0;

    /// Enemies and formations
    pub const ENEMY_SIZE: f32 = 48.0;
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    pub const ENEMY_SPEED_MIN_SCALE: f32 = 0.7;
    pub const ENEMY_SPEED_MAX_SCALE: f32 = 1.3;
    pub const ENEMY_MIN_ANGULAR_SPEED: f32 = 0.03;
    pub const ENEMY_MAX_ANGULAR_SPEED: f32 = 0.05;
    pub const ENEMY_MIN_RADIUS: f32 = 40.0;
    pub const ENEMY_MAX_RADIUS: f32 = 100.0;
    /// A formation spawns once the spawn timer exceeds this many frames
    pub const ENEMY_SPAWN_INTERVAL: u32 = 40;
    /// Horizontal padding for top-entry curve centers
    pub const TOP_ENTRY_PADDING: f32 = 32.0;
    /// Vertical padding for side-entry curve centers
    pub const SIDE_ENTRY_PADDING: f32 = 100.0;
    /// Maximum number of leader positions kept for followers to replay
    pub const TRAIL_LENGTH: usize = 50;
    /// Followers per formation (a formation holds one more enemy: the leader)
    pub const FOLLOWER_COUNT: usize = 9;
    /// Trail slots between consecutive followers
    pub const FOLLOW_SPACING: usize = TRAIL_LENGTH / (FOLLOWER_COUNT + 1);

    /// Explosion particles
    pub const EXPLOSION_MIN_PARTICLES: usize = 15;
    pub const EXPLOSION_MAX_PARTICLES: usize = 24;
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;
    /// Random velocity jitter applied per axis, in [-JITTER/2, JITTER/2)
    pub const PARTICLE_JITTER: f32 = 0.7;
    pub const PARTICLE_MIN_RADIUS: f32 = 2.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 4.0;
    pub const PARTICLE_MAX_HUE: f32 = 30.0;
    pub const PARTICLE_SATURATION: f32 = 100.0;
    pub const PARTICLE_LIGHTNESS: f32 = 60.0;
    /// Per-frame multiplier applied to velocity and radius
    pub const PARTICLE_DAMPING: f32 = 0.96;
    pub const PARTICLE_ALPHA_DECAY: f32 = 0.025;
    pub const PARTICLE_ALPHA_JITTER: f32 = 0.02;
    /// Particles smaller than this are spent
    pub const PARTICLE_VISIBLE_RADIUS: f32 = 0.5;
}
