mod enemy;
mod formation;
mod game_state;
mod particle;
mod player;
mod projectile;
mod star;

// Re-export all public types
pub use enemy::{Enemy, EntryMode, Role, Trail};
pub use formation::{EntryParams, Formation, FormationSet};
pub use game_state::GameState;
pub use particle::{Explosion, ExplosionSet, Particle};
pub use player::Player;
pub use projectile::{Projectile, ProjectileSet};
pub use star::{Star, Starfield};
