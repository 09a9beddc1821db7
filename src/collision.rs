use rand::Rng;

use crate::entities::{Enemy, ExplosionSet, FormationSet, Projectile, ProjectileSet};

/// One enemy destroyed by one projectile during a resolver pass.
/// Indices refer to positions at the start of the pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub formation: usize,
    pub enemy: usize,
    pub projectile: usize,
    /// Center of the destroyed enemy, where the explosion spawns
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned bounding box overlap; touching edges do not count
#[allow(clippy::too_many_arguments)]
pub fn overlaps(x1: f32, y1: f32, w1: f32, h1: f32, x2: f32, y2: f32, w2: f32, h2: f32) -> bool {
    x1 < x2 + w2 && x1 + w1 > x2 && y1 < y2 + h2 && y1 + h1 > y2
}

fn projectile_hits(projectile: &Projectile, enemy: &Enemy) -> bool {
    overlaps(
        projectile.x,
        projectile.y,
        projectile.width,
        projectile.height,
        enemy.x,
        enemy.y,
        enemy.width,
        enemy.height,
    )
}

/// Match projectiles against enemies. Formations, enemies and projectiles are
/// scanned back to front; each enemy takes the first live projectile touching
/// it, and a consumed projectile cannot hit again this pass. Every hit spawns
/// an explosion at the enemy's center. Emptied formations are dropped.
pub fn resolve_collisions(
    formations: &mut FormationSet,
    projectiles: &mut ProjectileSet,
    explosions: &mut ExplosionSet,
    rng: &mut impl Rng,
) -> Vec<Hit> {
    let mut consumed = vec![false; projectiles.len()];
    let mut hits = Vec::new();

    for (f_idx, formation) in formations.formations.iter_mut().enumerate().rev() {
        let mut destroyed = Vec::new();

        for (e_idx, enemy) in formation.enemies.iter().enumerate().rev() {
            let target = projectiles
                .projectiles
                .iter()
                .enumerate()
                .rev()
                .find(|&(j, p)| !consumed[j] && projectile_hits(p, enemy))
                .map(|(j, _)| j);

            if let Some(j) = target {
                consumed[j] = true;
                destroyed.push(e_idx);

                let (x, y) = enemy.center();
                explosions.spawn(x, y, rng);
                log::debug!("projectile {j} destroyed enemy {e_idx} of formation {f_idx}");
                hits.push(Hit {
                    formation: f_idx,
                    enemy: e_idx,
                    projectile: j,
                    x,
                    y,
                });
            }
        }

        // Collected in descending order, so earlier indices stay valid
        for e_idx in destroyed {
            formation.remove(e_idx);
        }
    }

    let mut index = 0;
    projectiles.projectiles.retain(|_| {
        let keep = !consumed[index];
        index += 1;
        keep
    });
    formations.formations.retain(|f| !f.is_empty());

    hits
}
