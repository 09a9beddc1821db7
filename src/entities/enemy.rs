use std::collections::VecDeque;
use std::f32::consts::FRAC_PI_2;

use crate::consts::{ENEMY_SIZE, TRAIL_LENGTH};
use crate::entities::EntryParams;
use crate::sim::Viewport;

/// Edge a formation enters from, carrying the center of its oscillation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryMode {
    /// Falls from above; x swings around `cx`
    Top { cx: f32 },
    /// Flies in from the left; y swings around `cy`
    Left { cy: f32 },
    /// Flies in from the right; y swings around `cy`
    Right { cy: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Leader,
    /// Replays the leader's position from `follow_index` frames ago
    Follower { follow_index: usize },
}

/// Bounded FIFO of recorded leader positions, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<(f32, f32)>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Append a position, evicting the oldest once over `TRAIL_LENGTH`
    pub fn push(&mut self, x: f32, y: f32) {
        self.points.push_back((x, y));
        if self.points.len() > TRAIL_LENGTH {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<(f32, f32)> {
        self.points.get(index).copied()
    }

    /// Position recorded `frames_ago` updates before the newest one
    pub fn sample(&self, frames_ago: usize) -> Option<(f32, f32)> {
        let newest = self.points.len().checked_sub(1)?;
        let index = newest.checked_sub(frames_ago)?;
        self.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(f32, f32)> {
        self.points.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Position before the most recent update, used for facing
    pub last_x: f32,
    pub last_y: f32,
    pub mode: EntryMode,
    pub radius: f32,
    pub angle: f32,
    pub angular_speed: f32,
    pub speed: f32,
    pub trail: Trail,
    pub role: Role,
}

impl Enemy {
    /// Leader placed just outside the entry edge at the start of its curve
    pub fn leader(params: &EntryParams, viewport: &Viewport) -> Self {
        let size = ENEMY_SIZE;
        let swing = params.start_angle.cos() * params.radius;
        let (x, y) = match params.mode {
            EntryMode::Top { cx } => (cx + swing, -size),
            EntryMode::Left { cy } => (-size, cy + swing),
            EntryMode::Right { cy } => (viewport.width + size, cy + swing),
        };

        Self {
            x,
            y,
            width: size,
            height: size,
            last_x: x,
            last_y: y,
            mode: params.mode,
            radius: params.radius,
            angle: params.start_angle,
            angular_speed: params.angular_speed,
            speed: params.speed,
            trail: Trail::new(),
            role: Role::Leader,
        }
    }

    /// Follower sharing this enemy's current position and curve, with its own
    /// empty trail
    pub fn follower(&self, follow_index: usize) -> Self {
        Self {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            last_x: self.x,
            last_y: self.y,
            mode: self.mode,
            radius: self.radius,
            angle: self.angle,
            angular_speed: self.angular_speed,
            speed: self.speed,
            trail: Trail::new(),
            role: Role::Follower { follow_index },
        }
    }

    pub fn is_follower(&self) -> bool {
        matches!(self.role, Role::Follower { .. })
    }

    pub fn follow_index(&self) -> Option<usize> {
        match self.role {
            Role::Leader => None,
            Role::Follower { follow_index } => Some(follow_index),
        }
    }

    /// Take over the front of the formation. The curve state is this enemy's
    /// own copy and the trail starts empty.
    pub fn promote(&mut self) {
        self.role = Role::Leader;
    }

    /// Move one frame along the entry curve and record the new position
    pub fn advance_leader(&mut self) {
        self.last_x = self.x;
        self.last_y = self.y;
        self.angle += self.angular_speed;

        let swing = self.angle.cos() * self.radius;
        match self.mode {
            EntryMode::Top { cx } => {
                self.y += self.speed;
                self.x = cx + swing;
            }
            EntryMode::Left { cy } => {
                self.x += self.speed;
                self.y = cy + swing;
            }
            EntryMode::Right { cy } => {
                self.x -= self.speed;
                self.y = cy + swing;
            }
        }
        debug_assert!(self.x.is_finite() && self.y.is_finite());

        self.trail.push(self.x, self.y);
    }

    /// Jump to the leader's position from `follow_index` frames ago. Holds
    /// still while the trail is too short to reach that far back.
    pub fn follow(&mut self, leader_trail: &Trail) {
        self.last_x = self.x;
        self.last_y = self.y;

        let Some(frames_ago) = self.follow_index() else {
            return;
        };
        if let Some((x, y)) = leader_trail.sample(frames_ago) {
            self.x = x;
            self.y = y;
        }
    }

    /// Past the far edge for its entry mode, by a margin of its own size
    pub fn has_exited(&self, viewport: &Viewport) -> bool {
        match self.mode {
            EntryMode::Top { .. } => self.y > viewport.height + self.height,
            EntryMode::Left { .. } => self.x > viewport.width + self.width,
            EntryMode::Right { .. } => self.x < -self.width,
        }
    }

    /// Sprite rotation: heading of the last move, with 0 pointing up
    pub fn facing(&self) -> f32 {
        (self.y - self.last_y).atan2(self.x - self.last_x) + FRAC_PI_2
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn params(mode: EntryMode) -> EntryParams {
        EntryParams {
            mode,
            radius: 50.0,
            start_angle: 0.0,
            speed: 2.0,
            angular_speed: 0.05,
        }
    }

    #[test]
    fn test_trail_evicts_oldest() {
        let mut trail = Trail::new();
        for i in 0..TRAIL_LENGTH + 3 {
            trail.push(i as f32, 0.0);
        }
        assert_eq!(trail.len(), TRAIL_LENGTH);
        assert_eq!(trail.get(0), Some((3.0, 0.0)));
        assert_eq!(trail.sample(0), Some(((TRAIL_LENGTH + 2) as f32, 0.0)));
    }

    #[test]
    fn test_trail_sample_out_of_reach() {
        let mut trail = Trail::new();
        assert_eq!(trail.sample(0), None);
        trail.push(1.0, 1.0);
        trail.push(2.0, 2.0);
        assert_eq!(trail.sample(1), Some((1.0, 1.0)));
        assert_eq!(trail.sample(2), None);
    }

    #[test]
    fn test_leader_spawn_positions() {
        let vp = viewport();
        let top = Enemy::leader(&params(EntryMode::Top { cx: 400.0 }), &vp);
        assert_eq!((top.x, top.y), (450.0, -48.0));

        let left = Enemy::leader(&params(EntryMode::Left { cy: 300.0 }), &vp);
        assert_eq!((left.x, left.y), (-48.0, 350.0));

        let right = Enemy::leader(&params(EntryMode::Right { cy: 300.0 }), &vp);
        assert_eq!((right.x, right.y), (848.0, 350.0));
        assert_eq!((right.last_x, right.last_y), (848.0, 350.0));
    }

    #[test]
    fn test_top_leader_advance() {
        let mut leader = Enemy::leader(&params(EntryMode::Top { cx: 400.0 }), &viewport());
        leader.advance_leader();
        assert!((leader.x - (400.0 + 50.0 * 0.05f32.cos())).abs() < 1e-4);
        assert!((leader.x - 449.94).abs() < 0.01);
        assert_eq!(leader.y, -46.0);
        assert_eq!((leader.last_x, leader.last_y), (450.0, -48.0));
        assert_eq!(leader.trail.len(), 1);
        assert_eq!(leader.trail.sample(0), Some((leader.x, leader.y)));
    }

    #[test]
    fn test_side_leaders_advance_horizontally() {
        let vp = viewport();
        let mut left = Enemy::leader(&params(EntryMode::Left { cy: 300.0 }), &vp);
        left.advance_leader();
        assert_eq!(left.x, -46.0);
        assert!((left.y - (300.0 + 50.0 * 0.05f32.cos())).abs() < 1e-4);

        let mut right = Enemy::leader(&params(EntryMode::Right { cy: 300.0 }), &vp);
        right.advance_leader();
        assert_eq!(right.x, 846.0);
    }

    #[test]
    fn test_follower_copy_has_own_trail() {
        let mut leader = Enemy::leader(&params(EntryMode::Top { cx: 400.0 }), &viewport());
        leader.advance_leader();
        let follower = leader.follower(5);
        assert!(follower.is_follower());
        assert_eq!(follower.follow_index(), Some(5));
        assert!(follower.trail.is_empty());
        assert_eq!(leader.trail.len(), 1);
        assert_eq!((follower.x, follower.y), (leader.x, leader.y));
        assert_eq!(follower.mode, leader.mode);
    }

    #[test]
    fn test_follower_holds_until_trail_reaches() {
        let mut leader = Enemy::leader(&params(EntryMode::Top { cx: 400.0 }), &viewport());
        let mut follower = leader.follower(2);
        let start = (follower.x, follower.y);

        leader.advance_leader();
        follower.follow(&leader.trail);
        leader.advance_leader();
        follower.follow(&leader.trail);
        assert_eq!((follower.x, follower.y), start);

        leader.advance_leader();
        follower.follow(&leader.trail);
        assert_eq!(Some((follower.x, follower.y)), leader.trail.get(0));
    }

    #[test]
    fn test_exit_edges() {
        let vp = viewport();
        let mut top = Enemy::leader(&params(EntryMode::Top { cx: 400.0 }), &vp);
        top.y = 648.0;
        assert!(!top.has_exited(&vp));
        top.y = 648.5;
        assert!(top.has_exited(&vp));

        let mut left = Enemy::leader(&params(EntryMode::Left { cy: 300.0 }), &vp);
        assert!(!left.has_exited(&vp));
        left.x = 849.0;
        assert!(left.has_exited(&vp));

        let mut right = Enemy::leader(&params(EntryMode::Right { cy: 300.0 }), &vp);
        assert!(!right.has_exited(&vp));
        right.x = -49.0;
        assert!(right.has_exited(&vp));
    }

    #[test]
    fn test_facing_follows_motion() {
        let mut enemy = Enemy::leader(&params(EntryMode::Top { cx: 400.0 }), &viewport());
        enemy.last_x = 0.0;
        enemy.last_y = 0.0;

        // Moving straight down turns the sprite upside down
        enemy.x = 0.0;
        enemy.y = 5.0;
        assert!((enemy.facing() - PI).abs() < 1e-6);

        // Moving right turns it a quarter clockwise
        enemy.x = 5.0;
        enemy.y = 0.0;
        assert!((enemy.facing() - FRAC_PI_2).abs() < 1e-6);

        // Moving up leaves it upright
        enemy.x = 0.0;
        enemy.y = -5.0;
        assert!(enemy.facing().abs() < 1e-6);
    }

    #[test]
    fn test_promote_makes_leader() {
        let leader = Enemy::leader(&params(EntryMode::Left { cy: 300.0 }), &viewport());
        let mut follower = leader.follower(10);
        follower.promote();
        assert!(!follower.is_follower());
        assert_eq!(follower.follow_index(), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_trail_keeps_last_positions(extra in 0usize..200) {
                let mut leader = Enemy::leader(&params(EntryMode::Top { cx: 400.0 }), &viewport());
                let mut history = Vec::new();
                for _ in 0..TRAIL_LENGTH + extra {
                    leader.advance_leader();
                    history.push((leader.x, leader.y));
                }
                prop_assert_eq!(leader.trail.len(), TRAIL_LENGTH);
                // Oldest surviving entry is the position from update extra + 1
                prop_assert_eq!(leader.trail.get(0), Some(history[extra]));
                let kept: Vec<(f32, f32)> = leader.trail.iter().copied().collect();
                prop_assert_eq!(&kept[..], &history[extra..]);
            }

            #[test]
            fn test_follower_still_while_trail_short(follow_index in 1usize..TRAIL_LENGTH, steps in 0usize..TRAIL_LENGTH) {
                let mut leader = Enemy::leader(&params(EntryMode::Right { cy: 250.0 }), &viewport());
                let mut follower = leader.follower(follow_index);
                let start = (follower.x, follower.y);
                for _ in 0..steps {
                    leader.advance_leader();
                    follower.follow(&leader.trail);
                }
                if leader.trail.len() < follow_index + 1 {
                    prop_assert_eq!((follower.x, follower.y), start);
                } else {
                    let index = leader.trail.len() - 1 - follow_index;
                    prop_assert_eq!(Some((follower.x, follower.y)), leader.trail.get(index));
                }
            }
        }
    }
}
