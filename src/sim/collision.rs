//! Proximity detection between the player and the entity pool
//!
//! Everything is a circle test against a single capture radius. The scan
//! reports the first enemy in reach and the closest catchable fish; the
//! frame step decides what to do with them.

use glam::Vec2;

use super::state::{Entity, Icon};
use crate::dist;

/// An enemy within capture radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyContact {
    pub id: u32,
    pub icon: Icon,
}

/// A fish within capture radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishCandidate {
    pub id: u32,
    pub distance: f32,
    /// Horizontal velocity at the moment of contact
    pub vx: f32,
}

/// Result of scanning the pool for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProximityScan {
    /// First enemy in reach, in pool order
    pub enemy: Option<EnemyContact>,
    /// Closest free fish in reach; only looked for when nothing is held
    pub closest_fish: Option<FishCandidate>,
}

/// Strictly inside `radius` of each other
#[inline]
pub fn in_proximity(a: Vec2, b: Vec2, radius: f32) -> bool {
    dist(a, b) < radius
}

/// Scan the pool around `player`
///
/// `held` is the id of the fish already being carried; it is skipped, and
/// while it is set no new fish becomes a candidate. Enemies are always
/// checked. Equal distances keep the earlier entity.
pub fn scan_proximity(
    player: Vec2,
    entities: &[Entity],
    held: Option<u32>,
    radius: f32,
) -> ProximityScan {
    let mut scan = ProximityScan::default();

    for entity in entities {
        if Some(entity.id) == held {
            continue;
        }

        if !in_proximity(player, entity.pos, radius) {
            continue;
        }
        let distance = dist(player, entity.pos);

        if entity.is_enemy() {
            if scan.enemy.is_none() {
                scan.enemy = Some(EnemyContact {
                    id: entity.id,
                    icon: entity.icon,
                });
            }
        } else if held.is_none() {
            let closer = scan
                .closest_fish
                .is_none_or(|best| distance < best.distance);
            if closer {
                scan.closest_fish = Some(FishCandidate {
                    id: entity.id,
                    distance,
                    vx: entity.vel.x,
                });
            }
        }
    }

    scan
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f32 = 32.0;

    fn entity(id: u32, x: f32, y: f32, icon: Icon) -> Entity {
        Entity {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::new(1.0 + id as f32, 0.0),
            icon,
            speed: 5.0,
        }
    }

    #[test]
    fn test_in_proximity_is_strict() {
        let a = Vec2::ZERO;
        assert!(in_proximity(a, Vec2::new(31.9, 0.0), RADIUS));
        assert!(!in_proximity(a, Vec2::new(32.0, 0.0), RADIUS));
    }

    #[test]
    fn test_closest_fish_wins() {
        let pool = [
            entity(1, 20.0, 0.0, Icon::Fish),
            entity(2, 5.0, 0.0, Icon::Shrimp),
            entity(3, 100.0, 0.0, Icon::Fish),
        ];
        let scan = scan_proximity(Vec2::ZERO, &pool, None, RADIUS);
        let fish = scan.closest_fish.unwrap();
        assert_eq!(fish.id, 2);
        assert_eq!(fish.vx, 3.0);
        assert!(scan.enemy.is_none());
    }

    #[test]
    fn test_tie_keeps_encounter_order() {
        let pool = [
            entity(4, 10.0, 0.0, Icon::Fish),
            entity(5, -10.0, 0.0, Icon::Blowfish),
        ];
        let scan = scan_proximity(Vec2::ZERO, &pool, None, RADIUS);
        assert_eq!(scan.closest_fish.unwrap().id, 4);
    }

    #[test]
    fn test_no_new_candidate_while_holding() {
        let pool = [
            entity(1, 0.0, 0.0, Icon::Fish),
            entity(2, 1.0, 0.0, Icon::Fish),
        ];
        let scan = scan_proximity(Vec2::ZERO, &pool, Some(1), RADIUS);
        assert!(scan.closest_fish.is_none());
    }

    #[test]
    fn test_enemy_seen_while_holding() {
        let pool = [
            entity(1, 0.0, 0.0, Icon::Fish),
            entity(2, 3.0, 0.0, Icon::Shark),
            entity(3, 1.0, 0.0, Icon::Squid),
        ];
        let scan = scan_proximity(Vec2::ZERO, &pool, Some(1), RADIUS);
        assert_eq!(
            scan.enemy,
            Some(EnemyContact {
                id: 2,
                icon: Icon::Shark
            })
        );
    }

    #[test]
    fn test_far_entities_ignored() {
        let pool = [entity(1, 40.0, 0.0, Icon::Shark), entity(2, 0.0, 33.0, Icon::Fish)];
        assert_eq!(
            scan_proximity(Vec2::ZERO, &pool, None, RADIUS),
            ProximityScan::default()
        );
    }
}
