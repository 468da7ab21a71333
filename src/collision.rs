//! Overlap detection between the bullet and enemy sets.
//!
//! The tick asks an `OverlapDetector` for every overlapping pair once, then
//! resolves the pairs itself.  A different detector (spatial hash, an
//! engine's broad phase) can be swapped in without touching the tick.

use crate::entities::{Bullet, Enemy};
use crate::pool::{Pool, SlotId};

pub trait OverlapDetector {
    /// Every `(bullet, enemy)` pair whose boxes overlap, bullets in slot
    /// order and enemies in slot order within each bullet.
    fn overlapping_pairs(&self, bullets: &Pool<Bullet>, enemies: &Pool<Enemy>)
        -> Vec<(SlotId, SlotId)>;
}

/// Brute-force O(bullets × enemies) box test.
#[derive(Clone, Copy, Debug, Default)]
pub struct AabbOverlap;

impl OverlapDetector for AabbOverlap {
    fn overlapping_pairs(
        &self,
        bullets: &Pool<Bullet>,
        enemies: &Pool<Enemy>,
    ) -> Vec<(SlotId, SlotId)> {
        let mut pairs = Vec::new();
        for (bi, bullet) in bullets.iter() {
            let b = bullet.bounds();
            for (ei, enemy) in enemies.iter() {
                if b.overlaps(&enemy.bounds()) {
                    pairs.push((bi, ei));
                }
            }
        }
        pairs
    }
}
