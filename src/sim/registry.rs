//! Ownership of every live obstacle
//!
//! Obstacles are bucketed by kind. Within a bucket they stay in spawn order,
//! which is not necessarily position order.

use super::obstacle::{Obstacle, ObstacleKind, ObstacleView};
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct ObstacleRegistry {
    buckets: [Vec<Obstacle>; ObstacleKind::COUNT],
    next_id: u32,
}

impl Default for ObstacleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            next_id: 1,
        }
    }

    /// Add an obstacle and return its id. Ids are never reused.
    pub fn insert(
        &mut self,
        kind: ObstacleKind,
        x: f32,
        height: f32,
        width: f32,
    ) -> Result<u32, ConfigError> {
        let id = self.next_id;
        let obstacle = Obstacle::new(id, kind, x, height, width)?;
        self.next_id += 1;
        self.buckets[kind.index()].push(obstacle);
        Ok(id)
    }

    /// Scroll every obstacle toward the player. Returns the rightmost x.
    pub fn advance(&mut self, dt: f32, velocity: f32) -> Option<f32> {
        let step = velocity * dt;
        let mut furthest: Option<f32> = None;
        for obstacle in self.buckets.iter_mut().flatten() {
            obstacle.x -= step;
            furthest = Some(furthest.map_or(obstacle.x, |f| f.max(obstacle.x)));
        }
        furthest
    }

    /// Remove every obstacle behind `threshold` and hand them back
    pub fn cull(&mut self, threshold: f32) -> Vec<Obstacle> {
        let mut removed = Vec::new();
        for bucket in &mut self.buckets {
            if !bucket.iter().any(|o| o.x < threshold) {
                continue;
            }
            let (gone, keep): (Vec<_>, Vec<_>) =
                std::mem::take(bucket).into_iter().partition(|o| o.x < threshold);
            *bucket = keep;
            removed.extend(gone);
        }
        removed
    }

    /// Remove everything (used on reset)
    pub fn clear(&mut self) -> Vec<Obstacle> {
        self.buckets
            .iter_mut()
            .flat_map(std::mem::take)
            .collect()
    }

    pub fn bucket(&self, kind: ObstacleKind) -> &[Obstacle] {
        &self.buckets[kind.index()]
    }

    /// All obstacles, walls first, then pads, then spikes
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.buckets.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Read view for the renderer, ordered by kind then spawn order
    pub fn snapshot(&self) -> Vec<ObstacleView> {
        self.iter().map(Obstacle::view).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> ObstacleRegistry {
        let mut registry = ObstacleRegistry::new();
        registry.insert(ObstacleKind::Spike, 5.0, 0.75, 1.0).unwrap();
        registry.insert(ObstacleKind::Wall, 10.0, 2.0, 1.0).unwrap();
        registry.insert(ObstacleKind::BouncePad, -3.0, 0.4, 1.0).unwrap();
        registry.insert(ObstacleKind::Wall, -30.0, 3.0, 1.0).unwrap();
        registry
    }

    #[test]
    fn test_insert_assigns_unique_ids() {
        let registry = populated();
        let mut ids: Vec<u32> = registry.iter().map(|o| o.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(registry.bucket(ObstacleKind::Wall).len(), 2);
    }

    #[test]
    fn test_advance_moves_all_and_reports_furthest() {
        let mut registry = populated();
        let furthest = registry.advance(0.5, 10.0);
        assert_eq!(furthest, Some(5.0));
        let xs: Vec<f32> = registry.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![5.0, -35.0, -8.0, 0.0]);
    }

    #[test]
    fn test_zero_height_insert_rejected() {
        let mut registry = populated();
        assert!(registry.insert(ObstacleKind::Wall, 3.0, 0.0, 1.0).is_err());
        assert_eq!(registry.len(), 4);
        // A rejected insert does not burn an id
        assert_eq!(registry.insert(ObstacleKind::Wall, 3.0, 1.0, 1.0).unwrap(), 5);
    }

    #[test]
    fn test_advance_empty() {
        let mut registry = ObstacleRegistry::new();
        assert_eq!(registry.advance(0.1, 10.0), None);
    }

    #[test]
    fn test_cull_removes_only_behind_threshold() {
        let mut registry = populated();
        let removed = registry.cull(-20.0);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].x, -30.0);
        assert_eq!(registry.len(), 3);
        assert!(registry.iter().all(|o| o.x >= -20.0));
    }

    #[test]
    fn test_cull_keeps_spawn_order() {
        let mut registry = ObstacleRegistry::new();
        registry.insert(ObstacleKind::Spike, 1.0, 0.75, 1.0).unwrap();
        registry.insert(ObstacleKind::Spike, -50.0, 0.75, 1.0).unwrap();
        registry.insert(ObstacleKind::Spike, 3.0, 0.75, 1.0).unwrap();
        registry.insert(ObstacleKind::Spike, -60.0, 0.75, 1.0).unwrap();
        registry.insert(ObstacleKind::Spike, 2.0, 0.75, 1.0).unwrap();
        registry.cull(-20.0);
        let xs: Vec<f32> = registry.bucket(ObstacleKind::Spike).iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_clear_returns_everything() {
        let mut registry = populated();
        let removed = registry.clear();
        assert_eq!(removed.len(), 4);
        assert!(registry.is_empty());
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_snapshot_ordered_by_kind() {
        let registry = populated();
        let kinds: Vec<ObstacleKind> = registry.snapshot().iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ObstacleKind::Wall,
                ObstacleKind::Wall,
                ObstacleKind::BouncePad,
                ObstacleKind::Spike
            ]
        );
    }
}
