//! Property tests for player physics, spawning and collision

use proptest::prelude::*;

use cube_dash::consts::*;
use cube_dash::sim::collision::CollisionParams;
use cube_dash::sim::{ObstacleKind, ObstacleRegistry, Outcome, PatternSpawner, PlayerBody, resolve};
use cube_dash::Tuning;

fn kind_strategy() -> impl Strategy<Value = ObstacleKind> {
    prop_oneof![
        Just(ObstacleKind::Wall),
        Just(ObstacleKind::BouncePad),
        Just(ObstacleKind::Spike),
    ]
}

proptest! {
    #[test]
    fn gravity_always_slows_an_airborne_body(
        y in 2.0f32..50.0,
        velocity in -5.0f32..5.0,
        dt in 0.0001f32..0.05,
    ) {
        let mut body = PlayerBody::default();
        body.y = y;
        body.velocity = velocity;
        body.integrate(dt, GRAVITY);
        prop_assert!(body.velocity < velocity);
        prop_assert!(body.y > body.half_height);
    }

    #[test]
    fn resting_body_stays_on_the_ground(dts in prop::collection::vec(0.0f32..0.1, 1..200)) {
        let mut body = PlayerBody::default();
        for dt in dts {
            body.integrate(dt, GRAVITY);
            prop_assert_eq!(body.y, body.half_height);
            prop_assert_eq!(body.velocity, 0.0);
        }
    }

    #[test]
    fn jump_charge_stays_in_bounds(
        ops in prop::collection::vec(prop_oneof![Just(None), (0.0f32..0.2).prop_map(Some)], 1..300),
    ) {
        let mut body = PlayerBody::default();
        for op in ops {
            match op {
                None => { body.jump(); }
                Some(dt) => body.integrate(dt, GRAVITY),
            }
            prop_assert!(body.jumps <= body.max_jumps);
            prop_assert!(body.y >= body.half_height);
        }
    }

    #[test]
    fn extra_jump_without_landing_is_a_no_op(dt in 0.001f32..0.05) {
        let mut body = PlayerBody::default();
        body.y = 20.0;
        for _ in 0..MAX_JUMPS {
            prop_assert!(body.jump());
            body.integrate(dt, GRAVITY);
        }
        let velocity = body.velocity;
        prop_assert!(!body.jump());
        prop_assert_eq!(body.velocity, velocity);
        prop_assert_eq!(body.jumps, 0);
    }

    #[test]
    fn spawn_cursor_never_moves_back(
        seed in any::<u64>(),
        steps in prop::collection::vec((0.0f32..0.5, 5.0f32..30.0, 0.0f32..20.0), 1..100),
    ) {
        let tuning = Tuning::default();
        let mut spawner = PatternSpawner::new(&tuning, seed).unwrap();
        let mut registry = ObstacleRegistry::new();
        let mut distance = 0.0f64;
        for (dt, velocity, scrolled) in steps {
            let before = spawner.furthest_spawn_position();
            let spawned = spawner.update(dt, velocity, distance, &mut registry);
            let after = spawner.furthest_spawn_position();
            prop_assert!(after >= before);
            if !spawned.is_empty() {
                prop_assert!(after > before);
            }
            distance += scrolled as f64;
        }
    }

    #[test]
    fn cull_leaves_nothing_behind_threshold(
        obstacles in prop::collection::vec((kind_strategy(), -100.0f32..100.0), 0..64),
        threshold in -50.0f32..0.0,
    ) {
        let mut registry = ObstacleRegistry::new();
        for (kind, x) in &obstacles {
            registry.insert(*kind, *x, 1.0, OBSTACLE_WIDTH).unwrap();
        }
        let removed = registry.cull(threshold);
        prop_assert!(registry.iter().all(|o| o.x >= threshold));
        prop_assert!(removed.iter().all(|o| o.x < threshold));
        prop_assert_eq!(removed.len() + registry.len(), obstacles.len());
    }

    #[test]
    fn advance_scrolls_every_obstacle(
        xs in prop::collection::vec(-20.0f32..100.0, 1..32),
        dt in 0.0f32..0.1,
        velocity in 1.0f32..40.0,
    ) {
        let mut registry = ObstacleRegistry::new();
        for x in &xs {
            registry.insert(ObstacleKind::Spike, *x, SPIKE_HEIGHT, OBSTACLE_WIDTH).unwrap();
        }
        let furthest = registry.advance(dt, velocity).unwrap();
        let moved: Vec<f32> = registry.iter().map(|o| o.x).collect();
        for (before, after) in xs.iter().zip(&moved) {
            prop_assert!((before - velocity * dt - after).abs() < 1e-3);
        }
        prop_assert!(moved.iter().all(|&x| x <= furthest));
    }

    #[test]
    fn spike_overlap_beats_wall_landing(
        height in 1.0f32..5.0,
        sink in 0.0f32..0.2,
        spike_x in -0.9f32..0.9,
    ) {
        let mut player = PlayerBody::default();
        player.y = height + player.half_height - sink;
        let mut registry = ObstacleRegistry::new();
        registry.insert(ObstacleKind::Wall, 0.0, height, OBSTACLE_WIDTH).unwrap();
        registry.insert(ObstacleKind::Spike, spike_x, height + 0.5, OBSTACLE_WIDTH).unwrap();
        let outcome = resolve(&mut player, &registry, &CollisionParams::default());
        prop_assert_eq!(outcome, Outcome::Lethal);
    }
}
