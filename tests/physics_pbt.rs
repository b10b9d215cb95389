#[macro_use]
mod common;

use common::FlockBuilder;
use flockwise_core::find_neighbors;
use flockwise_core::systems::movement::wrap_coordinate;
use flockwise_core::{PolicyConfig, SpeedLimit};
use flockwise_data::Vec2;
use proptest::prelude::*;

prop_compose! {
    fn arb_position()(
        x in 0.0f64..1000.0,
        y in 0.0f64..600.0
    ) -> Vec2 {
        Vec2::new(x, y)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_flock_stays_bounded_and_inside_world(
        seed in any::<u64>(),
        agents in 2usize..60,
        k in 1usize..10,
        noise in 0.0f64..5.0,
        three_state in any::<bool>(),
    ) {
        let mut flock = FlockBuilder::new()
            .with_seed(seed)
            .with_config(|c| {
                c.world.agent_count = agents;
                c.agent.k_nearest = k;
                c.agent.noise_amplitude = noise;
                if three_state {
                    c.policy = PolicyConfig::three_state_default();
                }
            })
            .build();
        for _ in 0..15 {
            let stats = flock.step().clone();
            prop_assert_eq!(stats.state_counts.total(), agents);
            prop_assert!(stats.cluster_count >= 1 && stats.cluster_count <= agents);
            prop_assert!(stats.cohesion >= 0.0);
            assert_in_world!(flock);
            assert_speed_bounded!(flock);
        }
    }

    #[test]
    fn test_componentwise_limit_caps_each_axis(
        seed in any::<u64>(),
        max_speed in 1.0f64..60.0,
    ) {
        let mut flock = FlockBuilder::new()
            .with_seed(seed)
            .with_config(|c| {
                c.world.agent_count = 30;
                c.agent.max_speed = max_speed;
                c.rules.speed_limit = SpeedLimit::Componentwise;
            })
            .build();
        flock.advance(10);
        for agent in flock.agents() {
            prop_assert!(agent.velocity.x <= max_speed);
            prop_assert!(agent.velocity.y <= max_speed);
        }
        assert_in_world!(flock);
    }

    #[test]
    fn test_neighbor_query_invariants(
        positions in prop::collection::vec(arb_position(), 1..40),
        radius in 1.0f64..300.0,
        k in 1usize..12,
    ) {
        for query in 0..positions.len() {
            let found = find_neighbors(query, &positions, radius, k);
            prop_assert!(found.len() <= k);
            prop_assert!(!found.contains(&query));

            let origin = positions[query];
            let distances: Vec<f64> = found.iter().map(|&j| origin.distance(positions[j])).collect();
            prop_assert!(distances.iter().all(|&d| d < radius));
            prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));

            let in_range = (0..positions.len())
                .filter(|&j| j != query && origin.distance(positions[j]) < radius)
                .count();
            prop_assert_eq!(found.len(), in_range.min(k));
        }
    }

    #[test]
    fn test_wrap_coordinate_lands_in_range(
        value in -1.0e6f64..1.0e6,
        extent in 1.0f64..5000.0,
    ) {
        let wrapped = wrap_coordinate(value, extent);
        prop_assert!((0.0..extent).contains(&wrapped));
    }
}
