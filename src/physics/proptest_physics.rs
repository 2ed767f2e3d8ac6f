//! Property-based tests for force evaluation and integration using proptest.
//!
//! These tests verify physical invariants across a wide range of
//! configurations.

use bevy::math::DVec3;
use proptest::prelude::*;

use crate::constellation::Constellation;
use crate::physics::{compute_net_force, net_forces_uncached, PairwiseForceCache, PhysicsConfig};
use crate::test_utils::{assertions, fixtures};
use crate::types::{AU, SUN_MASS};

/// Three well-separated bodies from sampled offsets and mass fractions.
fn three_bodies(offsets: [f64; 6], masses: [f64; 3]) -> Vec<(DVec3, f64)> {
    vec![
        (DVec3::new(offsets[0], offsets[1], 0.0) * AU, masses[0] * SUN_MASS),
        (DVec3::new(3.0 + offsets[2], offsets[3], 0.5) * AU, masses[1] * SUN_MASS),
        (DVec3::new(offsets[4], 3.0 + offsets[5], -0.5) * AU, masses[2] * SUN_MASS),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The cached forces match a direct evaluation of every pair.
    #[test]
    fn prop_cached_forces_match_uncached(
        offsets in prop::array::uniform6(-1.0f64..1.0),
        masses in prop::array::uniform3(1e-6f64..10.0),
    ) {
        let definition = fixtures::at_rest(&three_bodies(offsets, masses));
        let constellation = Constellation::new(&definition, PhysicsConfig::default()).unwrap();
        let bodies = constellation.bodies();

        let mut cache = PairwiseForceCache::new();
        let cached: Vec<DVec3> = (0..bodies.len())
            .map(|i| compute_net_force(i, bodies, &mut cache, None))
            .collect();
        let direct = net_forces_uncached(bodies, None);

        prop_assert!(cache.is_empty());
        for (a, b) in cached.iter().zip(&direct) {
            prop_assert!((*a - *b).length() <= 1e-9 * b.length().max(1.0));
        }
    }

    /// Net internal force is zero, so total momentum is conserved by a step.
    #[test]
    fn prop_momentum_conserved_by_steps(
        offsets in prop::array::uniform6(-1.0f64..1.0),
        masses in prop::array::uniform3(1e-6f64..10.0),
        steps in 1usize..20,
    ) {
        let definition = fixtures::at_rest(&three_bodies(offsets, masses));
        let mut constellation = Constellation::new(&definition, PhysicsConfig::default()).unwrap();
        let before = constellation.total_momentum();

        for _ in 0..steps {
            constellation.step(3600.0);
        }

        let scale: f64 = constellation.bodies().iter().map(|b| b.momentum().length()).sum();
        assertions::assert_momentum_conserved(before, constellation.total_momentum(), scale.max(1.0), 1e-9);
    }
}

mod camera_props {
    use bevy::math::DVec2;
    use proptest::prelude::*;

    use crate::camera::{Camera, MAX_ZOOM, MIN_ZOOM};
    use crate::constellation::Constellation;
    use crate::physics::PhysicsConfig;
    use crate::test_utils::fixtures;
    use crate::types::AU;

    fn camera() -> (Constellation, Camera) {
        let definition = fixtures::circular_pair(2e30, 1e30, AU);
        let constellation = Constellation::new(&definition, PhysicsConfig::default()).unwrap();
        let camera = Camera::new(&constellation, DVec2::new(800.0, 600.0));
        (constellation, camera)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Zoom stays within bounds for any sequence of zoom actions.
        #[test]
        fn prop_zoom_stays_in_bounds(actions in prop::collection::vec(any::<bool>(), 0..400)) {
            let (_, mut camera) = camera();
            for zoom_in in actions {
                if zoom_in {
                    camera.zoom_in();
                } else {
                    camera.zoom_out();
                }
                let zoom = camera.settings().zoom_level;
                prop_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&zoom));
            }
        }

        /// Zooming in and back out by the same count returns to the start.
        #[test]
        fn prop_zoom_round_trip(count in 0usize..50) {
            let (_, mut camera) = camera();
            for _ in 0..count {
                camera.zoom_in();
            }
            for _ in 0..count {
                camera.zoom_out();
            }
            prop_assert!((camera.settings().zoom_level - 1.0).abs() < 1e-9);
        }
    }
}
