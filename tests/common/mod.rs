//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::math::DVec3;
use orbit_sim::body::InitialState;
use orbit_sim::constellation::{BodyDefinition, Constellation, ConstellationDefinition};
use orbit_sim::physics::PhysicsConfig;
use orbit_sim::types::{BodyKind, G};

/// A primary at the origin and a secondary at `separation` along +x with
/// tangential velocity `velocity`. The primary starts at rest.
pub fn pair(primary_mass: f64, secondary_mass: f64, separation: f64, velocity: f64) -> ConstellationDefinition {
    ConstellationDefinition::new(
        "Pair",
        vec![
            BodyDefinition::new(
                "Primary",
                InitialState::cartesian(DVec3::ZERO, DVec3::ZERO),
                7.0e8,
                primary_mass,
                BodyKind::Star,
            ),
            BodyDefinition::new(
                "Secondary",
                InitialState::cartesian(DVec3::new(separation, 0.0, 0.0), DVec3::new(0.0, velocity, 0.0)),
                7.0e8,
                secondary_mass,
                BodyKind::Star,
            ),
        ],
    )
}

/// Relative speed for a circular orbit of two bodies.
pub fn circular_speed(total_mass: f64, separation: f64) -> f64 {
    (G * total_mass / separation).sqrt()
}

/// Orbital period for a two-body system (Kepler's third law).
pub fn orbital_period(semi_major_axis: f64, total_mass: f64) -> f64 {
    use std::f64::consts::TAU;
    TAU * (semi_major_axis.powi(3) / (G * total_mass)).sqrt()
}

pub fn build(definition: &ConstellationDefinition) -> Constellation {
    Constellation::new(definition, PhysicsConfig::default()).expect("valid test constellation")
}

/// Distance between the first two bodies.
pub fn separation(constellation: &Constellation) -> f64 {
    let bodies = constellation.bodies();
    bodies[0].position.distance(bodies[1].position)
}

/// Position of the second body relative to the first.
pub fn relative_position(constellation: &Constellation) -> DVec3 {
    let bodies = constellation.bodies();
    bodies[1].position - bodies[0].position
}
