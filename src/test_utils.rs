//! Test utilities for gravity simulation tests.
//!
//! Provides fixtures for building small constellations and assertions for
//! checking physical invariants like momentum conservation.

use bevy::math::DVec3;

use crate::body::InitialState;
use crate::constellation::{BodyDefinition, ConstellationDefinition};
use crate::types::{BodyKind, G};

/// Fixtures for creating test constellations.
pub mod fixtures {
    use super::*;

    /// Two bodies on circular orbits about their common center of mass.
    ///
    /// The primary starts at the origin and the secondary on the +x axis;
    /// total momentum is zero.
    pub fn circular_pair(primary_mass: f64, secondary_mass: f64, separation: f64) -> ConstellationDefinition {
        let total = primary_mass + secondary_mass;
        // Relative speed for a circular orbit: v = sqrt(G M / r)
        let v = (G * total / separation).sqrt();
        ConstellationDefinition::new(
            "Circular pair",
            vec![
                BodyDefinition::new(
                    "Primary",
                    InitialState::cartesian(DVec3::ZERO, DVec3::new(0.0, -v * secondary_mass / total, 0.0)),
                    1.0e6,
                    primary_mass,
                    BodyKind::Star,
                ),
                BodyDefinition::new(
                    "Secondary",
                    InitialState::cartesian(
                        DVec3::new(separation, 0.0, 0.0),
                        DVec3::new(0.0, v * primary_mass / total, 0.0),
                    ),
                    1.0e6,
                    secondary_mass,
                    BodyKind::TerrestrialCold,
                ),
            ],
        )
    }

    /// Bodies of the given masses at the given positions, all at rest.
    pub fn at_rest(bodies: &[(DVec3, f64)]) -> ConstellationDefinition {
        ConstellationDefinition::new(
            "At rest",
            bodies
                .iter()
                .enumerate()
                .map(|(i, &(position, mass))| {
                    BodyDefinition::new(
                        format!("Body {i}"),
                        InitialState::cartesian(position, DVec3::ZERO),
                        1.0,
                        mass,
                        BodyKind::Moon,
                    )
                })
                .collect(),
        )
    }
}

/// Assertions for verifying physical invariants.
pub mod assertions {
    use super::*;

    /// Orbital period of a two-body system (Kepler's third law).
    pub fn orbital_period(semi_major_axis: f64, total_mass: f64) -> f64 {
        std::f64::consts::TAU * (semi_major_axis.powi(3) / (G * total_mass)).sqrt()
    }

    /// Assert a momentum change is small relative to the momentum scale.
    pub fn assert_momentum_conserved(before: DVec3, after: DVec3, scale: f64, tolerance: f64) {
        let drift = (after - before).length() / scale;
        assert!(
            drift < tolerance,
            "momentum drift {drift:e} exceeds {tolerance:e} (before {before}, after {after})"
        );
    }
}
