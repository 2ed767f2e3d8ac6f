//! N-body physics: pairwise gravity and time integration.
//!
//! Forces for a whole step are computed from one snapshot of positions
//! before any body is integrated; see [`crate::constellation::Constellation::step`].

mod gravity;
mod integrator;

#[cfg(test)]
mod proptest_physics;

use bevy::prelude::Resource;

pub use gravity::{compute_net_force, net_forces_uncached, pair_force, PairwiseForceCache};
pub use integrator::{integrate, IntegrationScheme};

/// Configuration for the physics step.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct PhysicsConfig {
    /// Integration scheme. Default: velocity Verlet.
    pub scheme: IntegrationScheme,
    /// Optional separation floor in meters. Default: none, so coincident
    /// bodies are a fatal error rather than silently softened.
    pub min_separation: Option<f64>,
}
