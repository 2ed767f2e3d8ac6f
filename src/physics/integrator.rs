//! Numerical integrators for the N-body step.
//!
//! Velocity Verlet is the default. It reuses the acceleration from the
//! previous step, so a body needs exactly one force evaluation per step.

use bevy::math::DVec3;

use crate::body::Body;

/// Integration scheme applied to every body in a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegrationScheme {
    /// Velocity Verlet with averaged old/new acceleration.
    #[default]
    VelocityVerlet,
    /// First order symplectic (semi-implicit) Euler.
    SymplecticEuler,
}

/// Advance `body` by `dt` seconds given the net force computed for this step.
///
/// Velocity Verlet:
/// - `a = F / m`
/// - `v += dt * (a + a_prev) / 2`
/// - `x += dt * v + dt² / 2 * a_prev`
/// - `a_prev = a`
pub fn integrate(body: &mut Body, net_force: DVec3, dt: f64, scheme: IntegrationScheme) {
    debug_assert!(body.mass > 0.0, "{} has no mass and cannot be integrated", body.name);
    let acceleration = net_force / body.mass;

    match scheme {
        IntegrationScheme::VelocityVerlet => {
            body.velocity += (acceleration + body.previous_acceleration) * (0.5 * dt);
            body.position += body.velocity * dt + body.previous_acceleration * (0.5 * dt * dt);
        }
        IntegrationScheme::SymplecticEuler => {
            body.velocity += acceleration * dt;
            body.position += body.velocity * dt;
        }
    }
    body.previous_acceleration = acceleration;

    assert!(
        body.position.is_finite() && body.velocity.is_finite(),
        "{} left the finite domain after integration",
        body.name
    );
}
