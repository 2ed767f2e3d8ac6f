//! Pairwise Newtonian gravity with a consume-once force cache.
//!
//! Each unordered pair of bodies is evaluated once per step: the first body
//! to ask computes and stores the force, the second pops it and receives the
//! negation (Newton's third law).

use std::collections::HashMap;

use bevy::math::DVec3;

use crate::body::Body;
use crate::types::{BodyId, G};

/// Canonical key for an unordered body pair.
fn pair_key(a: BodyId, b: BodyId) -> (BodyId, BodyId) {
    if a < b { (a, b) } else { (b, a) }
}

/// Per-step memo of pairwise forces.
///
/// Empty at the start of a step and drained by the end of the
/// force-accumulation pass.
#[derive(Debug, Default)]
pub struct PairwiseForceCache {
    /// Force on the body that computed it, keyed by the canonical pair.
    entries: HashMap<(BodyId, BodyId), (BodyId, DVec3)>,
}

impl PairwiseForceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force on `target` exerted by `source`.
    ///
    /// Computes and stores on the first request for the pair, pops and negates
    /// on the second.
    pub fn force_between<F>(&mut self, target: BodyId, source: BodyId, compute: F) -> DVec3
    where
        F: FnOnce() -> DVec3,
    {
        let key = pair_key(target, source);
        match self.entries.remove(&key) {
            Some((computed_for, force)) => {
                assert_ne!(
                    computed_for, target,
                    "body {target} requested the force from {source} twice in one step"
                );
                -force
            }
            None => {
                let force = compute();
                self.entries.insert(key, (target, force));
                force
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Gravitational force on `target` from `source`, in newtons.
///
/// # Panics
/// Panics on coincident positions unless `min_separation` provides a floor.
#[inline]
pub fn pair_force(target: &Body, source: &Body, min_separation: Option<f64>) -> DVec3 {
    let delta = source.position - target.position;
    let mut distance = delta.length();
    if let Some(floor) = min_separation {
        distance = distance.max(floor);
    }
    assert!(
        distance > 0.0 && distance.is_finite(),
        "degenerate separation {distance} between {} and {}",
        target.name,
        source.name
    );
    let direction = delta / delta.length().max(f64::MIN_POSITIVE);
    direction * (G * target.mass * source.mass / (distance * distance))
}

/// Net force on `bodies[index]` from every other body, using the shared cache.
pub fn compute_net_force(
    index: usize,
    bodies: &[Body],
    cache: &mut PairwiseForceCache,
    min_separation: Option<f64>,
) -> DVec3 {
    let target = &bodies[index];
    bodies
        .iter()
        .filter(|other| other.id != target.id)
        .map(|other| {
            cache.force_between(target.id, other.id, || pair_force(target, other, min_separation))
        })
        .fold(DVec3::ZERO, |acc, force| acc + force)
}

/// Net forces on all bodies, computed without the cache.
///
/// Every pair is evaluated from both sides. Used to check the cached path.
pub fn net_forces_uncached(bodies: &[Body], min_separation: Option<f64>) -> Vec<DVec3> {
    bodies
        .iter()
        .map(|target| {
            bodies
                .iter()
                .filter(|other| other.id != target.id)
                .fold(DVec3::ZERO, |acc, other| acc + pair_force(target, other, min_separation))
        })
        .collect()
}
