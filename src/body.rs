//! Simulated bodies and their world-space history.

use std::collections::VecDeque;

use bevy::math::DVec3;

use crate::types::{Appearance, BodyId, BodyKind, LabelPlacement, Rgb, DEG_TO_RAD};

/// Default number of world positions kept per body.
pub const DEFAULT_TAIL_LENGTH: usize = 5000;

/// Tail length used for the center of mass marker.
pub const CENTER_OF_MASS_TAIL_LENGTH: usize = 500;

/// Minimum number of world positions every body keeps.
///
/// All bodies of a constellation share one history length, so histories
/// recorded together stay aligned however short an individual tail is.
pub const HISTORY_LENGTH: usize = DEFAULT_TAIL_LENGTH;

/// How a body's starting state is given.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InitialState {
    /// Position (m) and velocity (m/s) given directly.
    Cartesian { position: DVec3, velocity: DVec3 },
    /// Position derived from the aphelion distance on an inclined plane,
    /// velocity from the minimum orbital velocity tangential to it.
    OrbitalElements {
        aphelion: f64,
        min_velocity: f64,
        inclination_degrees: f64,
    },
}

impl InitialState {
    pub fn cartesian(position: DVec3, velocity: DVec3) -> Self {
        Self::Cartesian { position, velocity }
    }

    /// Resolve to a Cartesian `(position, velocity)` pair.
    pub fn to_cartesian(self) -> (DVec3, DVec3) {
        match self {
            Self::Cartesian { position, velocity } => (position, velocity),
            Self::OrbitalElements {
                aphelion,
                min_velocity,
                inclination_degrees,
            } => elements_to_cartesian(aphelion, min_velocity, inclination_degrees),
        }
    }
}

/// Convert aphelion, minimum orbital velocity and inclination into Cartesian state.
///
/// The body is placed at the aphelion on the x-z plane tilted by the
/// inclination; its velocity points along +y, perpendicular to the radius
/// vector, which is the direction of motion at an apsis.
pub fn elements_to_cartesian(aphelion: f64, min_velocity: f64, inclination_degrees: f64) -> (DVec3, DVec3) {
    let inclination = inclination_degrees * DEG_TO_RAD;
    let position = DVec3::new(aphelion * inclination.cos(), 0.0, aphelion * inclination.sin());
    let velocity = DVec3::new(0.0, min_velocity, 0.0);
    (position, velocity)
}

/// Bounded history of world positions, oldest evicted first.
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<DVec3>,
    capacity: usize,
    /// Points pushed over the trail's lifetime, evicted ones included.
    pushed: u64,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.min(1024)),
            capacity: capacity.max(1),
            pushed: 0,
        }
    }

    pub fn push(&mut self, point: DVec3) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
        self.pushed += 1;
    }

    /// Change the bound, evicting the oldest points if it shrinks.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Number of points ever pushed; changes exactly when a point is added.
    pub fn pushed(&self) -> u64 {
        self.pushed
    }

    pub fn latest(&self) -> Option<DVec3> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Points from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DVec3> + ExactSizeIterator {
        self.points.iter()
    }
}

/// Physical state of a body plus its display bookkeeping.
#[derive(Clone, Debug)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    /// Position in meters.
    pub position: DVec3,
    /// Velocity in meters per second.
    pub velocity: DVec3,
    /// Acceleration from the previous step, zero before the first step.
    pub previous_acceleration: DVec3,
    /// Mass in kilograms. Zero only for the virtual center of mass.
    pub mass: f64,
    /// Radius in meters.
    pub radius: f64,
    pub colour: Rgb,
    pub label_placement: LabelPlacement,
    /// Number of screen positions drawn as the tail.
    pub tail_length: usize,
    /// World-space history, at least [`HISTORY_LENGTH`] long.
    pub trail: Trail,
}

impl Body {
    pub fn new(
        id: BodyId,
        name: impl Into<String>,
        kind: BodyKind,
        initial_state: InitialState,
        mass: f64,
        radius: f64,
        tail_length: usize,
    ) -> Self {
        let (position, velocity) = initial_state.to_cartesian();
        let mut trail = Trail::new(tail_length.max(HISTORY_LENGTH));
        trail.push(position);
        Self {
            id,
            name: name.into(),
            kind,
            position,
            velocity,
            previous_acceleration: DVec3::ZERO,
            mass,
            radius,
            colour: kind.appearance().colour,
            label_placement: LabelPlacement::BottomRight,
            tail_length: tail_length.max(1),
            trail,
        }
    }

    /// The zero-mass virtual body marking the center of mass.
    pub fn center_of_mass(id: BodyId, position: DVec3) -> Self {
        let mut body = Self::new(
            id,
            "Center of mass",
            BodyKind::CenterOfMass,
            InitialState::cartesian(position, DVec3::ZERO),
            0.0,
            0.0,
            CENTER_OF_MASS_TAIL_LENGTH,
        );
        body.label_placement = LabelPlacement::TopLeft;
        body
    }

    pub fn is_virtual(&self) -> bool {
        self.kind == BodyKind::CenterOfMass
    }

    pub fn appearance(&self) -> Appearance {
        self.kind.appearance()
    }

    /// Linear momentum (kg·m/s).
    pub fn momentum(&self) -> DVec3 {
        self.velocity * self.mass
    }

    /// Append the current position to the world-space history.
    pub fn record_position(&mut self) {
        self.trail.push(self.position);
    }
}
