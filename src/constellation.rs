//! Constellation: the fixed body set, its validation and the physics step.

use std::collections::HashSet;

use bevy::log::info;
use bevy::math::DVec3;

use crate::body::{Body, InitialState, DEFAULT_TAIL_LENGTH, HISTORY_LENGTH};
use crate::physics::{compute_net_force, integrate, PairwiseForceCache, PhysicsConfig};
use crate::types::{BodyId, BodyKind, LabelPlacement, Rgb, AU, G};

/// Configuration errors, detected once before a run starts.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConstellationError {
    #[error("constellation {0:?} has no bodies")]
    Empty(String),

    #[error("body {name:?} has non-positive mass {mass}")]
    NonPositiveMass { name: String, mass: f64 },

    #[error("body {name:?} has negative radius {radius}")]
    NegativeRadius { name: String, radius: f64 },

    #[error("body {name:?} has a non-finite {field}")]
    NonFiniteValue { name: String, field: &'static str },

    #[error("bodies {first:?} and {second:?} start at the same position")]
    CoincidentPositions { first: String, second: String },

    #[error("body name {0:?} is used more than once")]
    DuplicateName(String),

    #[error("invalid time step: {0} (must be positive)")]
    InvalidTimeStep(f64),

    #[error("invalid scale factor: {0} (must be positive)")]
    InvalidScaleFactor(f64),

    #[error("body {0:?} has a zero tail length")]
    InvalidTailLength(String),

    #[error("unknown constellation preset {0:?}")]
    UnknownPreset(String),
}

/// One body as given by the constellation author.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDefinition {
    pub name: String,
    pub initial_state: InitialState,
    /// Radius in meters.
    pub radius: f64,
    /// Mass in kilograms.
    pub mass: f64,
    pub kind: BodyKind,
    /// Number of positions kept for the tail.
    pub tail_length: usize,
    /// Overrides the colour of the body kind.
    pub colour: Option<Rgb>,
    pub label_placement: LabelPlacement,
}

impl BodyDefinition {
    pub fn new(name: impl Into<String>, initial_state: InitialState, radius: f64, mass: f64, kind: BodyKind) -> Self {
        Self {
            name: name.into(),
            initial_state,
            radius,
            mass,
            kind,
            tail_length: DEFAULT_TAIL_LENGTH,
            colour: None,
            label_placement: LabelPlacement::BottomRight,
        }
    }

    pub fn with_tail_length(mut self, tail_length: usize) -> Self {
        self.tail_length = tail_length;
        self
    }

    pub fn with_colour(mut self, colour: Rgb) -> Self {
        self.colour = Some(colour);
        self
    }
}

/// A complete, not yet validated constellation.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstellationDefinition {
    pub name: String,
    /// Seconds simulated per integration step.
    pub time_step: f64,
    /// Pixels per meter before user zoom.
    pub scale_factor: f64,
    pub bodies: Vec<BodyDefinition>,
}

impl ConstellationDefinition {
    /// Definition with the default time step (30 min) and scale (10 px per AU).
    pub fn new(name: impl Into<String>, bodies: Vec<BodyDefinition>) -> Self {
        Self {
            name: name.into(),
            time_step: 1800.0,
            scale_factor: 10.0 / AU,
            bodies,
        }
    }

    /// Reject physically invalid input before any body is built.
    pub fn validate(&self) -> Result<(), ConstellationError> {
        if self.bodies.is_empty() {
            return Err(ConstellationError::Empty(self.name.clone()));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConstellationError::InvalidTimeStep(self.time_step));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(ConstellationError::InvalidScaleFactor(self.scale_factor));
        }

        let mut names = HashSet::new();
        let mut starts: Vec<(&str, DVec3)> = Vec::with_capacity(self.bodies.len());

        for body in &self.bodies {
            if !names.insert(body.name.as_str()) {
                return Err(ConstellationError::DuplicateName(body.name.clone()));
            }
            let non_finite = |field| ConstellationError::NonFiniteValue {
                name: body.name.clone(),
                field,
            };
            if !body.mass.is_finite() {
                return Err(non_finite("mass"));
            }
            if body.mass <= 0.0 {
                return Err(ConstellationError::NonPositiveMass {
                    name: body.name.clone(),
                    mass: body.mass,
                });
            }
            if !body.radius.is_finite() {
                return Err(non_finite("radius"));
            }
            if body.radius < 0.0 {
                return Err(ConstellationError::NegativeRadius {
                    name: body.name.clone(),
                    radius: body.radius,
                });
            }
            if body.tail_length == 0 {
                return Err(ConstellationError::InvalidTailLength(body.name.clone()));
            }

            let (position, velocity) = body.initial_state.to_cartesian();
            if !position.is_finite() {
                return Err(non_finite("position"));
            }
            if !velocity.is_finite() {
                return Err(non_finite("velocity"));
            }
            if let Some((other, _)) = starts.iter().find(|(_, p)| *p == position) {
                return Err(ConstellationError::CoincidentPositions {
                    first: (*other).to_string(),
                    second: body.name.clone(),
                });
            }
            starts.push((&body.name, position));
        }
        Ok(())
    }
}

/// The fixed set of real bodies plus the derived center of mass.
#[derive(Clone, Debug)]
pub struct Constellation {
    name: String,
    bodies: Vec<Body>,
    center_of_mass: Body,
    time_step: f64,
    scale_factor: f64,
    physics: PhysicsConfig,
}

impl Constellation {
    /// Validate the definition and build the bodies.
    pub fn new(definition: &ConstellationDefinition, physics: PhysicsConfig) -> Result<Self, ConstellationError> {
        definition.validate()?;

        let mut bodies: Vec<Body> = definition
            .bodies
            .iter()
            .enumerate()
            .map(|(index, def)| {
                let mut body = Body::new(
                    BodyId(index),
                    def.name.clone(),
                    def.kind,
                    def.initial_state,
                    def.mass,
                    def.radius,
                    def.tail_length,
                );
                if let Some(colour) = def.colour {
                    body.colour = colour;
                }
                body.label_placement = def.label_placement;
                body
            })
            .collect();

        let mut center_of_mass = Body::center_of_mass(BodyId(bodies.len()), weighted_center(&bodies));

        let history = bodies
            .iter()
            .map(|body| body.tail_length)
            .fold(HISTORY_LENGTH, usize::max);
        for body in bodies.iter_mut().chain(std::iter::once(&mut center_of_mass)) {
            body.trail.set_capacity(history);
        }

        info!(
            "Constellation {:?}: {} bodies, time step {} s",
            definition.name,
            bodies.len(),
            definition.time_step
        );

        Ok(Self {
            name: definition.name.clone(),
            bodies,
            center_of_mass,
            time_step: definition.time_step,
            scale_factor: definition.scale_factor,
            physics,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn physics(&self) -> PhysicsConfig {
        self.physics
    }

    /// Real bodies in insertion order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn center_of_mass(&self) -> &Body {
        &self.center_of_mass
    }

    pub fn center_of_mass_id(&self) -> BodyId {
        self.center_of_mass.id
    }

    /// Real bodies followed by the center of mass.
    pub fn all_bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().chain(std::iter::once(&self.center_of_mass))
    }

    /// Number of bodies including the center of mass.
    pub fn len(&self) -> usize {
        self.bodies.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Look up a real body or the center of mass.
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        if id == self.center_of_mass.id {
            Some(&self.center_of_mass)
        } else {
            self.bodies.get(id.index())
        }
    }

    pub fn find(&self, name: &str) -> Option<&Body> {
        self.all_bodies().find(|body| body.name == name)
    }

    /// Advance every real body by `dt` seconds.
    ///
    /// All forces are accumulated from the pre-step positions before any body
    /// moves; then every body is integrated; then the center of mass is
    /// recomputed.
    pub fn step(&mut self, dt: f64) {
        let mut cache = PairwiseForceCache::new();
        let forces: Vec<DVec3> = (0..self.bodies.len())
            .map(|index| compute_net_force(index, &self.bodies, &mut cache, self.physics.min_separation))
            .collect();
        assert!(
            cache.is_empty(),
            "force cache not drained at step end: {} entries left",
            cache.len()
        );

        for (body, force) in self.bodies.iter_mut().zip(forces) {
            integrate(body, force, dt, self.physics.scheme);
        }

        self.center_of_mass.position = weighted_center(&self.bodies);
    }

    /// Append every body's current position (and the center of mass) to its history.
    pub fn record_positions(&mut self) {
        for body in &mut self.bodies {
            body.record_position();
        }
        self.center_of_mass.record_position();
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Total linear momentum of the real bodies.
    pub fn total_momentum(&self) -> DVec3 {
        self.bodies.iter().map(Body::momentum).fold(DVec3::ZERO, |acc, p| acc + p)
    }

    /// Kinetic plus gravitational potential energy in joules.
    pub fn total_energy(&self) -> f64 {
        let kinetic: f64 = self
            .bodies
            .iter()
            .map(|b| 0.5 * b.mass * b.velocity.length_squared())
            .sum();
        let mut potential = 0.0;
        for (i, a) in self.bodies.iter().enumerate() {
            for b in &self.bodies[i + 1..] {
                potential -= G * a.mass * b.mass / a.position.distance(b.position);
            }
        }
        kinetic + potential
    }
}

/// Mass-weighted mean position.
fn weighted_center(bodies: &[Body]) -> DVec3 {
    let total: f64 = bodies.iter().map(|b| b.mass).sum();
    let weighted = bodies
        .iter()
        .fold(DVec3::ZERO, |acc, b| acc + b.position * b.mass);
    weighted / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cartesian(name: &str, position: DVec3, velocity: DVec3, mass: f64) -> BodyDefinition {
        BodyDefinition::new(name, InitialState::cartesian(position, velocity), 1.0, mass, BodyKind::Star)
    }

    fn pair() -> ConstellationDefinition {
        ConstellationDefinition::new(
            "pair",
            vec![
                cartesian("a", DVec3::ZERO, DVec3::ZERO, 3.0e24),
                cartesian("b", DVec3::new(4.0e8, 0.0, 0.0), DVec3::new(0.0, 1000.0, 0.0), 1.0e24),
            ],
        )
    }

    #[test]
    fn test_center_of_mass_is_weighted_mean() {
        let constellation = Constellation::new(&pair(), PhysicsConfig::default()).unwrap();
        let com = constellation.center_of_mass();
        assert_relative_eq!(com.position.x, 1.0e8, max_relative = 1e-12);
        assert_eq!(com.id, BodyId(2));
        assert_eq!(constellation.len(), 3);
    }

    #[test]
    fn test_rejects_empty_constellation() {
        let def = ConstellationDefinition::new("void", vec![]);
        assert_eq!(
            Constellation::new(&def, PhysicsConfig::default()).unwrap_err(),
            ConstellationError::Empty("void".into())
        );
    }

    #[test]
    fn test_rejects_zero_mass() {
        let mut def = pair();
        def.bodies[1].mass = 0.0;
        assert!(matches!(
            def.validate(),
            Err(ConstellationError::NonPositiveMass { .. })
        ));
    }

    #[test]
    fn test_rejects_coincident_positions() {
        let mut def = pair();
        def.bodies.push(cartesian("c", DVec3::new(4.0e8, 0.0, 0.0), DVec3::ZERO, 1.0));
        let err = def.validate().unwrap_err();
        assert_eq!(
            err,
            ConstellationError::CoincidentPositions {
                first: "b".into(),
                second: "c".into()
            }
        );
        assert!(err.to_string().contains("same position"));
    }

    #[test]
    fn test_rejects_duplicate_names_and_bad_run_parameters() {
        let mut def = pair();
        def.bodies[1].name = "a".into();
        assert_eq!(def.validate(), Err(ConstellationError::DuplicateName("a".into())));

        let mut def = pair();
        def.time_step = 0.0;
        assert_eq!(def.validate(), Err(ConstellationError::InvalidTimeStep(0.0)));

        let mut def = pair();
        def.scale_factor = f64::NAN;
        assert!(matches!(def.validate(), Err(ConstellationError::InvalidScaleFactor(_))));

        let mut def = pair();
        def.bodies[0].radius = -1.0;
        assert!(matches!(def.validate(), Err(ConstellationError::NegativeRadius { .. })));
    }

    #[test]
    fn test_orbital_elements_resolved_at_construction() {
        let def = ConstellationDefinition::new(
            "inclined",
            vec![
                cartesian("star", DVec3::ZERO, DVec3::ZERO, 2e30),
                BodyDefinition::new(
                    "planet",
                    InitialState::OrbitalElements {
                        aphelion: -3.0 * AU,
                        min_velocity: 15000.0,
                        inclination_degrees: 30.0,
                    },
                    1.0,
                    2e24,
                    BodyKind::GasGiant,
                ),
            ],
        );
        let constellation = Constellation::new(&def, PhysicsConfig::default()).unwrap();
        let planet = constellation.find("planet").unwrap();
        assert_relative_eq!(planet.position.length(), 3.0 * AU, max_relative = 1e-12);
        assert!(planet.position.z < 0.0);
        assert_eq!(planet.velocity, DVec3::new(0.0, 15000.0, 0.0));
    }

    #[test]
    fn test_step_moves_bodies_toward_each_other() {
        let mut constellation = Constellation::new(&pair(), PhysicsConfig::default()).unwrap();
        constellation.step(60.0);
        constellation.step(60.0);
        let a = &constellation.bodies()[0];
        assert!(a.velocity.x > 0.0, "a should be pulled toward b");
        assert!(a.previous_acceleration.x > 0.0);
    }

    #[test]
    fn test_step_keeps_center_of_mass_fixed_for_zero_momentum() {
        let def = ConstellationDefinition::new(
            "balanced",
            vec![
                cartesian("a", DVec3::new(-1e9, 0.0, 0.0), DVec3::new(0.0, -100.0, 0.0), 1e26),
                cartesian("b", DVec3::new(1e9, 0.0, 0.0), DVec3::new(0.0, 100.0, 0.0), 1e26),
            ],
        );
        let mut constellation = Constellation::new(&def, PhysicsConfig::default()).unwrap();
        for _ in 0..100 {
            constellation.step(600.0);
        }
        assert!(constellation.center_of_mass().position.length() < 1.0);
    }

    #[test]
    fn test_bodies_share_one_history_length() {
        let mut def = pair();
        def.bodies[0].tail_length = 10;
        def.bodies[1].tail_length = HISTORY_LENGTH + 500;
        let constellation = Constellation::new(&def, PhysicsConfig::default()).unwrap();
        for body in constellation.all_bodies() {
            assert_eq!(body.trail.capacity(), HISTORY_LENGTH + 500, "{}", body.name);
        }
        assert_eq!(constellation.bodies()[0].tail_length, 10);
    }

    #[test]
    fn test_record_positions_includes_center_of_mass() {
        let mut constellation = Constellation::new(&pair(), PhysicsConfig::default()).unwrap();
        constellation.step(10.0);
        constellation.record_positions();
        assert_eq!(constellation.bodies()[0].trail.len(), 2);
        assert_eq!(constellation.center_of_mass().trail.len(), 2);
        assert_eq!(
            constellation.body(constellation.center_of_mass_id()).unwrap().name,
            "Center of mass"
        );
    }
}
