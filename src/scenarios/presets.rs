//! Preset constellation definitions.
//!
//! All measures are SI units (kg, m, s).

use bevy::math::DVec3;

use crate::body::InitialState;
use crate::constellation::{BodyDefinition, ConstellationDefinition};
use crate::types::{BodyKind, AU, SUN_MASS, SUN_RADIUS};

use super::Preset;

/// All available presets; the first is the default.
pub static PRESETS: &[Preset] = &[
    Preset {
        id: "solar_system",
        name: "Solar system",
        description: "The Sun, eight planets, Pluto and the Moon starting in a line.",
        build: solar_system,
    },
    Preset {
        id: "binary_star",
        name: "Binary star",
        description: "Two massive stars with two light planets in tilted orbits.",
        build: binary_star,
    },
    Preset {
        id: "inclined",
        name: "Inclined orbit",
        description: "A planet on a 30 degree inclined orbit given by orbital elements.",
        build: inclined,
    },
    Preset {
        id: "double_star",
        name: "Double star",
        description: "Two stars, one of them kicked sideways.",
        build: double_star,
    },
    Preset {
        id: "inner_planets",
        name: "Inner planets",
        description: "Sun, Mercury, Earth, Mars and Pluto with a one-day step.",
        build: inner_planets,
    },
];

fn at(x: f64, vy: f64) -> InitialState {
    InitialState::cartesian(DVec3::new(x, 0.0, 0.0), DVec3::new(0.0, vy, 0.0))
}

fn sun() -> BodyDefinition {
    BodyDefinition::new("Sun", at(0.0, 0.0), SUN_RADIUS, SUN_MASS, BodyKind::Star)
}

/// Sun, planets, Pluto and the Moon.
pub fn solar_system() -> ConstellationDefinition {
    ConstellationDefinition::new(
        "Solar system",
        vec![
            sun(),
            BodyDefinition::new("Mercury", at(-69_818_000_000.0, 38_860.0), 2_479_000.0, 0.33010e24, BodyKind::TerrestrialHot),
            BodyDefinition::new("Venus", at(-0.716 * AU, 34_790.0), 6_051_800.0, 4.8673e24, BodyKind::TerrestrialHot),
            BodyDefinition::new("Earth", at(-AU, 29_800.0), 6_371_000.0, 5.972e24, BodyKind::TerrestrialCold),
            BodyDefinition::new("Moon", at(-AU - 0.4055e9, 29_800.0 + 970.0), 1_736_000.0, 0.07346e24, BodyKind::Moon)
                .with_tail_length(45),
            BodyDefinition::new("Mars", at(-249_000_000_000.0, 21_970.0), 3_389_500.0, 6.39e23, BodyKind::TerrestrialCold),
            BodyDefinition::new("Jupiter", at(-5.367 * AU, 12_440.0), 71_492_000.0, 1.898e27, BodyKind::GasGiant),
            BodyDefinition::new("Saturn", at(-9.905 * AU, 9_090.0), 60_268_000.0, 568.32e24, BodyKind::GasGiant),
            BodyDefinition::new("Uranus", at(-19.733 * AU, 6_490.0), 25_559_000.0, 86.811e24, BodyKind::IceGiant),
            BodyDefinition::new("Neptune", at(-29.973 * AU, 5_370.0), 24_764_000.0, 102.409e24, BodyKind::IceGiant),
            BodyDefinition::new("Pluto", at(-7304.326e9, 3_710.0), 1_188_300.0, 0.01303e24, BodyKind::TerrestrialCold),
        ],
    )
}

/// Two stars of four and three solar masses with two planets.
pub fn binary_star() -> ConstellationDefinition {
    let star_radius = 1.711 * SUN_RADIUS;
    let planet_mass = 1e-6 * SUN_MASS;
    ConstellationDefinition::new(
        "Binary star",
        vec![
            BodyDefinition::new(
                "Star 1",
                InitialState::cartesian(DVec3::ZERO, DVec3::new(0.0, -50_000.0, 25_000.0)),
                star_radius,
                4.0 * SUN_MASS,
                BodyKind::Star,
            )
            .with_tail_length(3000),
            BodyDefinition::new("Star 2", at(2.0 * AU, 0.0), star_radius, 3.0 * SUN_MASS, BodyKind::Star)
                .with_tail_length(3000),
            BodyDefinition::new(
                "Planet 1",
                InitialState::cartesian(DVec3::new(-3.0 * AU, 0.0, 0.0), DVec3::new(0.0, 0.0, -10_000.0)),
                star_radius,
                planet_mass,
                BodyKind::TerrestrialHot,
            )
            .with_tail_length(1000),
            BodyDefinition::new(
                "Planet 2",
                InitialState::cartesian(DVec3::new(2.5 * AU, 0.0, 0.0), DVec3::new(0.0, 0.0, -70_000.0)),
                star_radius,
                planet_mass,
                BodyKind::GasGiant,
            )
            .with_tail_length(100),
        ],
    )
}

/// One star, a planet on an inclined orbit and a planet in the reference plane.
pub fn inclined() -> ConstellationDefinition {
    let radius = 1.711 * SUN_RADIUS;
    ConstellationDefinition::new(
        "Inclined orbit",
        vec![
            BodyDefinition::new("Star 1", at(0.0, 0.0), radius, SUN_MASS, BodyKind::Star).with_tail_length(3000),
            BodyDefinition::new(
                "Planet 1",
                InitialState::OrbitalElements {
                    aphelion: -3.0 * AU,
                    min_velocity: 15_000.0,
                    inclination_degrees: 30.0,
                },
                radius,
                1e-6 * SUN_MASS,
                BodyKind::GasGiant,
            )
            .with_tail_length(3000),
            BodyDefinition::new("Planet 2", at(2.5 * AU, 15_000.0), radius, 1e-6 * SUN_MASS, BodyKind::TerrestrialCold)
                .with_tail_length(3000),
        ],
    )
}

/// Two stars, five AU apart.
pub fn double_star() -> ConstellationDefinition {
    let radius = 1.711 * SUN_RADIUS;
    ConstellationDefinition::new(
        "Double star",
        vec![
            BodyDefinition::new("Star 1", at(0.0, -10_000.0), radius, 4.0 * SUN_MASS, BodyKind::Star)
                .with_tail_length(100),
            BodyDefinition::new("Star 2", at(5.0 * AU, 0.0), radius, SUN_MASS, BodyKind::Star).with_tail_length(100),
        ],
    )
}

/// Sun and a few planets with explicit colours and a one-day step.
pub fn inner_planets() -> ConstellationDefinition {
    let mut definition = ConstellationDefinition::new(
        "Inner planets",
        vec![
            sun().with_colour([250, 255, 0]),
            BodyDefinition::new("Mercury", at(-69_818_000_000.0, 38_860.0), 2_479_000.0, 0.33010e24, BodyKind::TerrestrialHot)
                .with_colour([150, 150, 150]),
            BodyDefinition::new("Earth", at(-AU, 29_800.0), 6_371_000.0, 5.972e24, BodyKind::TerrestrialCold)
                .with_colour([0, 0, 255]),
            BodyDefinition::new("Mars", at(-249_000_000_000.0, 21_970.0), 3_389_500.0, 6.39e23, BodyKind::TerrestrialCold)
                .with_colour([225, 133, 100]),
            BodyDefinition::new("Pluto", at(-7304.326e9, 3_710.0), 1_188_300.0, 0.01303e24, BodyKind::TerrestrialCold)
                .with_colour([150, 125, 100]),
        ],
    );
    definition.time_step = 86_400.0;
    definition
}
