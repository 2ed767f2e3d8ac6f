//! Core physics types and constants for the orbit simulator.

use std::fmt;

/// Physical constants (SI units)

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.67408e-11;

/// Astronomical unit in meters
pub const AU: f64 = 149_597_871_000.0;

/// Meters to AU
pub const METERS_TO_AU: f64 = 1.0 / AU;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// One Julian year in seconds.
pub const SECONDS_PER_YEAR: f64 = 365.25 * SECONDS_PER_DAY;

/// Mass of the Sun in kilograms.
pub const SUN_MASS: f64 = 1.98847e30;

/// Radius of the Sun in meters.
pub const SUN_RADIUS: f64 = 696_342_000.0;

/// Physical size of one screen pixel in centimeters, used for the scale readout.
pub const PIXEL_SIZE_CM: f64 = 0.026;

/// Stable identity of a body for the duration of a run.
///
/// Real bodies are numbered by insertion order. The center of mass gets the
/// index directly after the last real body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// RGB colour used for trails and body markers.
pub type Rgb = [u8; 3];

/// Category of a body, resolved once into an asset and a default colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Star,
    TerrestrialHot,
    #[default]
    TerrestrialCold,
    GasGiant,
    IceGiant,
    Moon,
    CenterOfMass,
}

/// Asset lookup entry for a body category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Appearance {
    /// Asset identifier understood by the drawing backend.
    pub asset: &'static str,
    /// Colour used when the body has no explicit colour.
    pub colour: Rgb,
}

static APPEARANCES: [(BodyKind, Appearance); 7] = [
    (BodyKind::Star, Appearance { asset: "star", colour: [255, 214, 120] }),
    (BodyKind::TerrestrialHot, Appearance { asset: "terrestrial_hot", colour: [214, 110, 70] }),
    (BodyKind::TerrestrialCold, Appearance { asset: "terrestrial_cold", colour: [90, 140, 210] }),
    (BodyKind::GasGiant, Appearance { asset: "gas_giant", colour: [210, 180, 140] }),
    (BodyKind::IceGiant, Appearance { asset: "ice_giant", colour: [140, 200, 230] }),
    (BodyKind::Moon, Appearance { asset: "moon", colour: [170, 170, 170] }),
    (BodyKind::CenterOfMass, Appearance { asset: "center_of_mass", colour: [255, 0, 0] }),
];

impl BodyKind {
    pub fn appearance(self) -> Appearance {
        APPEARANCES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, appearance)| *appearance)
            .unwrap_or(APPEARANCES[2].1)
    }
}

/// Where a body's label sits relative to its marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelPlacement {
    #[default]
    BottomRight,
    TopLeft,
}
