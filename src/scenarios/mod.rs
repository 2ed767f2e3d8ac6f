//! Constellation presets selectable at startup.
//!
//! Provides a small catalogue of ready-made constellations:
//! - Solar system
//! - Binary star and double star
//! - Inclined orbit (orbital-element input)
//! - Inner planets with a one-day step

pub mod presets;

use crate::constellation::{ConstellationDefinition, ConstellationError};

pub use presets::PRESETS;

/// A named, buildable constellation.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    /// Identifier used on the command line.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Brief description of the preset.
    pub description: &'static str,
    pub build: fn() -> ConstellationDefinition,
}

/// Build the preset with the given id.
pub fn find(id: &str) -> Result<ConstellationDefinition, ConstellationError> {
    PRESETS
        .iter()
        .find(|preset| preset.id == id)
        .map(|preset| (preset.build)())
        .ok_or_else(|| ConstellationError::UnknownPreset(id.to_string()))
}

/// The preset used when none is named.
pub fn default_definition() -> ConstellationDefinition {
    (PRESETS[0].build)()
}
