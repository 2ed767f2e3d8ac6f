//! Orbit-sim - N-body Gravity Simulator
//!
//! A desktop application drawing a constellation of gravitating bodies
//! from any tracked viewpoint.
//!
//! Usage: `orbit-sim [preset]`, where `preset` is one of the ids in
//! [`orbit_sim::scenarios::PRESETS`] (default `solar_system`).

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orbit_sim::constellation::ConstellationError;
use orbit_sim::export::ExportPlugin;
use orbit_sim::input::InputPlugin;
use orbit_sim::physics::PhysicsConfig;
use orbit_sim::render::RenderPlugin;
use orbit_sim::scenarios;
use orbit_sim::simulation::{Simulation, SimulationPlugin, DEFAULT_VIEWPORT};

fn main() -> Result<(), ConstellationError> {
    let definition = match std::env::args().nth(1) {
        Some(id) => scenarios::find(&id)?,
        None => scenarios::default_definition(),
    };
    let simulation = Simulation::new(&definition, PhysicsConfig::default(), DEFAULT_VIEWPORT)?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: format!("Orbit-sim: {}", definition.name),
                resolution: (DEFAULT_VIEWPORT.x as u32, DEFAULT_VIEWPORT.y as u32).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Insert the simulation before plugins that depend on it
        .insert_resource(simulation)
        .add_plugins((SimulationPlugin, InputPlugin, RenderPlugin, ExportPlugin))
        .run();
    Ok(())
}
