//! Rendering for the simulator.
//!
//! The depth-sorted draw list is painted with egui onto the background
//! layer, so primitives appear in exactly the order they were sorted.
//! A small heads-up display sits on top.

pub mod drawable;
pub mod hud;
mod scene;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::simulation::Simulation;

pub use self::drawable::{Drawable, Primitive};
pub use self::hud::HudReadout;

/// Plugin painting the simulation every frame.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, spawn_camera)
            .add_systems(
                EguiPrimaryContextPass,
                (scene::paint_scene, hud::hud_system)
                    .chain()
                    .run_if(resource_exists::<Simulation>),
            );
    }
}

/// egui needs a camera to render into.
fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Convert an 8-bit RGB triple to an egui colour.
pub fn to_color32(rgb: crate::types::Rgb) -> bevy_egui::egui::Color32 {
    bevy_egui::egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}
