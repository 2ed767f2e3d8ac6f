//! Heads-up display with time, scale and speed readouts.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::simulation::Simulation;

/// Values shown in the heads-up display.
#[derive(Clone, Debug, PartialEq)]
pub struct HudReadout {
    pub constellation: String,
    pub elapsed_years: f64,
    /// Centimeters on screen per AU.
    pub spatial_scale_cm: f64,
    pub days_per_second: f64,
    pub steps_per_frame: u32,
    pub to_scale: bool,
    pub paused: bool,
}

impl HudReadout {
    pub fn from_simulation(simulation: &Simulation) -> Self {
        Self {
            constellation: simulation.constellation.name().to_string(),
            elapsed_years: simulation.clock.elapsed_years(),
            spatial_scale_cm: simulation.camera.spatial_scale_cm(),
            days_per_second: simulation.clock.days_per_second(),
            steps_per_frame: simulation.clock.steps_per_frame(),
            to_scale: simulation.camera.settings().scaled_radius,
            paused: simulation.clock.is_paused(),
        }
    }

    /// Display lines, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.constellation.clone(),
            format!("Time elapsed: {:.2} years", self.elapsed_years),
            format!("{:.2} cm = 1 AU", self.spatial_scale_cm),
            format!(
                "1 second = {:.1} days ({} steps/frame)",
                self.days_per_second, self.steps_per_frame
            ),
        ];
        if self.to_scale {
            lines.push("Bodies to scale".to_string());
        }
        if self.paused {
            lines.push("Paused".to_string());
        }
        lines
    }
}

pub fn hud_system(mut contexts: EguiContexts, simulation: Res<Simulation>) -> Result {
    let ctx = contexts.ctx_mut()?;
    let readout = HudReadout::from_simulation(&simulation);

    egui::Area::new(egui::Id::new("hud"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .interactable(false)
        .show(ctx, |ui| {
            for line in readout.lines() {
                ui.label(
                    egui::RichText::new(line)
                        .monospace()
                        .color(egui::Color32::from_gray(230)),
                );
            }
        });
    Ok(())
}
