//! Painter for the depth-sorted draw list.

use bevy::math::DVec2;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::render::drawable::Primitive;
use crate::render::to_color32;
use crate::simulation::Simulation;
use crate::types::LabelPlacement;

const TRAIL_WIDTH: f32 = 1.0;
const LABEL_FONT_SIZE: f32 = 13.0;

fn pos(p: DVec2) -> egui::Pos2 {
    egui::pos2(p.x as f32, p.y as f32)
}

/// Paint every primitive in list order, farthest first.
pub fn paint_scene(mut contexts: EguiContexts, simulation: Res<Simulation>) -> Result {
    let ctx = contexts.ctx_mut()?;
    let painter = ctx.layer_painter(egui::LayerId::background());
    let constellation = &simulation.constellation;

    for drawable in simulation.draw_list() {
        let Some(body) = constellation.body(drawable.body) else {
            continue;
        };
        let colour = to_color32(body.colour);
        match drawable.primitive {
            Primitive::Image { center, radius } => {
                painter.circle_filled(pos(center), radius as f32, colour);
            }
            Primitive::Line { start, end } => {
                painter.line_segment([pos(start), pos(end)], egui::Stroke::new(TRAIL_WIDTH, colour));
            }
            Primitive::Label { anchor, placement } => {
                let align = match placement {
                    LabelPlacement::BottomRight => egui::Align2::LEFT_TOP,
                    LabelPlacement::TopLeft => egui::Align2::RIGHT_BOTTOM,
                };
                painter.text(
                    pos(anchor),
                    align,
                    &body.name,
                    egui::FontId::proportional(LABEL_FONT_SIZE),
                    egui::Color32::from_gray(220),
                );
            }
        }
    }
    Ok(())
}
