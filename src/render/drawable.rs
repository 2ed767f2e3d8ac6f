//! Depth-sorted draw list.
//!
//! Every body contributes an image, optional trail segments and an optional
//! label. The list is sorted once by depth and painted back to front, so
//! nearer primitives cover farther ones regardless of body order.

use bevy::math::{DVec2, DVec3};

use crate::body::Body;
use crate::camera::Camera;
use crate::constellation::Constellation;
use crate::types::{BodyId, LabelPlacement};

/// Smallest marker radius in pixels when bodies are not drawn to scale.
pub const MIN_MARKER_RADIUS: f64 = 1.0;

/// A drawing instruction in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// Body image centered at `center`.
    Image { center: DVec2, radius: f64 },
    /// Trail segment.
    Line { start: DVec2, end: DVec2 },
    /// Body name anchored at `anchor`.
    Label { anchor: DVec2, placement: LabelPlacement },
}

/// A primitive belonging to a body, tagged with its depth key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drawable {
    pub body: BodyId,
    /// Larger is nearer the viewer. Used for ordering only.
    pub depth: f64,
    pub primitive: Primitive,
}

/// On-screen radius of a body's image.
///
/// To scale: world radius times scale factor and zoom. Otherwise a marker
/// that grows logarithmically with zoom. The center of mass is never to scale.
pub fn marker_radius(body: &Body, zoom_level: f64, scaled_radius: bool, scale_factor: f64) -> f64 {
    if scaled_radius && !body.is_virtual() {
        body.radius * scale_factor * zoom_level
    } else {
        (zoom_level * 10.0).ln().max(MIN_MARKER_RADIUS)
    }
}

/// Axis-aligned screen rectangle used for visibility tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub min: DVec2,
    pub max: DVec2,
}

impl Viewport {
    pub fn new(size: DVec2) -> Self {
        Self {
            min: DVec2::ZERO,
            max: size,
        }
    }

    fn overlaps(&self, min: DVec2, max: DVec2) -> bool {
        min.x <= self.max.x && max.x >= self.min.x && min.y <= self.max.y && max.y >= self.min.y
    }

    /// Whether any part of `primitive` can land inside the viewport.
    ///
    /// Label extents depend on the font, so labels are never culled.
    pub fn may_show(&self, primitive: &Primitive) -> bool {
        match *primitive {
            Primitive::Image { center, radius } => {
                self.overlaps(center - DVec2::splat(radius), center + DVec2::splat(radius))
            }
            Primitive::Line { start, end } => self.overlaps(start.min(end), start.max(end)),
            Primitive::Label { .. } => true,
        }
    }
}

/// Primitives for one body, unsorted.
pub fn body_drawables(body: &Body, camera: &Camera, out: &mut Vec<Drawable>) {
    let Some(view) = camera.view(body.id) else {
        return;
    };
    let Some(current) = view.screen_position() else {
        return;
    };
    let settings = camera.settings();
    let radius = marker_radius(body, settings.zoom_level, settings.scaled_radius, camera.scale_factor());
    let center = current.truncate();

    out.push(Drawable {
        body: body.id,
        depth: current.z,
        primitive: Primitive::Image { center, radius },
    });

    // The tracked body's trail collapses onto the pan origin, so it is skipped.
    if settings.show_tail && body.id != settings.tracked_body {
        let points: Vec<&DVec3> = view.screen_trail().collect();
        for pair in points.windows(2) {
            out.push(Drawable {
                body: body.id,
                depth: pair[0].z,
                primitive: Primitive::Line {
                    start: pair[0].truncate(),
                    end: pair[1].truncate(),
                },
            });
        }
    }

    if settings.show_labels {
        let anchor = match body.label_placement {
            LabelPlacement::BottomRight => center + DVec2::splat(radius),
            LabelPlacement::TopLeft => center - DVec2::splat(radius),
        };
        out.push(Drawable {
            body: body.id,
            depth: current.z,
            primitive: Primitive::Label {
                anchor,
                placement: body.label_placement,
            },
        });
    }
}

/// Gather, cull and depth-sort the primitives of every body.
///
/// The result is in paint order: farthest first.
pub fn collect_drawables(constellation: &Constellation, camera: &Camera) -> Vec<Drawable> {
    let viewport = Viewport::new(camera.viewport());
    let mut drawables = Vec::new();
    for body in constellation.all_bodies() {
        body_drawables(body, camera, &mut drawables);
    }
    drawables.retain(|d| viewport.may_show(&d.primitive));
    sort_back_to_front(&mut drawables);
    drawables
}

/// Stable sort by ascending depth.
pub fn sort_back_to_front(drawables: &mut [Drawable]) {
    drawables.sort_by(|a, b| a.depth.total_cmp(&b.depth));
}
