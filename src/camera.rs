//! Camera state and the user-driven camera operations.
//!
//! Provides zoom, pan, rotation and body tracking for the 2D viewport.

use bevy::log::info;
use bevy::math::{DQuat, DVec2, DVec3};

use crate::constellation::Constellation;
use crate::types::{BodyId, AU, PIXEL_SIZE_CM};
use crate::view::BodyView;

/// Minimum zoom level (furthest out).
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum zoom level (closest in).
pub const MAX_ZOOM: f64 = 100_000.0;

/// Zoom ratio applied per zoom step.
pub const ZOOM_STEP: f64 = 1.1;

/// Radians of rotation per pixel of pointer motion.
pub const ROTATION_SENSITIVITY: f64 = 1.0 / 300.0;

/// How 3D positions relative to the tracked body are flattened to the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rotation {
    /// Rotate about the x axis by `pitch`, then about the y axis by `yaw`.
    Euler { pitch: f64, yaw: f64 },
    /// Orthographic projection onto the plane with this normal.
    Plane { normal: DVec3 },
}

impl Default for Rotation {
    fn default() -> Self {
        Self::Euler { pitch: 0.0, yaw: 0.0 }
    }
}

impl Rotation {
    /// Identity plane projection (looking down the z axis).
    pub fn plane() -> Self {
        Self::Plane { normal: DVec3::Z }
    }

    /// The identity rotation of the same strategy.
    pub fn identity(self) -> Self {
        match self {
            Self::Euler { .. } => Self::default(),
            Self::Plane { .. } => Self::plane(),
        }
    }

    /// Apply to a relative position. The result's `z` is the depth key.
    pub fn apply(&self, v: DVec3) -> DVec3 {
        match *self {
            Self::Euler { pitch, yaw } => {
                DQuat::from_rotation_y(yaw) * (DQuat::from_rotation_x(pitch) * v)
            }
            Self::Plane { normal } => {
                let n = normal.try_normalize().unwrap_or(DVec3::Z);
                let depth = n.dot(v);
                let projected = v - n * depth;
                DVec3::new(projected.x, projected.y, depth)
            }
        }
    }

    /// Turn the view by a pointer motion in pixels.
    pub fn nudge(&mut self, delta: DVec2) {
        match self {
            Self::Euler { pitch, yaw } => {
                *pitch += delta.y * ROTATION_SENSITIVITY;
                *yaw += delta.x * ROTATION_SENSITIVITY;
            }
            Self::Plane { normal } => {
                *normal += DVec3::new(delta.x, delta.y, 0.0) * ROTATION_SENSITIVITY;
            }
        }
    }
}

/// Settings that determine how the simulation looks.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSettings {
    /// Body drawn at the pan origin; a real body or the center of mass.
    pub tracked_body: BodyId,
    pub zoom_level: f64,
    /// Screen position of the tracked body, in pixels.
    pub pan_offset: DVec2,
    pub rotation: Rotation,
    pub show_tail: bool,
    pub show_labels: bool,
    pub scaled_radius: bool,
}

impl ViewSettings {
    pub fn new(tracked_body: BodyId, pan_offset: DVec2) -> Self {
        Self {
            tracked_body,
            zoom_level: 1.0,
            pan_offset,
            rotation: Rotation::default(),
            show_tail: false,
            show_labels: false,
            scaled_radius: false,
        }
    }

    /// Whether any parameter of the world-to-screen transform (or tail
    /// visibility) differs from `previous`.
    pub fn transform_changed(&self, previous: &ViewSettings) -> bool {
        self.tracked_body != previous.tracked_body
            || self.zoom_level != previous.zoom_level
            || self.pan_offset != previous.pan_offset
            || self.rotation != previous.rotation
            || self.show_tail != previous.show_tail
    }
}

/// Owns the view settings and every body's screen-space state.
#[derive(Clone, Debug)]
pub struct Camera {
    settings: ViewSettings,
    viewport: DVec2,
    scale_factor: f64,
    views: Vec<BodyView>,
}

impl Camera {
    /// Camera tracking the center of mass, centered in `viewport`.
    pub fn new(constellation: &Constellation, viewport: DVec2) -> Self {
        let views = constellation
            .all_bodies()
            .map(|body| BodyView::new(body.id, body.tail_length))
            .collect();
        Self {
            settings: ViewSettings::new(constellation.center_of_mass_id(), viewport / 2.0),
            viewport,
            scale_factor: constellation.scale_factor(),
            views,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    pub fn viewport_center(&self) -> DVec2 {
        self.viewport / 2.0
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn views(&self) -> &[BodyView] {
        &self.views
    }

    pub fn view(&self, id: BodyId) -> Option<&BodyView> {
        self.views.iter().find(|view| view.body() == id)
    }

    /// Pixels per AU at the current zoom level.
    pub fn spatial_scale(&self) -> f64 {
        self.scale_factor * self.settings.zoom_level * AU
    }

    /// On-screen length of one AU in centimeters.
    pub fn spatial_scale_cm(&self) -> f64 {
        self.spatial_scale() * PIXEL_SIZE_CM
    }

    pub fn zoom_in(&mut self) {
        self.settings.zoom_level = (self.settings.zoom_level * ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.settings.zoom_level = (self.settings.zoom_level / ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn pan(&mut self, delta: DVec2) {
        self.settings.pan_offset += delta;
    }

    pub fn rotate(&mut self, delta: DVec2) {
        self.settings.rotation.nudge(delta);
    }

    /// Track the body drawn closest to `screen_position` and re-center on it.
    pub fn track_body(&mut self, screen_position: DVec2, constellation: &Constellation) -> Option<BodyId> {
        let closest = self
            .views
            .iter()
            .filter_map(|view| {
                view.screen_position()
                    .map(|p| (view.body(), p.truncate().distance(screen_position)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)?;

        self.settings.tracked_body = closest;
        self.settings.pan_offset = self.viewport_center();
        if let Some(body) = constellation.body(closest) {
            info!("Tracking {}", body.name);
        }
        Some(closest)
    }

    /// Track the center of mass again.
    pub fn reset_tracking(&mut self, constellation: &Constellation) {
        self.settings.tracked_body = constellation.center_of_mass_id();
        self.settings.pan_offset = self.viewport_center();
    }

    pub fn reset_rotation(&mut self) {
        self.settings.rotation = self.settings.rotation.identity();
        self.settings.pan_offset = self.viewport_center();
    }

    pub fn toggle_tail(&mut self) {
        self.settings.show_tail = !self.settings.show_tail;
        info!("Tails {}", on_off(self.settings.show_tail));
    }

    pub fn toggle_labels(&mut self) {
        self.settings.show_labels = !self.settings.show_labels;
        info!("Labels {}", on_off(self.settings.show_labels));
    }

    pub fn toggle_scaled_radius(&mut self) {
        self.settings.scaled_radius = !self.settings.scaled_radius;
        info!("Bodies to scale: {}", on_off(self.settings.scaled_radius));
    }

    /// Adopt a new viewport size, keeping the same point centered.
    pub fn resize(&mut self, size: DVec2) {
        if size == self.viewport {
            return;
        }
        self.settings.pan_offset += (size - self.viewport) / 2.0;
        self.viewport = size;
    }

    /// Recompute every body's screen position for this frame.
    pub fn update(&mut self, constellation: &Constellation) {
        let tracked = constellation
            .body(self.settings.tracked_body)
            .expect("tracked body is part of the constellation");
        for view in &mut self.views {
            let body = constellation
                .body(view.body())
                .expect("every view belongs to a body");
            view.update_screen_position(body, tracked, &self.settings, self.scale_factor);
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
