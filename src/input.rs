//! Keyboard, mouse and window input.
//!
//! Mouse: left click tracks the body under the cursor, left drag pans,
//! right drag rotates, the wheel zooms. Keyboard shortcuts:
//!
//! | Key   | Action                         |
//! |-------|--------------------------------|
//! | Space | pause / resume                 |
//! | Up    | double steps per frame         |
//! | Down  | halve steps per frame          |
//! | T     | toggle trails                  |
//! | L     | toggle labels                  |
//! | S     | toggle radii to scale          |
//! | R     | reset rotation and tracking    |
//! | G     | start / stop frame recording   |
//! | Esc   | cancel frame export            |

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::export::ExportQueue;
use crate::simulation::{AdvanceFrameSet, Simulation};

/// Cursor travel in pixels below which a left press and release is a click.
pub const CLICK_THRESHOLD: f64 = 10.0;

/// Distinguishes clicks from drags on the left button.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct ClickTracker {
    /// Cursor position when the left button went down.
    pressed_at: Option<DVec2>,
    /// Path length the cursor covered since the press.
    travelled: f64,
}

impl ClickTracker {
    pub fn press(&mut self, position: DVec2) {
        self.pressed_at = Some(position);
        self.travelled = 0.0;
    }

    /// Accumulate cursor motion while the button is held.
    pub fn moved(&mut self, delta: DVec2) {
        if self.pressed_at.is_some() {
            self.travelled += delta.length();
        }
    }

    /// Whether releasing at `position` completes a click.
    ///
    /// A drag that wanders off and comes back is still a drag.
    pub fn release(&mut self, position: DVec2) -> bool {
        let travelled = std::mem::take(&mut self.travelled);
        self.pressed_at.take().is_some_and(|start| {
            travelled <= CLICK_THRESHOLD && start.distance(position) <= CLICK_THRESHOLD
        })
    }

    /// Forget the press, e.g. when released outside the window.
    pub fn clear(&mut self) {
        self.pressed_at = None;
        self.travelled = 0.0;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }
}

/// Plugin mapping input onto the [`Simulation`]; runs before the frame advances.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClickTracker>().add_systems(
            Update,
            (sync_viewport, keyboard_shortcuts, mouse_controls)
                .chain()
                .before(AdvanceFrameSet)
                .run_if(resource_exists::<Simulation>),
        );
    }
}

/// Handle keyboard shortcuts for simulation and view control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut simulation: ResMut<Simulation>,
    export: Option<ResMut<ExportQueue>>,
) {
    if keys.just_pressed(KeyCode::Space) {
        simulation.clock.toggle_pause();
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        simulation.clock.faster();
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        simulation.clock.slower();
    }
    if keys.just_pressed(KeyCode::KeyT) {
        simulation.camera.toggle_tail();
    }
    if keys.just_pressed(KeyCode::KeyL) {
        simulation.camera.toggle_labels();
    }
    if keys.just_pressed(KeyCode::KeyS) {
        simulation.camera.toggle_scaled_radius();
    }
    if keys.just_pressed(KeyCode::KeyR) {
        simulation.reset_view();
        info!("View reset");
    }
    if keys.any_just_pressed([KeyCode::KeyG, KeyCode::Escape]) {
        let Some(mut queue) = export else {
            warn!("Frame export is not available");
            return;
        };
        if keys.just_pressed(KeyCode::Escape) {
            if queue.is_recording() || queue.pending() > 0 {
                queue.cancel();
            }
        } else {
            queue.toggle_recording();
        }
    }
}

/// Handle clicking, panning, rotating and zooming with the mouse.
fn mouse_controls(
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut tracker: ResMut<ClickTracker>,
    mut simulation: ResMut<Simulation>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let cursor = window.cursor_position().map(|p| p.as_dvec2());

    if scroll.delta.y > 0.0 {
        simulation.camera.zoom_in();
    } else if scroll.delta.y < 0.0 {
        simulation.camera.zoom_out();
    }

    let delta = motion.delta.as_dvec2();
    if delta != DVec2::ZERO {
        if mouse.pressed(MouseButton::Left) && tracker.is_pressed() {
            tracker.moved(delta);
            simulation.camera.pan(delta);
        } else if mouse.pressed(MouseButton::Right) {
            simulation.camera.rotate(delta);
        }
    }

    if mouse.just_pressed(MouseButton::Left)
        && let Some(position) = cursor
    {
        tracker.press(position);
    }

    if mouse.just_released(MouseButton::Left) {
        match cursor {
            Some(position) if tracker.release(position) => simulation.track_at(position),
            Some(_) => {}
            None => tracker.clear(),
        }
    }
}

/// Keep the camera viewport in step with the window size.
fn sync_viewport(window_query: Query<&Window, With<PrimaryWindow>>, mut simulation: ResMut<Simulation>) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let size = window.size().as_dvec2();
    if size.x > 0.0 && size.y > 0.0 && size != simulation.camera.viewport() {
        debug!("Viewport resized to {}x{}", size.x, size.y);
        simulation.camera.resize(size);
    }
}
