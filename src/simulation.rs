//! The simulation aggregate and its per-frame loop.
//!
//! A frame runs the clock's number of physics steps, records positions,
//! updates the camera and rebuilds the depth-sorted draw list.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::camera::Camera;
use crate::constellation::{Constellation, ConstellationDefinition, ConstellationError};
use crate::physics::PhysicsConfig;
use crate::render::drawable::{collect_drawables, Drawable};
use crate::time::SimulationClock;

/// Viewport size used until the window reports its real size.
pub const DEFAULT_VIEWPORT: DVec2 = DVec2::new(1280.0, 720.0);

/// Everything one run needs, passed explicitly to the frame loop.
#[derive(Resource, Clone, Debug)]
pub struct Simulation {
    pub constellation: Constellation,
    pub camera: Camera,
    pub clock: SimulationClock,
    draw_list: Vec<Drawable>,
}

impl Simulation {
    pub fn new(
        definition: &ConstellationDefinition,
        physics: PhysicsConfig,
        viewport: DVec2,
    ) -> Result<Self, ConstellationError> {
        let constellation = Constellation::new(definition, physics)?;
        let camera = Camera::new(&constellation, viewport);
        let clock = SimulationClock::new(constellation.time_step());
        let mut simulation = Self {
            constellation,
            camera,
            clock,
            draw_list: Vec::new(),
        };
        simulation.refresh_view();
        Ok(simulation)
    }

    /// Advance one rendered frame at wall-clock time `wall_time` (seconds).
    pub fn advance_frame(&mut self, wall_time: f64) {
        let dt = self.clock.base_time_step();
        let steps = self.clock.steps_this_frame();
        for _ in 0..steps {
            self.constellation.step(dt);
        }
        self.clock.update(wall_time);
        if steps > 0 {
            self.constellation.record_positions();
        }
        self.refresh_view();
    }

    /// Recompute screen positions and the draw list without stepping.
    pub fn refresh_view(&mut self) {
        self.camera.update(&self.constellation);
        self.draw_list = collect_drawables(&self.constellation, &self.camera);
    }

    /// Depth-sorted primitives for the current frame, farthest first.
    pub fn draw_list(&self) -> &[Drawable] {
        &self.draw_list
    }

    /// Track the body nearest to a screen point.
    pub fn track_at(&mut self, screen_position: DVec2) {
        self.camera.track_body(screen_position, &self.constellation);
    }

    /// Restore the identity rotation and track the center of mass again.
    pub fn reset_view(&mut self) {
        self.camera.reset_rotation();
        self.camera.reset_tracking(&self.constellation);
    }
}

/// System set for the frame loop; input runs before it, painting after.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdvanceFrameSet;

/// Plugin running the frame loop for an inserted [`Simulation`].
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            advance_simulation
                .in_set(AdvanceFrameSet)
                .run_if(resource_exists::<Simulation>),
        );
    }
}

fn advance_simulation(mut simulation: ResMut<Simulation>, time: Res<Time>) {
    simulation.advance_frame(time.elapsed_secs_f64());
}
