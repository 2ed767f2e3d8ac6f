//! Orbit-sim - N-body Gravity Simulator
//!
//! A library crate providing the simulation core (bodies, pairwise forces,
//! integration, constellations) and its view pipeline (camera, screen
//! trails, depth-sorted draw list) for testing and integration purposes.

pub mod body;
pub mod camera;
pub mod constellation;
pub mod export;
pub mod input;
pub mod physics;
pub mod render;
pub mod scenarios;
pub mod simulation;
pub mod time;
pub mod types;
pub mod view;

#[cfg(test)]
pub mod test_utils;
