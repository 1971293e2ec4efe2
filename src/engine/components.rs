//! Bevy component definitions
//!
//! This module contains all component markers and data structures used
//! to tag and identify entities in the Bevy ECS (Entity Component System).

use bevy::prelude::*;

/// Marker component for the offscreen rendering camera
///
/// Entities with this component are cameras that render to an offscreen
/// texture instead of a window.
#[derive(Component)]
pub struct OffscreenCamera;

/// Marker component for cameras that can be controlled by user input
///
/// Entities with this component respond to frontend mouse input for
/// orbit camera control (rotation, zoom) and are the target of the
/// one-shot auto-framing pass.
#[derive(Component)]
pub struct CameraController;

/// Marker component for the rotatable city root
///
/// The whole city hangs off one entity carrying this marker; side
/// navigation rotates it about the vertical axis.
#[derive(Component)]
pub struct CityRoot;

/// Live yaw of the city root, radians
///
/// Kept as a scalar alongside the `Transform` because the damping
/// target is an accumulated (unbounded) angle that a quaternion
/// cannot represent without losing whole turns.
#[derive(Component, Default)]
pub struct CityYaw(pub f32);

/// Marker component for city geometry that participates in framing
///
/// The auto-framing pass merges the world-space bounds of every
/// entity carrying this marker; no such entities means the scene has
/// not populated yet.
#[derive(Component)]
pub struct CityGeometry;

/// Marker beacon for one district, tagged with its side index
#[derive(Component)]
pub struct DistrictSite(pub usize);
