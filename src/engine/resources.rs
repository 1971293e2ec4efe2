//! Bevy resource definitions
//!
//! This module contains all global resources used by Bevy systems.
//! Resources are singleton data that can be accessed by any system.

use bevy::prelude::*;
use std::time::Duration;

use crate::city::sides::SideRotation;
use crate::config::camera::{DEFAULT_MAX_DISTANCE, DEFAULT_MIN_DISTANCE};
use crate::tauri_bridge::shared_state::{
    SharedFrameBuffer, SharedMouseInput, SharedPerfStats, SharedSideInput,
};

// =============================================================================
// City Rotation
// =============================================================================

/// Side the city is currently showing
///
/// Owned here, in the calling layer; [`SideRotation`] itself only
/// records transitions it is told about.
#[derive(Resource, Default)]
pub struct CurrentSide(pub usize);

/// Accumulated target rotation of the city root
///
/// Scoped to one scene; reset when the scene is torn down.
#[derive(Resource, Default)]
pub struct CityRotation(pub SideRotation);

/// Resource to hold queued side-selection requests in Bevy
#[derive(Resource)]
pub struct SideInputRes(pub SharedSideInput);

// =============================================================================
// Camera Control
// =============================================================================

/// Orbit camera state for spherical coordinate camera control
#[derive(Resource)]
pub struct OrbitCameraState {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians), clamped to avoid gimbal lock
    pub pitch: f32,
    /// Distance from the camera to the center point
    pub distance: f32,
    /// The point the camera orbits around
    pub center: Vec3,
    /// Closest allowed zoom, overwritten by auto-framing
    pub min_distance: f32,
    /// Farthest allowed zoom, overwritten by auto-framing
    pub max_distance: f32,
}

impl Default for OrbitCameraState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.4, // Slight downward angle
            distance: 18.0,
            center: Vec3::ZERO,
            min_distance: DEFAULT_MIN_DISTANCE,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

/// One-shot auto-framing gate
///
/// Terminal at `Framed` for the lifetime of a loaded scene; the
/// framing system polls every frame but only ever fires once.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingState {
    /// Framing has not succeeded yet (scene may still be empty).
    #[default]
    NotFramed,
    /// Camera was framed; never recompute for this scene.
    Framed,
}

/// Resource to hold shared mouse input in Bevy
#[derive(Resource)]
pub struct MouseInputRes(pub SharedMouseInput);

// =============================================================================
// Rendering
// =============================================================================

/// Handle to the offscreen render target texture
#[derive(Resource)]
pub struct RenderTargetHandle(pub Handle<Image>);

/// Shared frame buffer resource for Bevy
#[derive(Resource, Clone)]
pub struct FrameBufferRes(pub SharedFrameBuffer);

// =============================================================================
// Frame Management
// =============================================================================

/// Counter for total frames rendered
#[derive(Resource, Default)]
pub struct FrameCount(pub u32);

/// Number of pre-roll frames to skip before starting output
#[derive(Resource, Default)]
pub struct PreRollFrames(pub u32);

/// Frame rate limiter to control output FPS
#[derive(Resource)]
pub struct FrameRateLimiter {
    pub last_frame_time: std::time::Instant,
    pub min_frame_interval: Duration,
}

impl FrameRateLimiter {
    pub fn new(target_fps: f64) -> Self {
        Self {
            last_frame_time: std::time::Instant::now(),
            min_frame_interval: Duration::from_secs_f64(1.0 / target_fps),
        }
    }
}

impl Default for FrameRateLimiter {
    fn default() -> Self {
        Self::new(60.0) // Default to 60 FPS
    }
}

// =============================================================================
// Performance Monitoring
// =============================================================================

/// Performance timing tracker for frame processing
#[derive(Resource, Default)]
pub struct FrameTimings {
    pub last_print_time: f64,
    pub frame_times: Vec<f64>,
}

/// Shared performance statistics resource
#[derive(Resource)]
pub struct PerfStatsRes(pub SharedPerfStats);

// =============================================================================
// Channel Communication (Main World <-> Render World)
// =============================================================================

use crossbeam_channel::{Receiver, Sender};

/// Receives data from render world
#[derive(Resource, Deref)]
pub struct MainWorldReceiver(pub Receiver<Vec<u8>>);

/// Sends data to main world
#[derive(Resource, Deref)]
pub struct RenderWorldSender(pub Sender<Vec<u8>>);
