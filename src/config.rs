//! Configuration constants for the Tauri-Bevy integration
//!
//! This module contains all configurable parameters such as render
//! resolution, frame rates, and performance tuning settings. Framing
//! and rotation constants live next to their math in [`crate::city`].

/// Width of the offscreen render target in pixels.
///
/// Also the viewport width used for the narrow-viewport framing
/// breakpoint; the webview only scales the streamed frame.
pub const RENDER_WIDTH: u32 = 1280;

/// Height of the offscreen render target in pixels
pub const RENDER_HEIGHT: u32 = 720;

/// Target frames per second for the Bevy render loop
pub const TARGET_FPS: f64 = 60.0;

/// Number of pre-roll frames to skip before starting output
/// This allows the scene to fully load and stabilize
pub const PRE_ROLL_FRAMES: u32 = 30;

/// Camera control settings
pub mod camera {
    /// Vertical field of view of the city camera, degrees
    pub const FOV_DEGREES: f32 = 75.0;

    /// Rotation speed multiplier for mouse drag
    pub const ROTATION_SPEED: f32 = 0.005;

    /// Zoom speed multiplier for scroll wheel
    pub const ZOOM_SPEED: f32 = 0.5;

    /// Default minimum camera distance, replaced once auto-framing runs
    pub const DEFAULT_MIN_DISTANCE: f32 = 2.0;

    /// Default maximum camera distance, replaced once auto-framing runs
    pub const DEFAULT_MAX_DISTANCE: f32 = 60.0;

    /// Maximum pitch angle (radians) to prevent camera flipping
    pub const MAX_PITCH: f32 = 1.5;

    /// Minimum pitch angle (radians) to prevent camera flipping
    pub const MIN_PITCH: f32 = -1.5;
}

/// Performance monitoring settings
pub mod performance {
    /// Interval for logging performance stats (seconds)
    pub const STATS_PRINT_INTERVAL: f64 = 2.0;

    /// Number of frame timing samples to keep for averaging
    pub const FRAME_TIMING_SAMPLES: usize = 60;
}

/// Image compression settings
pub mod compression {
    /// JPEG quality level (0-100, higher = better quality but larger size)
    pub const JPEG_QUALITY: u8 = 85;
}
