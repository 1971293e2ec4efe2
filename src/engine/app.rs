//! Bevy application setup and execution
//!
//! This module handles the creation and configuration of the Bevy app,
//! including plugin registration and system scheduling.

use bevy::{
    app::{App, ScheduleRunnerPlugin},
    prelude::*,
    transform::TransformSystems,
    window::ExitCondition,
};
use std::thread;
use std::time::Duration;

use crate::config::{PRE_ROLL_FRAMES, TARGET_FPS};
use crate::engine::plugins::ImageCopyPlugin;
use crate::engine::resources::{
    CityRotation, CurrentSide, FrameBufferRes, FrameCount, FrameRateLimiter, FrameTimings,
    FramingState, MouseInputRes, OrbitCameraState, PerfStatsRes, PreRollFrames, SideInputRes,
};
use crate::engine::systems::{
    apply_side_input, auto_frame_camera, extract_and_process_frame, follow_side_rotation,
    highlight_active_district, setup_scene, update_camera_from_input,
};
use crate::tauri_bridge::shared_state::{
    SharedFrameBuffer, SharedMouseInput, SharedPerfStats, SharedSideInput,
};

/// Create and configure the Bevy application
pub fn create_app(
    frame_buffer: SharedFrameBuffer,
    perf_stats: SharedPerfStats,
    mouse_input: SharedMouseInput,
    side_input: SharedSideInput,
) -> App {
    let mut app = App::new();

    // Use DefaultPlugins but configure for headless operation
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: None,
                exit_condition: ExitCondition::DontExit,
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    );

    // Add schedule runner for controlled frame rate
    app.add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
        1.0 / TARGET_FPS,
    )));

    // Add custom plugins
    app.add_plugins(ImageCopyPlugin);

    // Register systems. Side input resolves before the follower so a
    // click is eased starting the same tick it arrives.
    app.add_systems(Startup, setup_scene);
    app.add_systems(
        Update,
        (
            apply_side_input,
            follow_side_rotation.after(apply_side_input),
            highlight_active_district.after(apply_side_input),
            update_camera_from_input,
        ),
    );
    // Framing needs propagated GlobalTransforms for world-space bounds
    app.add_systems(
        PostUpdate,
        auto_frame_camera.after(TransformSystems::Propagate),
    );
    app.add_systems(Last, extract_and_process_frame);

    // Insert resources
    app.insert_resource(FrameBufferRes(frame_buffer));
    app.insert_resource(PerfStatsRes(perf_stats));
    app.insert_resource(MouseInputRes(mouse_input));
    app.insert_resource(SideInputRes(side_input));
    app.insert_resource(CurrentSide::default());
    app.insert_resource(CityRotation::default());
    app.insert_resource(FramingState::default());
    app.insert_resource(OrbitCameraState::default());
    app.insert_resource(FrameCount::default());
    app.insert_resource(PreRollFrames(PRE_ROLL_FRAMES));
    app.insert_resource(FrameTimings::default());
    app.insert_resource(FrameRateLimiter::default());

    info!("engine configured (headless mode with GPU-CPU pipeline)");
    app
}

/// Start the Bevy engine in a background thread
pub fn start_engine(
    buffer: SharedFrameBuffer,
    perf_stats: SharedPerfStats,
    mouse_input: SharedMouseInput,
    side_input: SharedSideInput,
) {
    thread::spawn(move || {
        let mut app = create_app(buffer, perf_stats, mouse_input, side_input);
        info!("running render loop");
        app.run();
    });
}
