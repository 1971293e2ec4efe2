//! Headless city snapshot
//!
//! Renders the hexagonal city once without a window and saves the result
//! to disk, exercising the same scene setup, auto-framing, and GPU-to-CPU
//! copy pipeline the Tauri app streams through. Derived from the official
//! Bevy headless renderer example:
//! <https://github.com/bevyengine/bevy/blob/main/examples/app/headless_renderer.rs>

use bevy::{
    app::{AppExit, ScheduleRunnerPlugin},
    prelude::*,
    transform::TransformSystems,
    window::ExitCondition,
};
use std::{path::PathBuf, time::Duration};

use hexcity_lib::config::{RENDER_HEIGHT, RENDER_WIDTH};
use hexcity_lib::engine::plugins::image_copy::remove_row_padding;
use hexcity_lib::engine::plugins::ImageCopyPlugin;
use hexcity_lib::engine::resources::{FramingState, MainWorldReceiver, OrbitCameraState};
use hexcity_lib::engine::systems::{auto_frame_camera, setup_scene};

/// Frames to let the scene render and the framing pass settle before
/// the capture is taken.
const PRE_ROLL_FRAMES: u32 = 40;

/// Countdown until the snapshot is saved
#[derive(Resource)]
struct SnapshotCountdown(u32);

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: None,
                    exit_condition: ExitCondition::DontExit,
                    ..default()
                }),
        )
        .add_plugins(ImageCopyPlugin)
        .add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .insert_resource(SnapshotCountdown(PRE_ROLL_FRAMES))
        .insert_resource(FramingState::default())
        .insert_resource(OrbitCameraState::default())
        .add_systems(Startup, setup_scene)
        .add_systems(
            PostUpdate,
            auto_frame_camera.after(TransformSystems::Propagate),
        )
        .add_systems(Last, save_snapshot)
        .run();
}

/// Drain frames until the countdown elapses, then save one PNG and exit
fn save_snapshot(
    receiver: Res<MainWorldReceiver>,
    mut countdown: ResMut<SnapshotCountdown>,
    mut app_exit_writer: MessageWriter<AppExit>,
) {
    if countdown.0 > 0 {
        while receiver.try_recv().is_ok() {}
        countdown.0 -= 1;
        return;
    }

    let mut image_data = Vec::new();
    while let Ok(data) = receiver.try_recv() {
        image_data = data;
    }
    if image_data.is_empty() {
        return;
    }

    let Some(rgba) = remove_row_padding(&image_data, RENDER_WIDTH, RENDER_HEIGHT) else {
        return;
    };
    let Some(img) = image::RgbaImage::from_raw(RENDER_WIDTH, RENDER_HEIGHT, rgba) else {
        error!("frame size mismatch, not saving");
        app_exit_writer.write(AppExit::error());
        return;
    };

    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("city_snapshot.png");
    match img.save(&path) {
        Ok(()) => info!("snapshot saved to {}", path.display()),
        Err(e) => error!("failed to save snapshot: {e}"),
    }

    app_exit_writer.write(AppExit::Success);
}
