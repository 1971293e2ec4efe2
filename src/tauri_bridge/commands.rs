//! Tauri command handlers
//!
//! This module contains all the Tauri command functions that can be invoked
//! from the frontend JavaScript/TypeScript code: frame fetching, marker
//! stat cards, side navigation, camera input, and performance stats.

use base64::{engine::general_purpose::STANDARD, Engine};
use tauri::State;

use super::shared_state::{
    FrameResponse, PerformanceStats, SharedFrameBuffer, SharedMouseInput,
    SharedPerfStats, SharedSideInput, SideRequest,
};
use crate::city::markers::{district_markers, DistrictMarker};
use crate::city::sides::SIDE_COUNT;
use crate::config::{RENDER_HEIGHT, RENDER_WIDTH};

/// Get the current rendered frame as Base64-encoded RGBA data
#[tauri::command]
pub fn get_frame(
    state: State<SharedFrameBuffer>,
    perf_state: State<SharedPerfStats>,
) -> Result<FrameResponse, String> {
    let cmd_start = std::time::Instant::now();

    let guard = state.0.lock().map_err(|e| e.to_string())?;
    match &*guard {
        Some(rgba_data) => {
            let data_fetch_time = cmd_start.elapsed().as_secs_f64() * 1000.0;

            // Measure Base64 encoding time
            let encode_start = std::time::Instant::now();
            let base64_data = STANDARD.encode(rgba_data);
            let encode_time = encode_start.elapsed().as_secs_f64() * 1000.0;

            if let Ok(mut stats) = perf_state.0.lock() {
                stats.tauri_get_frame_ms = data_fetch_time;
                stats.tauri_serialize_ms = encode_time;
            }

            Ok(FrameResponse {
                data: base64_data,
                width: RENDER_WIDTH,
                height: RENDER_HEIGHT,
            })
        }
        None => Err("No frame yet (scene still loading)".into()),
    }
}

/// Get the render resolution
#[tauri::command]
pub fn get_render_size() -> (u32, u32) {
    (RENDER_WIDTH, RENDER_HEIGHT)
}

/// Get performance statistics
#[tauri::command]
pub fn get_performance_stats(state: State<SharedPerfStats>) -> Result<PerformanceStats, String> {
    let guard = state.0.lock().map_err(|e| e.to_string())?;
    Ok(guard.clone())
}

/// Get the fixed set of district marker stat cards
#[tauri::command]
pub fn get_markers() -> Vec<DistrictMarker> {
    district_markers()
}

/// Select a city side directly (compass segment click)
///
/// Side indices outside `[0, 6)` are a frontend bug and are rejected
/// here rather than queued.
#[tauri::command]
pub fn select_side(state: State<SharedSideInput>, side: usize) -> Result<(), String> {
    if side >= SIDE_COUNT {
        return Err(format!("side index out of range: {side}"));
    }
    let mut guard = state.0.lock().map_err(|e| e.to_string())?;
    guard.push(SideRequest::Select(side));
    Ok(())
}

/// Step to the adjacent side (prev/next buttons)
#[tauri::command]
pub fn step_side(state: State<SharedSideInput>, forward: bool) -> Result<(), String> {
    let mut guard = state.0.lock().map_err(|e| e.to_string())?;
    guard.push(if forward {
        SideRequest::Next
    } else {
        SideRequest::Prev
    });
    Ok(())
}

/// Receive mouse input from frontend for camera control
/// Input deltas are accumulated until consumed by Bevy
#[tauri::command]
pub fn send_mouse_input(
    state: State<SharedMouseInput>,
    delta_x: f32,
    delta_y: f32,
    scroll_delta: f32,
    left_button: bool,
    right_button: bool,
) -> Result<(), String> {
    let mut guard = state.0.lock().map_err(|e| e.to_string())?;
    // Accumulate deltas (will be cleared when Bevy reads them)
    guard.delta_x += delta_x;
    guard.delta_y += delta_y;
    guard.scroll_delta += scroll_delta;
    // Button state is just the current state
    guard.left_button = left_button;
    guard.right_button = right_button;
    Ok(())
}
