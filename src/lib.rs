//! Hexcity: an interactive hexagonal 3D city map
//!
//! The city is rendered headless by Bevy in a background thread and
//! streamed into a Tauri webview. Six fixed 60°-apart "sides" are
//! navigated from the frontend compass and prev/next buttons; the city
//! root eases toward an accumulated target rotation every frame, and
//! the camera auto-frames itself once around the scene bounds.
//!
//! Architecture:
//! - Bevy runs in a background thread with NO window (true headless mode)
//! - Rendered frames travel GPU texture -> buffer -> CPU channel -> webview
//!   via a custom protocol (JPEG compression) or Base64-encoded RGBA
//! - UI events (compass clicks, prev/next, mouse drag) arrive as Tauri
//!   commands and are drained by Bevy systems at tick boundaries
//!
//! # Module Structure
//!
//! - `config`: Configuration constants and settings
//! - `city`: Pure domain logic
//!   - `sides`: side arithmetic and accumulated rotation
//!   - `damping`: frame-rate-independent angle easing
//!   - `framing`: bounding-sphere camera framing math
//!   - `markers`: the fixed district marker set
//! - `tauri_bridge`: Bridge layer between Tauri and Bevy
//!   - `shared_state`: Thread-safe data structures
//!   - `commands`: Tauri command handlers
//!   - `protocol`: Custom protocol handlers
//! - `engine`: Bevy integration
//!   - `components`: ECS components
//!   - `resources`: Global resources
//!   - `plugins`: Custom plugins
//!   - `systems`: Scene, rotation, framing, camera, and frame systems

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

pub mod city;
pub mod config;
pub mod engine;
pub mod tauri_bridge;

use std::{thread, time::Duration};
use tauri_bridge::{SharedFrameBuffer, SharedMouseInput, SharedPerfStats, SharedSideInput};

/// Main entry point for the Tauri application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Create shared state
    let buffer = SharedFrameBuffer::default();
    let perf_stats = SharedPerfStats::default();
    let mouse_input = SharedMouseInput::default();
    let side_input = SharedSideInput::default();

    // Start Bevy in background thread
    engine::start_engine(
        buffer.clone(),
        perf_stats.clone(),
        mouse_input.clone(),
        side_input.clone(),
    );

    // Wait for Bevy to initialize
    thread::sleep(Duration::from_millis(1000));

    // Clone for the custom protocol handler
    let protocol_buffer = buffer.clone();
    let protocol_perf_stats = perf_stats.clone();

    // Build and run Tauri application
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(buffer)
        .manage(perf_stats)
        .manage(mouse_input)
        .manage(side_input)
        // Register custom protocol "frame://" for direct binary transfer
        // This bypasses Tauri IPC JSON serialization completely!
        .register_asynchronous_uri_scheme_protocol("frame", move |_ctx, request, responder| {
            let buffer = protocol_buffer.clone();
            let perf_stats = protocol_perf_stats.clone();

            // Handle the request in a separate thread to avoid blocking
            std::thread::spawn(move || {
                let path = request.uri().path().to_owned();

                // For Tauri v2, URL format is: http://frame.localhost/path
                let response =
                    tauri_bridge::protocol::handle_frame_protocol(&path, &buffer, &perf_stats);
                responder.respond(response);
            });
        })
        .invoke_handler(tauri::generate_handler![
            tauri_bridge::commands::get_frame,
            tauri_bridge::commands::get_render_size,
            tauri_bridge::commands::get_performance_stats,
            tauri_bridge::commands::get_markers,
            tauri_bridge::commands::select_side,
            tauri_bridge::commands::step_side,
            tauri_bridge::commands::send_mouse_input
        ])
        .run(tauri::generate_context!())
        .expect("Tauri error");
}
