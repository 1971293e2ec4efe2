//! Custom protocol handlers for efficient data transfer
//!
//! This module implements the `frame://` custom protocol for direct binary
//! transfer of render frames, bypassing Tauri's IPC JSON serialization.

use image::{codecs::jpeg::JpegEncoder, ImageBuffer, ImageEncoder, Rgba};
use tauri::http::Response as HttpResponse;

use super::shared_state::{SharedFrameBuffer, SharedPerfStats};
use crate::city::markers::district_markers;
use crate::config::{compression::JPEG_QUALITY, RENDER_HEIGHT, RENDER_WIDTH};

type Response = HttpResponse<Vec<u8>>;

/// Handle requests to the custom `frame://` protocol
///
/// Supported endpoints:
/// - `frame` or `frame.jpg`: JPEG-compressed frame (~50-100KB)
/// - `frame.raw`: Raw RGBA frame
/// - `markers`: District marker stat cards as JSON
/// - `stats`: Performance statistics as JSON
pub fn handle_frame_protocol(
    uri_path: &str,
    buffer: &SharedFrameBuffer,
    perf_stats: &SharedPerfStats,
) -> Response {
    let resource = uri_path.trim_start_matches('/');

    match resource {
        // JPEG compressed frame - much smaller data size!
        "frame" | "frame.jpg" => handle_jpeg_frame(buffer),

        // Raw RGBA frame (for comparison/debugging)
        "frame.raw" => handle_raw_frame(buffer),

        // District marker cards as JSON
        "markers" => handle_markers(),

        // Performance stats as JSON
        "stats" => handle_stats(perf_stats),

        _ => text_response(404, "Not Found"),
    }
}

/// Plain-text response helper for error paths
fn text_response(status: u16, body: &str) -> Response {
    HttpResponse::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(body.as_bytes().to_vec())
        .unwrap_or_default()
}

/// Handle JPEG-compressed frame request
fn handle_jpeg_frame(buffer: &SharedFrameBuffer) -> Response {
    let Ok(guard) = buffer.0.lock() else {
        return text_response(500, "Frame buffer poisoned");
    };

    match &*guard {
        Some(rgba_data) => {
            let Some(img) = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
                RENDER_WIDTH,
                RENDER_HEIGHT,
                rgba_data.clone(),
            ) else {
                return text_response(500, "Frame size mismatch");
            };

            // Convert RGBA to RGB for JPEG (no alpha channel)
            let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();

            // Encode to JPEG with quality setting
            let mut jpeg_data = Vec::new();
            let encoder = JpegEncoder::new_with_quality(&mut jpeg_data, JPEG_QUALITY);
            if encoder
                .write_image(
                    rgb_img.as_raw(),
                    RENDER_WIDTH,
                    RENDER_HEIGHT,
                    image::ExtendedColorType::Rgb8,
                )
                .is_err()
            {
                return text_response(500, "JPEG encoding failed");
            }

            frame_response("image/jpeg", jpeg_data)
        }
        None => text_response(503, "Frame not ready"),
    }
}

/// Handle raw RGBA frame request
fn handle_raw_frame(buffer: &SharedFrameBuffer) -> Response {
    let Ok(guard) = buffer.0.lock() else {
        return text_response(500, "Frame buffer poisoned");
    };

    match &*guard {
        Some(rgba_data) => frame_response("application/octet-stream", rgba_data.clone()),
        None => text_response(503, "Frame not ready"),
    }
}

/// Build a frame response with CORS and dimension headers
fn frame_response(content_type: &str, body: Vec<u8>) -> Response {
    HttpResponse::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("X-Frame-Width", RENDER_WIDTH.to_string())
        .header("X-Frame-Height", RENDER_HEIGHT.to_string())
        .header("Access-Control-Allow-Origin", "*")
        .header(
            "Access-Control-Expose-Headers",
            "X-Frame-Width, X-Frame-Height",
        )
        .body(body)
        .unwrap_or_default()
}

/// Handle marker card request
fn handle_markers() -> Response {
    let json = serde_json::to_vec(&district_markers()).unwrap_or_default();

    HttpResponse::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(json)
        .unwrap_or_default()
}

/// Handle performance stats request
fn handle_stats(perf_stats: &SharedPerfStats) -> Response {
    let json = match perf_stats.0.lock() {
        Ok(guard) => serde_json::to_vec(&*guard).unwrap_or_default(),
        Err(_) => Vec::new(),
    };

    HttpResponse::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(json)
        .unwrap_or_default()
}
