//! Bevy systems
//!
//! This module contains all the game systems that operate on entities
//! and resources in the Bevy ECS.

pub mod camera;
pub mod frame_extraction;
pub mod framing;
pub mod rotation;
pub mod scene;

pub use camera::update_camera_from_input;
pub use frame_extraction::extract_and_process_frame;
pub use framing::auto_frame_camera;
pub use rotation::{apply_side_input, follow_side_rotation, highlight_active_district};
pub use scene::setup_scene;
