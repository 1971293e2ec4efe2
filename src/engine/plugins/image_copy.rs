//! GPU-to-CPU image copy pipeline
//!
//! Render-world plumbing for headless output, derived from the official
//! Bevy headless renderer example:
//! <https://github.com/bevyengine/bevy/blob/main/examples/app/headless_renderer.rs>
//!
//! Flow:
//! 1. Cameras render into the offscreen target texture
//! 2. `ImageCopyDriver` node in the `RenderGraph` copies the texture into
//!    a MAP_READ buffer after the camera driver runs
//! 3. After `RenderSystems::Render`, the buffer is mapped and its contents
//!    sent over a channel to the main world

use bevy::{
    prelude::*,
    render::{
        render_asset::RenderAssets,
        render_graph::{self, NodeRunError, RenderGraph, RenderGraphContext, RenderLabel},
        render_resource::{
            Buffer, BufferDescriptor, BufferUsages, CommandEncoderDescriptor, Extent3d, MapMode,
            PollType, TexelCopyBufferInfo, TexelCopyBufferLayout,
        },
        renderer::{RenderContext, RenderDevice, RenderQueue},
        Extract, ExtractSchedule, Render, RenderApp, RenderSystems,
    },
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::engine::resources::{MainWorldReceiver, RenderWorldSender};

/// Plugin wiring the copy node into the render graph and exposing the
/// render-world → main-world frame channel.
pub struct ImageCopyPlugin;

impl Plugin for ImageCopyPlugin {
    fn build(&self, app: &mut App) {
        let (s, r) = crossbeam_channel::unbounded();

        let render_app = app
            .insert_resource(MainWorldReceiver(r))
            .sub_app_mut(RenderApp);

        let mut graph = render_app.world_mut().resource_mut::<RenderGraph>();
        graph.add_node(ImageCopy, ImageCopyDriver);
        graph.add_node_edge(bevy::render::graph::CameraDriverLabel, ImageCopy);

        render_app
            .insert_resource(RenderWorldSender(s))
            .add_systems(ExtractSchedule, image_copy_extract)
            .add_systems(
                Render,
                receive_image_from_buffer.after(RenderSystems::Render),
            );
    }
}

/// Render-world snapshot of the main world's copier components
#[derive(Clone, Default, Resource, Deref, DerefMut)]
struct ImageCopiers(pub Vec<ImageCopier>);

/// Component describing one source image to copy out each frame
#[derive(Clone, Component)]
pub struct ImageCopier {
    buffer: Buffer,
    enabled: Arc<AtomicBool>,
    src_image: Handle<Image>,
}

impl ImageCopier {
    /// Allocate the CPU-readable buffer for an image of `size` and
    /// build the copier for `src_image`.
    pub fn new(
        src_image: Handle<Image>,
        size: Extent3d,
        render_device: &RenderDevice,
    ) -> ImageCopier {
        let padded_bytes_per_row =
            RenderDevice::align_copy_bytes_per_row((size.width) as usize) * 4;

        let cpu_buffer = render_device.create_buffer(&BufferDescriptor {
            label: None,
            size: padded_bytes_per_row as u64 * size.height as u64,
            usage: BufferUsages::MAP_READ | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        ImageCopier {
            buffer: cpu_buffer,
            src_image,
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether this copier currently runs.
    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

/// Mirror `ImageCopier` components into the render world each frame
fn image_copy_extract(mut commands: Commands, image_copiers: Extract<Query<&ImageCopier>>) {
    commands.insert_resource(ImageCopiers(
        image_copiers.iter().cloned().collect::<Vec<ImageCopier>>(),
    ));
}

/// Label for the copy node in the render graph
#[derive(Debug, PartialEq, Eq, Clone, Hash, RenderLabel)]
struct ImageCopy;

/// Render-graph node issuing the texture-to-buffer copies
#[derive(Default)]
struct ImageCopyDriver;

impl render_graph::Node for ImageCopyDriver {
    fn run(
        &self,
        _graph: &mut RenderGraphContext,
        render_context: &mut RenderContext,
        world: &World,
    ) -> Result<(), NodeRunError> {
        let (Some(image_copiers), Some(gpu_images), Some(render_queue)) = (
            world.get_resource::<ImageCopiers>(),
            world.get_resource::<RenderAssets<bevy::render::texture::GpuImage>>(),
            world.get_resource::<RenderQueue>(),
        ) else {
            return Ok(());
        };

        for image_copier in image_copiers.iter() {
            if !image_copier.enabled() {
                continue;
            }

            let Some(src_image) = gpu_images.get(&image_copier.src_image) else {
                continue;
            };

            let mut encoder = render_context
                .render_device()
                .create_command_encoder(&CommandEncoderDescriptor::default());

            let block_dimensions = src_image.texture_format.block_dimensions();
            let Some(block_size) = src_image.texture_format.block_copy_size(None) else {
                continue;
            };

            let padded_bytes_per_row = RenderDevice::align_copy_bytes_per_row(
                (src_image.size.width as usize / block_dimensions.0 as usize) * block_size as usize,
            );

            let Some(bytes_per_row) = std::num::NonZero::<u32>::new(padded_bytes_per_row as u32)
            else {
                continue;
            };

            encoder.copy_texture_to_buffer(
                src_image.texture.as_image_copy(),
                TexelCopyBufferInfo {
                    buffer: &image_copier.buffer,
                    layout: TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(bytes_per_row.into()),
                        rows_per_image: None,
                    },
                },
                src_image.size,
            );

            render_queue.submit(std::iter::once(encoder.finish()));
        }

        Ok(())
    }
}

/// Map each copier's buffer and push its contents to the main world
fn receive_image_from_buffer(
    image_copiers: Res<ImageCopiers>,
    render_device: Res<RenderDevice>,
    sender: Res<RenderWorldSender>,
) {
    for image_copier in image_copiers.0.iter() {
        if !image_copier.enabled() {
            continue;
        }

        let buffer_slice = image_copier.buffer.slice(..);

        let (s, r) = crossbeam_channel::bounded(1);

        buffer_slice.map_async(MapMode::Read, move |result| {
            if let Ok(result) = result {
                let _ = s.send(result);
            }
        });

        if render_device.poll(PollType::wait()).is_err() {
            warn!("failed to poll render device for buffer map");
            continue;
        }

        if r.recv().is_err() {
            warn!("buffer map callback dropped without completing");
            continue;
        }

        let _ = sender.send(buffer_slice.get_mapped_range().to_vec());

        image_copier.buffer.unmap();
    }
}

/// Remove GPU buffer row padding alignment, returning pure RGBA data
///
/// `copy_texture_to_buffer` pads each row up to the copy alignment;
/// consumers of the raw frame want tightly packed pixels.
pub fn remove_row_padding(data: &[u8], width: u32, height: u32) -> Option<Vec<u8>> {
    if data.is_empty() {
        return None;
    }

    // Handle row padding alignment
    let row_bytes = width as usize * 4;
    let aligned_row_bytes = RenderDevice::align_copy_bytes_per_row(row_bytes);

    let rgba_data = if row_bytes == aligned_row_bytes {
        // No padding, return as-is
        data.to_vec()
    } else {
        // Remove padding from each row
        data.chunks(aligned_row_bytes)
            .take(height as usize)
            .flat_map(|row| &row[..row_bytes.min(row.len())])
            .cloned()
            .collect()
    };

    Some(rgba_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_alignment_padding_per_row() {
        // Width 63 gives 252-byte rows, padded to 256.
        let width = 63_u32;
        let height = 2_u32;
        let row_bytes = width as usize * 4;
        let aligned = RenderDevice::align_copy_bytes_per_row(row_bytes);
        assert!(aligned > row_bytes, "width must exercise the padded path");

        let mut data = Vec::new();
        for row in 0..height as u8 {
            data.extend(std::iter::repeat(row + 1).take(row_bytes));
            data.extend(std::iter::repeat(0xEE).take(aligned - row_bytes));
        }

        let rgba = remove_row_padding(&data, width, height).unwrap();
        assert_eq!(rgba.len(), row_bytes * height as usize);
        assert!(rgba[..row_bytes].iter().all(|&b| b == 1));
        assert!(rgba[row_bytes..].iter().all(|&b| b == 2));
    }

    #[test]
    fn aligned_rows_pass_through_unchanged() {
        // Width 64 gives 256-byte rows, already aligned.
        let width = 64_u32;
        let row_bytes = width as usize * 4;
        assert_eq!(RenderDevice::align_copy_bytes_per_row(row_bytes), row_bytes);

        let data = vec![7_u8; row_bytes * 2];
        assert_eq!(remove_row_padding(&data, width, 2), Some(data));
    }

    #[test]
    fn empty_buffer_yields_no_frame() {
        assert_eq!(remove_row_padding(&[], 64, 2), None);
    }
}
