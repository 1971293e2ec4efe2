//! Scene setup system
//!
//! This module handles the initial setup of the 3D scene: the offscreen
//! render target, the hexagonal city built under a single rotatable root,
//! the district marker beacons, lights, and the camera.

use bevy::{
    asset::Assets,
    camera::RenderTarget,
    core_pipeline::tonemapping::Tonemapping,
    image::Image,
    math::{
        primitives::{Cuboid, Cylinder, Sphere},
        Quat, Vec3,
    },
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
    render::{
        render_resource::{Extent3d, TextureFormat, TextureUsages},
        renderer::RenderDevice,
    },
};

use crate::city::markers::district_markers;
use crate::city::sides::{canonical_angle, SIDE_COUNT};
use crate::config::{camera::FOV_DEGREES, RENDER_HEIGHT, RENDER_WIDTH};
use crate::engine::components::{
    CameraController, CityGeometry, CityRoot, CityYaw, DistrictSite, OffscreenCamera,
};
use crate::engine::plugins::image_copy::ImageCopier;
use crate::engine::resources::RenderTargetHandle;

/// Radius of the hexagonal plaza the city stands on
const PLAZA_RADIUS: f32 = 10.0;

/// Distance of each district block from the city center
const DISTRICT_RADIUS: f32 = 7.0;

/// Base colors of the six districts, in side order
const DISTRICT_COLORS: [Color; SIDE_COUNT] = [
    Color::srgb(0.85, 0.33, 0.18),
    Color::srgb(0.20, 0.45, 0.80),
    Color::srgb(0.45, 0.60, 0.25),
    Color::srgb(0.55, 0.75, 0.75),
    Color::srgb(0.90, 0.85, 0.55),
    Color::srgb(0.40, 0.30, 0.55),
];

/// Setup the 3D scene with render target, city geometry, and lights
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    render_device: Res<RenderDevice>,
) {
    info!("setting up city scene");

    let size = Extent3d {
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
        depth_or_array_layers: 1,
    };

    // Create render target texture
    let mut render_target_image =
        Image::new_target_texture(size.width, size.height, TextureFormat::bevy_default());
    render_target_image.texture_descriptor.usage |= TextureUsages::COPY_SRC;
    let render_target_image_handle = images.add(render_target_image);

    commands.insert_resource(RenderTargetHandle(render_target_image_handle.clone()));

    // Spawn image copier for GPU-to-CPU transfer
    commands.spawn(ImageCopier::new(
        render_target_image_handle.clone(),
        size,
        &render_device,
    ));

    // Camera; its pose is provisional until auto-framing runs
    commands.spawn((
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(render_target_image_handle.into()),
            clear_color: ClearColorConfig::Custom(Color::srgb(0.05, 0.08, 0.12)),
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            ..default()
        }),
        Tonemapping::None,
        Transform::from_xyz(0.0, 12.0, 18.0).looking_at(Vec3::ZERO, Vec3::Y),
        OffscreenCamera,
        CameraController,
    ));

    spawn_city(&mut commands, &mut meshes, &mut materials);
    spawn_lights(&mut commands);

    info!("city scene setup complete");
}

/// Spawn the rotatable city root and its districts
fn spawn_city(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let root = commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            CityRoot,
            CityYaw::default(),
        ))
        .id();

    // Hexagonal plaza: a six-sided prism
    let plaza = commands
        .spawn((
            Mesh3d(meshes.add(Cylinder::new(PLAZA_RADIUS, 0.5).mesh().resolution(6))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.35, 0.37, 0.40),
                perceptual_roughness: 0.9,
                ..default()
            })),
            Transform::from_xyz(0.0, -0.25, 0.0),
            CityGeometry,
        ))
        .id();
    commands.entity(root).add_child(plaza);

    let markers = district_markers();
    for side in 0..SIDE_COUNT {
        let angle = canonical_angle(side);
        let offset = Vec3::new(
            DISTRICT_RADIUS * angle.sin(),
            0.0,
            DISTRICT_RADIUS * angle.cos(),
        );
        let height = 1.6 + 0.4 * side as f32;

        // District block, facing the center
        let block = commands
            .spawn((
                Mesh3d(meshes.add(Cuboid::new(2.4, height, 2.4))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: DISTRICT_COLORS[side],
                    metallic: 0.1,
                    perceptual_roughness: 0.6,
                    ..default()
                })),
                Transform::from_translation(offset + Vec3::Y * (height / 2.0))
                    .with_rotation(Quat::from_rotation_y(angle)),
                CityGeometry,
            ))
            .id();
        commands.entity(root).add_child(block);

        // Marker beacon floating above the district
        let marker = &markers[side];
        let beacon = commands
            .spawn((
                Mesh3d(meshes.add(Sphere::new(0.35).mesh().uv(16, 12))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::WHITE,
                    emissive: DISTRICT_COLORS[side].to_linear() * 4.0,
                    ..default()
                })),
                Transform::from_translation(Vec3::from_array(marker.position)),
                CityGeometry,
                DistrictSite(side),
            ))
            .id();
        commands.entity(root).add_child(beacon);
    }
}

/// Spawn the fixed lighting rig
fn spawn_lights(commands: &mut Commands) {
    // Primary point light
    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            shadows_enabled: true,
            color: Color::srgb(1.0, 0.95, 0.85),
            ..default()
        },
        Transform::from_xyz(8.0, 14.0, 8.0),
    ));

    // Secondary point light (cool fill)
    commands.spawn((
        PointLight {
            intensity: 800_000.0,
            color: Color::srgb(0.4, 0.6, 1.0),
            ..default()
        },
        Transform::from_xyz(-6.0, 8.0, -4.0),
    ));

    // Directional light
    commands.spawn((
        DirectionalLight {
            illuminance: 3000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(bevy::math::EulerRot::XYZ, -0.6, 0.4, 0.0)),
    ));
}
