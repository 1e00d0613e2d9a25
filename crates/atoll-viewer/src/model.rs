//! Central gazebo loading and footprint measurement

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;

use atoll_core::ExclusionZone;

use crate::app::GroveZone;

/// Asset path of the gazebo model, fetched relative to the site root.
const MODEL_PATH: &str = "models/gazebo.glb";

/// Uniform scale applied to the gazebo scene.
const MODEL_SCALE: f32 = 8.0;

/// Clearance added around the measured footprint.
const CLEAR_MARGIN: f32 = 3.0;

/// Load lifecycle of the central model.
#[derive(Resource)]
pub enum CentralModel {
    /// Fetch in flight
    Loading(Handle<Gltf>),
    /// Scene spawned, footprint not yet measured
    Spawned(Entity),
    /// Footprint measured and published to the grove zone
    Measured,
    /// Fetch or parse failed; the default keep-clear radius stays
    Failed,
}

pub struct ModelPlugin;

impl Plugin for ModelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, begin_model_load)
            .add_systems(Update, (poll_model_load, measure_model_footprint));
    }
}

fn begin_model_load(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle: Handle<Gltf> = asset_server.load(MODEL_PATH);
    commands.insert_resource(CentralModel::Loading(handle));
}

/// Poll the fetch and spawn the gazebo scene once the glTF is available.
fn poll_model_load(
    mut commands: Commands,
    mut state: ResMut<CentralModel>,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
    zone: Res<GroveZone>,
) {
    let handle = match &*state {
        CentralModel::Loading(handle) => handle.clone(),
        _ => return,
    };

    match asset_server.get_load_state(handle.id()) {
        Some(LoadState::Loaded) => {
            let Some(gltf) = gltf_assets.get(&handle) else {
                return;
            };
            let scene_handle = gltf
                .default_scene
                .clone()
                .or_else(|| gltf.scenes.first().cloned());
            let Some(scene_handle) = scene_handle else {
                tracing::error!(path = MODEL_PATH, "glTF contains no scenes");
                *state = CentralModel::Failed;
                return;
            };

            let entity = commands
                .spawn((
                    SceneRoot(scene_handle),
                    Transform::from_xyz(zone.0.center_x, 0.0, zone.0.center_z)
                        .with_scale(Vec3::splat(MODEL_SCALE)),
                ))
                .id();
            tracing::info!(path = MODEL_PATH, "gazebo spawned");
            *state = CentralModel::Spawned(entity);
        }
        Some(LoadState::Failed(err)) => {
            tracing::error!(
                path = MODEL_PATH,
                error = %err,
                "gazebo failed to load; keeping the default keep-clear radius"
            );
            *state = CentralModel::Failed;
        }
        _ => {
            // Still loading
        }
    }
}

/// Measure the spawned scene's world-space bounds and publish the grown
/// keep-clear zone. Retries each frame until the scene graph's meshes exist.
fn measure_model_footprint(
    mut state: ResMut<CentralModel>,
    mut zone: ResMut<GroveZone>,
    children_query: Query<&Children>,
    mesh_query: Query<(&Mesh3d, &GlobalTransform)>,
    meshes: Res<Assets<Mesh>>,
) {
    let root = match &*state {
        CentralModel::Spawned(entity) => *entity,
        _ => return,
    };

    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    let mut found = false;
    collect_bounds(
        root,
        &children_query,
        &mesh_query,
        &meshes,
        &mut min,
        &mut max,
        &mut found,
    );

    if !found {
        // Scene not instantiated yet
        return;
    }

    let size = max - min;
    let measured =
        ExclusionZone::from_footprint(zone.0.center_x, zone.0.center_z, size.x, size.z, CLEAR_MARGIN);
    tracing::info!(
        radius = measured.radius,
        "keep-clear radius updated from the gazebo footprint"
    );
    zone.0 = measured;
    *state = CentralModel::Measured;
}

const CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Recursively fold every descendant mesh's world-space AABB corners into
/// the running min/max.
fn collect_bounds(
    entity: Entity,
    children_query: &Query<&Children>,
    mesh_query: &Query<(&Mesh3d, &GlobalTransform)>,
    meshes: &Assets<Mesh>,
    min: &mut Vec3,
    max: &mut Vec3,
    found: &mut bool,
) {
    if let Ok((mesh_handle, global)) = mesh_query.get(entity) {
        if let Some(mesh) = meshes.get(&mesh_handle.0) {
            if let Some(aabb) = mesh.compute_aabb() {
                let center = Vec3::from(aabb.center);
                let half = Vec3::from(aabb.half_extents);
                for corner in CORNERS {
                    let world = global.transform_point(center + corner * half);
                    *min = min.min(world);
                    *max = max.max(world);
                }
                *found = true;
            }
        }
    }

    if let Ok(children) = children_query.get(entity) {
        for child in children.iter() {
            collect_bounds(child, children_query, mesh_query, meshes, min, max, found);
        }
    }
}
