//! Droplet field rendering

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;

use atoll_core::ParticleField;

use crate::app::SceneRng;

/// Droplets in the field.
const DROPLET_COUNT: usize = 2000;

/// Horizontal half-extent of the field.
const FIELD_HALF_EXTENT: f32 = 100.0;

/// Height band droplets spawn into and reset to after falling through the
/// floor.
const SPAWN_BAND: std::ops::Range<f32> = 20.0..70.0;

/// Fastest per-tick fall.
const MAX_FALL: f32 = 0.1;

/// The droplet field plus the point mesh its positions are uploaded
/// through.
#[derive(Resource)]
pub struct DropletField {
    field: ParticleField,
    mesh: Handle<Mesh>,
}

pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_droplets)
            .add_systems(Update, advance_droplets);
    }
}

fn setup_droplets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<SceneRng>,
) {
    let field = ParticleField::scatter(
        DROPLET_COUNT,
        FIELD_HALF_EXTENT,
        SPAWN_BAND,
        MAX_FALL,
        &mut rng.0,
    );

    let mesh = meshes.add(droplet_mesh(&field));

    commands.spawn((
        Mesh3d(mesh.clone()),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba_u8(135, 206, 235, 204), // Translucent spray blue
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::IDENTITY,
    ));

    commands.insert_resource(DropletField { field, mesh });
}

/// Build a point-list mesh from the field's positions.
fn droplet_mesh(field: &ParticleField) -> Mesh {
    let positions: Vec<[f32; 3]> = field.positions().to_vec();
    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];

    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
}

/// Advance the field once per frame and rewrite the mesh's position
/// attribute. Mutating the asset is what queues the buffer re-upload before
/// the next draw.
fn advance_droplets(
    mut droplets: ResMut<DropletField>,
    mut rng: ResMut<SceneRng>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let DropletField { field, mesh } = &mut *droplets;
    field.advance(&mut rng.0);

    if let Some(mesh) = meshes.get_mut(&*mesh) {
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, field.positions().to_vec());
    }
}
