//! Palm grove placement and highlighting

use bevy::prelude::*;

use atoll_core::{sample_outside, Bounds};

use crate::app::{GroveZone, SceneRng};

/// Number of palms scattered at startup.
const TREE_COUNT: usize = 30;

/// Planting region on both ground axes.
const PLANT_MIN: f32 = -80.0;
const PLANT_MAX: f32 = 80.0;

/// Uniform scale applied to every palm.
const TREE_SCALE: f32 = 2.0;

/// Fronds fanned around the crown per palm.
const FROND_COUNT: usize = 5;

/// World-space height of the frond crown, the center of the click target.
pub const CROWN_HEIGHT: f32 = 10.0 * TREE_SCALE;

/// Generous hit radius around the crown.
pub const HIT_RADIUS: f32 = 9.0;

/// Saddle-brown trunk.
fn trunk_color() -> Color {
    Color::srgb_u8(139, 69, 19)
}

/// Forest-green fronds.
fn frond_color() -> Color {
    Color::srgb_u8(34, 139, 34)
}

/// Pale coconut-bloom highlight.
fn bloom_color() -> Color {
    Color::srgb_u8(255, 253, 208)
}

pub struct GrovePlugin;

impl Plugin for GrovePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_grove)
            .add_systems(Update, relocate_crowded_palms);
    }
}

/// A planted palm. Each palm owns its material handles so highlighting one
/// never recolors the rest of the grove.
#[derive(Component)]
pub struct PalmTree {
    trunk_material: Handle<StandardMaterial>,
    frond_material: Handle<StandardMaterial>,
}

impl PalmTree {
    /// Switch the palm between bloom and resting colors.
    pub fn set_bloom(&self, materials: &mut Assets<StandardMaterial>, bloom: bool) {
        let (trunk, fronds) = if bloom {
            (bloom_color(), bloom_color())
        } else {
            (trunk_color(), frond_color())
        };
        if let Some(material) = materials.get_mut(&self.trunk_material) {
            material.base_color = trunk;
        }
        if let Some(material) = materials.get_mut(&self.frond_material) {
            material.base_color = fronds;
        }
    }
}

fn spawn_grove(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<SceneRng>,
    zone: Res<GroveZone>,
) {
    let bounds = match Bounds::new(PLANT_MIN, PLANT_MAX) {
        Ok(bounds) => bounds,
        Err(err) => {
            tracing::error!(%err, "refusing to plant the grove");
            return;
        }
    };

    // Geometry is shared across the grove; materials are per palm
    let trunk_mesh = meshes.add(ConicalFrustum {
        radius_top: 0.5,
        radius_bottom: 0.8,
        height: 10.0,
    });
    let frond_mesh = meshes.add(Cone::new(4.0, 1.0));

    for _ in 0..TREE_COUNT {
        let point = sample_outside(&zone.0, bounds, &mut rng.0);

        let trunk_material = materials.add(StandardMaterial {
            base_color: trunk_color(),
            perceptual_roughness: 0.9,
            ..default()
        });
        let frond_material = materials.add(StandardMaterial {
            base_color: frond_color(),
            perceptual_roughness: 0.8,
            ..default()
        });

        commands
            .spawn((
                Transform::from_xyz(point.x, 0.0, point.z).with_scale(Vec3::splat(TREE_SCALE)),
                Visibility::default(),
                PalmTree {
                    trunk_material: trunk_material.clone(),
                    frond_material: frond_material.clone(),
                },
            ))
            .with_children(|palm| {
                palm.spawn((
                    Mesh3d(trunk_mesh.clone()),
                    MeshMaterial3d(trunk_material.clone()),
                    Transform::from_xyz(0.0, 5.0, 0.0),
                ));

                // Fronds fan around the crown, tipped flat
                for i in 0..FROND_COUNT {
                    let rotation = Quat::from_euler(
                        EulerRot::XYZ,
                        std::f32::consts::FRAC_PI_2,
                        0.0,
                        i as f32 * std::f32::consts::PI / 2.5,
                    );
                    palm.spawn((
                        Mesh3d(frond_mesh.clone()),
                        MeshMaterial3d(frond_material.clone()),
                        Transform::from_xyz(0.0, 10.0, 0.0).with_rotation(rotation),
                    ));
                }
            });
    }

    tracing::info!(count = TREE_COUNT, "palm grove planted");
}

/// When a measured gazebo footprint grows the keep-clear zone, re-sample any
/// palm the new zone swallowed.
fn relocate_crowded_palms(
    zone: Res<GroveZone>,
    mut rng: ResMut<SceneRng>,
    mut palms: Query<&mut Transform, With<PalmTree>>,
) {
    if !zone.is_changed() || zone.is_added() {
        return;
    }

    let Ok(bounds) = Bounds::new(PLANT_MIN, PLANT_MAX) else {
        return;
    };

    let mut moved = 0usize;
    for mut transform in palms.iter_mut() {
        if zone.0.contains(transform.translation.x, transform.translation.z) {
            let point = sample_outside(&zone.0, bounds, &mut rng.0);
            transform.translation.x = point.x;
            transform.translation.z = point.z;
            moved += 1;
        }
    }

    if moved > 0 {
        tracing::info!(
            moved,
            radius = zone.0.radius,
            "replanted palms outside the grown keep-clear zone"
        );
    }
}
