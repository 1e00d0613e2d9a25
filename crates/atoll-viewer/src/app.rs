//! Bevy application setup and shared resources

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use atoll_core::ExclusionZone;

use crate::grove::GrovePlugin;
use crate::model::ModelPlugin;
use crate::particles::ParticlesPlugin;
use crate::scene::ScenePlugin;

/// Fixed layout seed so the cove arranges the same way on every load.
const SCENE_SEED: u64 = 42;

/// Keep-clear radius used until the gazebo reports its measured footprint.
const DEFAULT_CLEAR_RADIUS: f32 = 15.0;

/// Shared deterministic random source for placement and droplet resets.
#[derive(Resource)]
pub struct SceneRng(pub ChaCha8Rng);

impl Default for SceneRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(SCENE_SEED))
    }
}

/// Current keep-clear zone around the gazebo.
///
/// Replaced wholesale with a new value when the model's footprint has been
/// measured; consumers react to the change rather than sharing mutable
/// state with the loader.
#[derive(Debug, Clone, Resource)]
pub struct GroveZone(pub ExclusionZone);

impl Default for GroveZone {
    fn default() -> Self {
        Self(ExclusionZone::new(0.0, 0.0, DEFAULT_CLEAR_RADIUS))
    }
}

/// Camera controller settings
#[derive(Debug, Clone, Resource)]
pub struct CameraSettings {
    pub distance: f32,
    pub target_distance: f32, // For smooth zoom
    pub azimuth: f32,
    pub elevation: f32,
    pub target: Vec3,
    pub target_focus: Vec3, // For smooth re-centering
    pub sensitivity: f32,
    pub zoom_speed: f32,
    pub smooth_factor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            // Matches the opening viewpoint at (30, 20, 50)
            distance: 62.0,
            target_distance: 62.0,
            azimuth: 1.03,
            elevation: 0.33,
            target: Vec3::ZERO,
            target_focus: Vec3::ZERO,
            sensitivity: 0.005,
            zoom_speed: 0.1,
            smooth_factor: 0.25,
        }
    }
}

/// Run the Bevy application
pub fn run() {
    App::new()
        .insert_resource(ClearColor(Color::srgb_u8(135, 206, 250))) // Sky blue
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Atoll".to_string(),
                        canvas: Some("#atoll-canvas".to_string()),
                        fit_canvas_to_parent: true,
                        prevent_default_event_handling: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    // Models are fetched relative to the site root
                    file_path: "".to_string(),
                    // Don't look for .meta files - the server doesn't have them
                    meta_check: AssetMetaCheck::Never,
                    ..default()
                }),
        )
        .init_resource::<SceneRng>()
        .init_resource::<GroveZone>()
        .init_resource::<CameraSettings>()
        .add_plugins(ScenePlugin)
        .add_plugins(ModelPlugin)
        .add_plugins(GrovePlugin)
        .add_plugins(ParticlesPlugin)
        .run();
}
