//! Scene assembly, orbit camera, and palm interaction

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use crate::app::CameraSettings;
use crate::grove::{self, PalmTree};

/// How long a clicked palm keeps its bloom color.
const HIGHLIGHT_SECONDS: f32 = 2.0;

/// Touch travel beyond this many pixels is a drag, not a tap.
const TAP_SLOP: f32 = 10.0;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TouchState>()
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (update_camera, handle_palm_interaction, fade_highlights),
            );
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Ticks down while a palm shows its bloom color.
#[derive(Component)]
pub struct Highlighted {
    timer: Timer,
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Camera, with fog fading the grove into the sky color at the far plane
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 200.0,
            ..default()
        }),
        Transform::from_xyz(30.0, 20.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y),
        DistanceFog {
            color: Color::srgb_u8(135, 206, 250),
            falloff: FogFalloff::Linear {
                start: 20.0,
                end: 200.0,
            },
            ..default()
        },
        MainCamera,
    ));

    // Bright tropical ambient
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        ..default()
    });

    // Low warm sun
    commands.spawn((
        DirectionalLight {
            color: Color::srgb_u8(255, 233, 177),
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(50.0, 100.0, -30.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Sandy ground
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(200.0, 200.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(244, 217, 160),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::IDENTITY,
    ));
}

fn update_camera(
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut settings: ResMut<CameraSettings>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    time: Res<Time>,
) {
    // Collect mouse motion delta
    let mut total_motion = Vec2::ZERO;
    for motion in mouse_motion.read() {
        total_motion += motion.delta;
    }

    // Orbit with left mouse drag; keep the camera above the sand
    if mouse_button.pressed(MouseButton::Left) {
        settings.azimuth -= total_motion.x * settings.sensitivity;
        settings.elevation =
            (settings.elevation - total_motion.y * settings.sensitivity).clamp(-0.1, 1.5);
    }

    // Pan with right mouse drag (screen right and world up)
    if mouse_button.pressed(MouseButton::Right) {
        // Camera right projected onto the ground plane, for azimuth measured
        // from +X
        let right = Vec3::new(settings.azimuth.sin(), 0.0, -settings.azimuth.cos());
        let pan_speed = settings.distance * 0.002;
        settings.target_focus -= right * total_motion.x * pan_speed;
        settings.target_focus += Vec3::Y * total_motion.y * pan_speed;
    }

    // Zoom with scroll - smoothed through target_distance
    for scroll in mouse_wheel.read() {
        let zoom_factor = 1.0 - scroll.y * settings.zoom_speed * 0.3;
        settings.target_distance = (settings.target_distance * zoom_factor).clamp(10.0, 160.0);
    }

    // Touch support for mobile
    if touch_input.iter().count() == 1 {
        for touch in touch_input.iter() {
            let delta = touch.delta();
            if delta != Vec2::ZERO {
                settings.azimuth -= delta.x * settings.sensitivity;
                settings.elevation =
                    (settings.elevation - delta.y * settings.sensitivity).clamp(-0.1, 1.5);
            }
        }
    }

    // Pinch to zoom
    if touch_input.iter().count() == 2 {
        let touches: Vec<_> = touch_input.iter().collect();
        if let (Some(t1), Some(t2)) = (touches.first(), touches.get(1)) {
            let curr_dist = t1.position().distance(t2.position());
            let prev_dist = (t1.position() - t1.delta()).distance(t2.position() - t2.delta());
            let zoom_factor = prev_dist / curr_dist.max(1.0);
            settings.target_distance = (settings.target_distance * zoom_factor).clamp(10.0, 160.0);
        }
    }

    // Smooth interpolation for zoom and focus (orbit damping)
    let dt = time.delta_secs();
    let lerp_factor = 1.0 - (-settings.smooth_factor * 60.0 * dt).exp();
    settings.distance += (settings.target_distance - settings.distance) * lerp_factor;
    settings.target = settings.target + (settings.target_focus - settings.target) * lerp_factor;

    // Y-up spherical coordinates around the focus point
    if let Ok(mut transform) = camera_query.single_mut() {
        let x = settings.distance * settings.elevation.cos() * settings.azimuth.cos();
        let y = settings.distance * settings.elevation.sin();
        let z = settings.distance * settings.elevation.cos() * settings.azimuth.sin();

        transform.translation = settings.target + Vec3::new(x, y, z);
        transform.look_at(settings.target, Vec3::Y);
    }
}

/// Track touch state for tap detection
#[derive(Resource, Default)]
struct TouchState {
    /// Position where the touch started
    start_position: Option<Vec2>,
    /// Whether this touch has moved far enough to count as a drag
    is_dragging: bool,
}

/// Select a palm via mouse click or touch tap and switch it to its bloom
/// color for a couple of seconds.
fn handle_palm_interaction(
    mut commands: Commands,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    palm_query: Query<(Entity, &PalmTree, &GlobalTransform)>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    mut touch_state: ResMut<TouchState>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let mut selection_pos: Option<Vec2> = None;

    // Track touch state for tap detection
    if let Some(touch) = touch_input.iter().next() {
        if touch_input.just_pressed(touch.id()) {
            touch_state.start_position = Some(touch.position());
            touch_state.is_dragging = false;
        } else if let Some(start) = touch_state.start_position {
            if touch.position().distance(start) > TAP_SLOP {
                touch_state.is_dragging = true;
            }
        }
    }

    // A released touch that never dragged is a tap
    for touch in touch_input.iter() {
        if touch_input.just_released(touch.id()) {
            if !touch_state.is_dragging {
                selection_pos = touch_state.start_position;
            }
            touch_state.start_position = None;
            touch_state.is_dragging = false;
        }
    }

    // Mouse click (desktop)
    if mouse_button.just_pressed(MouseButton::Left) {
        if let Some(cursor_pos) = window.cursor_position() {
            selection_pos = Some(cursor_pos);
        }
    }

    let Some(pos) = selection_pos else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, pos) else {
        return;
    };

    // Closest-point-on-ray test against each palm's crown
    let mut closest: Option<(f32, Entity)> = None;
    for (entity, _palm, transform) in palm_query.iter() {
        let crown = transform.translation() + Vec3::Y * grove::CROWN_HEIGHT;
        let to_crown = crown - ray.origin;
        let t = to_crown.dot(*ray.direction);
        if t < 0.0 {
            continue;
        }

        let closest_point = ray.origin + *ray.direction * t;
        let distance_sq = (closest_point - crown).length_squared();

        if distance_sq < grove::HIT_RADIUS * grove::HIT_RADIUS
            && closest.is_none_or(|(best, _)| t < best)
        {
            closest = Some((t, entity));
        }
    }

    if let Some((_, entity)) = closest {
        if let Ok((_, palm, _)) = palm_query.get(entity) {
            palm.set_bloom(materials.as_mut(), true);
            // Re-inserting restarts the fade on a repeat click
            commands.entity(entity).insert(Highlighted {
                timer: Timer::from_seconds(HIGHLIGHT_SECONDS, TimerMode::Once),
            });
        }
    }
}

/// Revert bloomed palms to their resting colors once the timer runs out.
fn fade_highlights(
    mut commands: Commands,
    time: Res<Time>,
    mut highlighted: Query<(Entity, &PalmTree, &mut Highlighted)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, palm, mut highlight) in highlighted.iter_mut() {
        if highlight.timer.tick(time.delta()).finished() {
            palm.set_bloom(materials.as_mut(), false);
            commands.entity(entity).remove::<Highlighted>();
        }
    }
}
