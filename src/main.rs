//! Runner - a 3D endless runner with run recording and replay
//!
//! Main entry point: app setup and scene spawning.

use bevy::prelude::*;
use runner::{
    DebugLogConfig, FollowCamera, Grounded, JumpCooldown, ReplayStore, Runner, RunnerPlugin,
    RunnerSettings, Velocity, constants::*, settings::SETTINGS_FILE, spawn_world, ui,
};
use std::path::Path;

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();

    let debug_config = DebugLogConfig::load_with_args(&args);

    // Load persistent settings (uses defaults if file doesn't exist)
    let mut settings = RunnerSettings::load();

    // Save settings on first run to ensure file exists
    if !Path::new(SETTINGS_FILE).exists() {
        if let Err(e) = settings.save_to(SETTINGS_FILE) {
            warn!("Failed to save initial settings: {}", e);
        }
    }
    settings.apply_args(&args);
    let store = ReplayStore::from_settings(&settings);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Runner".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(debug_config.log_plugin()),
        )
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(settings)
        .insert_resource(store)
        .insert_resource(debug_config)
        .add_plugins(RunnerPlugin)
        .add_systems(Startup, (setup, ui::spawn_hud))
        .add_systems(Startup, log_startup.after(setup))
        .run();
}

/// Setup the game world
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Camera - perspective, trails the runner
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(SPAWN_POSITION + CAMERA_OFFSET)
            .looking_at(SPAWN_POSITION, Vec3::Y),
        FollowCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, -4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    spawn_world(&mut commands, &mut meshes, &mut materials);

    // Runner starts frozen on the spawn point until a run begins
    let size = RUNNER_HALF_SIZE * 2.0;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(materials.add(RUNNER_COLOR)),
        Transform::from_translation(SPAWN_POSITION),
        Runner::default(),
        Velocity::default(),
        Grounded(false),
        JumpCooldown::default(),
    ));
}

fn log_startup(store: Res<ReplayStore>, debug_config: Res<DebugLogConfig>) {
    info!(
        "Runner ready (replay file: {}, replay on disk: {}, debug log: {})",
        store.path().display(),
        store.exists(),
        debug_config.enabled
    );
}
