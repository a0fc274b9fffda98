//! Runway and obstacle layout

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::*;
use crate::player::Obstacle;

/// Marker for the runway surface
#[derive(Component)]
pub struct Runway;

/// Obstacle placement along the runway, deterministic for a given seed.
///
/// One obstacle per row, rows every `OBSTACLE_SPACING` units starting at
/// `OBSTACLE_FIRST_Z`, each dropped into one of three lanes. Returns
/// (center, half extents) pairs.
pub fn obstacle_layout(seed: u64, rows: usize) -> Vec<(Vec3, Vec3)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let lanes = [-OBSTACLE_LANE_OFFSET, 0.0, OBSTACLE_LANE_OFFSET];

    (0..rows)
        .map(|row| OBSTACLE_FIRST_Z + row as f32 * OBSTACLE_SPACING)
        .take_while(|z| *z + OBSTACLE_HALF_SIZE.z <= RUNWAY_END_Z)
        .map(|z| {
            let x = lanes[rng.gen_range(0..lanes.len())];
            let center = Vec3::new(x, RUNWAY_TOP + OBSTACLE_HALF_SIZE.y, z);
            (center, OBSTACLE_HALF_SIZE)
        })
        .collect()
}

/// Spawn the runway slab and the obstacles on it
pub fn spawn_world(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let length = RUNWAY_END_Z - RUNWAY_START_Z;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(RUNWAY_HALF_WIDTH * 2.0, 1.0, length))),
        MeshMaterial3d(materials.add(RUNWAY_COLOR)),
        Transform::from_xyz(0.0, RUNWAY_TOP - 0.5, RUNWAY_START_Z + length / 2.0),
        Runway,
    ));

    let obstacle_material = materials.add(OBSTACLE_COLOR);
    let layout = obstacle_layout(OBSTACLE_SEED, OBSTACLE_ROWS);
    for (center, half_extents) in &layout {
        let size = *half_extents * 2.0;
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(obstacle_material.clone()),
            Transform::from_translation(*center),
            Obstacle {
                half_extents: *half_extents,
            },
        ));
    }
    info!("Spawned runway with {} obstacles", layout.len());
}
