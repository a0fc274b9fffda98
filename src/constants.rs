//! Tunable constants for the runner
//!
//! Fixed world and presentation values. Player movement tuning that users
//! may edit lives in `RunnerSettings`.

use bevy::prelude::*;

// =============================================================================
// COLORS
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::srgb(0.55, 0.7, 0.85);
pub const RUNWAY_COLOR: Color = Color::srgb(0.3, 0.3, 0.32);
pub const RUNNER_COLOR: Color = Color::srgb(0.9, 0.55, 0.2);
pub const OBSTACLE_COLOR: Color = Color::srgb(0.75, 0.15, 0.15);

pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.95, 0.95);
pub const TEXT_ACCENT: Color = Color::srgb(1.0, 0.8, 0.3);

// =============================================================================
// WORLD
// =============================================================================

/// Runner collision half-size (a unit cube)
pub const RUNNER_HALF_SIZE: Vec3 = Vec3::splat(0.5);

/// Top surface of the runway
pub const RUNWAY_TOP: f32 = 0.0;
/// Runway half width along X
pub const RUNWAY_HALF_WIDTH: f32 = 4.0;
/// Runway extent along Z (start, end)
pub const RUNWAY_START_Z: f32 = -5.0;
pub const RUNWAY_END_Z: f32 = 200.0;

/// Where a run starts (the runner drops in from above this point)
pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, RUNWAY_TOP + RUNNER_HALF_SIZE.y, 0.0);
/// Extra height above the spawn point on run start
pub const SPAWN_DROP_HEIGHT: f32 = 5.0;

pub const GRAVITY: f32 = 25.0;

// =============================================================================
// OBSTACLES
// =============================================================================

pub const OBSTACLE_HALF_SIZE: Vec3 = Vec3::new(1.0, 0.75, 0.5);
/// Z of the first obstacle row
pub const OBSTACLE_FIRST_Z: f32 = 15.0;
/// Distance between obstacle rows
pub const OBSTACLE_SPACING: f32 = 12.0;
/// Side lanes sit this far from the runway center
pub const OBSTACLE_LANE_OFFSET: f32 = 2.5;
pub const OBSTACLE_ROWS: usize = 15;
pub const OBSTACLE_SEED: u64 = 0x5eed;

/// Score points per second while a run is active
pub const SCORE_RATE: f32 = 10.0;

/// Camera offset from the runner
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 6.0, -10.0);
/// How quickly the camera catches up with the runner
pub const CAMERA_FOLLOW_SPEED: f32 = 5.0;
