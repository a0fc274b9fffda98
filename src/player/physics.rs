//! Runner physics systems
//!
//! Kinematic stand-in for the rigid body: input steers horizontal velocity,
//! gravity pulls down unless the runner stands on the runway. Nothing here
//! runs while the runner is frozen.

use bevy::prelude::*;

use crate::constants::*;
use crate::input::PlayerInput;
use crate::player::components::*;
use crate::run::RunCommand;
use crate::settings::RunnerSettings;

/// Velocity after one step of easing the horizontal part toward `target`.
///
/// Vertical velocity is left alone.
pub fn steer_velocity(velocity: Vec3, target: Vec3, acceleration: f32, dt: f32) -> Vec3 {
    let blend = (acceleration * dt).min(1.0);
    let change = Vec3::new(target.x - velocity.x, 0.0, target.z - velocity.z);
    velocity + change * blend
}

/// Whether a point is above the runway footprint
pub fn over_runway(position: Vec3) -> bool {
    position.x.abs() <= RUNWAY_HALF_WIDTH
        && position.z >= RUNWAY_START_Z
        && position.z <= RUNWAY_END_Z
}

/// Axis-aligned box overlap test
pub fn boxes_overlap(a_center: Vec3, a_half: Vec3, b_center: Vec3, b_half: Vec3) -> bool {
    let delta = (a_center - b_center).abs();
    let reach = a_half + b_half;
    delta.x < reach.x && delta.y < reach.y && delta.z < reach.z
}

/// Runs in Update to turn captured input into velocity.
pub fn apply_input(
    settings: Res<RunnerSettings>,
    mut input: ResMut<PlayerInput>,
    time: Res<Time>,
    mut runners: Query<(&Runner, &mut Velocity, &mut JumpCooldown, &Grounded)>,
) {
    let dt = time.delta_secs();
    let jump_requested = std::mem::take(&mut input.jump_requested);

    for (runner, mut velocity, mut cooldown, grounded) in &mut runners {
        if !runner.is_live() {
            continue;
        }

        let target = Vec3::new(input.move_dir.x, 0.0, input.move_dir.y) * settings.max_speed;
        velocity.0 = steer_velocity(velocity.0, target, settings.acceleration, dt);

        cooldown.0 = (cooldown.0 - dt).max(0.0);
        if jump_requested && grounded.0 && cooldown.0 <= 0.0 {
            velocity.0.y = settings.jump_velocity;
            cooldown.0 = settings.jump_cooldown;
        }
    }
}

/// Apply gravity and integrate position
pub fn apply_gravity_and_move(
    time: Res<Time>,
    mut runners: Query<(&Runner, &mut Velocity, &mut Transform, &Grounded)>,
) {
    let dt = time.delta_secs();
    for (runner, mut velocity, mut transform, grounded) in &mut runners {
        if !runner.is_live() {
            continue;
        }
        if !grounded.0 {
            velocity.0.y -= GRAVITY * dt;
        }
        transform.translation += velocity.0 * dt;
    }
}

/// Land on the runway when falling onto it
pub fn check_grounded(mut runners: Query<(&Runner, &mut Velocity, &mut Transform, &mut Grounded)>) {
    for (runner, mut velocity, mut transform, mut grounded) in &mut runners {
        if !runner.is_live() {
            continue;
        }

        let bottom = transform.translation.y - RUNNER_HALF_SIZE.y;
        // Below this the runner has dropped past the edge and keeps falling
        let landing_band = RUNWAY_TOP - RUNNER_HALF_SIZE.y;

        if over_runway(transform.translation)
            && bottom <= RUNWAY_TOP
            && bottom >= landing_band
            && velocity.0.y <= 0.0
        {
            transform.translation.y = RUNWAY_TOP + RUNNER_HALF_SIZE.y;
            velocity.0.y = 0.0;
            grounded.0 = true;
        } else {
            grounded.0 = false;
        }
    }
}

/// Kill the runner on first obstacle contact and end the run
pub fn detect_obstacle_hits(
    mut runners: Query<(&mut Runner, &Transform)>,
    obstacles: Query<(&Obstacle, &Transform), Without<Runner>>,
    mut run_commands: MessageWriter<RunCommand>,
) {
    for (mut runner, transform) in &mut runners {
        if !runner.is_live() || runner.dead {
            continue;
        }
        let hit = obstacles.iter().any(|(obstacle, obstacle_transform)| {
            boxes_overlap(
                transform.translation,
                RUNNER_HALF_SIZE,
                obstacle_transform.translation,
                obstacle.half_extents,
            )
        });
        if hit {
            info!("Runner hit an obstacle at {:?}", transform.translation);
            runner.dead = true;
            run_commands.write(RunCommand::EndRun);
        }
    }
}

/// End the run once the runner drops below the fall threshold
pub fn detect_fall(
    settings: Res<RunnerSettings>,
    runners: Query<(&Runner, &Transform)>,
    mut run_commands: MessageWriter<RunCommand>,
) {
    for (runner, transform) in &runners {
        if runner.is_live() && transform.translation.y < settings.fall_threshold {
            info!("Runner fell off at {:?}", transform.translation);
            run_commands.write(RunCommand::EndRun);
        }
    }
}
