//! Chase camera

use bevy::prelude::*;

use crate::constants::*;
use crate::player::Runner;

/// Marker for the camera that trails the runner
#[derive(Component)]
pub struct FollowCamera;

/// Ease the camera toward its offset behind the runner and look at it
pub fn follow_runner(
    time: Res<Time>,
    runners: Query<&Transform, With<Runner>>,
    mut cameras: Query<&mut Transform, (With<FollowCamera>, Without<Runner>)>,
) {
    let Ok(target) = runners.single() else {
        return;
    };
    let Ok(mut camera) = cameras.single_mut() else {
        return;
    };

    let goal = target.translation + CAMERA_OFFSET;
    let t = 1.0 - (-CAMERA_FOLLOW_SPEED * time.delta_secs()).exp();
    camera.translation = camera.translation.lerp(goal, t);
    camera.look_at(target.translation, Vec3::Y);
}
