//! Input module - PlayerInput resource and capture_input system

use bevy::prelude::*;

use crate::settings::RunnerSettings;

/// Buffered input state for the runner
#[derive(Resource, Default)]
pub struct PlayerInput {
    /// Desired direction on the ground plane (x = strafe, y = forward), unit length or zero
    pub move_dir: Vec2,
    /// Jump pressed since the last physics step (consumed by apply_input)
    pub jump_requested: bool,
}

/// Apply a circular dead zone and normalize the stick
pub fn shape_stick(raw: Vec2, dead_zone: f32) -> Vec2 {
    if raw.length() < dead_zone {
        Vec2::ZERO
    } else {
        raw.normalize_or_zero()
    }
}

/// Runs in Update to capture keyboard and gamepad input.
pub fn capture_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    settings: Res<RunnerSettings>,
    mut input: ResMut<PlayerInput>,
) {
    let mut raw = Vec2::ZERO;

    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        raw.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        raw.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        raw.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        raw.y -= 1.0;
    }

    // Camera looks down +Z, so screen-left is +X
    for gamepad in &gamepads {
        raw.x -= gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0);
        raw.y += gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0);
    }

    input.move_dir = shape_stick(raw, settings.dead_zone);

    if keyboard.just_pressed(KeyCode::Space)
        || gamepads
            .iter()
            .any(|gp| gp.just_pressed(GamepadButton::South))
    {
        input.jump_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_zone() {
        assert_eq!(shape_stick(Vec2::new(0.05, 0.0), 0.1), Vec2::ZERO);
    }

    #[test]
    fn test_zero_dead_zone_centered_stick_is_zero() {
        assert_eq!(shape_stick(Vec2::ZERO, 0.0), Vec2::ZERO);
        assert_eq!(shape_stick(Vec2::new(0.0, 0.5), 0.0), Vec2::Y);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let dir = shape_stick(Vec2::new(1.0, 1.0), 0.1);
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }
}
