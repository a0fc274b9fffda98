//! HUD components and systems (menu, score, game over and replay banners)

use bevy::prelude::*;

use crate::constants::*;
use crate::replay::ReplayPlayback;
use crate::run::{RunPhase, RunStatus, Score};

/// The single HUD text node
#[derive(Component)]
pub struct HudText;

/// Spawn the HUD text node
pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(TEXT_PRIMARY),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(16.0),
            ..default()
        },
        HudText,
    ));
}

/// Text shown for the current phase
pub fn hud_text(
    phase: RunPhase,
    score: &Score,
    status: &RunStatus,
    playback: &ReplayPlayback,
) -> String {
    let status_line = status
        .0
        .as_deref()
        .map(|s| format!("\n{s}"))
        .unwrap_or_default();

    match phase {
        RunPhase::MainMenu => "RUNNER\n[Enter] Start  [Esc] Quit".to_string(),
        RunPhase::Running => format!("Score: {}", score.display()),
        RunPhase::GameOver => format!(
            "GAME OVER\nScore: {}\n[Enter] Restart  [R] Replay  [M] Menu  [Esc] Quit{}",
            score.display(),
            status_line
        ),
        RunPhase::Replaying => format!(
            "REPLAY  {:.1}s / {:.1}s  frame {}/{}\n[M] Menu",
            playback.elapsed(),
            playback.track().duration(),
            playback.cursor() + 1,
            playback.track().len()
        ),
    }
}

/// Update the HUD text from run state
pub fn update_hud(
    phase: Res<RunPhase>,
    score: Res<Score>,
    status: Res<RunStatus>,
    playback: Res<ReplayPlayback>,
    mut text_query: Query<(&mut Text, &mut TextColor), With<HudText>>,
) {
    let Ok((mut text, mut color)) = text_query.single_mut() else {
        return;
    };

    let content = hud_text(*phase, &score, &status, &playback);
    if text.0 != content {
        text.0 = content;
    }
    let wanted = if *phase == RunPhase::Replaying {
        TEXT_ACCENT
    } else {
        TEXT_PRIMARY
    };
    if color.0 != wanted {
        color.0 = wanted;
    }
}
