//! Run controller systems

use bevy::prelude::*;

use super::{RunCommand, RunPhase, RunStatus, Score};
use crate::constants::*;
use crate::player::{Runner, RunnerSubject, Velocity};
use crate::replay::{
    ReplayFinished, ReplayOutcome, ReplayPlayback, ReplayRecorder, ReplayStore, ReplaySubject,
};

/// Keyboard shortcuts for the menu and game over panels
pub fn handle_run_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    phase: Res<RunPhase>,
    mut run_commands: MessageWriter<RunCommand>,
) {
    match *phase {
        RunPhase::MainMenu => {
            if keyboard.just_pressed(KeyCode::Enter) {
                run_commands.write(RunCommand::StartRun);
            }
            if keyboard.just_pressed(KeyCode::Escape) {
                run_commands.write(RunCommand::Quit);
            }
        }
        RunPhase::GameOver => {
            if keyboard.just_pressed(KeyCode::Enter) {
                run_commands.write(RunCommand::Restart);
            }
            if keyboard.just_pressed(KeyCode::KeyR) {
                run_commands.write(RunCommand::StartReplay);
            }
            if keyboard.just_pressed(KeyCode::KeyM) {
                run_commands.write(RunCommand::MainMenu);
            }
            if keyboard.just_pressed(KeyCode::Escape) {
                run_commands.write(RunCommand::Quit);
            }
        }
        RunPhase::Replaying => {
            if keyboard.just_pressed(KeyCode::KeyM) {
                run_commands.write(RunCommand::MainMenu);
            }
        }
        RunPhase::Running => {}
    }
}

/// Apply queued run commands in order
#[allow(clippy::too_many_arguments)]
pub fn apply_run_commands(
    mut run_commands: MessageReader<RunCommand>,
    time: Res<Time>,
    store: Res<ReplayStore>,
    mut phase: ResMut<RunPhase>,
    mut score: ResMut<Score>,
    mut status: ResMut<RunStatus>,
    mut recorder: ResMut<ReplayRecorder>,
    mut playback: ResMut<ReplayPlayback>,
    mut runners: Query<(&mut Transform, &mut Runner, &mut Velocity)>,
    mut app_exit: MessageWriter<AppExit>,
) {
    let now = time.elapsed();

    for command in run_commands.read() {
        let Ok((transform, runner, velocity)) = runners.single_mut() else {
            warn!("Ignoring {:?}: no runner entity", command);
            continue;
        };
        let mut subject = RunnerSubject::new(transform, runner, velocity);

        match (*command, *phase) {
            (RunCommand::Quit, _) => {
                info!("Quit requested");
                app_exit.write(AppExit::Success);
            }
            (RunCommand::StartRun | RunCommand::Restart, RunPhase::Running) => {}
            (RunCommand::StartRun | RunCommand::Restart, current) => {
                if current == RunPhase::Replaying {
                    playback.abort();
                }
                subject.reset_to(SPAWN_POSITION + Vec3::Y * SPAWN_DROP_HEIGHT, Quat::IDENTITY);
                recorder.start_recording(now, &mut subject);
                score.reset();
                status.0 = None;
                *phase = RunPhase::Running;
                info!("Run started");
            }
            (RunCommand::EndRun, RunPhase::Running) => {
                score.counting = false;
                subject.set_frozen(true);
                match recorder.stop_recording_and_save(now, &subject, &store) {
                    Ok(frames) => debug!("Run saved with {} frames", frames),
                    Err(e) => {
                        warn!("Failed to save replay to {}: {}", store.path().display(), e);
                        status.0 = Some("Replay could not be saved".to_string());
                    }
                }
                *phase = RunPhase::GameOver;
                info!("Run ended, score {}", score.display());
            }
            (RunCommand::EndRun, _) => {}
            (RunCommand::StartReplay, RunPhase::GameOver) => {
                match playback.start_replay(&store, &mut subject) {
                    Ok(true) => {
                        status.0 = None;
                        *phase = RunPhase::Replaying;
                    }
                    Ok(false) => {
                        status.0 = Some("No replay available".to_string());
                    }
                    Err(e) => {
                        warn!("Failed to load replay from {}: {}", store.path().display(), e);
                        status.0 = Some("No replay available".to_string());
                    }
                }
            }
            (RunCommand::StartReplay, _) => {}
            (RunCommand::MainMenu, RunPhase::Running) => {}
            (RunCommand::MainMenu, current) => {
                if current == RunPhase::Replaying {
                    playback.abort();
                }
                subject.set_frozen(true);
                score.counting = false;
                status.0 = None;
                *phase = RunPhase::MainMenu;
            }
        }
    }
}

/// Return to the game over panel when a replay finishes
pub fn handle_replay_finished(
    mut finished: MessageReader<ReplayFinished>,
    mut phase: ResMut<RunPhase>,
    mut status: ResMut<RunStatus>,
) {
    for ReplayFinished(outcome) in finished.read() {
        if *phase != RunPhase::Replaying {
            continue;
        }
        status.0 = Some(
            match outcome {
                ReplayOutcome::Ended => "Replay finished",
                ReplayOutcome::Died => "Replay finished: crashed",
            }
            .to_string(),
        );
        *phase = RunPhase::GameOver;
    }
}

/// Score grows while the run is active
pub fn update_score(time: Res<Time>, mut score: ResMut<Score>) {
    score.tick(time.delta_secs(), SCORE_RATE);
}
