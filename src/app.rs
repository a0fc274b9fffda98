//! Runner plugin: resources, messages and the per-frame system chain
//!
//! Shared by the windowed game and the headless tests. The caller supplies
//! `ButtonInput<KeyCode>` (the input plugin does this in the game) and may
//! insert `RunnerSettings` / `ReplayStore` up front to override defaults.

use bevy::prelude::*;

use crate::input::{self, PlayerInput};
use crate::player;
use crate::replay::{self, ReplayFinished, ReplayPlayback, ReplayRecorder, ReplayStore};
use crate::run::{self, RunCommand, RunPhase, RunStatus, Score};
use crate::settings::RunnerSettings;
use crate::ui;

pub struct RunnerPlugin;

impl Plugin for RunnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RunCommand>()
            .add_message::<ReplayFinished>()
            .init_resource::<RunnerSettings>()
            .init_resource::<RunPhase>()
            .init_resource::<Score>()
            .init_resource::<RunStatus>()
            .init_resource::<PlayerInput>()
            .init_resource::<ReplayRecorder>()
            .init_resource::<ReplayPlayback>();

        if !app.world().contains_resource::<ReplayStore>() {
            let store = ReplayStore::from_settings(app.world().resource::<RunnerSettings>());
            app.insert_resource(store);
        }

        // Order matters: physics may request EndRun, which the controller
        // applies before this frame is captured or played back.
        app.add_systems(
            Update,
            (
                run::handle_run_keys,
                input::capture_input,
                player::apply_input,
                player::apply_gravity_and_move,
                player::check_grounded,
                player::detect_obstacle_hits,
                player::detect_fall,
                run::apply_run_commands,
                replay::record_tick.run_if(run::run_active),
                replay::replay_tick.run_if(run::replay_active),
                run::handle_replay_finished,
                run::update_score.run_if(run::run_active),
                ui::update_hud,
                ui::follow_runner,
            )
                .chain(),
        );
    }
}
