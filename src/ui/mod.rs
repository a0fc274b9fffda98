//! UI module - HUD text and camera follow

mod camera;
mod hud;

pub use camera::{FollowCamera, follow_runner};
pub use hud::{HudText, hud_text, spawn_hud, update_hud};
