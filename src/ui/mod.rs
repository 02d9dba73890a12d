pub mod settings;
pub mod toolbar;

use crate::game::GameState;
use crate::stats::FrameStats;
use crate::visual::VisualSettings;

/// Tracks which UI panels are open and pending one-shot requests from the
/// panels back to the main loop.
pub struct UiState {
    pub show_settings: bool,
    pub paused: bool,
    pub speed_multiplier: f32,
    pub regenerate_requested: bool,
    pub report_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_settings: false,
            paused: false,
            speed_multiplier: 1.0,
            regenerate_requested: false,
            report_requested: false,
        }
    }
}

/// Draw all egui UI panels.
pub fn draw_ui(
    game: &mut GameState,
    vis: &mut VisualSettings,
    ui_state: &mut UiState,
    stats: &FrameStats,
) {
    egui_macroquad::ui(|ctx| {
        toolbar::draw_toolbar(ctx, game, ui_state, stats);

        if ui_state.show_settings {
            settings::draw_settings(ctx, game, vis, ui_state, stats);
        }
    });

    egui_macroquad::draw();
}
