use super::UiState;
use crate::game::GameState;
use crate::stats::FrameStats;
use crate::visual::{VisualQuality, VisualSettings};

/// Runtime settings panel: quality preset, feature gates, scene tools.
pub fn draw_settings(
    ctx: &egui::Context,
    game: &mut GameState,
    vis: &mut VisualSettings,
    ui_state: &mut UiState,
    stats: &FrameStats,
) {
    egui::Window::new("Settings")
        .default_pos(egui::pos2(300.0, 60.0))
        .default_size(egui::vec2(280.0, 340.0))
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading("Quality");

            ui.horizontal(|ui| {
                for quality in VisualQuality::ALL {
                    let selected = vis.quality == quality;
                    if ui.selectable_label(selected, quality.label()).clicked() && !selected {
                        vis.set_quality_preset(quality);
                        // Budget changed: the star field must be rebuilt.
                        ui_state.regenerate_requested = true;
                    }
                }
            });
            ui.label(format!("Star budget: {}", vis.quality.star_budget()));

            ui.separator();
            ui.heading("Features");
            ui.checkbox(&mut vis.shadows_enabled, "Shadow trails & silhouettes");
            ui.checkbox(&mut vis.fringe_enabled, "Chromatic fringe stars");
            ui.checkbox(&mut vis.outlines_enabled, "Influence zone outlines");
            ui.checkbox(&mut vis.nebula_enabled, "Nebula haze");

            if ui.button("Regenerate star field").clicked() {
                ui_state.regenerate_requested = true;
            }

            ui.separator();
            ui.heading("Scene Tools");

            if ui.button("Spawn asteroid").clicked() {
                use ::rand::{Rng, SeedableRng};
                // One-off spawn; entropy seeding is fine for a debug tool.
                let mut rng = rand_chacha::ChaCha8Rng::from_entropy();
                let count = 1 + rng.gen_range(0..2);
                game.spawn_asteroids(count, &mut rng);
            }

            if let Some(sun) = game.suns.first_mut() {
                let mut binary = sun.binary;
                if ui.checkbox(&mut binary, "Binary split light").changed() {
                    sun.binary = binary;
                }
            }

            if ui.button("Damage enemy forge (-200)").clicked() {
                if let Some(forge) = game.players.get_mut(1).and_then(|p| p.forge.as_mut()) {
                    forge.health = (forge.health - 200.0).max(0.0);
                }
            }

            ui.separator();
            ui.heading("Info");
            ui.label(format!("Asteroids: {}", game.asteroids.len()));
            ui.label(format!("Outline paths: {}", stats.outline_segments));
            ui.label(format!("Shadow trails: {}", stats.shadow_trails));
            ui.label(format!("Frame avg: {:.2} ms", stats.frame_ms.average()));
        });
}
