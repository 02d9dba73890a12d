use super::UiState;
use crate::game::GameState;
use crate::stats::FrameStats;

/// Slim status strip + compact controls.
pub fn draw_toolbar(
    ctx: &egui::Context,
    game: &mut GameState,
    ui_state: &mut UiState,
    stats: &FrameStats,
) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(3.0);
        ui.horizontal_wrapped(|ui| {
            title_badge(ui, "SoL");

            ui.separator();
            compact_group(ui, "Game", |ui| {
                let pause_label = if ui_state.paused { "Play" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    ui_state.paused = !ui_state.paused;
                }
            });

            compact_group(ui, "Speed", |ui| {
                for speed in [1.0, 2.0, 5.0] {
                    speed_button(ui, ui_state, speed);
                }
            });

            compact_group(ui, "Panels", |ui| {
                ui.toggle_value(&mut ui_state.show_settings, "Settings");
            });

            if ui.button("Report").clicked() {
                ui_state.report_requested = true;
            }
        });

        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            metric_chip(ui, "Time", format!("{:.0}s", game.game_time));
            metric_chip(ui, "Stars", format!("{}", stats.star_count));
            metric_chip(ui, "Frame", format!("{:.1}ms", stats.frame_ms.average()));
            for player in &game.players {
                metric_chip(ui, &player.name, format!("{:.0} Sol", player.solarium));
            }
            if game.binary_light_active() {
                status_chip(ui, "SPLIT LIGHT", egui::Color32::from_rgb(230, 210, 120));
            }
        });
        ui.add_space(3.0);
    });
}

fn speed_button(ui: &mut egui::Ui, ui_state: &mut UiState, speed: f32) {
    let label = format!("{speed}x");
    let selected = (ui_state.speed_multiplier - speed).abs() < 0.01;
    if ui.selectable_label(selected, label).clicked() {
        ui_state.speed_multiplier = speed;
    }
}

fn title_badge(ui: &mut egui::Ui, label: &str) {
    let text = egui::RichText::new(label)
        .strong()
        .color(egui::Color32::from_rgb(255, 222, 140));
    ui.label(text);
}

fn compact_group(ui: &mut egui::Ui, heading: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(heading)
                    .small()
                    .color(egui::Color32::from_rgb(150, 170, 185)),
            );
            add_contents(ui);
        });
    });
}

fn metric_chip(ui: &mut egui::Ui, key: &str, value: String) {
    let text = egui::RichText::new(format!("{key}: {value}"))
        .small()
        .color(egui::Color32::from_rgb(205, 215, 225));
    ui.group(|ui| {
        ui.label(text);
    });
}

fn status_chip(ui: &mut egui::Ui, label: &str, color: egui::Color32) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(label).small().strong().color(color));
    });
}
