use macroquad::prelude::*;
use ::rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod anim;
mod camera;
mod config;
mod density;
mod game;
mod nebula;
mod outline;
mod renderer;
mod report;
mod shadow;
mod sprites;
mod starfield;
mod stats;
mod ui;
mod visual;

use camera::CameraController;
use game::Faction;
use nebula::NebulaLayer;
use renderer::RenderResources;
use report::FrameReport;
use starfield::StarField;
use stats::FrameStats;
use ui::UiState;
use visual::{VisualQuality, VisualSettings};

fn window_conf() -> Conf {
    Conf {
        window_title: "SoL — Speed of Light".to_string(),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

struct CliOptions {
    quality: VisualQuality,
    seed: u64,
}

fn parse_cli() -> CliOptions {
    let mut options = CliOptions {
        quality: VisualQuality::High,
        seed: 42,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--quality" => {
                if let Some(q) = args.next().as_deref().and_then(VisualQuality::parse_cli) {
                    options.quality = q;
                } else {
                    eprintln!("[SOL] unknown quality tier, keeping {}", options.quality.label());
                }
            }
            "--seed" => {
                if let Some(seed) = args.next().and_then(|v| v.parse().ok()) {
                    options.seed = seed;
                }
            }
            other => eprintln!("[SOL] ignoring unknown argument {other}"),
        }
    }
    options
}

#[macroquad::main(window_conf)]
async fn main() {
    let options = parse_cli();
    let mut vis = VisualSettings::with_quality(options.quality);
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);

    let mut game = game::create_standard_game(&[
        ("Commander Nova", Faction::Radiant),
        ("Admiral Gold", Faction::Aurum),
    ]);
    game.spawn_asteroids(config::ASTEROID_COUNT, &mut rng);

    let mut camera = CameraController::new(Vec2::ZERO);
    let mut starfield = StarField::new();
    let mut nebula: Option<NebulaLayer> = None;
    let mut resources = RenderResources::load().await;
    let mut stats = FrameStats::new(600);
    let mut ui_state = UiState::default();
    let mut accumulator = 0.0f64;

    eprintln!(
        "[SOL] started: quality {}, seed {}",
        vis.quality.label(),
        options.seed
    );

    loop {
        let frame_time = get_frame_time() as f64;
        accumulator += frame_time.min(0.1);

        let effective_dt = config::FIXED_DT as f64 / ui_state.speed_multiplier as f64;
        if !ui_state.paused {
            while accumulator >= effective_dt {
                game.update(config::FIXED_DT);
                accumulator -= effective_dt;
            }
        } else {
            accumulator = 0.0;
        }

        camera.update(get_frame_time());

        if is_key_pressed(KeyCode::Space) {
            ui_state.paused = !ui_state.paused;
        }
        // Toggle the binary split-light mode on the primary sun.
        if is_key_pressed(KeyCode::B) {
            if let Some(sun) = game.suns.first_mut() {
                sun.binary = !sun.binary;
            }
        }
        if is_key_pressed(KeyCode::F10) {
            ui_state.report_requested = true;
        }

        // The star field is tied to the viewport and the quality tier; any
        // change rebuilds it wholesale.
        let (sw, sh) = (screen_width(), screen_height());
        if ui_state.regenerate_requested || starfield.is_stale(sw, sh, vis.quality) {
            ui_state.regenerate_requested = false;
            starfield.regenerate(sw, sh, vis.quality, &mut rng);
            eprintln!(
                "[SOL] star field rebuilt: {} stars at {}x{} ({})",
                starfield.len(),
                sw as u32,
                sh as u32,
                vis.quality.label()
            );
        }
        if nebula.as_ref().map_or(true, |n| n.is_stale(sw, sh)) {
            nebula = Some(NebulaLayer::generate(sw, sh, options.seed as u32));
        }

        renderer::draw(
            &mut game,
            &camera,
            &mut starfield,
            nebula.as_ref(),
            &mut resources,
            &vis,
            &mut stats,
            get_time() as f32,
            get_frame_time(),
        );
        renderer::draw_hud(&game, &stats, &vis, ui_state.paused);

        ui::draw_ui(&mut game, &mut vis, &mut ui_state, &stats);

        stats.record_frame(frame_time as f32 * 1000.0);

        if ui_state.report_requested {
            ui_state.report_requested = false;
            let report = FrameReport::from_stats(&stats, vis.quality);
            match report::write_report(&report, "sol_frame_report.json") {
                Ok(()) => eprintln!("[SOL] wrote sol_frame_report.json"),
                Err(e) => eprintln!("[SOL] report failed: {e}"),
            }
        }

        next_frame().await;
    }
}
