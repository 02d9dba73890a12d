//! Frame composition. Layer order matters visually but not for
//! correctness: sky (nebula + stars) first, then shadow-affected world
//! sprites, then influence outlines, then the screen-space HUD.

use macroquad::prelude::*;

use crate::anim;
use crate::camera::CameraController;
use crate::config;
use crate::game::{self, Asteroid, GameState, SolarMirror, StellarForge};
use crate::nebula::NebulaLayer;
use crate::outline;
use crate::shadow::{self, LightSource};
use crate::sprites::{self, FixedLru};
use crate::starfield::StarField;
use crate::stats::FrameStats;
use crate::visual::VisualSettings;

const BG_COLOR: Color = Color::new(0.01, 0.02, 0.05, 1.0);

/// Textures the renderer owns across frames: the sun sprite (or its
/// procedural fallback), the asteroid silhouette mask, and the bounded
/// glow gradient cache keyed by radius bucket.
pub struct RenderResources {
    pub sun_texture: Texture2D,
    pub asteroid_mask: Texture2D,
    pub glow_cache: FixedLru<Texture2D>,
}

impl RenderResources {
    pub async fn load() -> Self {
        Self {
            sun_texture: sprites::load_sun_texture().await,
            asteroid_mask: sprites::radial_gradient_texture(
                64,
                Color::new(1.0, 1.0, 1.0, 1.0),
                Color::new(1.0, 1.0, 1.0, 0.0),
                6.0,
            ),
            glow_cache: FixedLru::new(config::GRADIENT_CACHE_CAPACITY),
        }
    }

    fn glow_texture(&mut self, radius: f32, color: Color) -> Texture2D {
        let bucket = sprites::radius_bucket(radius);
        self.glow_cache
            .get_or_insert_with(bucket, || {
                sprites::radial_gradient_texture(
                    64,
                    Color::new(color.r, color.g, color.b, 0.5),
                    Color::new(color.r, color.g, color.b, 0.0),
                    1.4,
                )
            })
            .clone()
    }
}

#[allow(clippy::too_many_arguments)]
pub fn draw(
    game: &mut GameState,
    camera: &CameraController,
    starfield: &mut StarField,
    nebula: Option<&NebulaLayer>,
    resources: &mut RenderResources,
    settings: &VisualSettings,
    stats: &mut FrameStats,
    time_s: f32,
    dt: f32,
) {
    clear_background(BG_COLOR);

    // Sky pass, in screen space.
    set_default_camera();
    if settings.nebula_enabled {
        if let Some(layer) = nebula {
            layer.draw();
        }
    }
    let sun_screen = game.suns.first().map(|sun| camera.world_to_screen(sun.pos));
    starfield.render(time_s, sun_screen, settings);

    // World pass.
    set_camera(&camera.to_macroquad_camera());

    let lights = game.light_sources();
    stats.shadow_trails = 0;

    draw_suns(game, resources);
    stats.shadow_trails += draw_asteroids(game, &lights, resources, settings);
    stats.shadow_trails += draw_structures(game, &lights, resources, settings, dt);

    if settings.outlines_enabled {
        let circles = game.influence_circles();
        let paths = outline::plan_union_outline(&circles);
        stats.outline_segments = paths.len();
        outline::draw_paths(&paths, Color::new(0.6, 0.85, 1.0, 1.0));
    } else {
        stats.outline_segments = 0;
    }

    // Binary split mode: a hard full-dark half on the side facing away
    // from the sun, replacing the ordinary shadow pass.
    set_default_camera();
    if game.binary_light_active() {
        draw_split_overlay(sun_screen);
    }

    stats.star_count = starfield.len();
}

fn draw_suns(game: &GameState, resources: &mut RenderResources) {
    for sun in &game.suns {
        let glow_radius = sun.radius * 2.4;
        let glow = resources.glow_texture(glow_radius, Color::new(1.0, 0.85, 0.5, 1.0));
        draw_texture_ex(
            &glow,
            sun.pos.x - glow_radius,
            sun.pos.y - glow_radius,
            Color::new(1.0, 1.0, 1.0, 0.6 * sun.intensity),
            DrawTextureParams {
                dest_size: Some(vec2(glow_radius * 2.0, glow_radius * 2.0)),
                ..Default::default()
            },
        );

        draw_texture_ex(
            &resources.sun_texture,
            sun.pos.x - sun.radius,
            sun.pos.y - sun.radius,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(sun.radius * 2.0, sun.radius * 2.0)),
                ..Default::default()
            },
        );
    }
}

fn draw_asteroids(
    game: &GameState,
    lights: &[LightSource],
    resources: &RenderResources,
    settings: &VisualSettings,
) -> usize {
    let mut trails = 0;
    for (i, asteroid) in game.asteroids.iter().enumerate() {
        // The asteroid must not occlude itself.
        let others: Vec<Asteroid> = game
            .asteroids
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, a)| a.clone())
            .collect();
        let shadowed = game::point_in_shadow(asteroid.pos, &game.suns, &others);

        shadow::draw_silhouette_shadow(
            asteroid.pos,
            &resources.asteroid_mask,
            asteroid.radius * 2.0,
            asteroid.rotation,
            lights,
            settings,
        );

        draw_rock(asteroid, shadowed);

        trails += shadow::draw_particle_shadow(
            asteroid.pos,
            lights,
            config::PARTICLE_SHADOW_MAX_DIST,
            shadowed,
            settings,
        );
    }
    trails
}

fn draw_rock(asteroid: &Asteroid, shadowed: bool) {
    let lit = if shadowed { 0.45 } else { 1.0 };
    let base = Color::new(0.38 * lit, 0.35 * lit, 0.33 * lit, 1.0);
    draw_circle(asteroid.pos.x, asteroid.pos.y, asteroid.radius, base);

    // A couple of craters sell the rotation.
    let crater_dir = Vec2::from_angle(asteroid.rotation);
    let c1 = asteroid.pos + crater_dir * asteroid.radius * 0.4;
    let c2 = asteroid.pos - crater_dir.perp() * asteroid.radius * 0.5;
    let crater = Color::new(0.24 * lit, 0.22 * lit, 0.21 * lit, 1.0);
    draw_circle(c1.x, c1.y, asteroid.radius * 0.28, crater);
    draw_circle(c2.x, c2.y, asteroid.radius * 0.18, crater);
}

fn draw_structures(
    game: &mut GameState,
    lights: &[LightSource],
    resources: &mut RenderResources,
    settings: &VisualSettings,
    dt: f32,
) -> usize {
    let mut trails = 0;
    let asteroids = game.asteroids.clone();
    let suns = game.suns.clone();

    let glow_store = &mut game.glow;
    for player in &mut game.players {
        let faction_color = player.faction.color();

        if let Some(forge) = &player.forge {
            if forge.health > 0.0 {
                let lit = forge.is_receiving_light;
                if let Some(glow) = forge.glow.and_then(|id| glow_store.get_mut(id)) {
                    glow.alpha = anim::approach(glow.alpha, if lit { 0.8 } else { 0.25 }, 4.0, dt);
                    glow.radius = anim::approach(
                        glow.radius,
                        config::FORGE_INFLUENCE_RADIUS * if lit { 0.5 } else { 0.35 },
                        4.0,
                        dt,
                    );
                }
                let glow_state = forge
                    .glow
                    .and_then(|id| glow_store.get(id))
                    .copied()
                    .unwrap_or_default();
                draw_forge(forge, faction_color, glow_state, resources);

                trails += shadow::draw_particle_shadow(
                    forge.pos,
                    lights,
                    config::PARTICLE_SHADOW_MAX_DIST,
                    game::point_in_shadow(forge.pos, &suns, &asteroids),
                    settings,
                );
            }
        }

        for mirror in &player.mirrors {
            let shadowed = game::point_in_shadow(mirror.pos, &suns, &asteroids);
            if let Some(glow) = mirror.glow.and_then(|id| glow_store.get_mut(id)) {
                glow.alpha = anim::approach(glow.alpha, if shadowed { 0.15 } else { 0.6 }, 4.0, dt);
                glow.radius =
                    anim::approach(glow.radius, config::MIRROR_INFLUENCE_RADIUS * 0.4, 4.0, dt);
            }
            let glow_state = mirror
                .glow
                .and_then(|id| glow_store.get(id))
                .copied()
                .unwrap_or_default();
            draw_mirror(mirror, faction_color, glow_state, resources);

            trails += shadow::draw_particle_shadow(
                mirror.pos,
                lights,
                config::PARTICLE_SHADOW_MAX_DIST,
                shadowed,
                settings,
            );
        }
    }
    trails
}

fn draw_forge(
    forge: &StellarForge,
    color: Color,
    glow: anim::GlowAnim,
    resources: &mut RenderResources,
) {
    if glow.alpha > 0.01 && glow.radius > 1.0 {
        let tex = resources.glow_texture(glow.radius, color);
        draw_texture_ex(
            &tex,
            forge.pos.x - glow.radius,
            forge.pos.y - glow.radius,
            Color::new(1.0, 1.0, 1.0, glow.alpha),
            DrawTextureParams {
                dest_size: Some(vec2(glow.radius * 2.0, glow.radius * 2.0)),
                ..Default::default()
            },
        );
    }

    let r = 26.0;
    draw_poly(forge.pos.x, forge.pos.y, 6, r, 0.0, Color::new(0.18, 0.2, 0.24, 1.0));
    draw_poly_lines(forge.pos.x, forge.pos.y, 6, r, 0.0, 2.0, color);
    draw_circle(forge.pos.x, forge.pos.y, r * 0.35, color);

    // Health bar above the forge.
    let frac = (forge.health / config::FORGE_HEALTH).clamp(0.0, 1.0);
    let w = r * 2.0;
    let y = forge.pos.y - r - 10.0;
    draw_line(
        forge.pos.x - w * 0.5,
        y,
        forge.pos.x + w * 0.5,
        y,
        3.0,
        Color::new(0.1, 0.1, 0.12, 0.8),
    );
    draw_line(
        forge.pos.x - w * 0.5,
        y,
        forge.pos.x - w * 0.5 + w * frac,
        y,
        3.0,
        Color::new(0.3, 0.9, 0.4, 0.9),
    );
}

fn draw_mirror(
    mirror: &SolarMirror,
    color: Color,
    glow: anim::GlowAnim,
    resources: &mut RenderResources,
) {
    if glow.alpha > 0.01 && glow.radius > 1.0 {
        let tex = resources.glow_texture(glow.radius, color);
        draw_texture_ex(
            &tex,
            mirror.pos.x - glow.radius,
            mirror.pos.y - glow.radius,
            Color::new(1.0, 1.0, 1.0, glow.alpha),
            DrawTextureParams {
                dest_size: Some(vec2(glow.radius * 2.0, glow.radius * 2.0)),
                ..Default::default()
            },
        );
    }

    // Mirror face always turned toward the central sun.
    let toward_sun = (-mirror.pos).normalize_or_zero();
    let perp = toward_sun.perp();
    let half = perp * 10.0;
    let a = mirror.pos + half;
    let b = mirror.pos - half;
    draw_line(a.x, a.y, b.x, b.y, 4.0, Color::new(0.8, 0.88, 0.95, 1.0));
    draw_circle(mirror.pos.x, mirror.pos.y, 4.0, color);
}

fn draw_split_overlay(sun_screen: Option<Vec2>) {
    let sw = screen_width();
    let sh = screen_height();
    let sun_x = sun_screen.map(|p| p.x).unwrap_or(sw * 0.5);
    let dark = Color::new(0.0, 0.0, 0.0, 0.72);
    if sun_x >= sw * 0.5 {
        draw_rectangle(0.0, 0.0, sw * 0.5, sh, dark);
    } else {
        draw_rectangle(sw * 0.5, 0.0, sw * 0.5, sh, dark);
    }
}

/// Screen-space HUD, drop-shadowed text in the corner.
pub fn draw_hud(game: &GameState, stats: &FrameStats, settings: &VisualSettings, paused: bool) {
    let tc = Color::new(0.7, 0.75, 0.8, 1.0);
    let sh = Color::new(0.0, 0.0, 0.0, 0.5);
    let mut y = 20.0;
    let line = |text: &str, y: &mut f32| {
        draw_text(text, 11.0, *y + 1.0, 18.0, sh);
        draw_text(text, 10.0, *y, 18.0, tc);
        *y += 20.0;
    };

    line(&format!("FPS: {}", get_fps()), &mut y);
    line(
        &format!("Stars: {} ({})", stats.star_count, settings.quality.label()),
        &mut y,
    );
    line(
        &format!(
            "Outline paths: {} | Trails: {}",
            stats.outline_segments, stats.shadow_trails
        ),
        &mut y,
    );

    for player in &game.players {
        line(
            &format!(
                "{} [{}]: {:.0} Sol{}",
                player.name,
                player.faction.label(),
                player.solarium,
                if player.is_defeated() { " (defeated)" } else { "" }
            ),
            &mut y,
        );
    }

    if game.binary_light_active() {
        line("SPLIT LIGHT MODE", &mut y);
    }

    if let Some(winner) = game.check_victory() {
        let text = format!("{} has won!", game.players[winner].name);
        let tw = measure_text(&text, None, 32, 1.0).width;
        let x = screen_width() * 0.5 - tw * 0.5;
        draw_text(&text, x + 1.0, 61.0, 32.0, sh);
        draw_text(&text, x, 60.0, 32.0, Color::new(1.0, 0.85, 0.3, 1.0));
    }

    if paused {
        let pause_text = "PAUSED (Space to resume)";
        let tw = measure_text(pause_text, None, 24, 1.0).width;
        let x = screen_width() * 0.5 - tw * 0.5;
        draw_text(pause_text, x + 1.0, 31.0, 24.0, sh);
        draw_text(pause_text, x, 30.0, 24.0, Color::new(1.0, 0.8, 0.2, 0.9));
    }
}
