//! Directional shadow trails and soft silhouette projections.
//!
//! This module never decides what is occluded: the point-in-shadow verdict
//! and the active light set both come from the simulation. It only turns
//! them into away-from-light gradients and offset silhouette copies.

use macroquad::prelude::*;

use crate::config;
use crate::visual::VisualSettings;

/// A light as seen by the renderer. `binary` marks the split full-light /
/// full-dark mode, which bypasses ordinary shadow computation entirely.
#[derive(Clone, Copy, Debug)]
pub struct LightSource {
    pub pos: Vec2,
    pub binary: bool,
}

/// Per-draw-call gradient descriptor derived from one light and one target
/// point. Not stored anywhere; recomputed whenever something is drawn.
#[derive(Clone, Copy, Debug)]
pub struct ShadowTrail {
    pub origin: Vec2,
    /// Unit direction pointing away from the light.
    pub direction: Vec2,
    pub length: f32,
    pub opacity: f32,
}

const ZERO_DIST_EPSILON: f32 = 1e-4;

/// Compute one trail per light within `max_distance` of `point`. Lights at
/// or beyond `max_distance` contribute nothing, as does a light sitting
/// exactly on the point (the direction would be undefined).
pub fn compute_trails(point: Vec2, lights: &[LightSource], max_distance: f32) -> Vec<ShadowTrail> {
    let mut trails = Vec::new();
    if max_distance <= 0.0 {
        return trails;
    }

    for light in lights {
        let delta = point - light.pos;
        let distance = delta.length();
        if distance >= max_distance || distance < ZERO_DIST_EPSILON {
            continue;
        }

        let proximity = 1.0 - distance / max_distance;
        trails.push(ShadowTrail {
            origin: point,
            direction: delta / distance,
            length: config::SHADOW_TRAIL_BASE_LEN + config::SHADOW_TRAIL_EXTRA_LEN * proximity,
            opacity: config::SHADOW_TRAIL_MAX_OPACITY * proximity,
        });
    }

    trails
}

fn binary_light_active(lights: &[LightSource]) -> bool {
    lights.iter().any(|l| l.binary)
}

/// Draw the shadow trail of a small object at `point`. Each nearby light
/// contributes an independent additive trail; the whole pass is skipped at
/// the Low tier and in binary-light scenes. Returns how many trails were
/// drawn, for frame stats.
pub fn draw_particle_shadow(
    point: Vec2,
    lights: &[LightSource],
    max_distance: f32,
    shadowed: bool,
    settings: &VisualSettings,
) -> usize {
    if !settings.shadows_enabled || binary_light_active(lights) {
        return 0;
    }
    // A point already inside a shadow receives no direct light to cast from.
    if shadowed {
        return 0;
    }

    let trails = compute_trails(point, lights, max_distance);
    for trail in &trails {
        draw_trail_gradient(trail);
    }
    trails.len()
}

// Gradient approximation: a run of short segments with stepped-down alpha,
// full opacity at the object fading to transparent at the tail.
const TRAIL_SEGMENTS: usize = 6;

fn draw_trail_gradient(trail: &ShadowTrail) {
    for i in 0..TRAIL_SEGMENTS {
        let t0 = i as f32 / TRAIL_SEGMENTS as f32;
        let t1 = (i + 1) as f32 / TRAIL_SEGMENTS as f32;
        let a = trail.opacity * (1.0 - t0);
        let start = trail.origin + trail.direction * (trail.length * t0);
        let end = trail.origin + trail.direction * (trail.length * t1);
        let width = (3.0 * (1.0 - t0 * 0.6)).max(0.8);
        draw_line(start.x, start.y, end.x, end.y, width, Color::new(0.0, 0.0, 0.02, a));
    }
}

/// Project a soft silhouette of an opaque sprite away from each nearby
/// light: 2-3 successively offset, alpha-decreasing copies approximate a
/// penumbra without real shadow-volume work.
pub fn draw_silhouette_shadow(
    point: Vec2,
    mask: &Texture2D,
    size: f32,
    rotation: f32,
    lights: &[LightSource],
    settings: &VisualSettings,
) {
    let layers = settings.quality.silhouette_layers();
    if layers == 0 || !settings.shadows_enabled || binary_light_active(lights) {
        return;
    }

    for light in lights {
        let delta = point - light.pos;
        let distance = delta.length();
        if distance >= config::SILHOUETTE_MAX_DIST || distance < ZERO_DIST_EPSILON {
            continue;
        }
        let away = delta / distance;
        let proximity = 1.0 - distance / config::SILHOUETTE_MAX_DIST;

        for layer in 1..=layers {
            let offset = away * config::SILHOUETTE_OFFSET_STEP * layer as f32;
            let alpha = 0.30 * proximity * (1.0 - layer as f32 / (layers + 1) as f32);
            let dest = size * (1.0 + 0.08 * layer as f32);
            draw_texture_ex(
                mask,
                point.x + offset.x - dest * 0.5,
                point.y + offset.y - dest * 0.5,
                Color::new(0.0, 0.0, 0.03, alpha),
                DrawTextureParams {
                    dest_size: Some(vec2(dest, dest)),
                    rotation,
                    ..Default::default()
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light(x: f32, y: f32) -> LightSource {
        LightSource { pos: vec2(x, y), binary: false }
    }

    #[test]
    fn no_lights_means_no_trails() {
        assert!(compute_trails(vec2(10.0, 10.0), &[], 200.0).is_empty());
    }

    #[test]
    fn distant_light_contributes_nothing() {
        let lights = [light(0.0, 0.0)];
        let point = vec2(config::PARTICLE_SHADOW_MAX_DIST + 1.0, 0.0);
        assert!(compute_trails(point, &lights, config::PARTICLE_SHADOW_MAX_DIST).is_empty());

        // Exactly at max distance the proximity is zero; excluded too.
        let at_edge = vec2(config::PARTICLE_SHADOW_MAX_DIST, 0.0);
        assert!(compute_trails(at_edge, &lights, config::PARTICLE_SHADOW_MAX_DIST).is_empty());
    }

    #[test]
    fn closer_light_casts_longer_stronger_trail() {
        let lights = [light(0.0, 0.0)];
        let near = compute_trails(vec2(50.0, 0.0), &lights, 200.0);
        let far = compute_trails(vec2(150.0, 0.0), &lights, 200.0);
        assert_eq!(near.len(), 1);
        assert_eq!(far.len(), 1);
        assert!(near[0].opacity > far[0].opacity);
        assert!(near[0].length > far[0].length);
    }

    #[test]
    fn trail_points_away_from_light() {
        let trails = compute_trails(vec2(100.0, 0.0), &[light(0.0, 0.0)], 200.0);
        let dir = trails[0].direction;
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.x > 0.99);
    }

    #[test]
    fn each_nearby_light_contributes_one_trail() {
        let lights = [light(0.0, 0.0), light(200.0, 0.0), light(5000.0, 0.0)];
        let trails = compute_trails(vec2(100.0, 0.0), &lights, 260.0);
        assert_eq!(trails.len(), 2);
    }

    #[test]
    fn coincident_light_is_guarded_not_nan() {
        let point = vec2(42.0, 42.0);
        let trails = compute_trails(point, &[LightSource { pos: point, binary: false }], 200.0);
        assert!(trails.is_empty());
    }

    #[test]
    fn zero_max_distance_is_total() {
        assert!(compute_trails(vec2(1.0, 1.0), &[light(0.0, 0.0)], 0.0).is_empty());
    }
}
