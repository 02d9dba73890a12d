//! Rejection-sampled star field with palette-bucketed sprite caching.
//!
//! Stars are placed against the density field, classified into four palette
//! buckets, and drawn from two pre-rendered sprites per bucket (a soft core
//! and a wider halo) so the per-frame cost is plain blits. The whole field
//! is rebuilt wholesale on resize or quality change, never patched.

use macroquad::prelude::*;
use ::rand::Rng;

use crate::config;
use crate::density;
use crate::sprites;
use crate::visual::{VisualQuality, VisualSettings};

/// The four fixed palette entries, ordered cold to hot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteBucket {
    Ember,
    Warm,
    CoolWhite,
    Hot,
}

impl PaletteBucket {
    pub const ALL: [Self; 4] = [Self::Ember, Self::Warm, Self::CoolWhite, Self::Hot];

    pub fn index(self) -> usize {
        match self {
            Self::Ember => 0,
            Self::Warm => 1,
            Self::CoolWhite => 2,
            Self::Hot => 3,
        }
    }

    /// The discrete RGB entry stars of this bucket are drawn with.
    pub fn color(self) -> Color {
        match self {
            Self::Ember => Color::new(1.0, 0.70, 0.46, 1.0),
            Self::Warm => Color::new(1.0, 0.88, 0.68, 1.0),
            Self::CoolWhite => Color::new(0.92, 0.95, 1.0, 1.0),
            Self::Hot => Color::new(0.72, 0.82, 1.0, 1.0),
        }
    }
}

/// Blackbody-ish RGB approximation for a color temperature in Kelvin.
/// Only the 3800..8600 K span the sampler produces matters; everything
/// outside is clamped, never panicking.
pub fn temperature_to_rgb(kelvin: f32) -> (f32, f32, f32) {
    let k = kelvin.clamp(1000.0, 40_000.0) / 100.0;

    let r = if k <= 66.0 {
        1.0
    } else {
        (1.292_936 * (k - 60.0).powf(-0.133_204_7)).clamp(0.0, 1.0)
    };

    let g = if k <= 66.0 {
        (0.390_081_6 * k.ln() - 0.631_841_4).clamp(0.0, 1.0)
    } else {
        (1.129_890_9 * (k - 60.0).powf(-0.075_514_8)).clamp(0.0, 1.0)
    };

    let b = if k >= 66.0 {
        1.0
    } else if k <= 19.0 {
        0.0
    } else {
        (0.543_206_8 * (k - 10.0).ln() - 1.196_254_1).clamp(0.0, 1.0)
    };

    (r, g, b)
}

/// Second stage of the color pipeline: threshold the already-quantized RGB
/// triple into a bucket. Deliberately keyed off the RGB output rather than
/// the raw temperature, so gamut clamping feeds into the classification.
pub fn bucket_from_rgb(_r: f32, _g: f32, b: f32) -> PaletteBucket {
    if b >= 0.95 {
        PaletteBucket::Hot
    } else if b < 0.68 {
        PaletteBucket::Ember
    } else if b < 0.80 {
        PaletteBucket::Warm
    } else {
        PaletteBucket::CoolWhite
    }
}

/// Tiered color temperature: 58% cool-white, 27% warm, the rest hot with
/// the hot tail biased toward brighter stars.
pub fn sample_temperature(rng: &mut impl Rng, brightness: f32) -> f32 {
    let tier: f32 = rng.gen();
    if tier < 0.58 {
        rng.gen_range(4500.0..6000.0)
    } else if tier < 0.85 {
        rng.gen_range(3800.0..4700.0)
    } else {
        let bias = 0.5 + 0.5 * brightness.clamp(0.0, 1.0);
        5600.0 + rng.gen::<f32>() * bias * 3000.0
    }
}

/// Inverse power-law size transform: a long tail of rare large stars,
/// clamped into the configured bounds.
pub fn derive_size(u: f32) -> f32 {
    let u = u.clamp(0.0, 0.999_999);
    (config::STAR_MIN_SIZE * (1.0 - u).powf(-1.0 / config::STAR_SIZE_ALPHA))
        .clamp(config::STAR_MIN_SIZE, config::STAR_MAX_SIZE)
}

#[derive(Clone, Debug)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub layer: usize,
    pub phase: f32,
    pub brightness: f32,
    pub bucket: PaletteBucket,
    pub flicker_freq: f32,
    pub fringe: bool,
}

/// Outcome of one placement run: the stars and how many attempts it took.
pub struct PlacementRun {
    pub stars: Vec<Star>,
    pub attempts: usize,
}

/// Rejection-sample star placements into a width x height viewport. Stops at
/// `budget` stars or at the hard attempt cap, whichever comes first; an
/// under-filled field is a silent shortfall, not an error.
pub fn generate_stars(width: f32, height: f32, budget: usize, rng: &mut impl Rng) -> PlacementRun {
    let mut stars = Vec::with_capacity(budget.min(config::STARS_ULTRA));
    let mut attempts = 0;

    if width <= 0.0 || height <= 0.0 {
        return PlacementRun { stars, attempts };
    }

    while stars.len() < budget && attempts < config::STAR_ATTEMPT_CAP {
        attempts += 1;
        let pos = vec2(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        let d = density::sample(pos.x, pos.y, width, height);

        let accepted = d >= config::STAR_DENSITY_THRESHOLD
            || rng.gen::<f32>() < config::STAR_FLOOR_ACCEPT_PROB;
        if !accepted {
            continue;
        }

        let brightness = rng.gen_range(config::STAR_BRIGHTNESS_MIN..config::STAR_BRIGHTNESS_MAX)
            * (0.7 + 0.3 * d);
        let size = derive_size(rng.gen());
        let (r, g, b) = temperature_to_rgb(sample_temperature(rng, brightness));
        let bucket = bucket_from_rgb(r, g, b);

        let fringe = size >= config::STAR_FRINGE_MIN_SIZE
            && brightness >= config::STAR_FRINGE_MIN_BRIGHTNESS
            && rng.gen::<f32>() < config::STAR_FRINGE_PROB;

        stars.push(Star {
            pos,
            size,
            layer: rng.gen_range(0..config::PARALLAX_LAYERS),
            phase: rng.gen_range(0.0..std::f32::consts::TAU),
            brightness,
            bucket,
            flicker_freq: rng
                .gen_range(config::STAR_FLICKER_FREQ_MIN..config::STAR_FLICKER_FREQ_MAX),
            fringe,
        });
    }

    PlacementRun { stars, attempts }
}

struct StarSprites {
    core: Texture2D,
    halo: Texture2D,
}

fn build_sprites(bucket: PaletteBucket) -> StarSprites {
    let tint = bucket.color();
    let transparent = Color::new(tint.r, tint.g, tint.b, 0.0);
    StarSprites {
        core: sprites::radial_gradient_texture(16, WHITE, transparent, 2.2),
        halo: sprites::radial_gradient_texture(
            32,
            Color::new(tint.r, tint.g, tint.b, 0.8),
            transparent,
            1.2,
        ),
    }
}

/// The owned star collection plus its per-bucket sprite cache.
pub struct StarField {
    stars: Vec<Star>,
    width: f32,
    height: f32,
    quality: VisualQuality,
    sprites: [Option<StarSprites>; 4],
}

impl StarField {
    pub fn new() -> Self {
        Self {
            stars: Vec::new(),
            width: 0.0,
            height: 0.0,
            quality: VisualQuality::High,
            sprites: [None, None, None, None],
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_stale(&self, width: f32, height: f32, quality: VisualQuality) -> bool {
        self.quality != quality || (self.width - width).abs() > 1.0 || (self.height - height).abs() > 1.0
    }

    /// Rebuild the whole field for a new viewport or tier. Everything is
    /// replaced in one shot; stars are never updated incrementally.
    pub fn regenerate(
        &mut self,
        width: f32,
        height: f32,
        quality: VisualQuality,
        rng: &mut impl Rng,
    ) {
        let run = generate_stars(width, height, quality.star_budget(), rng);
        self.stars = run.stars;
        self.width = width;
        self.height = height;
        self.quality = quality;
    }

    fn sprites_for(&mut self, bucket: PaletteBucket) -> &StarSprites {
        self.sprites[bucket.index()].get_or_insert_with(|| build_sprites(bucket))
    }

    /// Draw the field in screen space. `light_screen_pos` is the parallax
    /// reference (usually the nearest sun's on-screen position); stars shift
    /// against its displacement from the viewport center, per layer.
    pub fn render(&mut self, time_s: f32, light_screen_pos: Option<Vec2>, settings: &VisualSettings) {
        if self.stars.is_empty() {
            return;
        }

        let center = vec2(self.width * 0.5, self.height * 0.5);
        let light_shift = light_screen_pos.map(|p| p - center).unwrap_or(Vec2::ZERO);
        let draw_fringe = settings.fringe_enabled && settings.quality != VisualQuality::Low;

        // Lazily build all four bucket sprites up front so the draw loop
        // can borrow them immutably.
        for bucket in PaletteBucket::ALL {
            self.sprites_for(bucket);
        }

        for star in &self.stars {
            let layer_factor = config::PARALLAX_LAYER_FACTORS[star.layer];
            let depth = (star.layer + 1) as f32 / config::PARALLAX_LAYERS as f32;

            let drift_x =
                (star.pos.x + time_s * config::STAR_DRIFT_SPEED * depth).rem_euclid(self.width);
            let pos = vec2(drift_x, star.pos.y) - light_shift * layer_factor;

            let flicker = 1.0
                + config::STAR_FLICKER_AMPLITUDE
                    * (star.phase + time_s * star.flicker_freq).sin();
            let level = (star.brightness * flicker).clamp(0.0, 1.0);

            let Some(sprites) = self.sprites[star.bucket.index()].as_ref() else {
                continue;
            };

            if star.fringe && draw_fringe {
                let off = star.size * 0.8;
                draw_circle(pos.x, pos.y - off, star.size * 0.5, Color::new(0.4, 0.5, 1.0, 0.35 * level));
                draw_circle(pos.x, pos.y + off, star.size * 0.5, Color::new(1.0, 0.4, 0.35, 0.35 * level));
            }

            let halo_size = star.size * 6.0;
            draw_texture_ex(
                &sprites.halo,
                pos.x - halo_size * 0.5,
                pos.y - halo_size * 0.5,
                Color::new(1.0, 1.0, 1.0, 0.35 * level),
                DrawTextureParams {
                    dest_size: Some(vec2(halo_size, halo_size)),
                    ..Default::default()
                },
            );

            let core_size = star.size * 2.2;
            let tint = star.bucket.color();
            draw_texture_ex(
                &sprites.core,
                pos.x - core_size * 0.5,
                pos.y - core_size * 0.5,
                Color::new(tint.r, tint.g, tint.b, level),
                DrawTextureParams {
                    dest_size: Some(vec2(core_size, core_size)),
                    ..Default::default()
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn low_tier_respects_budget_and_terminates() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let run = generate_stars(800.0, 600.0, config::STARS_LOW, &mut rng);
        assert!(run.stars.len() <= config::STARS_LOW);
        assert!(run.attempts <= config::STAR_ATTEMPT_CAP);
    }

    #[test]
    fn impossible_budget_hits_the_cap_and_underfills_silently() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let run = generate_stars(800.0, 600.0, 1_000_000, &mut rng);
        assert_eq!(run.attempts, config::STAR_ATTEMPT_CAP);
        assert!(run.stars.len() < 1_000_000);
        assert!(!run.stars.is_empty());
    }

    #[test]
    fn degenerate_viewport_yields_empty_field() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let run = generate_stars(0.0, 600.0, config::STARS_LOW, &mut rng);
        assert!(run.stars.is_empty());
        assert_eq!(run.attempts, 0);
    }

    #[test]
    fn size_transform_is_bounded_for_all_inputs() {
        for i in 0..=1000 {
            let u = i as f32 / 1000.0;
            let size = derive_size(u);
            assert!(size >= config::STAR_MIN_SIZE);
            assert!(size <= config::STAR_MAX_SIZE);
        }
        // The tail really is long: high u hits the clamp.
        assert_eq!(derive_size(0.9999), config::STAR_MAX_SIZE);
        assert_eq!(derive_size(0.0), config::STAR_MIN_SIZE);
    }

    #[test]
    fn brightness_stays_in_expected_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let run = generate_stars(800.0, 600.0, 500, &mut rng);
        for star in &run.stars {
            assert!(star.brightness >= config::STAR_BRIGHTNESS_MIN * 0.7);
            assert!(star.brightness <= config::STAR_BRIGHTNESS_MAX);
        }
    }

    #[test]
    fn every_temperature_maps_to_one_of_four_buckets() {
        let mut seen = std::collections::HashSet::new();
        let mut k = 3000.0;
        while k <= 10_000.0 {
            let (r, g, b) = temperature_to_rgb(k);
            assert!(r.is_finite() && g.is_finite() && b.is_finite());
            seen.insert(bucket_from_rgb(r, g, b));
            k += 25.0;
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn temperature_sampler_stays_in_tier_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..2000 {
            let k = sample_temperature(&mut rng, 0.8);
            assert!((3800.0..=8600.0).contains(&k), "temperature {k}");
        }
    }

    #[test]
    fn fringe_only_on_large_bright_stars() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let run = generate_stars(1200.0, 900.0, config::STARS_ULTRA, &mut rng);
        for star in run.stars.iter().filter(|s| s.fringe) {
            assert!(star.size >= config::STAR_FRINGE_MIN_SIZE);
            assert!(star.brightness >= config::STAR_FRINGE_MIN_BRIGHTNESS);
        }
    }

    #[test]
    fn placement_is_reproducible_with_a_fixed_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(123);
        let mut b = ChaCha8Rng::seed_from_u64(123);
        let run_a = generate_stars(640.0, 480.0, 300, &mut a);
        let run_b = generate_stars(640.0, 480.0, 300, &mut b);
        assert_eq!(run_a.stars.len(), run_b.stars.len());
        for (sa, sb) in run_a.stars.iter().zip(run_b.stars.iter()) {
            assert_eq!(sa.pos, sb.pos);
            assert_eq!(sa.bucket, sb.bucket);
        }
    }
}
