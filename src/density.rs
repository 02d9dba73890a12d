//! Deterministic value-noise density field driving star placement.
//!
//! The lattice hash is the one fully deterministic primitive in the sky
//! pipeline: the same integer pair always yields the same value, so a given
//! viewport produces the same density landscape on every machine.

/// Hash an integer lattice point to a pseudo-random value in [0, 1).
pub fn lattice_hash(ix: i32, iy: i32) -> f32 {
    let mut h = (ix as u32).wrapping_mul(0x27d4_eb2d) ^ (iy as u32).wrapping_mul(0x1656_67b1);
    h ^= h >> 15;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h as f32 / (u32::MAX as f32 + 1.0)
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Bilinear value noise: interpolates the four lattice corners around
/// (x, y) with a smoothstep easing on both axes. At an integer coordinate
/// this returns the raw hash value, so octaves line up across cell borders.
pub fn value_noise(x: f32, y: f32) -> f32 {
    let ix = x.floor() as i32;
    let iy = y.floor() as i32;
    let tx = smoothstep(x - x.floor());
    let ty = smoothstep(y - y.floor());

    let v00 = lattice_hash(ix, iy);
    let v10 = lattice_hash(ix + 1, iy);
    let v01 = lattice_hash(ix, iy + 1);
    let v11 = lattice_hash(ix + 1, iy + 1);

    let top = v00 + (v10 - v00) * tx;
    let bottom = v01 + (v11 - v01) * tx;
    top + (bottom - top) * ty
}

// Base lattice frequency in screen pixels.
const BASE_SCALE: f32 = 0.006;
// Slightly off-doubling keeps octave lattices from lining up exactly.
const OCTAVE_FREQS: [f32; 3] = [1.0, 2.03, 4.01];
const OCTAVE_WEIGHTS: [f32; 3] = [1.0, 0.5, 0.25];
const RIDGE_FREQ: f32 = 0.55;
const RIDGE_WEIGHT: f32 = 0.2;
const RIDGE_OFFSET: (f32, f32) = (19.7, 7.3);

/// Per-axis fade toward the viewport boundary. `coord` is the sample
/// position along the axis, `extent` the axis length. Exactly at the edge
/// the factor is 0.22 * 2.1 = 0.462; it reaches 1.0 within roughly 48% of
/// the margin. Degenerate extents fade fully to keep the function total.
pub fn edge_fade(coord: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    let edge_fraction = (coord.min(extent - coord) / extent).max(0.0);
    (edge_fraction.max(0.22) * 2.1).min(1.0)
}

/// Sample the star density field at (x, y) within a width x height
/// viewport. Returns a value in [0, 1]. Pure and total: any finite input
/// yields a finite result.
pub fn sample(x: f32, y: f32, width: f32, height: f32) -> f32 {
    let nx = x * BASE_SCALE;
    let ny = y * BASE_SCALE;

    let mut sum = 0.0;
    let mut total_weight = 0.0;
    for (freq, weight) in OCTAVE_FREQS.iter().zip(OCTAVE_WEIGHTS.iter()) {
        sum += value_noise(nx * freq, ny * freq) * weight;
        total_weight += weight;
    }

    // Ridge term: folds the noise around its midpoint so the field has
    // creases instead of perfectly smooth blobs.
    let ridge_noise = value_noise(
        nx * RIDGE_FREQ + RIDGE_OFFSET.0,
        ny * RIDGE_FREQ + RIDGE_OFFSET.1,
    );
    sum += (1.0 - (2.0 * ridge_noise - 1.0).abs()) * RIDGE_WEIGHT;
    total_weight += RIDGE_WEIGHT;

    let density = sum / total_weight;
    (density * edge_fade(x, width) * edge_fade(y, height)).clamp(0.0, 1.0)
}
