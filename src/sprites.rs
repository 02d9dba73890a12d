//! Procedurally built radial sprites and the bounded gradient cache.
//!
//! Star cores, halos and the sun-disc fallback are all the same thing: a
//! small CPU image with a radial alpha ramp, uploaded once and blitted many
//! times. Caches are keyed by integer bucket with a fixed capacity, never by
//! string, and are safe to rebuild idempotently if dropped.

use macroquad::prelude::*;

use crate::config;

/// Build a disc image whose alpha ramps from `inner` at the center to
/// `outer` at the rim. `falloff` > 1 tightens the bright core.
pub fn radial_gradient_image(diameter: u16, inner: Color, outer: Color, falloff: f32) -> Image {
    let d = diameter.max(2) as u32;
    let mut image = Image::gen_image_color(d as u16, d as u16, Color::new(0.0, 0.0, 0.0, 0.0));
    let center = (d as f32 - 1.0) * 0.5;
    let inv_radius = 1.0 / center.max(1.0);

    for y in 0..d {
        for x in 0..d {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let t = ((dx * dx + dy * dy).sqrt() * inv_radius).min(1.0);
            let shaped = 1.0 - t.powf(falloff.max(0.1));
            if shaped <= 0.0 {
                continue;
            }
            let color = Color::new(
                inner.r + (outer.r - inner.r) * t,
                inner.g + (outer.g - inner.g) * t,
                inner.b + (outer.b - inner.b) * t,
                (inner.a + (outer.a - inner.a) * t) * shaped,
            );
            image.set_pixel(x, y, color);
        }
    }

    image
}

pub fn radial_gradient_texture(diameter: u16, inner: Color, outer: Color, falloff: f32) -> Texture2D {
    let texture = Texture2D::from_image(&radial_gradient_image(diameter, inner, outer, falloff));
    texture.set_filter(FilterMode::Linear);
    texture
}

/// Load the sun sprite from disk, degrading to a procedural gradient disc
/// when the asset is missing or unreadable.
pub async fn load_sun_texture() -> Texture2D {
    match load_texture("assets/sun.png").await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Linear);
            texture
        }
        Err(e) => {
            eprintln!("[SOL] sun sprite unavailable ({e}), using procedural disc");
            radial_gradient_texture(
                128,
                Color::new(1.0, 0.98, 0.88, 1.0),
                Color::new(1.0, 0.72, 0.25, 0.0),
                1.6,
            )
        }
    }
}

/// Fixed-capacity least-recently-used table keyed by an integer bucket.
/// Linear scan is fine at this size; the point is the hard bound, not speed.
pub struct FixedLru<V> {
    entries: Vec<(u32, V, u64)>,
    capacity: usize,
    clock: u64,
}

impl<V> FixedLru<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
            clock: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get_or_insert_with(&mut self, key: u32, build: impl FnOnce() -> V) -> &V {
        self.clock += 1;

        if let Some(pos) = self.entries.iter().position(|(k, _, _)| *k == key) {
            self.entries[pos].2 = self.clock;
            return &self.entries[pos].1;
        }

        if self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .enumerate()
                .min_by_key(|(_, (_, _, used))| *used)
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.entries.swap_remove(oldest);
        }

        self.entries.push((key, build(), self.clock));
        let last = self.entries.len() - 1;
        &self.entries[last].1
    }

    pub fn contains(&self, key: u32) -> bool {
        self.entries.iter().any(|(k, _, _)| *k == key)
    }
}

/// Round a glow radius into its cache bucket.
pub fn radius_bucket(radius: f32) -> u32 {
    (radius.max(0.0) / config::GRADIENT_RADIUS_BUCKET).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_image_fades_to_transparent_rim() {
        let img = radial_gradient_image(32, WHITE, Color::new(1.0, 1.0, 1.0, 0.0), 1.0);
        let center = img.get_pixel(15, 15);
        let corner = img.get_pixel(0, 0);
        assert!(center.a > 0.8);
        assert!(corner.a < 0.05);
    }

    #[test]
    fn lru_keeps_at_most_capacity_entries() {
        let mut cache: FixedLru<u32> = FixedLru::new(3);
        for key in 0..10 {
            cache.get_or_insert_with(key, || key * 100);
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.contains(9));
    }

    #[test]
    fn lru_evicts_least_recently_used() {
        let mut cache: FixedLru<u32> = FixedLru::new(2);
        cache.get_or_insert_with(1, || 10);
        cache.get_or_insert_with(2, || 20);
        // Touch 1 so 2 becomes the eviction candidate.
        cache.get_or_insert_with(1, || 0);
        cache.get_or_insert_with(3, || 30);
        assert!(cache.contains(1));
        assert!(!cache.contains(2));
        assert!(cache.contains(3));
    }

    #[test]
    fn rebuild_after_eviction_is_idempotent() {
        let mut cache: FixedLru<u32> = FixedLru::new(1);
        assert_eq!(*cache.get_or_insert_with(5, || 50), 50);
        cache.get_or_insert_with(6, || 60);
        assert_eq!(*cache.get_or_insert_with(5, || 50), 50);
    }

    #[test]
    fn radius_buckets_quantize() {
        assert_eq!(radius_bucket(0.0), 0);
        assert_eq!(radius_bucket(7.9), 1);
        assert_eq!(radius_bucket(20.0), 3);
        assert_eq!(radius_bucket(-4.0), 0);
    }
}
