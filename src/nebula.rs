//! Background nebula haze, rendered once per resize from fractal noise into
//! a screen-sized texture and blitted behind the star field.

use macroquad::prelude::*;
use noise::{Fbm, NoiseFn, Perlin};

// Generated at reduced resolution and stretched; the haze is soft anyway.
const DOWNSCALE: u32 = 4;

pub struct NebulaLayer {
    texture: Texture2D,
    width: f32,
    height: f32,
}

impl NebulaLayer {
    pub fn generate(width: f32, height: f32, seed: u32) -> Self {
        let w = ((width as u32 / DOWNSCALE).max(8)) as u16;
        let h = ((height as u32 / DOWNSCALE).max(8)) as u16;

        let fbm: Fbm<Perlin> = Fbm::new(seed);
        let mut image = Image::gen_image_color(w, h, Color::new(0.0, 0.0, 0.0, 0.0));

        for y in 0..h as u32 {
            for x in 0..w as u32 {
                let nx = x as f64 / w as f64 * 3.0;
                let ny = y as f64 / h as f64 * 3.0;
                let val = (fbm.get([nx, ny]) as f32 * 0.5 + 0.5).clamp(0.0, 1.0);

                // Only the upper noise band shows at all, as thin violet wisps.
                let strength = ((val - 0.55) / 0.45).clamp(0.0, 1.0);
                image.set_pixel(
                    x,
                    y,
                    Color::new(0.28, 0.16, 0.42, strength * 0.16),
                );
            }
        }

        let texture = Texture2D::from_image(&image);
        texture.set_filter(FilterMode::Linear);
        Self {
            texture,
            width,
            height,
        }
    }

    pub fn is_stale(&self, width: f32, height: f32) -> bool {
        (self.width - width).abs() > 1.0 || (self.height - height).abs() > 1.0
    }

    pub fn draw(&self) {
        draw_texture_ex(
            &self.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(self.width, self.height)),
                ..Default::default()
            },
        );
    }
}
