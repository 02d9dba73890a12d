use macroquad::prelude::*;

use crate::config;

pub struct CameraController {
    pub target: Vec2,
    pub zoom: f32,
    pub smooth_target: Vec2,
    pub smooth_zoom: f32,
    is_dragging: bool,
    drag_start: Vec2,
    drag_cam_start: Vec2,
}

impl CameraController {
    pub fn new(initial_target: Vec2) -> Self {
        let initial_zoom = 0.6;
        Self {
            target: initial_target,
            zoom: initial_zoom,
            smooth_target: initial_target,
            smooth_zoom: initial_zoom,
            is_dragging: false,
            drag_start: Vec2::ZERO,
            drag_cam_start: Vec2::ZERO,
        }
    }

    pub fn update(&mut self, dt: f32) {
        // WASD pan
        let pan_speed = config::CAMERA_PAN_SPEED / self.zoom;
        if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
            self.target.y -= pan_speed * dt;
        }
        if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
            self.target.y += pan_speed * dt;
        }
        if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
            self.target.x -= pan_speed * dt;
        }
        if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
            self.target.x += pan_speed * dt;
        }

        // Middle mouse drag
        if is_mouse_button_pressed(MouseButton::Middle) {
            self.is_dragging = true;
            self.drag_start = Vec2::from(mouse_position());
            self.drag_cam_start = self.target;
        }
        if is_mouse_button_released(MouseButton::Middle) {
            self.is_dragging = false;
        }
        if self.is_dragging {
            let mouse_pos = Vec2::from(mouse_position());
            let delta = (self.drag_start - mouse_pos) / self.smooth_zoom;
            self.target = self.drag_cam_start + delta;
        }

        // Scroll zoom
        let (_, scroll_y) = mouse_wheel();
        if scroll_y != 0.0 {
            let zoom_factor = 1.0 + scroll_y.signum() * config::CAMERA_ZOOM_SPEED;
            self.zoom =
                (self.zoom * zoom_factor).clamp(config::CAMERA_ZOOM_MIN, config::CAMERA_ZOOM_MAX);
        }

        self.target.x = self
            .target
            .x
            .clamp(-config::WORLD_HALF_WIDTH, config::WORLD_HALF_WIDTH);
        self.target.y = self
            .target
            .y
            .clamp(-config::WORLD_HALF_HEIGHT, config::WORLD_HALF_HEIGHT);

        // Smooth interpolation
        let smooth = 1.0 - (-config::CAMERA_SMOOTH_SPEED * dt).exp();
        self.smooth_target = self.smooth_target.lerp(self.target, smooth);
        self.smooth_zoom += (self.zoom - self.smooth_zoom) * smooth;
    }

    pub fn to_macroquad_camera(&self) -> Camera2D {
        Camera2D {
            target: self.smooth_target,
            zoom: vec2(
                self.smooth_zoom / screen_width() * 2.0,
                -self.smooth_zoom / screen_height() * 2.0,
            ),
            ..Default::default()
        }
    }

    /// Project a world position into screen space under the current view.
    /// The sun's projected position is the star field's parallax reference.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.smooth_target) * self.smooth_zoom
            + vec2(screen_width() * 0.5, screen_height() * 0.5)
    }
}
