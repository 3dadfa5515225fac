use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

use crate::config::{CAMERA_MAX_RADIUS, CAMERA_MIN_RADIUS, CAMERA_RADIUS, MAX_PIXEL_RATIO};

pub struct OrbitCamPlugin;

impl Plugin for OrbitCamPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (drive_camera, cap_pixel_ratio));
    }
}

// orbiting camera, spherical coordinates around a target point
// right button drags, left stays free for the scene pick test
#[derive(Component, Debug)]
pub struct OrbitCamera {
    pub radius: f32,
    pub speed: f32,
    pub angle: f32,
    pub v_angle: f32,
    pub is_dragging: bool,
    pub target: Vec3,

    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius: CAMERA_RADIUS,
            speed: 0.5,
            angle: 0.0,
            v_angle: 0.3,
            is_dragging: false,
            target: Vec3::ZERO,

            min_radius: CAMERA_MIN_RADIUS,
            max_radius: CAMERA_MAX_RADIUS,
        }
    }
}

impl OrbitCamera {
    pub fn new(radius: f32, speed: f32) -> Self {
        Self {
            radius,
            speed,
            ..default()
        }
    }

    // initial yaw/pitch, lets the spawn pose match a hand-picked view
    pub fn with_angles(mut self, angle: f32, v_angle: f32) -> Self {
        self.angle = angle;
        self.v_angle = v_angle;
        self
    }

    pub fn with_zoom_limits(mut self, min_radius: f32, max_radius: f32) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self
    }

    // world position from spherical coordinates
    // https://en.wikipedia.org/wiki/Spherical_coordinate_system#Cartesian_coordinates
    pub fn calculate_position(&self) -> Vec3 {
        let x = self.radius * self.v_angle.cos() * self.angle.cos();
        let y = self.radius * self.v_angle.sin();
        let z = self.radius * self.v_angle.cos() * self.angle.sin();

        self.target + Vec3::new(x, y, z)
    }
}

fn drive_camera(
    mut camera_query: Query<(&mut Transform, &mut OrbitCamera)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<CursorMoved>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    for (mut transform, mut camera) in camera_query.iter_mut() {
        if mouse_buttons.just_pressed(MouseButton::Right) {
            camera.is_dragging = true;
        }
        if mouse_buttons.just_released(MouseButton::Right) {
            camera.is_dragging = false;
        }

        if camera.is_dragging {
            for motion in mouse_motion.read() {
                if let Some(delta) = motion.delta {
                    camera.angle += delta.x * camera.speed * 0.01;
                    camera.v_angle += delta.y * camera.speed * 0.01;
                }
                // clamp pitch short of the poles
                camera.v_angle = camera.v_angle.clamp(-1.5, 1.5);
            }
        }

        for scroll in scroll_events.read() {
            camera.radius -= scroll.y * 25.0;
            camera.radius = camera.radius.clamp(camera.min_radius, camera.max_radius);
        }

        transform.translation = camera.calculate_position();
        transform.look_at(camera.target, Vec3::Y);
    }
}

// device pixel ratio is capped at 2 on hidpi displays
pub fn capped_pixel_ratio(scale: f32) -> f32 {
    scale.min(MAX_PIXEL_RATIO)
}

fn cap_pixel_ratio(mut windows: Query<&mut Window>) {
    for mut window in windows.iter_mut() {
        let scale = window.resolution.scale_factor();
        if scale > MAX_PIXEL_RATIO {
            window
                .resolution
                .set_scale_factor_override(Some(capped_pixel_ratio(scale)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::camera::CameraProjection;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn camera_sits_on_its_orbit_sphere() {
        let camera = OrbitCamera::new(500.0, 0.5).with_angles(1.2, 0.6);
        let position = camera.calculate_position();
        assert!((position.distance(camera.target) - 500.0).abs() < EPSILON);
    }

    #[test]
    fn target_offset_shifts_the_orbit_sphere() {
        let target = Vec3::new(10.0, -5.0, 30.0);
        let mut camera = OrbitCamera::new(100.0, 0.5);
        camera.target = target;
        assert!((camera.calculate_position().distance(target) - 100.0).abs() < EPSILON);
    }

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        assert_eq!(capped_pixel_ratio(1.0), 1.0);
        assert_eq!(capped_pixel_ratio(2.0), 2.0);
        assert_eq!(capped_pixel_ratio(3.0), 2.0);
    }

    #[test]
    fn projection_aspect_follows_viewport_size() {
        let mut projection = PerspectiveProjection::default();
        projection.update(1920.0, 1080.0);
        assert!((projection.aspect_ratio - 1920.0 / 1080.0).abs() < EPSILON);
        projection.update(800.0, 800.0);
        assert!((projection.aspect_ratio - 1.0).abs() < EPSILON);
    }
}
