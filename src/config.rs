use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

// Scene scale (world units)
pub const SPACE_RADIUS: f32 = 1000.0;
pub const ORBIT_SCALE: f32 = 0.6;

// Orbital angular velocity scale; angular speed of a body is
// REVOLVE_SPEED / orbit_radius, so inner bodies revolve faster
pub const REVOLVE_SPEED: f32 = 10.0;

// Sun
pub const SUN_RADIUS: f32 = 25.0;
pub const SUN_LIGHT_INTENSITY: f32 = 1_000_000_000.0;
pub const SUN_LIGHT_RANGE: f32 = 2_500.0;
pub const AMBIENT_BRIGHTNESS: f32 = 50.0;

// Per-planet scene parameters
// start offsets are pre-scale, multiplied by ORBIT_SCALE at spawn
// spin rates are radians per rendered frame, negative spins retrograde
pub struct PlanetConfig {
    pub name: &'static str,
    pub radius: f32,
    pub segments: (u32, u32),
    pub start: Vec3,
    pub spin: f32,
    pub texture: &'static str,
}

pub const PLANETS: [PlanetConfig; 7] = [
    PlanetConfig {
        name: "mercury",
        radius: 2.0,
        segments: (32, 16),
        start: Vec3::new(55.0, 0.0, 0.0),
        spin: 0.0006,
        texture: "textures/mercury.jpg",
    },
    PlanetConfig {
        name: "venus",
        radius: 3.8,
        segments: (32, 36),
        start: Vec3::new(-60.0, 0.0, 70.0),
        spin: -0.0001,
        texture: "textures/venus.jpg",
    },
    PlanetConfig {
        name: "mars",
        radius: 3.0,
        segments: (40, 32),
        start: Vec3::new(130.0, 0.0, -150.0),
        spin: 0.006,
        texture: "textures/mars.jpg",
    },
    PlanetConfig {
        name: "jupiter",
        radius: 13.0,
        segments: (80, 60),
        start: Vec3::new(-220.0, 0.0, -300.0),
        spin: 0.01,
        texture: "textures/jupiter.jpg",
    },
    PlanetConfig {
        name: "saturn",
        radius: 12.0,
        segments: (80, 60),
        start: Vec3::new(150.0, 0.0, -520.0),
        spin: 0.008,
        texture: "textures/saturn.jpg",
    },
    PlanetConfig {
        name: "uranus",
        radius: 8.0,
        segments: (60, 40),
        start: Vec3::new(-800.0, 0.0, 300.0),
        spin: -0.003,
        texture: "textures/uranus.jpg",
    },
    PlanetConfig {
        name: "neptune",
        radius: 8.0,
        segments: (60, 40),
        start: Vec3::new(700.0, 0.0, 700.0),
        spin: 0.003,
        texture: "textures/neptune.jpg",
    },
];

// Earth is assembled separately (custom terminator material)
pub const EARTH_RADIUS: f32 = 4.0;
pub const EARTH_SEGMENTS: (u32, u32) = (100, 100);
pub const EARTH_START: Vec3 = Vec3::new(100.0, 0.0, 100.0);
pub const EARTH_SPIN: f32 = 0.006;
pub const EARTH_TILT: f32 = FRAC_PI_2 * 24.0 / 90.0;
pub const EARTH_LIGHT_DISTANCE: f32 = 15.0;
pub const EARTH_LIGHT_INTENSITY: f32 = 5_000_000.0;
pub const EARTH_LIGHT_RANGE: f32 = 60.0;
pub const EARTH_LIGHT_ANGLE: f32 = 0.4;

// Cloud shell rides slightly above the surface and drifts ahead of it
pub const CLOUD_SCALE: f32 = 1.01;
pub const CLOUD_SEGMENTS: (u32, u32) = (32, 36);
pub const CLOUD_SPIN_FACTOR: f32 = 1.05;
pub const CLOUD_ROLL_FACTOR: f32 = 0.1;

// Venus atmosphere shell
pub const VENUS_SHELL_RADIUS: f32 = 4.2;
pub const VENUS_SHELL_SEGMENTS: (u32, u32) = (32, 32);
pub const VENUS_SHELL_OPACITY: f32 = 0.65;
pub const VENUS_DRIFT_AXIS: Vec3 = Vec3::new(-0.5, 1.5, 1.0);
pub const VENUS_DRIFT_RATE: f32 = 0.001;

// Ring planes tilt independently of their planet
pub const SATURN_RING_INNER: f32 = 13.5;
pub const SATURN_RING_OUTER: f32 = 24.0;
pub const SATURN_RING_TILT: f32 = FRAC_PI_2 * 100.0 / 90.0;
pub const URANUS_TILT: f32 = FRAC_PI_2 * 98.0 / 90.0;
pub const URANUS_RING_INNER: f32 = 16.0;
pub const URANUS_RING_OUTER: f32 = 23.0;
pub const URANUS_RING_TILT: f32 = FRAC_PI_2 * 8.0 / 90.0;
pub const URANUS_RING_SPIN: f32 = 0.003;
pub const RING_SEGMENTS: u32 = 64;

// Camera
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 2_000.0;
pub const CAMERA_RADIUS: f32 = 500.0;
pub const CAMERA_MIN_RADIUS: f32 = 50.0;
pub const CAMERA_MAX_RADIUS: f32 = 1_500.0;
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Button
pub const BUTTON_INNER: f32 = 10.0;
pub const BUTTON_OUTER: f32 = 20.0;
pub const BUTTON_SEGMENTS: u32 = 100;
pub const BUTTON_POSITION: Vec3 = Vec3::new(0.0, -80.0, 0.0);
pub const BUTTON_IDLE_OPACITY: f32 = 0.7;
pub const BUTTON_PRESSED_OPACITY: f32 = 1.0;
pub const BUTTON_FADE_SECONDS: f32 = 0.1;

// Asset paths
pub const BACKGROUND_TEXTURE: &str = "textures/stars_milky_way.jpg";
pub const SUN_TEXTURE: &str = "textures/sun.jpg";
pub const VENUS_SHELL_TEXTURE: &str = "textures/venus_atmosphere.jpg";
pub const EARTH_DAY_TEXTURE: &str = "textures/earth_day.jpg";
pub const EARTH_NIGHT_TEXTURE: &str = "textures/earth_night.jpg";
pub const EARTH_CLOUDS_TEXTURE: &str = "textures/earth_clouds.jpg";
pub const EARTH_CLOUDS_NORMAL_TEXTURE: &str = "textures/earth_clouds_normal.png";
pub const EARTH_CLOUDS_AO_TEXTURE: &str = "textures/earth_clouds_ao.png";
pub const SATURN_RING_TEXTURE: &str = "textures/saturn_ring_alpha_polar.png";
pub const URANUS_RING_TEXTURE: &str = "textures/uranus_ring_alpha_polar.png";
pub const BUTTON_TEXTURE: &str = "textures/button.png";
