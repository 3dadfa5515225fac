use bevy::asset::Asset;
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::render_resource::*;

use std::f32::consts::{FRAC_PI_2, PI, TAU};

// scalar shader state shared between the per-frame update and the
// per-pixel blend (needs to be a struct for GPU uniform layout)
// https://www.w3.org/TR/WGSL/#address-space-layout-constraints
#[derive(ShaderType, Clone, Copy, Debug, Default)]
#[repr(C)]
pub struct TerminatorUniform {
    pub angle: f32,
    pub rot_y: f32,
    pub tilt: f32,
    pub opacity: f32,
}

// earth surface material, blends day and night textures across the
// terminator in the fragment stage
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct TerminatorMaterial {
    #[texture(0)]
    #[sampler(1)]
    pub day_texture: Handle<Image>,
    #[texture(2)]
    #[sampler(3)]
    pub night_texture: Handle<Image>,
    #[uniform(4)]
    pub terminator: TerminatorUniform,
}

impl Material for TerminatorMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/earth.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }
}

/// Signed angle between the view reference direction (-Z) and the orbit
/// group's position, flipped on the -x side so the lit hemisphere keeps
/// facing the sun as the planet orbits.
pub fn sub_solar_angle(orbit_position: Vec3) -> f32 {
    let unsigned = Vec3::NEG_Z.angle_between(orbit_position);
    if orbit_position.x < 0.0 { -unsigned } else { unsigned }
}

/// Advances the accumulated spin angle the fragment stage reads,
/// restarting at zero past a full turn.
pub fn advance_spin(rot_y: f32, increment: f32) -> f32 {
    let next = rot_y + increment;
    if next > TAU { 0.0 } else { next }
}

/// CPU mirror of the blend weight in `assets/shaders/earth.wgsl`:
/// 0 is full day, 1 full night, clamped to [-0.1, 1.1] so the mix can
/// overshoot slightly past both texture extremes.
pub fn lit_weight(u: f32, v: f32, angle: f32, rot_y: f32, tilt: f32) -> f32 {
    let longitude = (-(u * TAU + angle + rot_y).sin() + 1.0) * 1.8 / 2.0;
    let latitude = (((v - tilt / PI) * FRAC_PI_2).cos() + 0.7) / 1.5;
    (longitude * latitude).clamp(-0.1, 1.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    // longitude whose surface point faces angle + rot_y head on
    fn sub_solar_u(angle: f32, rot_y: f32) -> f32 {
        (FRAC_PI_2 - angle - rot_y) / TAU
    }

    #[test]
    fn sub_solar_point_is_full_day() {
        for (angle, rot_y) in [(0.0, 0.0), (0.8, 0.0), (-1.2, 2.5), (2.9, 4.0)] {
            let u = sub_solar_u(angle, rot_y);
            let weight = lit_weight(u, 0.5, angle, rot_y, 0.0);
            assert!(
                weight.abs() < EPSILON,
                "expected full day at u={u}, got {weight}"
            );
        }
    }

    #[test]
    fn antipodal_point_is_full_night() {
        for (angle, rot_y) in [(0.0, 0.0), (0.8, 0.0), (-1.2, 2.5)] {
            let u = sub_solar_u(angle, rot_y) + 0.5;
            let weight = lit_weight(u, 0.5, angle, rot_y, 0.0);
            assert!(weight >= 1.0, "expected full night at u={u}, got {weight}");
        }
    }

    #[test]
    fn weight_stays_within_clamp_bounds() {
        for i in 0..=40 {
            for j in 0..=40 {
                let u = i as f32 / 40.0;
                let v = j as f32 / 40.0;
                let weight = lit_weight(u, v, 1.3, 0.7, 0.2);
                assert!((-0.1..=1.1).contains(&weight), "weight {weight} escaped clamp");
            }
        }
    }

    #[test]
    fn sub_solar_angle_is_signed_by_hemisphere() {
        let r = 60.0;
        assert!(sub_solar_angle(Vec3::new(0.0, 0.0, -r)).abs() < EPSILON);
        assert!((sub_solar_angle(Vec3::new(r, 0.0, 0.0)) - FRAC_PI_2).abs() < EPSILON);
        assert!((sub_solar_angle(Vec3::new(-r, 0.0, 0.0)) + FRAC_PI_2).abs() < EPSILON);
        assert!((sub_solar_angle(Vec3::new(0.0, 0.0, r)) - PI).abs() < EPSILON);
    }

    #[test]
    fn spin_accumulator_restarts_after_a_full_turn() {
        assert!((advance_spin(0.5, 0.006) - 0.506).abs() < EPSILON);
        assert_eq!(advance_spin(TAU - 0.001, 0.002), 0.0);
        assert_eq!(advance_spin(0.0, 0.0), 0.0);
    }
}
