//! orbit.rs
//!
//! Closed-form orbital motion and per-frame body spin.
//! Orbit groups are repositioned from elapsed time alone, so their motion
//! is frame-rate independent; spins are fixed per-frame increments.

use bevy::prelude::*;
use thiserror::Error;

use crate::config::REVOLVE_SPEED;

pub struct OrbitPlugin;

impl Plugin for OrbitPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (advance_orbits, spin_bodies, drift_decorations));
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrbitError {
    #[error("orbit start offset has zero length")]
    ZeroRadius,
}

/// Uniform circular motion around the sun in the orbital plane.
///
/// Validated at construction so a degenerate start offset can never put
/// NaN positions into the scene graph. The phase bias is chosen so that
/// `position_at(0.0)` lands exactly on the start offset.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitPath {
    start_y: f32,
    radius: f32,
    bias: f32,
}

impl OrbitPath {
    pub fn new(start: Vec3) -> Result<Self, OrbitError> {
        let radius = start.length();
        if radius <= f32::EPSILON {
            return Err(OrbitError::ZeroRadius);
        }
        Ok(Self {
            start_y: start.y,
            radius,
            bias: start.z.atan2(-start.x),
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Position on the orbit circle after `elapsed` seconds.
    /// Angular speed is REVOLVE_SPEED / radius, so inner bodies revolve
    /// faster; y stays at the start offset's height (orbits are planar).
    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        let arg =
            (elapsed + self.bias * self.radius / REVOLVE_SPEED) * REVOLVE_SPEED / self.radius;
        Vec3::new(
            self.radius * -arg.cos(),
            self.start_y,
            self.radius * arg.sin(),
        )
    }
}

// marker for the positional container a body's meshes hang off of
#[derive(Component)]
pub struct OrbitGroup;

/// Fixed rotation increment applied to a mesh every rendered frame.
/// The angle accumulates unbounded; the transform consumes it as-is.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spin {
    pub axis: Dir3,
    pub rate: f32,
}

impl Spin {
    pub fn around_y(rate: f32) -> Self {
        Self { axis: Dir3::Y, rate }
    }
}

// secondary slow rotation for decorations that roll independently of
// their main spin (cloud layer, venus shell)
#[derive(Component, Debug, Clone, Copy)]
pub struct Drift {
    pub axis: Dir3,
    pub rate: f32,
}

fn advance_orbits(time: Res<Time>, mut orbits: Query<(&OrbitPath, &mut Transform)>) {
    let elapsed = time.elapsed_secs();
    for (path, mut transform) in orbits.iter_mut() {
        transform.translation = path.position_at(elapsed);
    }
}

fn spin_bodies(mut bodies: Query<(&Spin, &mut Transform)>) {
    for (spin, mut transform) in bodies.iter_mut() {
        transform.rotate_local_axis(spin.axis, spin.rate);
    }
}

fn drift_decorations(mut decorations: Query<(&Drift, &mut Transform)>) {
    for (drift, mut transform) in decorations.iter_mut() {
        transform.rotate_local_axis(drift.axis, drift.rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EARTH_START, ORBIT_SCALE, PLANETS};
    use bevy::window::WindowResized;
    use std::time::Duration;

    const EPSILON: f32 = 1e-3;

    // bare app with a hand-advanced clock, so a bounded number of ticks
    // runs deterministically
    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(bevy::app::TaskPoolPlugin::default());
        app.insert_resource(Time::<()>::default());
        app.add_systems(Update, (advance_orbits, spin_bodies, drift_decorations));
        app
    }

    fn tick(app: &mut App, dt: Duration) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(dt);
        app.update();
    }

    #[test]
    fn zero_length_start_is_rejected() {
        assert_eq!(OrbitPath::new(Vec3::ZERO), Err(OrbitError::ZeroRadius));
    }

    #[test]
    fn starts_exactly_at_the_start_offset() {
        let start = Vec3::new(55.0, 0.0, 0.0) * ORBIT_SCALE;
        let path = OrbitPath::new(start).unwrap();
        assert!(
            path.position_at(0.0).distance(start) < EPSILON,
            "got {:?}, expected {start:?}",
            path.position_at(0.0)
        );
    }

    #[test]
    fn every_configured_body_is_phase_aligned() {
        let starts = PLANETS
            .iter()
            .map(|planet| planet.start)
            .chain(std::iter::once(EARTH_START));
        for start in starts {
            let scaled = start * ORBIT_SCALE;
            let path = OrbitPath::new(scaled).unwrap();
            assert!(
                path.position_at(0.0).distance(scaled) < EPSILON,
                "body at {scaled:?} not phase aligned"
            );
        }
    }

    #[test]
    fn radius_is_preserved_over_time() {
        let start = Vec3::new(-60.0, 0.0, 70.0) * ORBIT_SCALE;
        let path = OrbitPath::new(start).unwrap();
        for step in 0..1000 {
            let t = step as f32 * 0.37;
            let r = path.position_at(t).length();
            assert!(
                (r - path.radius()).abs() < EPSILON,
                "radius drifted to {r} at t={t}"
            );
        }
    }

    #[test]
    fn full_period_returns_to_start() {
        // r = 33, period = 2*pi*r / REVOLVE_SPEED
        let start = Vec3::new(55.0, 0.0, 0.0) * ORBIT_SCALE;
        let path = OrbitPath::new(start).unwrap();
        let period = std::f32::consts::TAU * 33.0 / REVOLVE_SPEED;
        assert!(path.position_at(period).distance(start) < 0.01);
    }

    #[test]
    fn rotation_direction_never_reverses() {
        let start = Vec3::new(100.0, 0.0, 100.0) * ORBIT_SCALE;
        let path = OrbitPath::new(start).unwrap();
        let heading = |t: f32| {
            let p = path.position_at(t);
            p.z.atan2(p.x)
        };
        let mut previous = heading(0.0);
        for step in 1..500 {
            let current = heading(step as f32 * 0.05);
            let mut delta = current - previous;
            if delta > std::f32::consts::PI {
                delta -= std::f32::consts::TAU;
            } else if delta < -std::f32::consts::PI {
                delta += std::f32::consts::TAU;
            }
            assert!(delta < 0.0, "heading reversed at step {step}: {delta}");
            previous = current;
        }
    }

    #[test]
    fn orbit_system_repositions_groups_each_tick() {
        let mut app = test_app();
        let start = Vec3::new(55.0, 0.0, 0.0) * ORBIT_SCALE;
        let path = OrbitPath::new(start).unwrap();
        let group = app
            .world_mut()
            .spawn((OrbitGroup, path, Transform::from_translation(start)))
            .id();

        tick(&mut app, Duration::from_millis(500));
        let moved = app.world().get::<Transform>(group).unwrap().translation;
        assert!(moved.distance(start) > EPSILON, "group never moved");
        assert!((moved.length() - path.radius()).abs() < EPSILON);
    }

    #[test]
    fn spin_accumulates_about_the_local_axis() {
        let mut app = test_app();
        let body = app
            .world_mut()
            .spawn((Spin::around_y(0.01), Transform::default()))
            .id();

        for _ in 0..10 {
            tick(&mut app, Duration::from_millis(16));
        }
        let rotation = app.world().get::<Transform>(body).unwrap().rotation;
        let expected = Quat::from_rotation_y(0.1);
        assert!(rotation.angle_between(expected) < EPSILON);
    }

    #[test]
    fn window_resize_leaves_orbit_state_untouched() {
        let run = |resize: bool| {
            let mut app = test_app();
            app.add_event::<WindowResized>();
            let start = Vec3::new(130.0, 0.0, -150.0) * ORBIT_SCALE;
            let group = app
                .world_mut()
                .spawn((
                    OrbitGroup,
                    OrbitPath::new(start).unwrap(),
                    Transform::from_translation(start),
                    Spin::around_y(0.006),
                ))
                .id();
            tick(&mut app, Duration::from_millis(100));
            if resize {
                app.world_mut().send_event(WindowResized {
                    window: Entity::PLACEHOLDER,
                    width: 640.0,
                    height: 480.0,
                });
            }
            tick(&mut app, Duration::from_millis(100));
            *app.world().get::<Transform>(group).unwrap()
        };

        let plain = run(false);
        let resized = run(true);
        assert!(plain.translation.distance(resized.translation) < EPSILON);
        assert!(plain.rotation.angle_between(resized.rotation) < EPSILON);
    }
}
