use bevy::prelude::*;

mod config;
mod systems;

use config::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_RADIUS};
use systems::camera::{OrbitCamPlugin, OrbitCamera};
use systems::earth::EarthPlugin;
use systems::orbit::OrbitPlugin;
use systems::planets::PlanetsPlugin;
use systems::ui::HudPlugin;

fn main() -> bevy::app::AppExit {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins((OrbitPlugin, PlanetsPlugin, EarthPlugin, OrbitCamPlugin, HudPlugin))
        .insert_resource(ClearColor(Color::BLACK))
        .add_systems(Startup, setup)
        .run()
}

// only the camera lives here, everything else hangs off the plugins
fn setup(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEG.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_xyz(0.0, 300.0, 400.0).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::new(CAMERA_RADIUS, 0.5)
            .with_angles(std::f32::consts::FRAC_PI_2, 0.64),
    ));
}
