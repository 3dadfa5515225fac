use bevy::prelude::*;

pub mod materials;

use materials::{TerminatorMaterial, TerminatorUniform, advance_spin, sub_solar_angle};

use crate::config::{
    CLOUD_ROLL_FACTOR, CLOUD_SCALE, CLOUD_SEGMENTS, CLOUD_SPIN_FACTOR, EARTH_CLOUDS_AO_TEXTURE,
    EARTH_CLOUDS_NORMAL_TEXTURE, EARTH_CLOUDS_TEXTURE, EARTH_DAY_TEXTURE, EARTH_LIGHT_ANGLE,
    EARTH_LIGHT_DISTANCE, EARTH_LIGHT_INTENSITY, EARTH_LIGHT_RANGE, EARTH_NIGHT_TEXTURE,
    EARTH_RADIUS, EARTH_SEGMENTS, EARTH_SPIN, EARTH_START, EARTH_TILT, ORBIT_SCALE,
};
use crate::systems::orbit::{Drift, OrbitGroup, OrbitPath, Spin};
use crate::systems::planets::Body;

pub struct EarthPlugin;

impl Plugin for EarthPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<TerminatorMaterial>::default())
            .add_systems(Startup, start)
            .add_systems(Update, (update_terminator, track_day_side_light));
    }
}

// surface mesh tag
#[derive(Component)]
pub struct Earth;

// the orbit group earth and its decorations hang off of
#[derive(Component)]
pub struct EarthOrbit;

// cloud shell tag
#[derive(Component)]
pub struct CloudLayer;

// spot light pinned to the sub-solar side of the orbit group
#[derive(Component)]
pub struct DaySideLight;

fn start(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut terminator_materials: ResMut<Assets<TerminatorMaterial>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let start = EARTH_START * ORBIT_SCALE;
    let orbit = match OrbitPath::new(start) {
        Ok(orbit) => orbit,
        Err(err) => {
            error!("earth orbit rejected: {err}");
            return;
        }
    };

    let day_texture = asset_server.load(EARTH_DAY_TEXTURE);
    let night_texture = asset_server.load(EARTH_NIGHT_TEXTURE);
    let cloud_texture = asset_server.load(EARTH_CLOUDS_TEXTURE);
    let cloud_normal = asset_server.load(EARTH_CLOUDS_NORMAL_TEXTURE);
    let cloud_ao = asset_server.load(EARTH_CLOUDS_AO_TEXTURE);

    let orbit_group = commands
        .spawn((
            EarthOrbit,
            OrbitGroup,
            orbit,
            Transform::from_translation(start),
            Visibility::default(),
        ))
        .id();

    let tilt = Quat::from_rotation_x(EARTH_TILT);
    let (sectors, stacks) = EARTH_SEGMENTS;

    // day/night surface
    commands
        .spawn((
            Earth,
            Body,
            Name::new("earth"),
            Mesh3d(meshes.add(Sphere::new(EARTH_RADIUS).mesh().uv(sectors, stacks))),
            MeshMaterial3d(terminator_materials.add(TerminatorMaterial {
                day_texture,
                night_texture,
                terminator: TerminatorUniform {
                    angle: sub_solar_angle(start),
                    rot_y: 0.0,
                    tilt: 0.0,
                    opacity: 1.0,
                },
            })),
            Transform::from_rotation(tilt),
            Spin::around_y(EARTH_SPIN),
        ))
        .insert(ChildOf(orbit_group));

    // cloud shell, spins slightly ahead of the surface with a slow roll
    let (cloud_sectors, cloud_stacks) = CLOUD_SEGMENTS;
    let mut cloud_sphere = Sphere::new(EARTH_RADIUS).mesh().uv(cloud_sectors, cloud_stacks);
    cloud_sphere.generate_tangents().unwrap();

    commands
        .spawn((
            CloudLayer,
            Mesh3d(meshes.add(cloud_sphere)),
            MeshMaterial3d(standard_materials.add(StandardMaterial {
                base_color_texture: Some(cloud_texture),
                normal_map_texture: Some(cloud_normal),
                occlusion_texture: Some(cloud_ao),
                alpha_mode: AlphaMode::Blend,
                perceptual_roughness: 1.0,
                metallic: 0.0,
                ..default()
            })),
            Transform::from_rotation(tilt).with_scale(Vec3::splat(CLOUD_SCALE)),
            Spin::around_y(EARTH_SPIN * CLOUD_SPIN_FACTOR),
            Drift {
                axis: Dir3::Z,
                rate: EARTH_SPIN * CLOUD_ROLL_FACTOR,
            },
        ))
        .insert(ChildOf(orbit_group));

    commands.spawn((
        DaySideLight,
        SpotLight {
            intensity: EARTH_LIGHT_INTENSITY,
            range: EARTH_LIGHT_RANGE,
            outer_angle: EARTH_LIGHT_ANGLE,
            inner_angle: 0.0,
            ..default()
        },
        Transform::from_translation(start + Vec3::new(0.0, 0.0, EARTH_LIGHT_DISTANCE))
            .looking_at(start, Vec3::Y),
    ));
}

// recompute the terminator uniforms once per frame
fn update_terminator(
    orbit_query: Query<&Transform, With<EarthOrbit>>,
    earth_query: Query<&MeshMaterial3d<TerminatorMaterial>, With<Earth>>,
    mut materials: ResMut<Assets<TerminatorMaterial>>,
) {
    let Ok(orbit_transform) = orbit_query.single() else {
        return;
    };
    let Ok(material_handle) = earth_query.single() else {
        return;
    };
    let Some(material) = materials.get_mut(&material_handle.0) else {
        return;
    };

    material.terminator.angle = sub_solar_angle(orbit_transform.translation);
    material.terminator.rot_y = advance_spin(material.terminator.rot_y, EARTH_SPIN);
}

// keep the fill light over the lit hemisphere as the planet orbits
fn track_day_side_light(
    orbit_query: Query<&Transform, With<EarthOrbit>>,
    mut light_query: Query<&mut Transform, (With<DaySideLight>, Without<EarthOrbit>)>,
) {
    let Ok(orbit_transform) = orbit_query.single() else {
        return;
    };
    let Ok(mut light_transform) = light_query.single_mut() else {
        return;
    };

    let angle = sub_solar_angle(orbit_transform.translation);
    let offset = Vec3::new(
        EARTH_LIGHT_DISTANCE * (-angle).sin(),
        0.0,
        EARTH_LIGHT_DISTANCE * (-angle).cos(),
    );
    light_transform.translation = orbit_transform.translation + offset;
    light_transform.look_at(orbit_transform.translation, Vec3::Y);
}
