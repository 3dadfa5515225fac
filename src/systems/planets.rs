use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::render_resource::Face;

use std::f32::consts::FRAC_PI_2;

use crate::config::{
    AMBIENT_BRIGHTNESS, BACKGROUND_TEXTURE, ORBIT_SCALE, PLANETS, PlanetConfig, RING_SEGMENTS,
    SATURN_RING_INNER, SATURN_RING_OUTER, SATURN_RING_TEXTURE, SATURN_RING_TILT, SPACE_RADIUS,
    SUN_LIGHT_INTENSITY, SUN_LIGHT_RANGE, SUN_RADIUS, SUN_TEXTURE, URANUS_RING_INNER,
    URANUS_RING_OUTER, URANUS_RING_SPIN, URANUS_RING_TEXTURE, URANUS_RING_TILT, URANUS_TILT,
    VENUS_DRIFT_AXIS, VENUS_DRIFT_RATE, VENUS_SHELL_OPACITY, VENUS_SHELL_RADIUS,
    VENUS_SHELL_SEGMENTS, VENUS_SHELL_TEXTURE,
};
use crate::systems::orbit::{Drift, OrbitGroup, OrbitPath, Spin};

pub struct PlanetsPlugin;

impl Plugin for PlanetsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        })
        .add_systems(Startup, setup_scene);
    }
}

// celestial body tag, carried by every planet surface mesh; the
// human-readable name rides in a `Name` component next to it
#[derive(Component)]
pub struct Body;

// sun mesh tag
#[derive(Component)]
pub struct Sun;

// root group all orbit groups are parented to, positioned at the sun
#[derive(Component)]
pub struct PlanetsRoot;

// tilted pivot a ring mesh spins inside, independent of planet tilt
#[derive(Component)]
pub struct RingPivot;

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    // starfield backdrop, front faces culled so the inside renders
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SPACE_RADIUS * 1.1).mesh().uv(100, 100))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(BACKGROUND_TEXTURE)),
            unlit: true,
            cull_mode: Some(Face::Front),
            ..default()
        })),
        Transform::default(),
        NotShadowCaster,
        NotShadowReceiver,
    ));

    let root = commands
        .spawn((PlanetsRoot, Transform::default(), Visibility::default()))
        .id();

    commands.spawn((
        Sun,
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS).mesh().uv(80, 60))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(SUN_TEXTURE)),
            unlit: true,
            ..default()
        })),
        Transform::default(),
        NotShadowCaster,
    ));

    // all illumination radiates from the sun's position
    commands
        .spawn((
            PointLight {
                color: Color::WHITE,
                intensity: SUN_LIGHT_INTENSITY,
                range: SUN_LIGHT_RANGE,
                radius: SUN_RADIUS,
                shadows_enabled: true,
                ..default()
            },
            Transform::default(),
        ))
        .insert(ChildOf(root));

    for planet in &PLANETS {
        let tilt = if planet.name == "uranus" {
            Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(URANUS_TILT)
        } else {
            Quat::IDENTITY
        };

        let Some(group) =
            spawn_planet(&mut commands, &mut meshes, &mut materials, &asset_server, root, planet, tilt)
        else {
            continue;
        };

        match planet.name {
            "venus" => {
                spawn_venus_shell(&mut commands, &mut meshes, &mut materials, &asset_server, group, planet.spin);
            }
            "saturn" => {
                spawn_ring(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    &asset_server,
                    group,
                    SATURN_RING_INNER,
                    SATURN_RING_OUTER,
                    SATURN_RING_TEXTURE,
                    Quat::from_rotation_x(SATURN_RING_TILT),
                    planet.spin,
                );
            }
            "uranus" => {
                spawn_ring(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    &asset_server,
                    group,
                    URANUS_RING_INNER,
                    URANUS_RING_OUTER,
                    URANUS_RING_TEXTURE,
                    Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(URANUS_RING_TILT),
                    URANUS_RING_SPIN,
                );
            }
            _ => {}
        }
    }
}

// spawn one orbit group with its spinning textured sphere nested inside,
// returns the group so decorations can be attached
fn spawn_planet(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    asset_server: &Res<AssetServer>,
    root: Entity,
    planet: &PlanetConfig,
    tilt: Quat,
) -> Option<Entity> {
    let start = planet.start * ORBIT_SCALE;
    let orbit = match OrbitPath::new(start) {
        Ok(orbit) => orbit,
        Err(err) => {
            error!("{}: orbit configuration rejected: {err}", planet.name);
            return None;
        }
    };

    let group = commands
        .spawn((
            OrbitGroup,
            orbit,
            Transform::from_translation(start),
            Visibility::default(),
        ))
        .insert(ChildOf(root))
        .id();

    let (sectors, stacks) = planet.segments;
    commands
        .spawn((
            Body,
            Name::new(planet.name),
            Mesh3d(meshes.add(Sphere::new(planet.radius).mesh().uv(sectors, stacks))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(asset_server.load(planet.texture)),
                metallic: 0.0,
                perceptual_roughness: 0.9,
                ..default()
            })),
            Transform::from_rotation(tilt),
            Spin::around_y(planet.spin),
        ))
        .insert(ChildOf(group));

    Some(group)
}

fn spawn_venus_shell(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    asset_server: &Res<AssetServer>,
    group: Entity,
    spin: f32,
) {
    let (sectors, stacks) = VENUS_SHELL_SEGMENTS;
    commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(VENUS_SHELL_RADIUS).mesh().uv(sectors, stacks))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(asset_server.load(VENUS_SHELL_TEXTURE)),
                base_color: Color::srgba(1.0, 1.0, 1.0, VENUS_SHELL_OPACITY),
                alpha_mode: AlphaMode::Blend,
                metallic: 0.0,
                perceptual_roughness: 1.0,
                ..default()
            })),
            Transform::default(),
            Spin::around_y(spin),
            Drift {
                axis: Dir3::new(VENUS_DRIFT_AXIS).unwrap(),
                rate: VENUS_DRIFT_RATE,
            },
        ))
        .insert(ChildOf(group));
}

// ring meshes sit inside their own tilted pivot so the ring plane can
// spin about its normal without inheriting the planet's tilt
fn spawn_ring(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    asset_server: &Res<AssetServer>,
    group: Entity,
    inner: f32,
    outer: f32,
    texture: &'static str,
    pivot_rotation: Quat,
    spin_rate: f32,
) {
    let pivot = commands
        .spawn((
            RingPivot,
            Transform::from_rotation(pivot_rotation),
            Visibility::default(),
            Spin {
                axis: Dir3::Z,
                rate: spin_rate,
            },
        ))
        .insert(ChildOf(group))
        .id();

    commands
        .spawn((
            Mesh3d(meshes.add(Annulus::new(inner, outer).mesh().resolution(RING_SEGMENTS))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(asset_server.load(texture)),
                alpha_mode: AlphaMode::Blend,
                double_sided: true,
                cull_mode: None,
                ..default()
            })),
            Transform::default(),
        ))
        .insert(ChildOf(pivot));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_configured_start_offset_yields_a_valid_orbit() {
        for planet in &PLANETS {
            let orbit = OrbitPath::new(planet.start * ORBIT_SCALE);
            assert!(orbit.is_ok(), "{} has a degenerate start offset", planet.name);
        }
    }

    #[test]
    fn planet_names_are_unique() {
        let names: HashSet<_> = PLANETS.iter().map(|planet| planet.name).collect();
        assert_eq!(names.len(), PLANETS.len());
    }

    #[test]
    fn orbits_stay_inside_the_backdrop_sphere() {
        for planet in &PLANETS {
            let orbit = OrbitPath::new(planet.start * ORBIT_SCALE).unwrap();
            assert!(
                orbit.radius() + planet.radius < SPACE_RADIUS,
                "{} orbits outside the backdrop",
                planet.name
            );
        }
    }
}
