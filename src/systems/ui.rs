use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use chrono::Utc;

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use crate::config::{
    BUTTON_FADE_SECONDS, BUTTON_IDLE_OPACITY, BUTTON_INNER, BUTTON_OUTER, BUTTON_POSITION,
    BUTTON_PRESSED_OPACITY, BUTTON_SEGMENTS, BUTTON_TEXTURE,
};
use crate::systems::planets::Body;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SessionClock::default())
            .add_systems(Startup, (setup_button, setup_hud))
            .add_systems(Update, (pick_button, fade_button, update_body_count, update_clock));
    }
}

// flat ring button floating in the scene
#[derive(Component)]
pub struct PressButton;

// HUD text showing how many bodies are in the scene
#[derive(Component)]
pub struct BodyCounter;

// HUD text showing the session wall clock
#[derive(Component)]
pub struct ClockDisplay;

// wall-clock epoch captured at startup, advanced by render time for display
#[derive(Resource)]
pub struct SessionClock {
    pub started: chrono::DateTime<Utc>,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self {
            started: Utc::now(),
        }
    }
}

/// Short opacity animation toward a target alpha, replaced wholesale on
/// each press/release so an interrupted fade restarts from where it was.
#[derive(Component, Debug)]
pub struct Fade {
    from: f32,
    to: f32,
    timer: Timer,
}

impl Fade {
    pub fn new(from: f32, to: f32, seconds: f32) -> Self {
        Self {
            from,
            to,
            timer: Timer::from_seconds(seconds, TimerMode::Once),
        }
    }

    // current alpha after advancing by `delta`
    pub fn advance(&mut self, delta: Duration) -> f32 {
        self.timer.tick(delta);
        self.from + (self.to - self.from) * self.timer.fraction()
    }

    pub fn finished(&self) -> bool {
        self.timer.finished()
    }
}

/// Ray/annulus intersection: distance along the ray, or None when the
/// ray is parallel to the ring plane, points away, or lands outside the
/// band between the two radii.
pub fn ray_annulus_hit(
    ray: Ray3d,
    center: Vec3,
    normal: Vec3,
    inner: f32,
    outer: f32,
) -> Option<f32> {
    let denom = ray.direction.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (center - ray.origin).dot(normal) / denom;
    if t <= 0.0 {
        return None;
    }
    let hit = ray.origin + *ray.direction * t;
    let distance = hit.distance(center);
    (inner..=outer).contains(&distance).then_some(t)
}

fn setup_button(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    commands.spawn((
        PressButton,
        Mesh3d(meshes.add(Annulus::new(BUTTON_INNER, BUTTON_OUTER).mesh().resolution(BUTTON_SEGMENTS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(BUTTON_TEXTURE)),
            base_color: Color::srgba(1.0, 1.0, 1.0, BUTTON_IDLE_OPACITY),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        // annulus meshes face +z, pitch it to face up at the camera
        Transform::from_translation(BUTTON_POSITION).with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        NotShadowCaster,
    ));
}

fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Start,
                justify_content: JustifyContent::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            BackgroundColor(Color::NONE),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Bodies: 0"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                BodyCounter,
            ));

            parent.spawn((
                Text::new("Time: Loading..."),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                ClockDisplay,
                Node {
                    margin: UiRect::top(Val::Px(5.0)),
                    ..default()
                },
            ));
        });
}

// cast a ray through the cursor on left press/release and start the
// opacity fade when the button annulus is hit
fn pick_button(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    button_query: Query<
        (Entity, &GlobalTransform, &MeshMaterial3d<StandardMaterial>),
        With<PressButton>,
    >,
    materials: Res<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    let pressed = mouse_buttons.just_pressed(MouseButton::Left);
    let released = mouse_buttons.just_released(MouseButton::Left);
    if !pressed && !released {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };
    let Ok((button, button_transform, material_handle)) = button_query.single() else {
        return;
    };

    let button_pose = button_transform.compute_transform();
    let normal = button_pose.rotation * Vec3::Z;
    if ray_annulus_hit(ray, button_pose.translation, normal, BUTTON_INNER, BUTTON_OUTER).is_none() {
        return;
    }

    let current = materials
        .get(&material_handle.0)
        .map(|material| material.base_color.alpha())
        .unwrap_or(BUTTON_IDLE_OPACITY);
    let target = if pressed {
        BUTTON_PRESSED_OPACITY
    } else {
        BUTTON_IDLE_OPACITY
    };
    commands
        .entity(button)
        .insert(Fade::new(current, target, BUTTON_FADE_SECONDS));
}

fn fade_button(
    time: Res<Time>,
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut fades: Query<(Entity, &mut Fade, &MeshMaterial3d<StandardMaterial>)>,
) {
    for (entity, mut fade, material_handle) in fades.iter_mut() {
        let alpha = fade.advance(time.delta());
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color.set_alpha(alpha);
        }
        if fade.finished() {
            commands.entity(entity).remove::<Fade>();
        }
    }
}

fn update_body_count(
    bodies: Query<&Body>,
    mut text_query: Query<&mut Text, With<BodyCounter>>,
) {
    let count = bodies.iter().count();

    if let Ok(mut text) = text_query.single_mut() {
        text.0 = format!("Bodies: {}", count);
    }
}

fn update_clock(
    time: Res<Time>,
    clock: Res<SessionClock>,
    mut text_query: Query<&mut Text, With<ClockDisplay>>,
) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    let elapsed = chrono::Duration::milliseconds((time.elapsed_secs_f64() * 1000.0) as i64);
    if let Some(now) = clock.started.checked_add_signed(elapsed) {
        text.0 = format!("Time: {} UTC", now.format("%Y-%m-%d %H:%M:%S"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn down_ray(x: f32, z: f32) -> Ray3d {
        Ray3d::new(Vec3::new(x, 100.0, z), Dir3::NEG_Y)
    }

    // the button's world-space ring: center below the ecliptic, facing up
    fn button_plane() -> (Vec3, Vec3) {
        (BUTTON_POSITION, Vec3::Y)
    }

    #[test]
    fn ray_through_the_band_hits() {
        let (center, normal) = button_plane();
        let mid = (BUTTON_INNER + BUTTON_OUTER) / 2.0;
        let t = ray_annulus_hit(down_ray(mid, 0.0), center, normal, BUTTON_INNER, BUTTON_OUTER);
        assert!(t.is_some());
        assert!((t.unwrap() - (100.0 - BUTTON_POSITION.y)).abs() < EPSILON);
    }

    #[test]
    fn ray_through_the_hole_misses() {
        let (center, normal) = button_plane();
        let hit = ray_annulus_hit(down_ray(0.0, 0.0), center, normal, BUTTON_INNER, BUTTON_OUTER);
        assert!(hit.is_none());
    }

    #[test]
    fn ray_outside_the_outer_radius_misses() {
        let (center, normal) = button_plane();
        let hit = ray_annulus_hit(
            down_ray(BUTTON_OUTER + 1.0, 0.0),
            center,
            normal,
            BUTTON_INNER,
            BUTTON_OUTER,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn ray_parallel_to_the_plane_misses() {
        let (center, normal) = button_plane();
        let ray = Ray3d::new(Vec3::new(-50.0, BUTTON_POSITION.y, 0.0), Dir3::X);
        assert!(ray_annulus_hit(ray, center, normal, BUTTON_INNER, BUTTON_OUTER).is_none());
    }

    #[test]
    fn ray_pointing_away_misses() {
        let (center, normal) = button_plane();
        let ray = Ray3d::new(Vec3::new(15.0, 100.0, 0.0), Dir3::Y);
        assert!(ray_annulus_hit(ray, center, normal, BUTTON_INNER, BUTTON_OUTER).is_none());
    }

    #[test]
    fn fade_reaches_its_target_within_the_duration() {
        let mut fade = Fade::new(BUTTON_IDLE_OPACITY, BUTTON_PRESSED_OPACITY, BUTTON_FADE_SECONDS);
        let mid = fade.advance(Duration::from_millis(50));
        assert!(mid > BUTTON_IDLE_OPACITY && mid < BUTTON_PRESSED_OPACITY);
        let done = fade.advance(Duration::from_millis(60));
        assert!((done - BUTTON_PRESSED_OPACITY).abs() < EPSILON);
        assert!(fade.finished());
    }

    #[test]
    fn fade_runs_downward_symmetrically() {
        let mut fade = Fade::new(BUTTON_PRESSED_OPACITY, BUTTON_IDLE_OPACITY, BUTTON_FADE_SECONDS);
        let done = fade.advance(Duration::from_millis(200));
        assert!((done - BUTTON_IDLE_OPACITY).abs() < EPSILON);
    }
}
