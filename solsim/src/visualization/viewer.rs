use bevy::prelude::*;
use bevy::math::primitives::{Cuboid, Sphere};

use crate::simulation::history::History;
use crate::simulation::params::consts::{AU, DAY};
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec3;

/// Component tagging each sphere with its body index into the history rows
#[derive(Component)]
struct BodyIndex(pub usize);

/// Finished run being replayed
#[derive(Resource)]
struct Replay(History);

/// Replay cursor
#[derive(Resource, Default)]
struct Playback {
    frame: usize,
}

/// Scene units per astronomical unit
const SCALE_AU: f32 = 10.0;

/// Distance of the camera from the origin along +Z
const CAMERA_DISTANCE: f32 = 2200.0;

/// Upper bound on points per trail line strip
const MAX_TRAIL_POINTS: usize = 2000;

/// Energy plot placement in scene units: below the orbits, in the z = 0 plane
const PLOT_ORIGIN: Vec2 = Vec2::new(-500.0, -780.0);
const PLOT_SIZE: Vec2 = Vec2::new(1000.0, 220.0);

/// Kinetic, potential and total energy series of the replayed run,
/// with the value range shared by all three
#[derive(Resource)]
struct EnergyPlot {
    kinetic: Vec<f64>,
    potential: Vec<f64>,
    total: Vec<f64>,
    lo: f64,
    hi: f64,
}

impl EnergyPlot {
    fn from_history(history: &History) -> Self {
        let mut kinetic = Vec::with_capacity(history.len());
        let mut potential = Vec::with_capacity(history.len());
        for frame in history.iter() {
            kinetic.push(frame.energy.kinetic);
            potential.push(frame.energy.potential);
        }
        let total = history.total_energies();

        // Shared range, so the three curves sit on one axis like the Kin/Pot/E_tot plot
        let (lo, hi) = kinetic
            .iter()
            .chain(potential.iter())
            .chain(total.iter())
            .filter(|e| e.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &e| (lo.min(e), hi.max(e)));

        Self { kinetic, potential, total, lo, hi }
    }

    /// Map (step, energy) into the plot rectangle
    fn point(&self, step: usize, e: f64) -> Vec3 {
        let last = self.total.len().saturating_sub(1).max(1) as f32;
        let span = self.hi - self.lo;
        let fy = if span > 0.0 { ((e - self.lo) / span) as f32 } else { 0.5 };
        let p = PLOT_ORIGIN + Vec2::new(step as f32 / last, fy.clamp(0.0, 1.0)) * PLOT_SIZE;
        Vec3::new(p.x, p.y, 0.0)
    }
}

fn to_scene(x: &NVec3) -> Vec3 {
    let s = SCALE_AU / AU as f32;
    Vec3::new(x.x as f32 * s, x.y as f32 * s, x.z as f32 * s)
}

/// Replay a finished run: one history frame per rendered frame, looping
pub fn run_viewer(scenario: Scenario, history: History) {
    log::info!("viewer: replaying {} frames of {} bodies", history.len(), history.n_bodies());

    App::new()
        .insert_resource(scenario)
        .insert_resource(EnergyPlot::from_history(&history))
        .insert_resource(Replay(history))
        .insert_resource(Playback::default())
        .add_plugins(DefaultPlugins.build().disable::<bevy::log::LogPlugin>())
        .add_systems(Startup, setup_scene)
        .add_systems(Update, (advance_playback, sync_transforms, draw_trails, draw_energy_plot).chain())
        .run();
}

/// Startup system: spawn camera, light, axes and one sphere per body
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
) {
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, -300.0, CAMERA_DISTANCE).looking_at(Vec3::new(0.0, -150.0, 0.0), Vec3::Y),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1500.0,
            range: 2000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE),
        ..Default::default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials);

    // Sphere size grows with the cube root of mass, with a floor so light bodies stay visible
    let max_mass = scenario.masses.iter().cloned().fold(0.0_f64, f64::max);
    for (i, (x, m)) in scenario.state.x.iter().zip(scenario.masses.iter()).enumerate() {
        let radius = ((m / max_mass).cbrt() as f32 * 12.0).max(2.0);
        let color = if *m == max_mass { Color::srgb(1.0, 0.85, 0.2) } else { Color::srgb(0.3, 0.4, 1.0) };

        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(radius).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: color,
                    unlit: true,
                    ..Default::default()
                }),
                transform: Transform::from_translation(to_scene(x)),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn advance_playback(replay: Res<Replay>, mut playback: ResMut<Playback>) {
    let len = replay.0.len();
    if len == 0 {
        return;
    }
    playback.frame = (playback.frame + 1) % len;
    if playback.frame == len - 1 {
        let e = replay.0.energy(playback.frame);
        log::info!(
            "viewer: t = {:.1} days, kin = {:e} J, pot = {:e} J, drift = {:.3e}",
            replay.0.time(playback.frame) / DAY,
            e.kinetic,
            e.potential,
            replay.0.relative_energy_drift(playback.frame)
        );
    }
}

fn sync_transforms(replay: Res<Replay>, playback: Res<Playback>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    if replay.0.is_empty() {
        return;
    }
    let positions = replay.0.positions(playback.frame);
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(x) = positions.get(*i) {
            transform.translation = to_scene(x);
        }
    }
}

/// Trail from step 0 to the current frame, thinned to `MAX_TRAIL_POINTS`
fn draw_trails(replay: Res<Replay>, playback: Res<Playback>, mut gizmos: Gizmos) {
    let shown = playback.frame + 1;
    let stride = shown.div_ceil(MAX_TRAIL_POINTS).max(1);

    for body in 0..replay.0.n_bodies() {
        let points = replay.0.trail(body).take(shown).step_by(stride).map(|x| to_scene(&x));
        gizmos.linestrip(points, Color::srgb(0.7, 0.7, 1.0));
    }
}

/// Kinetic (red), potential (blue) and total (white) energy up to the current frame,
/// with a frame around the plot and a cursor at the current step
fn draw_energy_plot(plot: Res<EnergyPlot>, playback: Res<Playback>, mut gizmos: Gizmos) {
    if plot.total.is_empty() || !plot.lo.is_finite() {
        return;
    }

    // Plot border
    let corners = [Vec2::ZERO, Vec2::new(PLOT_SIZE.x, 0.0), PLOT_SIZE, Vec2::new(0.0, PLOT_SIZE.y), Vec2::ZERO];
    gizmos.linestrip(
        corners.iter().map(|c| (PLOT_ORIGIN + *c).extend(0.0)),
        Color::srgb(0.4, 0.4, 0.4),
    );

    let shown = (playback.frame + 1).min(plot.total.len());
    let stride = shown.div_ceil(MAX_TRAIL_POINTS).max(1);

    let series = [
        (&plot.kinetic, Color::srgb(1.0, 0.0, 0.0)),
        (&plot.potential, Color::srgb(0.0, 0.4, 1.0)),
        (&plot.total, Color::srgb(1.0, 1.0, 1.0)),
    ];
    for (values, color) in series {
        let points = values[..shown]
            .iter()
            .enumerate()
            .step_by(stride)
            .map(|(k, e)| plot.point(k, *e));
        gizmos.linestrip(points, color);
    }

    // Cursor at the current step
    let x = plot.point(shown - 1, plot.lo).x;
    gizmos.line(
        Vec3::new(x, PLOT_ORIGIN.y, 0.0),
        Vec3::new(x, PLOT_ORIGIN.y + PLOT_SIZE.y, 0.0),
        Color::srgb(0.6, 0.6, 0.6),
    );
}

fn spawn_axes(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
    let axis_len = 100.0 * SCALE_AU;
    let axis_thickness = 0.3;

    let axes = [
        (Vec3::new(axis_len, axis_thickness, axis_thickness), Color::srgb(1.0, 0.0, 0.0)),
        (Vec3::new(axis_thickness, axis_len, axis_thickness), Color::srgb(0.0, 1.0, 0.0)),
        (Vec3::new(axis_thickness, axis_thickness, axis_len), Color::srgb(0.0, 0.0, 1.0)),
    ];

    for (size, color) in axes {
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::new(size.x, size.y, size.z).mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..Default::default()
            }),
            transform: Transform::from_xyz(0.0, 0.0, 0.0),
            ..Default::default()
        });
    }
}
