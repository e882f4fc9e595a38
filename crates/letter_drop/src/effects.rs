use core::f32::consts::TAU;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bits_helpers::input::window_to_world;
use bits_helpers::restart::CleanupMarker;

use crate::game::{ActiveRound, RoundNotice};
use crate::round::RoundEvent;
use crate::round::geometry::percent_to_pixels;

const FIREWORK_PARTICLES: usize = 12;
const FIREWORK_SPEED: f32 = 90.0;
const FIREWORK_PARTICLE_SIZE: f32 = 8.0;
const SCATTER_FLIGHT_SECS: f32 = 0.8;
const EFFECT_Z: f32 = 10.0;

/// Particle of a firework burst
#[derive(Component)]
struct FireworkParticle {
    lifetime: Timer,
    velocity: Vec2,
}

/// Confetti piece flying from its slot to where it settles
#[derive(Component)]
struct ScatterFlight {
    from: Vec2,
    to: Vec2,
    timer: Timer,
}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                react_to_round,
                update_firework_particles,
                update_scatter_flights,
            )
                .chain(),
        );
    }
}

fn react_to_round(
    mut commands: Commands,
    mut notices: EventReader<RoundNotice>,
    round: Res<ActiveRound>,
    windows: Query<&Window, With<PrimaryWindow>>,
    fireworks: Query<Entity, With<FireworkParticle>>,
    pieces: Query<Entity, With<ScatterFlight>>,
) {
    for notice in notices.read() {
        match **notice {
            RoundEvent::CelebrationStarted => {
                let Ok(window) = windows.get_single() else {
                    continue;
                };
                spawn_celebration(&mut commands, &round, window.size());
            }
            RoundEvent::FireworksCleared => {
                for entity in &fireworks {
                    commands.entity(entity).despawn();
                }
            }
            RoundEvent::TilesShown { .. } | RoundEvent::Reset => {
                for entity in fireworks.iter().chain(&pieces) {
                    commands.entity(entity).despawn();
                }
            }
            _ => {}
        }
    }
}

fn spawn_celebration(commands: &mut Commands, round: &ActiveRound, window_size: Vec2) {
    let celebration = round.celebration();
    let firework_duration = round.config().firework_duration;

    for firework in &celebration.fireworks {
        let center = window_to_world(firework.center, window_size);

        for index in 0..FIREWORK_PARTICLES {
            let angle = index as f32 / FIREWORK_PARTICLES as f32 * TAU;
            commands.spawn((
                FireworkParticle {
                    lifetime: Timer::new(firework_duration, TimerMode::Once),
                    velocity: Vec2::from_angle(angle) * FIREWORK_SPEED,
                },
                CleanupMarker,
                Sprite {
                    color: Color::hsl(angle.to_degrees(), 0.9, 0.65),
                    custom_size: Some(Vec2::splat(FIREWORK_PARTICLE_SIZE)),
                    ..default()
                },
                Transform::from_translation(center.extend(EFFECT_Z)),
            ));
        }
    }

    for piece in &celebration.pieces {
        let from = window_to_world(piece.origin, window_size);
        let to = window_to_world(percent_to_pixels(piece.position, window_size), window_size);

        commands.spawn((
            ScatterFlight {
                from,
                to,
                timer: Timer::from_seconds(SCATTER_FLIGHT_SECS, TimerMode::Once),
            },
            CleanupMarker,
            Sprite {
                color: Color::hsl(piece.hue, 0.8, 0.6),
                custom_size: Some(Vec2::splat(piece.size)),
                ..default()
            },
            Transform::from_translation(from.extend(EFFECT_Z))
                .with_rotation(Quat::from_rotation_z(piece.rotation.to_radians())),
        ));
    }
}

fn update_firework_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut particles: Query<(Entity, &mut Transform, &mut Sprite, &mut FireworkParticle)>,
) {
    for (entity, mut transform, mut sprite, mut particle) in &mut particles {
        particle.lifetime.tick(time.delta());

        let delta = particle.velocity * time.delta_secs();
        transform.translation += delta.extend(0.0);

        let life_factor = 1.0 - particle.lifetime.fraction();
        sprite.color = sprite.color.with_alpha(life_factor);

        if particle.lifetime.finished() {
            commands.entity(entity).despawn();
        }
    }
}

fn update_scatter_flights(
    time: Res<Time>,
    mut flights: Query<(&mut Transform, &mut ScatterFlight)>,
) {
    for (mut transform, mut flight) in &mut flights {
        if flight.timer.finished() {
            continue;
        }
        flight.timer.tick(time.delta());

        // Ease out so pieces settle
        let t = 1.0 - (1.0 - flight.timer.fraction()).powi(2);
        let position = flight.from.lerp(flight.to, t);
        transform.translation = position.extend(EFFECT_Z);
    }
}
