use std::collections::HashSet;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bits_helpers::FONT;
use bits_helpers::input::window_to_world;

use crate::game::{ActiveRound, SlotView, TileView};
use crate::round::Slot;
use crate::round::geometry::percent_to_pixels;

const SLOT_COLOR: Color = Color::srgb(0.22, 0.24, 0.33);
const SLOT_FILLED_COLOR: Color = Color::srgb(0.2, 0.62, 0.38);
const SLOT_WIN_COLOR: Color = Color::srgb(0.95, 0.74, 0.2);
const TILE_COLOR: Color = Color::srgb(0.36, 0.42, 0.9);
const TILE_HELD_COLOR: Color = Color::srgb(0.52, 0.58, 1.0);
const GLYPH_COLOR: Color = Color::WHITE;

const SLOT_Z: f32 = 0.0;
const TILE_Z: f32 = 1.0;
const HELD_TILE_Z: f32 = 2.0;

// Win highlight pulse
const PULSE_SPEED: f32 = 6.0;
const PULSE_AMPLITUDE: f32 = 0.08;

/// Letter drawn on top of a slot or tile square
#[derive(Component)]
struct Glyph;

/// Snapped tile fading out until the round removes it
#[derive(Component)]
struct Fading(Timer);

pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                sync_slot_views,
                sync_tile_views,
                fade_tiles,
                pulse_winning_slots,
            )
                .chain(),
        );
    }
}

/// World translation of a square whose top-left corner is at `top_left` board pixels.
fn square_translation(top_left: Vec2, size: f32, window_size: Vec2, z: f32) -> Vec3 {
    window_to_world(top_left + size / 2.0, window_size).extend(z)
}

const fn slot_color(slot: &Slot) -> Color {
    if slot.win_highlight {
        SLOT_WIN_COLOR
    } else if slot.filled {
        SLOT_FILLED_COLOR
    } else {
        SLOT_COLOR
    }
}

fn spawn_square(
    commands: &mut Commands,
    asset_server: &AssetServer,
    character: char,
    size: f32,
    color: Color,
    translation: Vec3,
) -> Entity {
    commands
        .spawn((
            Sprite {
                color,
                custom_size: Some(Vec2::splat(size)),
                ..default()
            },
            Transform::from_translation(translation),
        ))
        .with_children(|parent| {
            parent.spawn((
                Glyph,
                Text2d::new(character.to_string()),
                TextFont {
                    font: asset_server.load(FONT),
                    font_size: size * 0.6,
                    ..default()
                },
                TextColor(GLYPH_COLOR),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
        })
        .id()
}

fn sync_slot_views(
    mut commands: Commands,
    round: Res<ActiveRound>,
    asset_server: Res<AssetServer>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut views: Query<(Entity, &SlotView, &mut Transform, &mut Sprite)>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let generation = round.generation();
    let size = round.config().tile_size;
    let mut shown = HashSet::new();

    for (entity, view, mut transform, mut sprite) in &mut views {
        let slot = (view.generation == generation)
            .then(|| round.slot(view.id))
            .flatten();
        let Some(slot) = slot else {
            commands.entity(entity).despawn_recursive();
            continue;
        };

        transform.translation = square_translation(slot.position, size, window.size(), SLOT_Z);
        sprite.color = slot_color(slot);
        shown.insert(slot.id);
    }

    for slot in round.slots().iter().filter(|slot| !shown.contains(&slot.id)) {
        let translation = square_translation(slot.position, size, window.size(), SLOT_Z);
        let entity = spawn_square(
            &mut commands,
            &asset_server,
            slot.character,
            size,
            slot_color(slot),
            translation,
        );
        commands.entity(entity).insert(SlotView {
            id: slot.id,
            generation,
        });
    }
}

fn sync_tile_views(
    mut commands: Commands,
    round: Res<ActiveRound>,
    asset_server: Res<AssetServer>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut views: Query<(
        Entity,
        &TileView,
        &mut Transform,
        &mut Sprite,
        Option<&Fading>,
    )>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let generation = round.generation();
    let size = round.config().tile_size;
    let held = round.drag().map(|session| session.tile);
    let mut shown = HashSet::new();

    for (entity, view, mut transform, mut sprite, fading) in &mut views {
        let tile = (view.generation == generation)
            .then(|| round.tile(view.id))
            .flatten();
        let Some(tile) = tile else {
            commands.entity(entity).despawn_recursive();
            continue;
        };

        let is_held = held == Some(tile.id);
        let z = if is_held { HELD_TILE_Z } else { TILE_Z };
        let top_left = percent_to_pixels(tile.position, window.size());
        transform.translation = square_translation(top_left, size, window.size(), z);

        if tile.fading {
            if fading.is_none() {
                commands.entity(entity).insert(Fading(Timer::new(
                    round.config().fade_delay,
                    TimerMode::Once,
                )));
            }
        } else {
            sprite.color = if is_held { TILE_HELD_COLOR } else { TILE_COLOR };
        }
        shown.insert(tile.id);
    }

    for tile in round.tiles().iter().filter(|tile| !shown.contains(&tile.id)) {
        let top_left = percent_to_pixels(tile.position, window.size());
        let entity = spawn_square(
            &mut commands,
            &asset_server,
            tile.character,
            size,
            TILE_COLOR,
            square_translation(top_left, size, window.size(), TILE_Z),
        );
        commands.entity(entity).insert(TileView {
            id: tile.id,
            generation,
        });
    }
}

fn fade_tiles(
    time: Res<Time>,
    mut tiles: Query<(&mut Fading, &mut Sprite, &Children)>,
    mut glyphs: Query<&mut TextColor, With<Glyph>>,
) {
    for (mut fading, mut sprite, children) in &mut tiles {
        fading.0.tick(time.delta());
        let alpha = 1.0 - fading.0.fraction();

        sprite.color = SLOT_FILLED_COLOR.with_alpha(alpha);
        for &child in children {
            if let Ok(mut color) = glyphs.get_mut(child) {
                color.0 = GLYPH_COLOR.with_alpha(alpha);
            }
        }
    }
}

fn pulse_winning_slots(
    time: Res<Time>,
    round: Res<ActiveRound>,
    mut views: Query<(&SlotView, &mut Transform)>,
) {
    let scale = if round.is_solved() {
        PULSE_AMPLITUDE.mul_add((time.elapsed_secs() * PULSE_SPEED).sin(), 1.0)
    } else {
        1.0
    };

    for (_, mut transform) in &mut views {
        transform.scale = Vec3::splat(scale);
    }
}
