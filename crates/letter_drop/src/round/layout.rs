//! Slot row and scattered tile placement for a new word.

use bevy::math::{Rect, Vec2};
use fastrand::Rng;
use tracing::debug;

use super::config::RoundConfig;
use super::geometry::pixels_to_percent;
use super::{Slot, SlotId, Tile, TileId};

/// Where a tile ended up and whether the separation rule held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Separated(Vec2),
    /// Retry budget exhausted, the spot may overlap other elements.
    Fallback(Vec2),
}

impl Placement {
    pub const fn position(self) -> Vec2 {
        match self {
            Self::Separated(position) | Self::Fallback(position) => position,
        }
    }
}

#[derive(Debug, Default)]
pub struct Layout {
    pub slots: Vec<Slot>,
    pub tiles: Vec<Tile>,
    /// Tiles that had to use the overlapping fallback
    pub fallbacks: usize,
}

/// Top-left corners of a centered row of `len` slots at mid-board.
pub fn slot_positions(len: usize, board_size: Vec2, tile_size: f32) -> impl Iterator<Item = Vec2> {
    let left = board_size.x / 2.0 - len as f32 * tile_size / 2.0;
    let top = board_size.y / 2.0;
    (0..len).map(move |i| Vec2::new((i as f32).mul_add(tile_size, left), top))
}

/// Sub-rectangle of top-left corners where a tile stays inside the safe zone.
/// Collapses onto its top-left corner on boards too small to have one.
pub fn spawn_area(board_size: Vec2, config: &RoundConfig) -> Rect {
    let zone = &config.safe_zone;
    let min = Vec2::new(zone.left, zone.top);
    let max = Vec2::new(
        board_size.x - config.tile_size - zone.right,
        board_size.y - config.tile_size - zone.bottom,
    );
    Rect::from_corners(min, max.max(min))
}

fn sample(area: Rect, rng: &mut Rng) -> Vec2 {
    area.min + Vec2::new(rng.f32(), rng.f32()) * area.size()
}

/// Rejection-samples a spot at least `min_separation` away from every position in `occupied`.
pub fn scatter_position(
    occupied: &[Vec2],
    board_size: Vec2,
    config: &RoundConfig,
    rng: &mut Rng,
) -> Placement {
    let area = spawn_area(board_size, config);
    let min_separation = config.min_separation();

    for _ in 0..config.max_placement_tries {
        let candidate = sample(area, rng);
        if occupied
            .iter()
            .all(|other| candidate.distance(*other) > min_separation)
        {
            return Placement::Separated(candidate);
        }
    }

    Placement::Fallback(sample(area, rng))
}

/// Builds the slot row and scatters one tile per character of `word`.
pub fn generate(word: &str, board_size: Vec2, config: &RoundConfig, rng: &mut Rng) -> Layout {
    let len = word.chars().count();

    let slots: Vec<Slot> = word
        .chars()
        .zip(slot_positions(len, board_size, config.tile_size))
        .enumerate()
        .map(|(index, (character, position))| Slot::new(SlotId(index), character, position))
        .collect();

    let mut occupied: Vec<Vec2> = slots.iter().map(|slot| slot.position).collect();
    let mut tiles = Vec::with_capacity(len);
    let mut fallbacks = 0;

    for (index, character) in word.chars().enumerate() {
        let placement = scatter_position(&occupied, board_size, config, rng);
        if let Placement::Fallback(position) = placement {
            debug!("Tile {index} ('{character}') fell back to {position} after exhausting retries");
            fallbacks += 1;
        }

        let position = placement.position();
        occupied.push(position);
        tiles.push(Tile::new(
            TileId(index),
            character,
            pixels_to_percent(position, board_size),
        ));
    }

    Layout {
        slots,
        tiles,
        fallbacks,
    }
}
