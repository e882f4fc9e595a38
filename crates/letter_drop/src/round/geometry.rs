use std::collections::HashMap;

use bevy::math::{Rect, Vec2};
use thiserror::Error;

use super::{Round, SlotId, TileId};

/// Identity of an element whose bounding box can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Slot(SlotId),
    Tile(TileId),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("board has not been measured yet (size {0})")]
    UnmeasuredBoard(Vec2),

    #[error("no rendered geometry for {0:?}")]
    UnknownElement(ElementId),
}

/// Bounding boxes of the board and its elements, in pointer coordinates
/// (pixels, origin top-left, y down).
pub trait GeometryProvider {
    fn board_rect(&self) -> Result<Rect, GeometryError>;
    fn element_rect(&self, element: ElementId) -> Result<Rect, GeometryError>;
}

/// Rejects boards that would produce degenerate layouts.
pub fn measured(board: Rect) -> Result<Rect, GeometryError> {
    let size = board.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        Err(GeometryError::UnmeasuredBoard(size))
    } else {
        Ok(board)
    }
}

/// Half of the bounding box diagonal, the "radius" used for touch tests.
pub fn half_diagonal(rect: Rect) -> f32 {
    rect.half_size().length()
}

/// Two boxes touch when their centers are no further apart than the sum of their half diagonals.
pub fn touching(a: Rect, b: Rect) -> bool {
    a.center().distance(b.center()) <= half_diagonal(a) + half_diagonal(b)
}

/// Centers closer than half of `a` on both axes.
pub fn centered_on(a: Rect, b: Rect) -> bool {
    let offset = (a.center() - b.center()).abs();
    offset.cmplt(a.half_size()).all()
}

/// Percent-of-board position to board pixels.
pub fn percent_to_pixels(percent: Vec2, board_size: Vec2) -> Vec2 {
    percent / 100.0 * board_size
}

/// Board pixels to percent-of-board position.
pub fn pixels_to_percent(pixels: Vec2, board_size: Vec2) -> Vec2 {
    pixels / board_size * 100.0
}

/// Bounding boxes captured at one instant, from the rendered board or from the round model.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    board: Rect,
    elements: HashMap<ElementId, Rect>,
}

impl BoardSnapshot {
    pub fn new(board: Rect) -> Self {
        Self {
            board,
            elements: HashMap::new(),
        }
    }

    pub fn insert(&mut self, element: ElementId, rect: Rect) {
        self.elements.insert(element, rect);
    }

    /// Geometry as the board draws the model: every element is a `tile_size` square anchored
    /// at its model position.
    pub fn from_round(round: &Round, board: Rect) -> Self {
        let mut snapshot = Self::new(board);
        let size = Vec2::splat(round.config().tile_size);
        let square = |top_left: Vec2| {
            let min = board.min + top_left;
            Rect::from_corners(min, min + size)
        };

        for slot in round.slots() {
            snapshot.insert(ElementId::Slot(slot.id), square(slot.position));
        }
        for tile in round.tiles() {
            let top_left = percent_to_pixels(tile.position, board.size());
            snapshot.insert(ElementId::Tile(tile.id), square(top_left));
        }
        snapshot
    }
}

impl GeometryProvider for BoardSnapshot {
    fn board_rect(&self) -> Result<Rect, GeometryError> {
        measured(self.board)
    }

    fn element_rect(&self, element: ElementId) -> Result<Rect, GeometryError> {
        self.elements
            .get(&element)
            .copied()
            .ok_or(GeometryError::UnknownElement(element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_includes_corner_contact() {
        let a = Rect::new(0.0, 0.0, 60.0, 60.0);
        let b = Rect::new(60.0, 60.0, 120.0, 120.0);
        assert!(touching(a, b), "boxes sharing a corner touch");

        let far = Rect::new(200.0, 0.0, 260.0, 60.0);
        assert!(!touching(a, far), "boxes 200px apart do not touch");
    }

    #[test]
    fn touching_uses_the_diagonal_not_the_edges() {
        // Centers 80px apart on the x axis: no edge overlap, but within 2 * 30 * sqrt(2).
        let a = Rect::new(0.0, 0.0, 60.0, 60.0);
        let b = Rect::new(80.0, 0.0, 140.0, 60.0);
        assert!(touching(a, b), "threshold is the sum of half diagonals");
    }

    #[test]
    fn centered_rejects_neighbours() {
        let slot = Rect::new(0.0, 0.0, 60.0, 60.0);
        let neighbour = Rect::new(60.0, 0.0, 120.0, 60.0);
        assert!(!centered_on(neighbour, slot), "an adjacent box is not centered");
        assert!(touching(neighbour, slot), "but it does touch");

        let nudged = Rect::new(20.0, 10.0, 80.0, 70.0);
        assert!(centered_on(nudged, slot), "a small nudge still counts");
    }

    #[test]
    fn zero_sized_board_is_unmeasured() {
        let board = Rect::new(0.0, 0.0, 0.0, 480.0);
        assert_eq!(
            measured(board),
            Err(GeometryError::UnmeasuredBoard(Vec2::new(0.0, 480.0))),
            "a board without width cannot be laid out"
        );
    }

    #[test]
    fn percent_conversion_is_relative_to_board_size() {
        let board = Vec2::new(800.0, 400.0);
        assert_eq!(
            percent_to_pixels(Vec2::new(50.0, 25.0), board),
            Vec2::new(400.0, 100.0),
            "percent scales with each axis"
        );
        assert_eq!(
            pixels_to_percent(Vec2::new(400.0, 100.0), board),
            Vec2::new(50.0, 25.0),
            "pixels map back to the same percent"
        );
    }
}
