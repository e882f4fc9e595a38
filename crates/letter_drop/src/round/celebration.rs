use core::f32::consts::TAU;

use bevy::math::Vec2;
use fastrand::Rng;

use super::config::RoundConfig;
use super::geometry::pixels_to_percent;
use super::{Slot, SlotId};

/// A firework burst centered on a solved slot, in board pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Firework {
    pub slot: SlotId,
    pub center: Vec2,
}

/// A confetti piece thrown out of a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPiece {
    pub slot: SlotId,
    /// Board pixels the piece is thrown from
    pub origin: Vec2,
    /// Final position, percent of board
    pub position: Vec2,
    /// Hue in degrees, drawn at 80% saturation and 60% lightness
    pub hue: f32,
    /// Edge in pixels
    pub size: f32,
    /// Degrees
    pub rotation: f32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Celebration {
    pub fireworks: Vec<Firework>,
    pub pieces: Vec<ScatterPiece>,
}

impl Celebration {
    pub fn is_empty(&self) -> bool {
        self.fireworks.is_empty() && self.pieces.is_empty()
    }

    pub fn clear(&mut self) {
        self.fireworks.clear();
        self.pieces.clear();
    }

    /// Adds a firework and a burst of pieces for every slot.
    pub fn launch(&mut self, slots: &[Slot], board_size: Vec2, config: &RoundConfig, rng: &mut Rng) {
        let half = config.tile_size / 2.0;

        for slot in slots {
            let center = slot.position + half;
            self.fireworks.push(Firework {
                slot: slot.id,
                center,
            });

            for _ in 0..config.pieces_per_slot {
                let angle = rng.f32() * TAU;
                let distance = lerp(&config.scatter_distance, rng.f32());
                let landing = center + Vec2::from_angle(angle) * distance;

                self.pieces.push(ScatterPiece {
                    slot: slot.id,
                    origin: center,
                    position: pixels_to_percent(landing, board_size),
                    hue: rng.f32() * 360.0,
                    size: lerp(&config.piece_size, rng.f32()),
                    rotation: rng.f32() * 360.0,
                });
            }
        }
    }
}

fn lerp(range: &core::ops::Range<f32>, t: f32) -> f32 {
    (range.end - range.start).mul_add(t, range.start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::geometry::percent_to_pixels;

    const BOARD: Vec2 = Vec2::new(960.0, 640.0);

    fn slots() -> Vec<Slot> {
        vec![
            Slot::new(SlotId(0), 'O', Vec2::new(420.0, 320.0)),
            Slot::new(SlotId(1), 'K', Vec2::new(480.0, 320.0)),
        ]
    }

    #[test]
    fn one_firework_and_a_burst_per_slot() {
        let config = RoundConfig::default();
        let mut celebration = Celebration::default();
        celebration.launch(&slots(), BOARD, &config, &mut Rng::with_seed(1));

        assert_eq!(celebration.fireworks.len(), 2, "one firework per slot");
        assert_eq!(celebration.pieces.len(), 50, "25 pieces per slot");
        assert_eq!(
            celebration.fireworks.first().map(|firework| firework.center),
            Some(Vec2::new(450.0, 350.0)),
            "fireworks sit on the slot center"
        );
    }

    #[test]
    fn pieces_stay_within_their_ranges() {
        let config = RoundConfig::default();
        let mut celebration = Celebration::default();
        celebration.launch(&slots(), BOARD, &config, &mut Rng::with_seed(9));

        for piece in &celebration.pieces {
            let landing = percent_to_pixels(piece.position, BOARD);
            let distance = landing.distance(piece.origin);
            assert!(
                (199.9..300.1).contains(&distance),
                "piece thrown {distance}px"
            );
            assert!((4.0..12.0).contains(&piece.size), "size {}", piece.size);
            assert!((0.0..360.0).contains(&piece.hue), "hue {}", piece.hue);
            assert!(
                (0.0..360.0).contains(&piece.rotation),
                "rotation {}",
                piece.rotation
            );
        }
    }

    #[test]
    fn clear_empties_both_collections() {
        let mut celebration = Celebration::default();
        celebration.launch(
            &slots(),
            BOARD,
            &RoundConfig::default(),
            &mut Rng::with_seed(2),
        );
        assert!(!celebration.is_empty(), "launch adds effects");

        celebration.clear();
        assert!(celebration.is_empty(), "clear removes everything");
    }
}
