use core::ops::Range;
use core::time::Duration;

/// Margins of the board where tiles never spawn, keeping them clear of the controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeZone {
    pub top: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Default for SafeZone {
    fn default() -> Self {
        Self {
            top: 100.0,
            left: 80.0,
            right: 80.0,
            bottom: 80.0,
        }
    }
}

/// How close a dropped tile must be to a slot to snap into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchRule {
    /// Centers less than half a tile apart on each axis.
    #[default]
    Centered,
    /// Centers no further apart than the sum of both half diagonals. Reaches the
    /// slots next to the one the tile rests on.
    Touching,
}

/// Tuning for layout, matching and celebration.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundConfig {
    /// Edge of the square slots and tiles, in pixels
    pub tile_size: f32,
    /// Extra spacing required between scattered tiles
    pub padding: f32,
    pub safe_zone: SafeZone,
    pub match_rule: MatchRule,
    /// Random samples tried per tile before falling back to an unconstrained spot
    pub max_placement_tries: usize,
    /// Words longer than this are truncated on entry
    pub max_word_len: usize,
    /// Delay between a snap and the tile leaving the board, so its fade can play
    pub fade_delay: Duration,
    /// Delay between solving and the celebration starting
    pub celebration_delay: Duration,
    /// How long firework markers stay on the board
    pub firework_duration: Duration,
    pub pieces_per_slot: usize,
    /// Distance of scattered pieces from their slot center, in pixels
    pub scatter_distance: Range<f32>,
    /// Edge of scattered pieces, in pixels
    pub piece_size: Range<f32>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            tile_size: 60.0,
            padding: 10.0,
            safe_zone: SafeZone::default(),
            match_rule: MatchRule::default(),
            max_placement_tries: 500,
            max_word_len: 12,
            fade_delay: Duration::from_millis(200),
            celebration_delay: Duration::from_millis(200),
            firework_duration: Duration::from_millis(2500),
            pieces_per_slot: 25,
            scatter_distance: 200.0..300.0,
            piece_size: 4.0..12.0,
        }
    }
}

impl RoundConfig {
    /// Minimum distance between a scattered tile and any other slot or tile.
    pub fn min_separation(&self) -> f32 {
        self.tile_size + self.padding
    }

    /// How many letters fit in the slot row of a board `board_width` pixels wide.
    pub fn word_capacity(&self, board_width: f32) -> usize {
        let fitting = (board_width / self.tile_size).floor().max(0.0) as usize;
        fitting.min(self.max_word_len)
    }
}
