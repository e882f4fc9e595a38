use bevy::math::Rect;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bits_helpers::input::world_to_window;
use bits_helpers::restart::Restartable;

use crate::round::geometry::{BoardSnapshot, ElementId};
use crate::round::{Round, RoundEvent, SlotId, TileId};

/// Game states that control the flow of the application
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum GameState {
    #[default]
    Playing,
    Solved,
}

/// The round being played
#[derive(Resource, Default, Deref, DerefMut)]
pub struct ActiveRound(pub Round);

impl Restartable for ActiveRound {
    type State = GameState;

    fn reset(&mut self) {
        self.0.reset();
    }

    fn initial_state() -> GameState {
        GameState::Playing
    }
}

/// Random source for layout and confetti
#[derive(Resource, Default, Deref, DerefMut)]
pub struct RoundRng(pub fastrand::Rng);

/// Word typed so far, upper-cased
#[derive(Resource, Default)]
pub struct WordEntry(pub String);

impl WordEntry {
    /// Appends the alphanumeric characters of `text`, upper-cased, while the entry holds fewer
    /// than `capacity` letters. A character whose upper case spans several letters is added
    /// whole or not at all.
    pub fn push_typed(&mut self, text: &str, capacity: usize) {
        for character in text.chars().filter(|character| character.is_alphanumeric()) {
            let upper = character.to_uppercase();
            if self.0.chars().count() + upper.len() > capacity {
                break;
            }
            self.0.extend(upper);
        }
    }
}

/// A round event forwarded to the presentation plugins
#[derive(Event, Debug, Clone, Deref)]
pub struct RoundNotice(pub RoundEvent);

/// Marks the rendered square of a slot. `generation` ties it to the layout that spawned it.
#[derive(Component, Debug, Clone, Copy)]
pub struct SlotView {
    pub id: SlotId,
    pub generation: u64,
}

/// Marks the rendered square of a tile.
#[derive(Component, Debug, Clone, Copy)]
pub struct TileView {
    pub id: TileId,
    pub generation: u64,
}

pub type SlotViews<'w, 's> =
    Query<'w, 's, (&'static SlotView, &'static Transform, &'static Sprite)>;
pub type TileViews<'w, 's> =
    Query<'w, 's, (&'static TileView, &'static Transform, &'static Sprite)>;

fn rendered_board(
    window: &Window,
    generation: u64,
    slots: &SlotViews,
    tiles: &TileViews,
) -> BoardSnapshot {
    let window_size = window.size();
    let mut snapshot = BoardSnapshot::new(Rect::from_corners(Vec2::ZERO, window_size));

    let bounds = |transform: &Transform, sprite: &Sprite| {
        let center = world_to_window(transform.translation.truncate(), window_size);
        let size = sprite.custom_size.unwrap_or_default() * transform.scale.truncate();
        Rect::from_center_size(center, size)
    };

    for (view, transform, sprite) in slots {
        if view.generation == generation {
            snapshot.insert(ElementId::Slot(view.id), bounds(transform, sprite));
        }
    }
    for (view, transform, sprite) in tiles {
        if view.generation == generation {
            snapshot.insert(ElementId::Tile(view.id), bounds(transform, sprite));
        }
    }
    snapshot
}

/// Captures the board as it is currently drawn: the primary window is the board, and every
/// slot and tile square of the current layout is read back from its sprite. Without a window
/// the board is unmeasured.
pub fn primary_board(
    windows: &Query<&Window, With<PrimaryWindow>>,
    round: &Round,
    slots: &SlotViews,
    tiles: &TileViews,
) -> BoardSnapshot {
    windows.get_single().map_or_else(
        |_| BoardSnapshot::default(),
        |window| rendered_board(window, round.generation(), slots, tiles),
    )
}

pub fn send_notices(notices: &mut EventWriter<RoundNotice>, events: Vec<RoundEvent>) {
    for event in events {
        notices.send(RoundNotice(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(start: &str, text: &str, capacity: usize) -> String {
        let mut entry = WordEntry(start.to_owned());
        entry.push_typed(text, capacity);
        entry.0
    }

    #[test]
    fn typing_upper_cases_letters() {
        assert_eq!(typed("", "cat", 12), "CAT", "lower case comes out upper case");
        assert_eq!(typed("", "r2d2", 12), "R2D2", "digits are kept");
    }

    #[test]
    fn typing_drops_punctuation_and_spaces() {
        assert_eq!(typed("", "c-a t!", 12), "CAT", "only letters and digits remain");
    }

    #[test]
    fn typing_stops_at_capacity() {
        assert_eq!(typed("", "letters", 4), "LETT", "entry never outgrows the slot row");
        assert_eq!(typed("ABCD", "e", 4), "ABCD", "a full entry ignores more typing");
    }

    #[test]
    fn expanding_upper_case_respects_capacity() {
        // 'ß' upper-cases to "SS"
        assert_eq!(typed("AB", "ß", 3), "AB", "both letters would not fit");
        assert_eq!(typed("AB", "ß", 4), "ABSS", "both letters fit");
    }
}
