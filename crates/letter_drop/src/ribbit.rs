use bevy::log::info;
use bevy::prelude::*;
use bevy::state::state::NextState;
use bits_helpers::RibbitMessageHandler;
use ribbit_bits::{BitDuration, BitResult};

use crate::game::{ActiveRound, GameState, WordEntry};

#[derive(Default, Clone, Copy)]
pub struct LetterDrop;

impl RibbitMessageHandler for LetterDrop {
    fn restart(world: &mut World) {
        info!("Restarting LetterDrop");

        world.resource_mut::<ActiveRound>().reset();
        world.resource_mut::<WordEntry>().0.clear();

        let mut next_state = world.resource_mut::<NextState<GameState>>();
        next_state.set(GameState::Playing);
    }

    fn end(world: &mut World) -> BitResult {
        info!("Ending LetterDrop");

        if world.resource::<ActiveRound>().is_solved() {
            BitResult::Success
        } else {
            BitResult::Failure
        }
    }

    fn duration(_world: &mut World) -> BitDuration {
        BitDuration::max_duration()
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Rect;

    use super::*;
    use crate::round::geometry::{BoardSnapshot, ElementId, GeometryProvider};

    const BOARD: Rect = Rect {
        min: Vec2::ZERO,
        max: Vec2::new(960.0, 640.0),
    };

    fn world_with_round(word: &str) -> World {
        let mut world = World::new();
        let mut round = ActiveRound::default();
        let board = BoardSnapshot::new(BOARD);
        round.submit_word(word, &board, &mut fastrand::Rng::with_seed(7));
        assert_eq!(round.slots().len(), word.len(), "the word is laid out");

        world.insert_resource(round);
        world.insert_resource(WordEntry(word.to_owned()));
        world.init_resource::<NextState<GameState>>();
        world
    }

    #[test]
    fn restart_clears_the_round_and_the_entry() {
        let mut world = world_with_round("CAT");
        LetterDrop::restart(&mut world);

        let round = world.resource::<ActiveRound>();
        assert!(round.slots().is_empty(), "no slots after restart");
        assert!(round.tiles().is_empty(), "no tiles after restart");
        assert!(
            world.resource::<WordEntry>().0.is_empty(),
            "typed word is cleared"
        );
        assert!(
            matches!(
                *world.resource::<NextState<GameState>>(),
                NextState::Pending(GameState::Playing)
            ),
            "restart goes back to playing"
        );
    }

    #[test]
    fn unsolved_round_ends_in_failure() {
        let mut world = world_with_round("CAT");
        assert!(
            matches!(LetterDrop::end(&mut world), BitResult::Failure),
            "an unsolved round is a failure"
        );
    }

    #[test]
    fn solved_round_ends_in_success() {
        let mut world = world_with_round("A");
        let mut round = world.resource_mut::<ActiveRound>();

        let tile = round.tiles().first().map(|tile| tile.id).expect("one tile");
        let slot = round.slots().first().map(|slot| slot.position).expect("one slot");
        let grab = BoardSnapshot::from_round(&round, BOARD)
            .element_rect(ElementId::Tile(tile))
            .expect("tile is drawn")
            .center();
        let half = Vec2::splat(round.config().tile_size / 2.0);

        let board = BoardSnapshot::from_round(&round, BOARD);
        round.pointer_down(Some(grab), &board);
        round.pointer_move(Some(slot + half), &board);
        let board = BoardSnapshot::from_round(&round, BOARD);
        round.pointer_up(&board);
        assert!(round.is_solved(), "the only tile filled the only slot");

        assert!(
            matches!(LetterDrop::end(&mut world), BitResult::Success),
            "a solved round is a success"
        );
    }
}
