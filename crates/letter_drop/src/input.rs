use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bits_helpers::input::{PointerPhase, pointer_phase};
use bits_helpers::restart::{BUTTON_COLOR, BUTTON_PRESSED_COLOR};

use crate::game::{
    ActiveRound, GameState, RoundNotice, RoundRng, SlotViews, TileViews, WordEntry, primary_board,
    send_notices,
};
use crate::round::RoundEvent;
use crate::screen::PlayButton;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                (handle_word_entry, handle_play_button, handle_pointer)
                    .run_if(in_state(GameState::Playing)),
                tick_round,
                enter_solved,
            )
                .chain(),
        );
    }
}

fn submit_entry(
    entry: &WordEntry,
    round: &mut ActiveRound,
    rng: &mut RoundRng,
    notices: &mut EventWriter<RoundNotice>,
    windows: &Query<&Window, With<PrimaryWindow>>,
    slots: &SlotViews,
    tiles: &TileViews,
) {
    let board = primary_board(windows, &round.0, slots, tiles);
    let events = round.submit_word(&entry.0, &board, &mut rng.0);
    send_notices(notices, events);
}

fn handle_word_entry(
    mut keyboard_events: EventReader<KeyboardInput>,
    mut entry: ResMut<WordEntry>,
    mut round: ResMut<ActiveRound>,
    mut rng: ResMut<RoundRng>,
    mut notices: EventWriter<RoundNotice>,
    windows: Query<&Window, With<PrimaryWindow>>,
    slots: SlotViews,
    tiles: TileViews,
) {
    let capacity = windows
        .get_single()
        .map_or(0, |window| round.config().word_capacity(window.width()));

    for event in keyboard_events.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }

        match &event.logical_key {
            Key::Character(text) => entry.push_typed(text, capacity),
            Key::Backspace => {
                entry.0.pop();
            }
            Key::Enter => submit_entry(
                &entry,
                &mut round,
                &mut rng,
                &mut notices,
                &windows,
                &slots,
                &tiles,
            ),
            _ => {}
        }
    }
}

fn handle_play_button(
    entry: Res<WordEntry>,
    mut round: ResMut<ActiveRound>,
    mut rng: ResMut<RoundRng>,
    mut notices: EventWriter<RoundNotice>,
    windows: Query<&Window, With<PrimaryWindow>>,
    slots: SlotViews,
    tiles: TileViews,
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<PlayButton>),
    >,
) {
    for (interaction, mut background) in &mut interaction_query {
        match interaction {
            Interaction::Pressed => submit_entry(
                &entry,
                &mut round,
                &mut rng,
                &mut notices,
                &windows,
                &slots,
                &tiles,
            ),
            Interaction::Hovered => background.0 = BUTTON_PRESSED_COLOR,
            Interaction::None => background.0 = BUTTON_COLOR,
        }
    }
}

/// Drives the drag session from mouse or touch.
fn handle_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut round: ResMut<ActiveRound>,
    slots: SlotViews,
    tiles: TileViews,
    mut notices: EventWriter<RoundNotice>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(phase) = pointer_phase(&buttons, &touch_input, window) else {
        return;
    };

    let board = primary_board(&windows, &round, &slots, &tiles);
    let events = match phase {
        PointerPhase::Pressed(position) => round.pointer_down(Some(position), &board),
        PointerPhase::Held(position) => {
            round.pointer_move(Some(position), &board);
            Vec::new()
        }
        // The drop resolves against where the tile was last drawn
        PointerPhase::Released(_) => round.pointer_up(&board),
        PointerPhase::Cancelled => round.pointer_cancel(),
    };
    send_notices(&mut notices, events);
}

fn tick_round(
    time: Res<Time>,
    mut round: ResMut<ActiveRound>,
    mut rng: ResMut<RoundRng>,
    windows: Query<&Window, With<PrimaryWindow>>,
    slots: SlotViews,
    tiles: TileViews,
    mut notices: EventWriter<RoundNotice>,
) {
    let board = primary_board(&windows, &round, &slots, &tiles);
    let events = round.tick(time.delta(), &board, &mut rng);
    send_notices(&mut notices, events);
}

fn enter_solved(
    mut notices: EventReader<RoundNotice>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if notices
        .read()
        .any(|notice| matches!(**notice, RoundEvent::Solved))
    {
        next_state.set(GameState::Solved);
    }
}
