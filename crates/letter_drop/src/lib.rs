use bevy::prelude::*;

mod audio;
mod board;
mod effects;
mod game;
mod input;
mod ribbit;
pub mod round;
mod screen;

use audio::GameAudioPlugin;
use board::BoardPlugin;
use effects::EffectsPlugin;
use game::{ActiveRound, GameState, RoundNotice, RoundRng, WordEntry};
use input::InputPlugin;
use screen::ScreenPlugin;

pub fn run() {
    bits_helpers::get_default_app::<ribbit::LetterDrop>(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    )
    .init_state::<GameState>()
    .init_resource::<ActiveRound>()
    .init_resource::<RoundRng>()
    .init_resource::<WordEntry>()
    .add_event::<RoundNotice>()
    .add_plugins((
        BoardPlugin,
        InputPlugin,
        ScreenPlugin,
        EffectsPlugin,
        GameAudioPlugin,
    ))
    .add_systems(Startup, setup)
    .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
