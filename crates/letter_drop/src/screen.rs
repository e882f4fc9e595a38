use bevy::prelude::*;
use bits_helpers::FONT;
use bits_helpers::restart::{
    BUTTON_COLOR, CleanupMarker, cleanup_marked_entities, handle_restart, spawn_restart_button,
};

use crate::game::{ActiveRound, GameState, WordEntry};

const ENTRY_PLACEHOLDER: &str = "Type a word";
const ENTRY_COLOR: Color = Color::WHITE;
const PLACEHOLDER_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.4);

/// Bar at the bottom of the board holding the typed word and the play button
#[derive(Component)]
pub struct EntryBar;

#[derive(Component)]
pub struct EntryText;

#[derive(Component)]
pub struct PlayButton;

pub struct ScreenPlugin;

impl Plugin for ScreenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_entry_bar)
            .add_systems(Update, update_entry_text)
            .add_systems(
                OnEnter(GameState::Solved),
                (spawn_win_screen, hide_entry_bar),
            )
            .add_systems(
                Update,
                handle_restart::<ActiveRound>.run_if(in_state(GameState::Solved)),
            )
            .add_systems(
                OnExit(GameState::Solved),
                (
                    cleanup_marked_entities,
                    clear_entry,
                    show_entry_bar,
                ),
            );
    }
}

fn spawn_entry_bar(mut commands: Commands, asset_server: Res<AssetServer>) {
    let font = asset_server.load(FONT);

    commands
        .spawn((
            EntryBar,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(16.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                column_gap: Val::Px(12.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                EntryText,
                Text::new(ENTRY_PLACEHOLDER),
                TextFont {
                    font: font.clone(),
                    font_size: 32.0,
                    ..default()
                },
                TextColor(PLACEHOLDER_COLOR),
            ));

            parent
                .spawn((
                    PlayButton,
                    Button,
                    Node {
                        width: Val::Px(120.0),
                        height: Val::Px(48.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(BUTTON_COLOR),
                    BorderRadius::all(Val::Px(8.0)),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text::new("Play"),
                        TextFont {
                            font,
                            font_size: 24.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

fn update_entry_text(
    entry: Res<WordEntry>,
    mut texts: Query<(&mut Text, &mut TextColor), With<EntryText>>,
) {
    if !entry.is_changed() {
        return;
    }

    for (mut text, mut color) in &mut texts {
        if entry.0.is_empty() {
            text.0 = ENTRY_PLACEHOLDER.to_string();
            color.0 = PLACEHOLDER_COLOR;
        } else {
            text.0.clone_from(&entry.0);
            color.0 = ENTRY_COLOR;
        }
    }
}

fn hide_entry_bar(mut bars: Query<&mut Visibility, With<EntryBar>>) {
    for mut bar in &mut bars {
        *bar = Visibility::Hidden;
    }
}

fn show_entry_bar(mut bars: Query<&mut Visibility, With<EntryBar>>) {
    for mut bar in &mut bars {
        *bar = Visibility::Inherited;
    }
}

fn spawn_win_screen(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    round: Res<ActiveRound>,
) {
    commands.spawn((
        CleanupMarker,
        Text::new(format!("You spelled {}!", round.word())),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 40.0,
            ..default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(24.0),
            width: Val::Percent(100.0),
            ..default()
        },
    ));

    spawn_restart_button(&mut commands, &asset_server, "Play again");
}

fn clear_entry(mut entry: ResMut<WordEntry>) {
    entry.0.clear();
}
