use bevy::prelude::*;
use bevy::state::state::FreelyMutableState;

use crate::FONT;

#[derive(Component)]
pub struct RestartButton;

/// Entities despawned when the state that spawned them is left.
#[derive(Component)]
pub struct CleanupMarker;

pub const BUTTON_COLOR: Color = Color::srgb(0.18, 0.2, 0.32);
pub const BUTTON_PRESSED_COLOR: Color = Color::srgb(0.35, 0.4, 0.65);

/// A resource that knows how to put its game back to a fresh start.
pub trait Restartable: Resource {
    type State: States + FreelyMutableState;

    fn reset(&mut self);
    fn initial_state() -> Self::State;
}

/// Spawns a restart button anchored at the top center of the window.
pub fn spawn_restart_button(commands: &mut Commands, asset_server: &AssetServer, label: &str) {
    commands
        .spawn((
            RestartButton,
            CleanupMarker,
            Button,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-90.0)),
                width: Val::Px(180.0),
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
                Text::new(label),
                TextFont {
                    font: asset_server.load(FONT),
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn handle_restart<T: Restartable>(
    mut next_state: ResMut<NextState<T::State>>,
    mut restartable: ResMut<T>,
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<RestartButton>),
    >,
) {
    for (interaction, mut background) in &mut interaction_query {
        match interaction {
            Interaction::Pressed => {
                info!("Restart requested");
                restartable.reset();
                next_state.set(T::initial_state());
            }
            Interaction::Hovered => background.0 = BUTTON_PRESSED_COLOR,
            Interaction::None => background.0 = BUTTON_COLOR,
        }
    }
}

pub fn cleanup_marked_entities(mut commands: Commands, query: Query<Entity, With<CleanupMarker>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
