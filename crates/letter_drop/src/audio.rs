use bevy::prelude::*;
use bevy_asset_loader::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::game::RoundNotice;
use crate::round::AudioCue;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
enum AssetState {
    #[default]
    Loading,
    Loaded,
}

#[derive(AssetCollection, Resource)]
struct AudioAssets {
    #[asset(path = "audio/click.ogg")]
    click: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "audio/drop.ogg")]
    drop: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "audio/win.ogg")]
    win: Handle<bevy_kira_audio::prelude::AudioSource>,
}

// One channel per cue so a replay only restarts its own sound
#[derive(Resource)]
struct ClickChannel;

#[derive(Resource)]
struct DropChannel;

#[derive(Resource)]
struct WinChannel;

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .add_audio_channel::<ClickChannel>()
            .add_audio_channel::<DropChannel>()
            .add_audio_channel::<WinChannel>()
            .init_state::<AssetState>()
            .add_loading_state(
                LoadingState::new(AssetState::Loading)
                    .continue_to_state(AssetState::Loaded)
                    .load_collection::<AudioAssets>(),
            )
            .add_systems(Update, play_cues.run_if(in_state(AssetState::Loaded)));
    }
}

fn restart<T: Resource>(
    channel: &AudioChannel<T>,
    source: &Handle<bevy_kira_audio::prelude::AudioSource>,
) {
    channel.stop();
    channel.play(source.clone_weak());
}

fn play_cues(
    audio_assets: Res<AudioAssets>,
    click: Res<AudioChannel<ClickChannel>>,
    drop: Res<AudioChannel<DropChannel>>,
    win: Res<AudioChannel<WinChannel>>,
    mut notices: EventReader<RoundNotice>,
) {
    for cue in notices.read().filter_map(|notice| notice.audio_cue()) {
        debug!("Playing {cue} cue");
        match cue {
            AudioCue::TileShown => restart(&click, &audio_assets.click),
            AudioCue::Drop => restart(&drop, &audio_assets.drop),
            AudioCue::Win => restart(&win, &audio_assets.win),
        }
    }
}
