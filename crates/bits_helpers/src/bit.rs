#![allow(
    clippy::allow_attributes,
    reason = "allow attributes are needed for wasm"
)]

use bevy::asset::{AssetMetaCheck, AssetMode};
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{
    Backends, PowerPreference, RenderCreation, WgpuSettings, WgpuSettingsPriority,
};
use bevy::window::{PresentMode, WindowMode, WindowResolution};

use crate::{RibbitCommunicationPlugin, RibbitMessageHandler};
#[cfg(target_arch = "wasm32")]
use crate::window_resizing::handle_browser_resize;

#[cfg(not(target_arch = "wasm32"))]
pub const FONT: &str = "../../bits_helpers/assets/fonts/FiraSans-Bold.ttf";
#[cfg(target_arch = "wasm32")]
pub const FONT: &str = concat!(
    "../../bits_helpers-",
    env!("CARGO_PKG_VERSION"),
    "/assets/fonts/FiraSans-Bold.ttf"
);

// Landscape board, the browser canvas resizes it on wasm.
pub const WINDOW_WIDTH: f32 = 960.0;
pub const WINDOW_HEIGHT: f32 = 640.0;

pub const BACKGROUND_COLOR: Color = Color::srgb(0.07, 0.08, 0.13);

/// Builds a Bevy app configured for the Ribbit host: asset paths, canvas window,
/// browser-friendly renderer, frame pacing and host messaging.
#[allow(unused_variables, reason = "bit_version is used in wasm")]
pub fn get_default_app<T: RibbitMessageHandler>(bit_name: &str, bit_version: &str) -> App {
    let mut app = App::new();

    let asset_plugin = AssetPlugin {
        mode: AssetMode::Unprocessed,

        #[cfg(not(target_arch = "wasm32"))]
        file_path: "assets".to_string(),
        #[cfg(target_arch = "wasm32")]
        file_path: format!("bits/{bit_name}-{bit_version}/assets"),
        processed_file_path: "imported_assets/Default".to_string(),
        watch_for_changes_override: None,
        meta_check: AssetMetaCheck::Never,
    };

    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: bit_name.to_string(),
            present_mode: PresentMode::Fifo,
            resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            canvas: Some("#bit".into()),
            fit_canvas_to_parent: true,
            mode: WindowMode::Windowed,
            // Keep browser shortcuts (F5, Ctrl+R) working.
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    };

    let render_plugin = RenderPlugin {
        render_creation: RenderCreation::Automatic(WgpuSettings {
            backends: Some(Backends::BROWSER_WEBGPU | Backends::GL),
            power_preference: PowerPreference::HighPerformance,
            priority: WgpuSettingsPriority::Functionality,
            ..default()
        }),
        ..default()
    };

    app.add_plugins(
        DefaultPlugins
            .set(asset_plugin)
            .set(window_plugin)
            .set(render_plugin),
    );

    // Saves battery on mobile: https://github.com/aevyrie/bevy_framepace
    app.add_plugins(bevy_framepace::FramepacePlugin);

    app.insert_resource(ClearColor(BACKGROUND_COLOR));

    app.add_plugins(RibbitCommunicationPlugin::<T>::default());

    #[cfg(target_arch = "wasm32")]
    app.add_systems(PreUpdate, handle_browser_resize);

    app
}
