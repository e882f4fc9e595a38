use bevy::prelude::*;
use bevy::window::PrimaryWindow;

// wgpu refuses surfaces larger than the maximum texture extent (2048 on most WebGL2 devices).
const MAX_SURFACE_EXTENT: f32 = 2048.0;

fn browser_inner_size() -> Option<Vec2> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Vec2::new(width as f32, height as f32))
}

/// Keeps the primary window (and with it the board) matched to the browser viewport.
pub fn handle_browser_resize(mut primary_query: Query<&mut Window, With<PrimaryWindow>>) {
    let Some(target) = browser_inner_size() else {
        return;
    };
    let target = target.min(Vec2::splat(MAX_SURFACE_EXTENT));

    for mut window in &mut primary_query {
        let current = Vec2::new(window.resolution.width(), window.resolution.height());
        if (current - target).abs().max_element() > f32::EPSILON {
            debug!("Resizing board from {current} to {target}");
            window.resolution.set(target.x, target.y);
        }
    }
}
