use bevy::prelude::*;

/// What the primary pointer did this frame, with its position in window coordinates
/// (logical pixels, origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerPhase {
    Pressed(Vec2),
    Held(Vec2),
    Released(Option<Vec2>),
    Cancelled,
}

/// Reads the current pointer phase, mouse first, then the first active touch.
///
/// Presses and holds without a resolvable position yield `None` so the caller can ignore them.
/// A release is always reported, with whatever position could still be read.
pub fn pointer_phase(
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    window: &Window,
) -> Option<PointerPhase> {
    if button_input.just_pressed(MouseButton::Left) {
        return window.cursor_position().map(PointerPhase::Pressed);
    }
    if button_input.just_released(MouseButton::Left) {
        return Some(PointerPhase::Released(window.cursor_position()));
    }
    if button_input.pressed(MouseButton::Left) {
        return window.cursor_position().map(PointerPhase::Held);
    }

    if let Some(touch) = touch_input.iter_just_pressed().next() {
        return Some(PointerPhase::Pressed(touch.position()));
    }
    if let Some(touch) = touch_input.iter_just_released().next() {
        return Some(PointerPhase::Released(Some(touch.position())));
    }
    if touch_input.any_just_canceled() {
        return Some(PointerPhase::Cancelled);
    }
    touch_input
        .iter()
        .next()
        .map(|touch| PointerPhase::Held(touch.position()))
}

/// Converts window coordinates (origin top-left, y down) to world coordinates for a
/// default 2D camera centered on the window.
pub fn window_to_world(position: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(
        position.x - window_size.x / 2.0,
        window_size.y / 2.0 - position.y,
    )
}

/// Inverse of [`window_to_world`].
pub fn world_to_window(position: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(
        position.x + window_size.x / 2.0,
        window_size.y / 2.0 - position.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_and_world_round_trip_through_the_center() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(
            window_to_world(Vec2::new(400.0, 300.0), size),
            Vec2::ZERO,
            "window center maps to world origin"
        );
        assert_eq!(
            window_to_world(Vec2::ZERO, size),
            Vec2::new(-400.0, 300.0),
            "top-left corner maps to the upper-left world quadrant"
        );

        let point = Vec2::new(123.0, 456.0);
        assert_eq!(
            world_to_window(window_to_world(point, size), size),
            point,
            "conversion must be invertible"
        );
    }
}
