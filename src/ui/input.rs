use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{Key, NamedKey};

use crate::ui::overlay::{SidebarHitId, SidebarHitRegion};

/// Pixels scrolled per wheel notch.
pub const SCROLL_LINE: f32 = 48.0;
/// Pixels scrolled per PageUp/PageDown.
pub const SCROLL_PAGE: f32 = 400.0;

/// Mouse state tracking.
#[derive(Debug, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_pressed: bool,
}

/// Hit-test: find which sidebar control contains the given point.
pub fn hit_test(regions: &[SidebarHitRegion], x: f32, y: f32) -> Option<SidebarHitId> {
    // Later regions are drawn on top.
    regions
        .iter()
        .rev()
        .find(|r| {
            let [x1, y1, x2, y2] = r.bounds;
            x >= x1 && x <= x2 && y >= y1 && y <= y2
        })
        .map(|r| r.id)
}

/// Input action produced from raw input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Move the slider by whole steps
    StepScale { delta: i32 },
    /// Jump to the slider minimum
    ScaleToMin,
    /// Jump to the slider maximum
    ScaleToMax,
    /// Jump to a whole scale factor
    JumpTo { factor: u32 },
    /// Scroll the page by a pixel amount (positive moves content up)
    Scroll { delta: f32 },
    /// Open the settings dialog
    OpenSettings,
    /// No action
    None,
}

/// Process a keyboard event.
pub fn process_key(key: Key, state: ElementState) -> InputAction {
    if state != ElementState::Pressed {
        return InputAction::None;
    }

    match key.as_ref() {
        Key::Named(NamedKey::ArrowLeft) | Key::Named(NamedKey::ArrowDown) => {
            InputAction::StepScale { delta: -1 }
        }
        Key::Named(NamedKey::ArrowRight) | Key::Named(NamedKey::ArrowUp) => {
            InputAction::StepScale { delta: 1 }
        }
        Key::Named(NamedKey::Home) => InputAction::ScaleToMin,
        Key::Named(NamedKey::End) => InputAction::ScaleToMax,
        Key::Named(NamedKey::PageDown) => InputAction::Scroll { delta: SCROLL_PAGE },
        Key::Named(NamedKey::PageUp) => InputAction::Scroll {
            delta: -SCROLL_PAGE,
        },
        Key::Named(NamedKey::F2) => InputAction::OpenSettings,
        Key::Character(c) => match c.parse::<u32>() {
            Ok(factor @ 1..=5) => InputAction::JumpTo { factor },
            _ => InputAction::None,
        },
        _ => InputAction::None,
    }
}

/// Process a mouse wheel event.
pub fn process_mouse_wheel(delta: MouseScrollDelta) -> InputAction {
    let pixels = match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * SCROLL_LINE,
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    };
    if pixels == 0.0 {
        InputAction::None
    } else {
        InputAction::Scroll { delta: pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn arrows_step_the_slider() {
        assert_eq!(
            process_key(Key::Named(NamedKey::ArrowRight), ElementState::Pressed),
            InputAction::StepScale { delta: 1 }
        );
        assert_eq!(
            process_key(Key::Named(NamedKey::ArrowDown), ElementState::Pressed),
            InputAction::StepScale { delta: -1 }
        );
        assert_eq!(
            process_key(Key::Named(NamedKey::ArrowRight), ElementState::Released),
            InputAction::None
        );
    }

    #[test]
    fn digits_jump_to_whole_factors() {
        assert_eq!(
            process_key(Key::Character("4".into()), ElementState::Pressed),
            InputAction::JumpTo { factor: 4 }
        );
        assert_eq!(
            process_key(Key::Character("7".into()), ElementState::Pressed),
            InputAction::None
        );
        assert_eq!(
            process_key(Key::Character("x".into()), ElementState::Pressed),
            InputAction::None
        );
    }

    #[test]
    fn wheel_scrolls_content() {
        assert_eq!(
            process_mouse_wheel(MouseScrollDelta::LineDelta(0.0, -1.0)),
            InputAction::Scroll { delta: SCROLL_LINE }
        );
        assert_eq!(
            process_mouse_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 30.0))),
            InputAction::Scroll { delta: -30.0 }
        );
        assert_eq!(
            process_mouse_wheel(MouseScrollDelta::LineDelta(0.0, 0.0)),
            InputAction::None
        );
    }

    #[test]
    fn hit_test_finds_region() {
        let regions = [
            SidebarHitRegion {
                id: SidebarHitId::ScaleDown,
                bounds: [0.0, 0.0, 10.0, 10.0],
            },
            SidebarHitRegion {
                id: SidebarHitId::ScaleUp,
                bounds: [20.0, 0.0, 30.0, 10.0],
            },
        ];
        assert_eq!(hit_test(&regions, 5.0, 5.0), Some(SidebarHitId::ScaleDown));
        assert_eq!(hit_test(&regions, 25.0, 5.0), Some(SidebarHitId::ScaleUp));
        assert_eq!(hit_test(&regions, 15.0, 5.0), None);
    }
}
