use serde::Serialize;

const PRESSED_SCALE: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: f32, y: f32 },
    Down,
    Up,
}

/// Custom cursor that trails the pointer and swells while pressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CursorFollower {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl CursorFollower {
    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Move { x, y } => {
                self.x = x;
                self.y = y;
            }
            PointerEvent::Down => self.scale = PRESSED_SCALE,
            PointerEvent::Up => self.scale = 1.0,
        }
    }
}
