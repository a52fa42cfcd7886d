use crate::types::{Point, Rect};
use macroquad::prelude::*;

/// The six logical buttons shared by keyboard and on-screen controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Left,
    Right,
    Punch,
    Kick,
    Special,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::Up,
        Button::Left,
        Button::Right,
        Button::Punch,
        Button::Kick,
        Button::Special,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Button::Up => "^",
            Button::Left => "<",
            Button::Right => ">",
            Button::Punch => "PUNCH",
            Button::Kick => "KICK",
            Button::Special => "SPECIAL",
        }
    }
}

/// Held-button flags read once per frame by the physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub up: bool,
    pub left: bool,
    pub right: bool,
    pub punch: bool,
    pub kick: bool,
    pub special: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press/release event. Last write wins.
    pub fn set(&mut self, button: Button, pressed: bool) {
        match button {
            Button::Up => self.up = pressed,
            Button::Left => self.left = pressed,
            Button::Right => self.right = pressed,
            Button::Punch => self.punch = pressed,
            Button::Kick => self.kick = pressed,
            Button::Special => self.special = pressed,
        }
    }

    pub fn get(&self, button: Button) -> bool {
        match button {
            Button::Up => self.up,
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Punch => self.punch,
            Button::Kick => self.kick,
            Button::Special => self.special,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        Button::ALL.iter().any(|b| self.get(*b))
    }
}

/// Keyboard fallback mapping. Unmapped keys are ignored.
pub fn button_for_key(key: KeyCode) -> Option<Button> {
    match key {
        KeyCode::Left | KeyCode::A => Some(Button::Left),
        KeyCode::Right | KeyCode::D => Some(Button::Right),
        KeyCode::Up | KeyCode::W | KeyCode::Space => Some(Button::Up),
        KeyCode::J => Some(Button::Punch),
        KeyCode::K => Some(Button::Kick),
        KeyCode::U => Some(Button::Special),
        _ => None,
    }
}

const MAPPED_KEYS: [KeyCode; 11] = [
    KeyCode::Left,
    KeyCode::A,
    KeyCode::Right,
    KeyCode::D,
    KeyCode::Up,
    KeyCode::W,
    KeyCode::Space,
    KeyCode::J,
    KeyCode::K,
    KeyCode::U,
    KeyCode::Enter,
];

/// Places the on-screen buttons for a viewport: movement pad bottom-left, attacks bottom-right.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualControls {
    buttons: Vec<(Button, Rect)>,
}

impl VirtualControls {
    const PAD: f32 = 44.0;
    const ATTACK: f32 = 52.0;
    const MARGIN: f32 = 10.0;
    const GAP: f32 = 4.0;

    pub fn layout(width: f32, height: f32) -> Self {
        let pad = Self::PAD;
        let m = Self::MARGIN;
        let g = Self::GAP;

        let row_y = height - m - pad;
        let up_y = row_y - g - pad;
        let left_x = m;
        let right_x = m + 2.0 * (pad + g);
        let up_x = m + pad + g;

        let a = Self::ATTACK;
        let col_x = width - m - a;
        let special_y = height - m - a;
        let kick_y = special_y - g - a;
        let punch_y = kick_y - g - a;

        VirtualControls {
            buttons: vec![
                (Button::Up, Rect::new(up_x, up_y, pad, pad)),
                (Button::Left, Rect::new(left_x, row_y, pad, pad)),
                (Button::Right, Rect::new(right_x, row_y, pad, pad)),
                (Button::Punch, Rect::new(col_x, punch_y, a, a)),
                (Button::Kick, Rect::new(col_x, kick_y, a, a)),
                (Button::Special, Rect::new(col_x, special_y, a, a)),
            ],
        }
    }

    pub fn buttons(&self) -> &[(Button, Rect)] {
        &self.buttons
    }

    /// Buttons are round; presses in the corners of their squares miss.
    pub fn button_at(&self, p: Point) -> Option<Button> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.inscribed_circle_contains(p))
            .map(|(b, _)| *b)
    }

    /// Buttons held down by any of the given pointer positions.
    pub fn held(&self, pointers: &[Point]) -> InputState {
        let mut state = InputState::new();
        for p in pointers {
            if let Some(b) = self.button_at(*p) {
                state.set(b, true);
            }
        }
        state
    }
}

/// Keyboard/pointer snapshot for one rendered frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub key_events: Vec<(Button, bool)>,
    pub pointers: Vec<Point>,
    pub confirm: bool, // Start/rematch
}

/// Polls macroquad for key edges and held pointers.
pub fn poll_frame_input() -> FrameInput {
    let mut frame = FrameInput::default();
    for key in MAPPED_KEYS {
        if is_key_pressed(key) {
            if key == KeyCode::Enter {
                frame.confirm = true;
            }
            if let Some(b) = button_for_key(key) {
                frame.key_events.push((b, true));
            }
        }
        if is_key_released(key) {
            if let Some(b) = button_for_key(key) {
                frame.key_events.push((b, false));
            }
        }
    }

    for touch in touches() {
        if !matches!(touch.phase, TouchPhase::Ended | TouchPhase::Cancelled) {
            frame.pointers.push(Point::new(touch.position.x, touch.position.y));
        }
    }
    if is_mouse_button_down(MouseButton::Left) {
        let (x, y) = mouse_position();
        frame.pointers.push(Point::new(x, y));
    }
    if is_mouse_button_pressed(MouseButton::Left) {
        frame.confirm = true;
    }
    frame
}
