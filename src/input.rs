use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::time::Duration;

use crate::consts::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::entities::GameState;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Absolute pointer x in surface pixels
    PointerMoved { x: f32 },
    /// Keyboard step: -1 left, 1 right
    Nudge(f32),
    /// New surface size in pixels
    Resize { width: f32, height: f32 },
    Pause,
    Resume,
    Quit,
}

/// Terminal cells to surface pixels
pub fn cells_to_pixels(columns: u16, rows: u16) -> (f32, f32) {
    (columns as f32 * CELL_WIDTH_PX, rows as f32 * CELL_HEIGHT_PX)
}

/// Pointer column to a surface x at the middle of that cell
pub fn column_to_pixel(column: u16) -> f32 {
    column as f32 * CELL_WIDTH_PX + CELL_WIDTH_PX / 2.0
}

/// Manages input polling and translates raw terminal events into game actions
#[derive(Debug, Default)]
pub struct InputManager {
    actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains every pending terminal event without blocking.
    /// Should be called once per frame before taking actions.
    pub fn poll_events(&mut self, game_state: GameState) -> color_eyre::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(event, game_state);
        }
        Ok(())
    }

    /// Hands over the actions gathered since the last call
    pub fn take_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.actions)
    }

    pub fn handle_event(&mut self, event: Event, game_state: GameState) {
        match event {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                self.handle_key_press(key_event, game_state);
            }
            Event::Mouse(mouse_event) => self.handle_mouse(mouse_event, game_state),
            Event::Resize(columns, rows) => {
                let (width, height) = cells_to_pixels(columns, rows);
                self.actions.push(InputAction::Resize { width, height });
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse_event: MouseEvent, game_state: GameState) {
        if game_state != GameState::Playing {
            return;
        }
        if matches!(
            mouse_event.kind,
            MouseEventKind::Moved | MouseEventKind::Drag(_)
        ) {
            self.actions.push(InputAction::PointerMoved {
                x: column_to_pixel(mouse_event.column),
            });
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.actions.push(InputAction::Quit);
            return;
        }

        if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
            self.actions.push(match game_state {
                GameState::Playing => InputAction::Pause,
                GameState::Paused => InputAction::Resume,
            });
            return;
        }

        if game_state != GameState::Playing {
            return;
        }
        match key_event.code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.actions.push(InputAction::Nudge(-1.0));
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.actions.push(InputAction::Nudge(1.0));
            }
            _ => {}
        }
    }
}
