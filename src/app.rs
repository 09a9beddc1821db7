use color_eyre::Result;
use ratatui::{Terminal, backend::Backend};
use std::time::Instant;

use crate::consts::FRAME_DURATION;
use crate::entities::GameState;
use crate::input::{InputAction, InputManager, cells_to_pixels};
use crate::renderer::{GameRenderer, RenderView};
use crate::sim::SimulationState;
use crate::surface::DrawList;

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    game_state: GameState,
    sim: SimulationState,
    /// Last frame's draw calls, replayed while paused
    draw_list: DrawList,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of the given size.
    pub fn new(columns: u16, rows: u16, seed: u64) -> Self {
        let (width, height) = cells_to_pixels(columns.max(1), rows.max(1));
        Self {
            running: true,
            game_state: GameState::Playing,
            sim: SimulationState::new(width, height, seed),
            draw_list: DrawList::new(),
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
        }
    }

    pub fn sim(&self) -> &SimulationState {
        &self.sim
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run the application's main loop: one simulation frame per tick.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();
            let frame_time = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            // Poll input events and apply them before the frame runs
            self.input_manager.poll_events(self.game_state)?;
            let actions = self.input_manager.take_actions();
            self.process_actions(&actions);

            if self.game_state == GameState::Playing {
                self.sim.frame(&mut self.draw_list);
            }

            terminal.draw(|frame| {
                let view = RenderView {
                    game_state: self.game_state,
                    draw_list: &self.draw_list,
                    viewport: self.sim.viewport,
                    formations: self.sim.formations.len(),
                    enemies: self.sim.formations.enemy_count(),
                    projectiles: self.sim.projectiles.len(),
                    explosions: self.sim.explosions.len(),
                    fps: self.fps,
                    area: frame.area(),
                };
                self.renderer.render(frame, &view);
            })?;

            // Sleep off the rest of the frame to hold ~60 FPS
            if let Some(remaining) = FRAME_DURATION.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        log::info!("quit after {} frames", self.sim.frame_count);
        Ok(())
    }

    /// Process input actions and update game state accordingly
    pub fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match *action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Pause => {
                    log::info!("paused at frame {}", self.sim.frame_count);
                    self.game_state = GameState::Paused;
                }
                InputAction::Resume => {
                    log::info!("resumed");
                    self.game_state = GameState::Playing;
                }
                InputAction::PointerMoved { x } => {
                    self.sim.pointer_moved(x);
                }
                InputAction::Nudge(direction) => {
                    self.sim.player.nudge(direction);
                }
                InputAction::Resize { width, height } => {
                    if width > 0.0 && height > 0.0 {
                        self.sim.resize(width, height);
                    }
                }
            }
        }
    }
}
