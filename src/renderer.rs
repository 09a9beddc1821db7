use std::f32::consts::FRAC_PI_4;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color as TuiColor, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine, Points},
    },
};

use crate::consts::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::entities::GameState;
use crate::sim::Viewport;
use crate::surface::{Color, DrawCommand, DrawList, Glyph, Paint, Sprite};

/// Braille markers pack 2x4 dots into a cell
const DOT_WIDTH: f32 = CELL_WIDTH_PX / 2.0;
const DOT_HEIGHT: f32 = CELL_HEIGHT_PX / 4.0;

/// Bug headings, clockwise from straight up
const BUG_HEADINGS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];
const SHIP_SYMBOL: &str = "▲";

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub draw_list: &'a DrawList,
    pub viewport: Viewport,
    pub formations: usize,
    pub enemies: usize,
    pub projectiles: usize,
    pub explosions: usize,
    pub fps: u32,
    pub area: Rect,
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
        }
    }

    /// Replays the recorded frame on a braille canvas, then the HUD on top
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let width = view.viewport.width as f64;
        let height = view.viewport.height;

        let canvas = Canvas::default()
            .background_color(TuiColor::Black)
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height as f64])
            .paint(|ctx| {
                for command in view.draw_list.commands() {
                    replay(ctx, command, height);
                }
            });
        frame.render_widget(canvas, area);

        // Stats overlay at the top
        let stats = Line::from(vec![
            Span::styled("Formations: ", Style::default().fg(TuiColor::DarkGray)),
            Span::styled(
                format!("{}", view.formations),
                Style::default()
                    .fg(TuiColor::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Bugs: ", Style::default().fg(TuiColor::DarkGray)),
            Span::styled(
                format!("{}", view.enemies),
                Style::default()
                    .fg(TuiColor::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Bullets: ", Style::default().fg(TuiColor::DarkGray)),
            Span::styled(
                format!("{}", view.projectiles),
                Style::default()
                    .fg(TuiColor::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Explosions: ", Style::default().fg(TuiColor::DarkGray)),
            Span::styled(
                format!("{}", view.explosions),
                Style::default()
                    .fg(TuiColor::LightRed)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(TuiColor::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(TuiColor::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1u16.min(area.height),
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[Mouse: Steer] [A/D/Arrows: Nudge] [P: Pause] [Q: Quit]",
            Style::default().fg(TuiColor::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1u16.min(area.height),
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        // First render the frozen game screen
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let width = 30u16.min(area.width);
        let height = 6u16.min(area.height);
        let pause_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(TuiColor::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }
}

/// Draws one recorded command. The canvas y axis points up, the surface's down.
fn replay(ctx: &mut Context, command: &DrawCommand, height: f32) {
    match command {
        DrawCommand::Clear => {}
        DrawCommand::Circle {
            x,
            y,
            radius,
            paint,
        } => {
            let coords = disc_points(*x, height - *y, *radius);
            ctx.draw(&Points {
                coords: &coords,
                color: tui_color(paint),
            });
        }
        DrawCommand::Rect {
            x,
            y,
            width,
            height: h,
            paint,
        } => {
            let color = tui_color(paint);
            let top = (height - *y) as f64;
            let bottom = (height - *y - *h) as f64;
            for column in rect_columns(*x, *width) {
                ctx.draw(&CanvasLine {
                    x1: column as f64,
                    y1: top,
                    x2: column as f64,
                    y2: bottom,
                    color,
                });
            }
        }
        DrawCommand::Glyph(glyph) => {
            let mut style = Style::default().fg(tui_color(&glyph.paint));
            if glyph.paint.shadow.is_some() {
                style = style.add_modifier(Modifier::BOLD);
            }
            ctx.print(
                glyph.x as f64,
                (height - glyph.y) as f64,
                Span::styled(glyph_symbol(glyph), style),
            );
        }
    }
}

fn tui_color(paint: &Paint) -> TuiColor {
    let Color { r, g, b } = paint.color.faded(paint.alpha);
    TuiColor::Rgb(r, g, b)
}

/// Sample points covering a disc at braille resolution; tiny discs are one dot
fn disc_points(cx: f32, cy: f32, radius: f32) -> Vec<(f64, f64)> {
    let mut coords = vec![(cx as f64, cy as f64)];
    if radius < DOT_WIDTH.min(DOT_HEIGHT) {
        return coords;
    }
    let steps_x = (radius / DOT_WIDTH).floor() as i32;
    let steps_y = (radius / DOT_HEIGHT).floor() as i32;
    for i in -steps_x..=steps_x {
        for j in -steps_y..=steps_y {
            let (dx, dy) = (i as f32 * DOT_WIDTH, j as f32 * DOT_HEIGHT);
            if (i, j) != (0, 0) && dx * dx + dy * dy <= radius * radius {
                coords.push(((cx + dx) as f64, (cy + dy) as f64));
            }
        }
    }
    coords
}

/// x positions of the vertical strokes that fill a rectangle
fn rect_columns(x: f32, width: f32) -> Vec<f32> {
    if width <= DOT_WIDTH {
        return vec![x + width / 2.0];
    }
    let count = (width / DOT_WIDTH).ceil() as usize;
    (0..count)
        .map(|i| x + DOT_WIDTH / 2.0 + i as f32 * DOT_WIDTH)
        .collect()
}

fn glyph_symbol(glyph: &Glyph) -> &'static str {
    match glyph.sprite {
        Sprite::Ship => SHIP_SYMBOL,
        Sprite::Bug => {
            let octant = (glyph.rotation / FRAC_PI_4).round() as i32;
            BUG_HEADINGS[octant.rem_euclid(8) as usize]
        }
    }
}
