use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::board_view::BoardView;
use crate::game::{Board, Cell, GameOverCause};
use crate::highscore::HighscoreEntry;

const HEAD_COLOR: Color = Color::LightGreen;
const BODY_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;
const LIGHT_TILE: Color = Color::Gray;
const DARK_TILE: Color = Color::DarkGray;

/// Figures shown in the status bar
#[derive(Debug, Clone, Copy)]
pub struct Hud<'a> {
    pub score: u32,
    pub interval_ms: u64,
    /// One-line notice, e.g. a failed save
    pub message: Option<&'a str>,
}

/// Which overlay, if any, sits on top of the board
#[derive(Debug, Clone, Copy)]
pub enum Screen<'a> {
    Welcome,
    Playing,
    NewHighscore { score: u32, name: &'a str },
    GameOver { score: u32, cause: GameOverCause },
    Highscores(&'a [HighscoreEntry]),
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        board: &Board,
        view: &BoardView,
        hud: &Hud,
        screen: &Screen,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status
                Constraint::Min(0),    // Arena
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_status(hud), chunks[0]);

        let arena = centered(
            chunks[1],
            board.cols() as u16 * 2 + 2,
            board.rows() as u16 + 2,
        );
        frame.render_widget(self.render_grid(board, view), arena);

        if let Some((popup, height)) = self.render_overlay(screen) {
            let area = centered(chunks[1], 44, height);
            frame.render_widget(Clear, area);
            frame.render_widget(popup, area);
        }

        frame.render_widget(self.render_controls(screen), chunks[2]);
    }

    fn render_grid(&self, board: &Board, view: &BoardView) -> Paragraph<'_> {
        let sprites = view.by_cell();
        let food = view.food();
        let mut lines = Vec::with_capacity(board.rows() as usize);

        for y in 0..board.rows() as i32 {
            let mut spans = Vec::with_capacity(board.cols() as usize);

            for x in 0..board.cols() as i32 {
                let cell = Cell::new(x, y);
                let tile = if (x + y) % 2 == 0 { LIGHT_TILE } else { DARK_TILE };

                let span = match sprites.get(&cell) {
                    Some(sprite) if sprite.is_head => Span::styled(
                        "██",
                        Style::default().fg(HEAD_COLOR).add_modifier(Modifier::BOLD),
                    ),
                    Some(_) => Span::styled("██", Style::default().fg(BODY_COLOR)),
                    None if food == Some(cell) => Span::styled(
                        "()",
                        Style::default()
                            .fg(FOOD_COLOR)
                            .bg(tile)
                            .add_modifier(Modifier::BOLD),
                    ),
                    None => Span::styled("  ", Style::default().bg(tile)),
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_status(&self, hud: &Hud) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                hud.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{} ms", hud.interval_ms),
                Style::default().fg(Color::White),
            ),
        ];
        if let Some(message) = hud.message {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(message.to_string(), Style::default().fg(Color::Red)));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    /// Overlay paragraph and the height it needs
    fn render_overlay(&self, screen: &Screen) -> Option<(Paragraph<'static>, u16)> {
        let key = |k: &str| {
            Span::styled(
                k.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        };
        let gray = |t: &str| Span::styled(t.to_string(), Style::default().fg(Color::Gray));
        let title = |t: &str, color: Color| {
            Line::from(Span::styled(
                t.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        };

        let (lines, border) = match *screen {
            Screen::Playing => return None,
            Screen::Welcome => (
                vec![
                    title("SNAKE", Color::Green),
                    Line::from(""),
                    Line::from(gray("Eat the food, avoid walls and yourself.")),
                    Line::from(""),
                    Line::from(vec![gray("Press "), key("Space"), gray(" to start")]),
                    Line::from(vec![gray("Press "), key("H"), gray(" for highscores")]),
                ],
                Color::Green,
            ),
            Screen::NewHighscore { score, name } => (
                vec![
                    title("NEW HIGHSCORE!", Color::Yellow),
                    Line::from(""),
                    Line::from(vec![gray("You scored "), key(&score.to_string())]),
                    Line::from(gray("Enter your name:")),
                    Line::from(Span::styled(
                        format!("{name}_"),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![gray("Press "), key("Enter"), gray(" to save")]),
                ],
                Color::Yellow,
            ),
            Screen::GameOver { score, cause } => (
                vec![
                    title("GAME OVER", Color::Red),
                    Line::from(gray(match cause {
                        GameOverCause::Wall => "You hit the wall.",
                        GameOverCause::SelfBite => "You bit yourself.",
                    })),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                        key(&score.to_string()),
                    ]),
                    Line::from(""),
                    Line::from(vec![gray("Press "), key("Space"), gray(" to play again")]),
                ],
                Color::Red,
            ),
            Screen::Highscores(entries) => {
                let mut lines = vec![title("HIGHSCORES", Color::Cyan), Line::from("")];
                if entries.is_empty() {
                    lines.push(Line::from(gray("No scores yet")));
                }
                for (rank, entry) in entries.iter().enumerate() {
                    lines.push(Line::from(vec![
                        gray(&format!("{}. ", rank + 1)),
                        Span::styled(
                            format!("{:<16}", entry.player_name),
                            Style::default().fg(Color::White),
                        ),
                        key(&format!("{:>5}", entry.score)),
                    ]));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(vec![gray("Press "), key("Space"), gray(" to play")]));
                (lines, Color::Cyan)
            }
        };

        let height = lines.len() as u16 + 2;
        let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        Some((paragraph, height))
    }

    fn render_controls(&self, screen: &Screen) -> Paragraph<'_> {
        let text = match screen {
            Screen::NewHighscore { .. } => Line::from(vec![
                Span::raw("type your name | "),
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" to save"),
            ]),
            _ => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" to start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rect of at most `width` x `height` centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
