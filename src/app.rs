//! Terminal front end: drives a [`Session`] from a tokio event loop
//!
//! Ticks, key presses, redraws and Ctrl+C arrive through one `select!` loop,
//! so every handler runs to completion and commands always land between ticks.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};
use tracing::debug;

use crate::feedback::ChannelAnnouncer;
use crate::game::{Command, TickOutcome};
use crate::highscore::JsonFileStore;
use crate::input::{InputHandler, KeyAction, NamePrompt, PromptAction};
use crate::render::{BoardView, Hud, Renderer, Screen};
use crate::session::{Session, SessionState};

pub type GameSession = Session<JsonFileStore, BoardView, ChannelAnnouncer>;

/// Redraw at ~30 FPS, independent of the game speed
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct App {
    session: GameSession,
    renderer: Renderer,
    input_handler: InputHandler,
    prompt: NamePrompt,
    show_highscores: bool,
    status_message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            prompt: NamePrompt::new(),
            show_highscores: false,
            status_message: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.session.tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                // Game logic tick, only while a game is running
                _ = tick_timer.tick(), if self.session.is_running() => {
                    self.on_tick(&mut tick_timer);
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        let hud = self.hud();
                        let screen = self.screen();
                        self.renderer.render(
                            frame,
                            self.session.board(),
                            self.session.sink(),
                            &hud,
                            &screen,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            if self.session.is_awaiting_name() {
                self.handle_prompt_key(key);
            } else {
                self.handle_game_key(key, tick_timer);
            }
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match self.prompt.handle_key_event(key) {
            PromptAction::Submit(name) => {
                if let Some(submission) = self.session.submit_name(&name) {
                    self.status_message = submission
                        .save_error
                        .map(|err| format!("Highscores not saved: {err}"));
                    self.show_highscores = true;
                }
            }
            PromptAction::Quit => self.should_quit = true,
            PromptAction::Edited => {}
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent, tick_timer: &mut Interval) {
        match self.input_handler.handle_key_event(key) {
            KeyAction::Game(Command::Start) => {
                if self.session.start() {
                    self.show_highscores = false;
                    self.status_message = None;
                    reschedule(tick_timer, self.session.tick_interval());
                }
            }
            KeyAction::Game(Command::Steer(direction)) => {
                let accepted = self.session.steer(direction);
                if accepted && self.session.config().instant_turns {
                    // out-of-band tick; the regular cadence restarts from here
                    self.on_tick(tick_timer);
                    reschedule(tick_timer, self.session.tick_interval());
                }
            }
            KeyAction::ShowHighscores => {
                if !self.session.is_running() {
                    self.show_highscores = !self.show_highscores;
                }
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn on_tick(&mut self, tick_timer: &mut Interval) {
        let before = self.session.tick_interval();

        match self.session.tick() {
            Some(TickOutcome::GameOver(_)) if self.session.is_awaiting_name() => {
                self.prompt.clear();
            }
            Some(TickOutcome::FoodEaten) => {
                let after = self.session.tick_interval();
                if after != before {
                    debug!(?after, "tick interval changed");
                    reschedule(tick_timer, after);
                }
            }
            _ => {}
        }
    }

    fn hud(&self) -> Hud<'_> {
        Hud {
            score: self.session.score(),
            interval_ms: self.session.tick_interval().as_millis() as u64,
            message: self.status_message.as_deref(),
        }
    }

    fn screen(&self) -> Screen<'_> {
        match self.session.state() {
            SessionState::Running => Screen::Playing,
            SessionState::Ended(over) if over.awaiting_name => Screen::NewHighscore {
                score: over.score,
                name: self.prompt.text(),
            },
            _ if self.show_highscores => Screen::Highscores(self.session.ledger().entries()),
            SessionState::Idle => Screen::Welcome,
            SessionState::Ended(over) => Screen::GameOver {
                score: over.score,
                cause: over.cause,
            },
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Restart the tick cadence at `period`, first tick one period from now
fn reschedule(tick_timer: &mut Interval, period: Duration) {
    *tick_timer = interval_at(Instant::now() + period, period);
    tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
}
