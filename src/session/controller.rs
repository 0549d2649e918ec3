use std::collections::HashSet;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::events::{Announcement, Announcer, RenderSink};
use crate::game::{
    evaluate, place_food, Board, BoardError, Cell, Command, Direction, GameClock, GameConfig,
    GameOverCause, Snake, TickOutcome,
};
use crate::highscore::{HighscoreEntry, HighscoreError, HighscoreLedger, LedgerStore};

/// Name recorded when the player submits an empty one
pub const ANONYMOUS: &str = "Anonymous";

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub cause: GameOverCause,
    pub score: u32,
    /// The score qualifies and no name has been submitted yet
    pub awaiting_name: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing played yet
    Idle,
    Running,
    Ended(GameOver),
}

/// Result of handing in a name for a qualifying score
#[derive(Debug)]
pub struct NameSubmission {
    /// Rank the entry landed on
    pub position: Option<usize>,
    /// Set when the ledger could not be written; the entry is still kept
    pub save_error: Option<HighscoreError>,
}

/// One player's game: snake, food, score and speed, plus the ledger
pub struct Session<S, R, A> {
    config: GameConfig,
    board: Board,
    snake: Snake,
    food: Option<Cell>,
    clock: GameClock,
    score: u32,
    state: SessionState,
    pending_direction: Option<Direction>,
    ledger: HighscoreLedger,
    store: S,
    sink: R,
    announcer: A,
    rng: StdRng,
}

impl<S, R, A> Session<S, R, A>
where
    S: LedgerStore,
    R: RenderSink,
    A: Announcer,
{
    /// Build an idle session; the ledger is loaded from `store` once here
    pub fn new(config: GameConfig, store: S, sink: R, announcer: A) -> Result<Self, BoardError> {
        let board = Board::from_pixels(config.arena_width, config.arena_height)?;
        let ledger = HighscoreLedger::load(&store, config.highscore_capacity);
        let snake = Snake::new(
            board.clamp(config.start_cell),
            config.start_direction,
            config.start_length,
        );

        info!(
            cols = board.cols(),
            rows = board.rows(),
            highscores = ledger.len(),
            "session created"
        );

        Ok(Self {
            clock: GameClock::from_config(&config),
            config,
            board,
            snake,
            food: None,
            score: 0,
            state: SessionState::Idle,
            pending_direction: None,
            ledger,
            store,
            sink,
            announcer,
            rng: StdRng::from_entropy(),
        })
    }

    /// Replace the food RNG with a seeded one
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Dispatch an input command; returns whether it was accepted
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Steer(direction) => self.steer(direction),
            Command::Start => self.start(),
        }
    }

    /// Begin a new game.
    ///
    /// Refused while a game is running or a highscore name is pending.
    pub fn start(&mut self) -> bool {
        match self.state {
            SessionState::Running => return false,
            SessionState::Ended(over) if over.awaiting_name => return false,
            _ => {}
        }

        self.snake.reset(
            self.board.clamp(self.config.start_cell),
            self.config.start_length,
            self.config.start_direction,
        );
        self.pending_direction = None;
        self.score = 0;
        self.sink.segments_changed(self.snake.segments());

        if self.food.take().is_some() {
            self.sink.food_removed();
        }
        self.relocate_food();

        self.clock.start();
        self.state = SessionState::Running;
        self.announcer.announce(Announcement::Born);
        info!(head = ?self.snake.head(), interval_ms = self.clock.interval_ms(), "game started");
        true
    }

    /// Queue a turn for the next tick.
    ///
    /// Ignored unless running, and when it would reverse or keep the current
    /// heading. A later accepted turn before the tick replaces an earlier one.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        let current = self.snake.direction();
        if direction == current || current.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Advance one step and apply the rules. `None` when not running.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.state != SessionState::Running {
            return None;
        }

        if let Some(direction) = self.pending_direction.take() {
            self.snake.set_direction(direction);
        }
        let head = self.snake.advance();
        self.sink.segments_changed(self.snake.segments());

        let outcome = evaluate(&self.snake, self.food, &self.board);
        match outcome {
            TickOutcome::FoodEaten => self.eat(),
            TickOutcome::GameOver(cause) => self.end(cause),
            TickOutcome::Continue => {}
        }

        debug!(?head, ?outcome, len = self.snake.len(), "tick");
        Some(outcome)
    }

    /// Record the player's name for a qualifying score and persist the ledger
    pub fn submit_name(&mut self, name: &str) -> Option<NameSubmission> {
        let SessionState::Ended(over) = self.state else {
            return None;
        };
        if !over.awaiting_name {
            return None;
        }

        let name = match name.trim() {
            "" => ANONYMOUS,
            trimmed => trimmed,
        };
        let position = self.ledger.insert(HighscoreEntry::new(name, over.score));
        self.state = SessionState::Ended(GameOver {
            awaiting_name: false,
            ..over
        });
        info!(player = name, score = over.score, ?position, "highscore recorded");

        let save_error = self.store.save(self.ledger.entries()).err();
        if let Some(err) = &save_error {
            warn!(error = %err, "highscores could not be saved");
        }

        Some(NameSubmission {
            position,
            save_error,
        })
    }

    fn eat(&mut self) {
        self.score += 1;
        self.snake.grow();
        let interval = self.clock.on_food_eaten(self.score);

        self.food = None;
        self.sink.food_removed();
        self.relocate_food();

        self.announcer.announce(Announcement::Ate);
        debug!(score = self.score, ?interval, "food eaten");
    }

    fn end(&mut self, cause: GameOverCause) {
        self.clock.stop();
        let awaiting_name = self.ledger.is_qualifying(self.score);
        self.state = SessionState::Ended(GameOver {
            cause,
            score: self.score,
            awaiting_name,
        });
        self.announcer.announce(Announcement::Died);
        info!(?cause, score = self.score, qualifies = awaiting_name, "game over");
    }

    fn relocate_food(&mut self) {
        let occupied: HashSet<Cell> = self.snake.cells().collect();
        self.food = place_food(&mut self.rng, &occupied, &self.board);
        match self.food {
            Some(cell) => self.sink.food_placed(cell),
            None => debug!("board is full, no food placed"),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// A qualifying score is waiting for a player name
    pub fn is_awaiting_name(&self) -> bool {
        matches!(self.state, SessionState::Ended(over) if over.awaiting_name)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_interval(&self) -> Duration {
        self.clock.interval()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ledger(&self) -> &HighscoreLedger {
        &self.ledger
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, cell: Option<Cell>) {
        if self.food.take().is_some() {
            self.sink.food_removed();
        }
        self.food = cell;
        if let Some(cell) = cell {
            self.sink.food_placed(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Segment;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingSink {
        segments: Vec<Segment>,
        food: Option<Cell>,
        removals: usize,
    }

    impl RenderSink for RecordingSink {
        fn segments_changed(&mut self, segments: &[Segment]) {
            self.segments = segments.to_vec();
        }

        fn food_placed(&mut self, cell: Cell) {
            self.food = Some(cell);
        }

        fn food_removed(&mut self) {
            self.food = None;
            self.removals += 1;
        }
    }

    #[derive(Clone, Default)]
    struct RecordingAnnouncer(Rc<RefCell<Vec<Announcement>>>);

    impl Announcer for RecordingAnnouncer {
        fn announce(&self, event: Announcement) {
            self.0.borrow_mut().push(event);
        }
    }

    #[derive(Clone, Default)]
    struct MemoryStore {
        saved: Rc<RefCell<Vec<HighscoreEntry>>>,
        fail_saves: bool,
    }

    impl LedgerStore for MemoryStore {
        fn load(&self) -> Result<Vec<HighscoreEntry>, HighscoreError> {
            Ok(self.saved.borrow().clone())
        }

        fn save(&self, entries: &[HighscoreEntry]) -> Result<(), HighscoreError> {
            if self.fail_saves {
                return Err(HighscoreError::Io {
                    path: "memory".into(),
                    source: std::io::Error::other("read-only"),
                });
            }
            *self.saved.borrow_mut() = entries.to_vec();
            Ok(())
        }
    }

    type TestSession = Session<MemoryStore, RecordingSink, RecordingAnnouncer>;

    fn session_with(store: MemoryStore) -> (TestSession, RecordingAnnouncer) {
        let announcer = RecordingAnnouncer::default();
        let session = Session::new(
            GameConfig::small(),
            store,
            RecordingSink::default(),
            announcer.clone(),
        )
        .unwrap()
        .with_seed(3);
        (session, announcer)
    }

    fn session() -> TestSession {
        session_with(MemoryStore::default()).0
    }

    /// Tick until the game ends, keeping food out of the way
    fn run_into_wall(session: &mut TestSession) -> TickOutcome {
        loop {
            session.set_food(Some(Cell::new(0, 9)));
            let outcome = session.tick().unwrap();
            if outcome.is_game_over() {
                return outcome;
            }
        }
    }

    fn eat_once(session: &mut TestSession) {
        let next = session
            .snake()
            .head()
            .moved_in_direction(session.snake().direction());
        session.set_food(Some(next));
        assert_eq!(session.tick(), Some(TickOutcome::FoodEaten));
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.tick_interval(), Duration::from_millis(400));
        assert_eq!(session.board().cols(), 10);
    }

    #[test]
    fn test_degenerate_arena_is_rejected() {
        let result = Session::new(
            GameConfig::new(10, 400),
            MemoryStore::default(),
            RecordingSink::default(),
            RecordingAnnouncer::default(),
        );
        assert!(matches!(result, Err(BoardError::TooSmall { .. })));
    }

    #[test]
    fn test_commands_ignored_while_idle() {
        let mut session = session();
        assert!(!session.steer(Direction::Up));
        assert_eq!(session.tick(), None);
        assert!(session.submit_name("nobody").is_none());
    }

    #[test]
    fn test_start_resets_board() {
        let (mut session, announcer) = session_with(MemoryStore::default());
        assert!(session.apply(Command::Start));

        assert!(session.is_running());
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().len(), 1);
        assert_eq!(session.snake().head(), Cell::new(5, 5));
        assert_eq!(session.snake().direction(), Direction::Right);

        let food = session.food().unwrap();
        assert!(!session.snake().occupies(food));
        assert_eq!(session.sink().food, Some(food));
        assert_eq!(session.sink().segments.len(), 1);
        assert_eq!(*announcer.0.borrow(), vec![Announcement::Born]);

        // no restart in the middle of a game
        assert!(!session.start());
    }

    #[test]
    fn test_runs_into_right_wall_on_fifth_tick() {
        let mut session = session();
        session.start();
        session.set_food(Some(Cell::new(0, 0)));

        for expected_x in 6..=9 {
            assert_eq!(session.tick(), Some(TickOutcome::Continue));
            assert_eq!(session.snake().head(), Cell::new(expected_x, 5));
        }
        assert_eq!(
            session.tick(),
            Some(TickOutcome::GameOver(GameOverCause::Wall))
        );
        assert_eq!(session.snake().head(), Cell::new(10, 5));
        assert!(matches!(session.state(), SessionState::Ended(_)));
        assert_eq!(session.tick(), None);
    }

    #[test]
    fn test_turn_applies_on_next_tick() {
        let mut session = session();
        session.start();
        session.set_food(Some(Cell::new(0, 0)));

        assert!(session.steer(Direction::Down));
        // not moved yet
        assert_eq!(session.snake().head(), Cell::new(5, 5));
        session.tick();
        assert_eq!(session.snake().head(), Cell::new(5, 6));
        assert_eq!(session.snake().direction(), Direction::Down);
    }

    #[test]
    fn test_reversal_and_same_heading_are_ignored() {
        let mut session = session();
        session.start();
        assert!(!session.steer(Direction::Left));
        assert!(!session.steer(Direction::Right));

        // Up then Left before a tick: Left still reverses the committed heading
        assert!(session.steer(Direction::Up));
        assert!(!session.steer(Direction::Left));
        session.set_food(Some(Cell::new(0, 0)));
        session.tick();
        assert_eq!(session.snake().head(), Cell::new(5, 4));
    }

    #[test]
    fn test_food_pickup_scores_grows_and_speeds_up() {
        let (mut session, announcer) = session_with(MemoryStore::default());
        session.start();

        let mut intervals = vec![session.tick_interval().as_millis()];
        for score in 1..=3 {
            let target_before = session.snake().target_length();
            eat_once(&mut session);
            assert_eq!(session.score(), score);
            assert_eq!(session.snake().target_length(), target_before + 1);
            intervals.push(session.tick_interval().as_millis());

            let food = session.food().unwrap();
            assert!(!session.snake().occupies(food));
        }
        assert_eq!(intervals, vec![400, 398, 394, 388]);
        assert_eq!(
            announcer.0.borrow().iter().filter(|a| **a == Announcement::Ate).count(),
            3
        );
    }

    #[test]
    fn test_qualifying_game_awaits_name_and_persists() {
        let store = MemoryStore::default();
        let (mut session, announcer) = session_with(store.clone());
        session.start();
        eat_once(&mut session);
        eat_once(&mut session);

        run_into_wall(&mut session);
        assert!(session.is_awaiting_name());
        assert_eq!(announcer.0.borrow().last(), Some(&Announcement::Died));

        // start is refused until the prompt is answered
        assert!(!session.start());
        assert!(!session.steer(Direction::Up));

        let submission = session.submit_name("  Kim  ").unwrap();
        assert_eq!(submission.position, Some(0));
        assert!(submission.save_error.is_none());
        assert!(!session.is_awaiting_name());
        assert_eq!(*store.saved.borrow(), vec![HighscoreEntry::new("Kim", 2)]);

        // a second submission is not accepted
        assert!(session.submit_name("again").is_none());
        assert!(session.start());
    }

    #[test]
    fn test_blank_name_is_recorded_as_anonymous() {
        let mut session = session();
        session.start();
        eat_once(&mut session);
        run_into_wall(&mut session);

        session.submit_name("   ").unwrap();
        assert_eq!(session.ledger().entries()[0].player_name, ANONYMOUS);
    }

    #[test]
    fn test_zero_score_does_not_prompt() {
        let mut session = session();
        session.start();
        run_into_wall(&mut session);

        let SessionState::Ended(over) = session.state() else {
            panic!("expected an ended game");
        };
        assert_eq!(over.score, 0);
        assert!(!over.awaiting_name);
        assert!(session.start());
    }

    #[test]
    fn test_low_score_against_full_ledger_is_not_prompted() {
        let store = MemoryStore::default();
        *store.saved.borrow_mut() = (1..=5)
            .map(|i| HighscoreEntry::new(format!("P{i}"), 10 * i))
            .collect();
        let (mut session, _) = session_with(store.clone());
        assert_eq!(session.ledger().lowest_score(), Some(10));

        session.start();
        eat_once(&mut session);
        run_into_wall(&mut session);

        assert!(!session.is_awaiting_name());
        assert!(session.submit_name("late").is_none());
        assert_eq!(session.ledger().len(), 5);
        assert_eq!(store.saved.borrow().len(), 5);
    }

    #[test]
    fn test_save_failure_keeps_entry_and_reports() {
        let store = MemoryStore {
            fail_saves: true,
            ..Default::default()
        };
        let (mut session, _) = session_with(store);
        session.start();
        eat_once(&mut session);
        run_into_wall(&mut session);

        let submission = session.submit_name("Io").unwrap();
        assert!(submission.save_error.is_some());
        assert_eq!(session.ledger().entries()[0], HighscoreEntry::new("Io", 1));
        assert!(session.start());
    }

    #[test]
    fn test_restart_replaces_food_and_snake() {
        let mut session = session();
        session.start();
        run_into_wall(&mut session);
        let removals = session.sink().removals;

        assert!(session.start());
        assert_eq!(session.sink().removals, removals + 1);
        assert_eq!(session.snake().len(), 1);
        assert_eq!(session.tick_interval(), Duration::from_millis(400));
        assert!(session.sink().food.is_some());
    }
}
