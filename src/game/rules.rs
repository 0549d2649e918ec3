use super::board::{Board, Cell};
use super::snake::Snake;

/// What ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Snake hit a wall
    Wall,
    /// Snake ran into its own body
    SelfBite,
}

/// Result of evaluating one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    FoodEaten,
    GameOver(GameOverCause),
    Continue,
}

impl TickOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, TickOutcome::GameOver(_))
    }
}

/// Judge the snake's freshly advanced head.
///
/// Food wins over walls and self-bites, then walls win over self-bites.
pub fn evaluate(snake: &Snake, food: Option<Cell>, board: &Board) -> TickOutcome {
    let head = snake.head();

    if food == Some(head) {
        return TickOutcome::FoodEaten;
    }

    if !board.contains(head) {
        return TickOutcome::GameOver(GameOverCause::Wall);
    }

    if snake.collides_with_body(head) {
        return TickOutcome::GameOver(GameOverCause::SelfBite);
    }

    TickOutcome::Continue
}
