use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::board::Cell;

/// Stable identity of a segment for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub u64);

/// One unit cell of the snake's body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub id: SegmentId,
    pub cell: Cell,
    pub is_head: bool,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, tail first; the last one is the head
    segments: Vec<Segment>,
    /// Current direction of movement
    direction: Direction,
    /// Length the body is trimmed to after each advance
    target_length: usize,
    next_id: u64,
}

impl Snake {
    /// Create a snake with a single head segment; the body grows out to
    /// `length` over the following advances
    pub fn new(start: Cell, direction: Direction, length: usize) -> Self {
        let mut snake = Self {
            segments: Vec::new(),
            direction,
            target_length: length,
            next_id: 0,
        };
        snake.reset(start, length, direction);
        snake
    }

    /// Drop every segment and start over from `start`.
    ///
    /// Segment ids keep counting up so a render sink never sees an id reused.
    pub fn reset(&mut self, start: Cell, length: usize, direction: Direction) {
        self.segments.clear();
        self.direction = direction;
        self.target_length = length.max(1);
        let head = self.new_segment(start);
        self.segments.push(head);
    }

    /// Change heading for the next advance; a 180-degree turn is refused
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move one cell in the current direction and return the new head cell
    pub fn advance(&mut self) -> Cell {
        let next = self.head().moved_in_direction(self.direction);

        for segment in &mut self.segments {
            segment.is_head = false;
        }
        let head = self.new_segment(next);
        self.segments.push(head);

        if self.segments.len() > self.target_length {
            let excess = self.segments.len() - self.target_length;
            self.segments.drain(..excess);
        }

        next
    }

    /// Lengthen the snake by one; takes effect on the next advance
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.segments[self.segments.len() - 1].cell
    }

    /// Get the tail position (oldest segment)
    pub fn tail(&self) -> Cell {
        self.segments[0].cell
    }

    /// Cells of every segment except the head
    pub fn body_cells_excluding_head(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments[..self.segments.len() - 1]
            .iter()
            .map(|segment| segment.cell)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body_cells_excluding_head().any(|body| body == cell)
    }

    /// Check if any segment, head included, sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.iter().any(|segment| segment.cell == cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().map(|segment| segment.cell)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the snake is empty (never true after construction)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn new_segment(&mut self, cell: Cell) -> Segment {
        let id = SegmentId(self.next_id);
        self.next_id += 1;
        Segment {
            id,
            cell,
            is_head: true,
        }
    }
}
