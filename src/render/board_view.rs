use std::collections::HashMap;

use crate::game::{Cell, Segment, SegmentId};
use crate::session::RenderSink;

/// What the terminal draws for one snake segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub cell: Cell,
    pub is_head: bool,
}

/// Presentation-side copy of the board, keyed by segment id.
///
/// Fed by the session through [`RenderSink`]; the renderer only reads it.
#[derive(Debug, Default)]
pub struct BoardView {
    sprites: HashMap<SegmentId, Sprite>,
    food: Option<Cell>,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprite(&self, id: SegmentId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    /// Lookup from cell to sprite for drawing a frame
    pub fn by_cell(&self) -> HashMap<Cell, Sprite> {
        self.sprites
            .values()
            .map(|sprite| (sprite.cell, *sprite))
            .collect()
    }
}

impl RenderSink for BoardView {
    fn segments_changed(&mut self, segments: &[Segment]) {
        self.sprites
            .retain(|id, _| segments.iter().any(|segment| segment.id == *id));

        for segment in segments {
            self.sprites
                .entry(segment.id)
                .and_modify(|sprite| sprite.is_head = segment.is_head)
                .or_insert(Sprite {
                    cell: segment.cell,
                    is_head: segment.is_head,
                });
        }
    }

    fn food_placed(&mut self, cell: Cell) {
        self.food = Some(cell);
    }

    fn food_removed(&mut self) {
        self.food = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Snake};

    #[test]
    fn test_sprites_follow_segments() {
        let mut snake = Snake::new(Cell::new(1, 1), Direction::Right, 2);
        let mut view = BoardView::new();
        view.segments_changed(snake.segments());
        let first = snake.segments()[0].id;
        assert!(view.sprite(first).unwrap().is_head);

        snake.advance();
        view.segments_changed(snake.segments());
        assert_eq!(view.sprite_count(), 2);
        // the old head was demoted, not recreated
        assert_eq!(view.sprite(first).unwrap().cell, Cell::new(1, 1));
        assert!(!view.sprite(first).unwrap().is_head);

        snake.advance();
        view.segments_changed(snake.segments());
        assert_eq!(view.sprite_count(), 2);
        assert!(view.sprite(first).is_none());

        let by_cell = view.by_cell();
        assert!(by_cell[&Cell::new(3, 1)].is_head);
        assert!(!by_cell[&Cell::new(2, 1)].is_head);
    }

    #[test]
    fn test_food_events() {
        let mut view = BoardView::new();
        view.food_placed(Cell::new(4, 2));
        assert_eq!(view.food(), Some(Cell::new(4, 2)));
        view.food_removed();
        assert_eq!(view.food(), None);
    }
}
