use std::collections::VecDeque;

use crate::{Coords, TermInt};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Unit step as `(d_row, d_col)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    /// The cell one step away from `pos`. Stepping off the grid wraps to a
    /// coordinate that is never interior, so it still reads as a wall hit.
    pub fn step(self, (row, col): Coords) -> Coords {
        match self {
            Up => (row.wrapping_sub(1), col),
            Down => (row.wrapping_add(1), col),
            Left => (row, col.wrapping_sub(1)),
            Right => (row, col.wrapping_add(1)),
        }
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// Snake body, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
}

impl Snake {
    /// A straight snake of `size` segments with its head at `head`, trailing
    /// away from `direction`.
    pub fn new(head: Coords, size: TermInt, direction: Direction) -> Self {
        let diff = direction.delta();

        let body = (0..size as i32)
            .map(|i| (head.0 as i32 - diff.0 * i, head.1 as i32 - diff.1 * i))
            .map(|(row, col)| (row as TermInt, col as TermInt))
            .collect();
        Snake { body }
    }

    /// Builds a snake from explicit segments, head first.
    pub fn from_body<I: IntoIterator<Item = Coords>>(segments: I) -> Self {
        let body: VecDeque<Coords> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least a head");
        Snake { body }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn tail(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    /// Whether `pos` will still be occupied once the snake has moved.
    /// The tail leaves its cell unless the snake grows on this move.
    pub fn blocks(&self, pos: Coords, growing: bool) -> bool {
        let keep = if growing { self.body.len() } else { self.body.len() - 1 };
        self.body.iter().take(keep).any(|&seg| seg == pos)
    }

    /// Moves the head to `new_head`, returning the vacated tail cell unless
    /// the snake grew.
    pub fn move_to(&mut self, new_head: Coords, grow: bool) -> Option<Coords> {
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new((3, 3), 3, Right);
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![(3, 3), (3, 2), (3, 1)]);

        let snake = Snake::new((4, 2), 2, Up);
        assert_eq!(snake.head(), (4, 2));
        assert_eq!(snake.tail(), (5, 2));
    }

    #[test]
    fn opposite_is_symmetric() {
        for dir in [Up, Down, Left, Right] {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
            let (a, b) = (dir.delta(), dir.opposite().delta());
            assert_eq!((a.0 + b.0, a.1 + b.1), (0, 0));
        }
    }

    #[test]
    fn step_off_grid_wraps() {
        assert_eq!(Up.step((0, 4)), (TermInt::MAX, 4));
        assert_eq!(Down.step((2, 4)), (3, 4));
    }

    #[test]
    fn tail_cell_frees_up_unless_growing() {
        let snake = Snake::from_body(vec![(2, 2), (2, 3), (3, 3), (3, 2)]);

        assert!(!snake.blocks((3, 2), false));
        assert!(snake.blocks((3, 2), true));
        assert!(snake.blocks((2, 3), false));
    }

    #[test]
    fn move_drops_tail_or_grows() {
        let mut snake = Snake::new((3, 3), 3, Right);

        assert_eq!(snake.move_to((3, 4), false), Some((3, 1)));
        assert_eq!(snake.len(), 3);

        assert_eq!(snake.move_to((3, 5), true), None);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), (3, 5));
        assert_eq!(snake.tail(), (3, 2));
    }
}
