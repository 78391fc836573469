//! Game state and the rules that move it forward one tick at a time.
//!
//! Nothing in here touches the terminal. The session loop owns a
//! [`GameState`], feeds it directions and ticks, and hands it to a renderer.

use log::{debug, info};

use crate::config::{Config, INITIAL_SNAKE_LENGTH};
use crate::food::FoodPicker;
use crate::snake::{Direction, Snake};
use crate::Coords;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    Wall,
    Body,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Crashed(Crash),
    /// The snake fills the whole interior.
    Won,
}

#[derive(Clone, Debug)]
pub struct GameState {
    config: Config,
    snake: Snake,
    direction: Direction,
    food: Option<Coords>,
    score: u32,
    status: Status,
}

impl GameState {
    /// A fresh round: three segments centred on the grid, heading right,
    /// with the first piece of food already placed.
    pub fn initialize(config: Config, picker: &mut dyn FoodPicker) -> Self {
        let direction = Direction::Right;
        let mut state = GameState {
            config,
            snake: Snake::new(config.start_head(), INITIAL_SNAKE_LENGTH, direction),
            direction,
            food: None,
            score: 0,
            status: Status::Running,
        };

        state.place_food(picker);
        state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Option<Coords> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::Running
    }

    /// Overwrites the heading unless `requested` would turn the snake back
    /// into its own neck.
    pub fn change_direction(&mut self, requested: Direction) {
        if requested != self.direction.opposite() {
            self.direction = requested;
        }
    }

    pub fn advance_tick(&mut self, picker: &mut dyn FoodPicker) {
        if self.is_over() {
            return;
        }

        let new_head = self.direction.step(self.snake.head());
        let will_eat = self.food == Some(new_head);

        if self.hits_wall(new_head) {
            self.crash(Crash::Wall);
            return;
        }
        if self.hits_body(new_head, will_eat) {
            self.crash(Crash::Body);
            return;
        }

        self.snake.move_to(new_head, will_eat);

        if will_eat {
            self.score += 1;
            self.place_food(picker);
        }
    }

    pub fn hits_wall(&self, pos: Coords) -> bool {
        !self.config.is_interior(pos)
    }

    /// Body collision for a head moving to `pos`. The current tail cell only
    /// counts when the snake grows on this move.
    pub fn hits_body(&self, pos: Coords, growing: bool) -> bool {
        self.snake.blocks(pos, growing)
    }

    /// Drops food on a random free interior cell. A board with no free cell
    /// left is a win.
    pub fn place_food(&mut self, picker: &mut dyn FoodPicker) {
        let free: Vec<Coords> = self.config.interior().filter(|&pos| !self.snake.contains(pos)).collect();

        if free.is_empty() {
            self.food = None;
            self.status = Status::Won;
            info!("board full, won with score {}", self.score);
            return;
        }

        let food = picker.pick(&free);
        debug_assert!(free.contains(&food), "picker left the free set");
        debug!("food at {:?} ({} free cells)", food, free.len());
        self.food = Some(food);
    }

    fn crash(&mut self, crash: Crash) {
        self.status = Status::Crashed(crash);
        info!("crashed into {:?} at {:?}, score {}", crash, self.snake.head(), self.score);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::snake::Direction::*;

    struct FirstFree;

    impl FoodPicker for FirstFree {
        fn pick(&mut self, free: &[Coords]) -> Coords {
            free[0]
        }
    }

    fn state_with(config: Config, body: Vec<Coords>, direction: Direction, food: Option<Coords>) -> GameState {
        let score = (body.len() - INITIAL_SNAKE_LENGTH as usize) as u32;
        GameState { config, snake: Snake::from_body(body), direction, food, score, status: Status::Running }
    }

    fn grid(height: u16, width: u16) -> Config {
        Config::new(height, width, Duration::ZERO).unwrap()
    }

    /// Interior of a 5x6 grid walked row by row, turning at each end.
    fn zigzag() -> Vec<Coords> {
        vec![
            (1, 1), (1, 2), (1, 3), (1, 4),
            (2, 4), (2, 3), (2, 2), (2, 1),
            (3, 1), (3, 2), (3, 3), (3, 4),
        ]
    }

    #[test]
    fn moving_onto_vacating_tail_is_legal() {
        let mut state = state_with(grid(7, 7), vec![(2, 2), (2, 3), (3, 3), (3, 2)], Down, Some((5, 5)));

        state.advance_tick(&mut FirstFree);

        assert_eq!(state.status(), Status::Running);
        assert_eq!(state.snake().body().iter().copied().collect::<Vec<_>>(), vec![(3, 2), (2, 2), (2, 3), (3, 3)]);
    }

    #[test]
    fn moving_onto_tail_while_growing_crashes() {
        let mut state = state_with(grid(7, 7), vec![(2, 2), (2, 3), (3, 3), (3, 2)], Down, Some((3, 2)));
        let before = state.snake().clone();

        state.advance_tick(&mut FirstFree);

        assert_eq!(state.status(), Status::Crashed(Crash::Body));
        assert_eq!(state.snake(), &before);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn full_board_leaves_no_food_and_wins() {
        let body: Vec<Coords> = zigzag().into_iter().rev().collect();
        let mut state = state_with(grid(5, 6), body, Right, None);

        state.place_food(&mut FirstFree);

        assert_eq!(state.food(), None);
        assert_eq!(state.status(), Status::Won);
        assert!(state.is_over());
    }

    #[test]
    fn eating_last_free_cell_wins() {
        let mut path = zigzag();
        let last = path.pop().unwrap();
        let body: Vec<Coords> = path.into_iter().rev().collect();
        let mut state = state_with(grid(5, 6), body, Right, Some(last));
        let score = state.score();

        state.advance_tick(&mut FirstFree);

        assert_eq!(state.status(), Status::Won);
        assert_eq!(state.score(), score + 1);
        assert_eq!(state.snake().len(), 12);
        assert_eq!(state.snake().head(), last);
        assert_eq!(state.food(), None);
    }

    #[test]
    fn over_state_ignores_ticks() {
        let mut state = state_with(grid(7, 7), vec![(3, 5), (3, 4), (3, 3)], Right, None);

        state.advance_tick(&mut FirstFree);
        assert_eq!(state.status(), Status::Crashed(Crash::Wall));

        state.change_direction(Up);
        state.advance_tick(&mut FirstFree);
        assert_eq!(state.status(), Status::Crashed(Crash::Wall));
        assert_eq!(state.snake().head(), (3, 5));
    }

    #[test]
    fn last_direction_before_tick_wins() {
        let mut state = state_with(grid(9, 9), vec![(4, 4), (4, 3), (4, 2)], Right, None);

        state.change_direction(Up);
        state.change_direction(Right);
        state.advance_tick(&mut FirstFree);

        assert_eq!(state.direction(), Right);
        assert_eq!(state.snake().head(), (4, 5));
    }
}
