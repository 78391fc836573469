use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Coords;

/// Chooses where the next piece of food lands.
pub trait FoodPicker {
    /// Picks one of `free`, which is never empty.
    fn pick(&mut self, free: &[Coords]) -> Coords;
}

/// Uniform choice from a seeded generator, so a game can be replayed.
pub struct SeededPicker {
    rng: StdRng,
    seed: u64,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        SeededPicker { rng: StdRng::seed_from_u64(seed), seed }
    }

    pub fn from_entropy() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl FoodPicker for SeededPicker {
    fn pick(&mut self, free: &[Coords]) -> Coords {
        free[self.rng.gen_range(0..free.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let free: Vec<Coords> = (1..10).flat_map(|r| (1..10).map(move |c| (r, c))).collect();
        let mut a = SeededPicker::new(7);
        let mut b = SeededPicker::new(7);

        let first: Vec<Coords> = (0..20).map(|_| a.pick(&free)).collect();
        let second: Vec<Coords> = (0..20).map(|_| b.pick(&free)).collect();
        assert_eq!(first, second);
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn picks_only_from_candidates() {
        let free = [(2, 2), (4, 5), (1, 3)];
        let mut picker = SeededPicker::from_entropy();

        for _ in 0..50 {
            assert!(free.contains(&picker.pick(&free)));
        }
    }
}
