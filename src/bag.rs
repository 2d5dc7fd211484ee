//! 7-bag randomizer for piece generation
//!
//! Tetris uses a "7-bag" system where all 7 pieces are shuffled,
//! then dealt out before reshuffling. This prevents long droughts:
//! the same shape can be at most 13 draws apart.

use crate::tetromino::Shape;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Number of distinct shapes in one bag
pub const BAG_SIZE: usize = 7;

/// The 7-bag piece randomizer. Owns the Next Queue.
#[derive(Debug, Clone)]
pub struct Bag {
    /// Preview queue for upcoming pieces, front is next
    queue: Vec<Shape>,
    rng: ChaCha8Rng,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Create a bag seeded from the OS
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a deterministic bag
    pub fn with_seed(seed: u64) -> Self {
        let mut bag = Self {
            queue: Vec::with_capacity(2 * BAG_SIZE),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        bag.top_up();
        bag
    }

    /// Take the next piece from the front of the queue
    pub fn next(&mut self) -> Shape {
        self.top_up();
        let shape = self.queue.remove(0);
        self.top_up();
        shape
    }

    /// Put a shape back in front of the queue (used by hold)
    pub fn push_front(&mut self, shape: Shape) {
        self.queue.insert(0, shape);
    }

    /// The whole upcoming queue
    pub fn queue(&self) -> &[Shape] {
        &self.queue
    }

    /// Append shuffled bags until at least one full bag is queued
    fn top_up(&mut self) {
        while self.queue.len() < BAG_SIZE {
            self.refill();
        }
    }

    /// Refill the queue with a new shuffled bag
    fn refill(&mut self) {
        let mut new_bag = Shape::ALL;
        new_bag.shuffle(&mut self.rng);
        self.queue.extend(new_bag);
    }
}
