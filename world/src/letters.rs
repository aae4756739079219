//! Letter tile queue.
//!
//! The queue opens a battle holding one tile of every letter, so the player
//! can spell from the first second. Afterwards tiles drop on a fixed
//! cadence and pile up until the queue reaches capacity, at which point
//! drops pause. The drop distribution is biased toward letters the player
//! can actually use: most drops are a letter some turret needs next, a
//! share of the rest come from currently bound words, and only the
//! remainder is uniform over the alphabet.

use std::time::Duration;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use word_siege_core::{tuning::LetterTuning, ALPHABET};

#[derive(Debug, Default)]
pub(crate) struct LetterQueue {
    tiles: Vec<char>,
    accumulator: Duration,
}

impl LetterQueue {
    /// A queue seeded with one tile of every letter.
    pub(crate) fn new() -> Self {
        Self {
            tiles: ALPHABET.chars().collect(),
            accumulator: Duration::ZERO,
        }
    }

    /// Advances the drop timer, producing biased tiles while below capacity.
    ///
    /// `needed` holds the next expected letter of every fillable turret and
    /// `bound` every letter of every bound word; either may be empty.
    pub(crate) fn tick(
        &mut self,
        dt: Duration,
        tuning: &LetterTuning,
        needed: &[char],
        bound: &[char],
        rng: &mut ChaCha8Rng,
    ) {
        let interval = Duration::from_millis(tuning.drop_interval_ms);
        if self.tiles.len() >= tuning.capacity {
            // Paused at capacity; do not bank time toward future drops.
            self.accumulator = Duration::ZERO;
            return;
        }
        self.accumulator += dt;
        while self.accumulator >= interval && self.tiles.len() < tuning.capacity {
            self.accumulator -= interval;
            let tile = Self::pick(tuning, needed, bound, rng);
            self.tiles.push(tile);
        }
    }

    fn pick(
        tuning: &LetterTuning,
        needed: &[char],
        bound: &[char],
        rng: &mut ChaCha8Rng,
    ) -> char {
        if !needed.is_empty() && rng.gen_bool(tuning.needed_ratio) {
            return needed[rng.gen_range(0..needed.len())];
        }
        if !bound.is_empty() && rng.gen_bool(tuning.bound_ratio) {
            return bound[rng.gen_range(0..bound.len())];
        }
        let alphabet: Vec<char> = ALPHABET.chars().collect();
        alphabet[rng.gen_range(0..alphabet.len())]
    }

    /// Removes one tile bearing `letter`, reporting whether one existed.
    pub(crate) fn take(&mut self, letter: char) -> bool {
        if let Some(index) = self.tiles.iter().position(|&tile| tile == letter) {
            let _ = self.tiles.remove(index);
            true
        } else {
            false
        }
    }

    pub(crate) fn tiles(&self) -> &[char] {
        &self.tiles
    }

    /// Restores the fresh-battle alphabet seed.
    pub(crate) fn reset(&mut self) {
        self.tiles = ALPHABET.chars().collect();
        self.accumulator = Duration::ZERO;
    }
}
