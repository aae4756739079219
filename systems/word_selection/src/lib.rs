#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Word selection.
//!
//! Listens for `WordNeeded` events and answers each with an `AssignWord`
//! command carrying a weighted-random pool entry and a freshly built
//! missing-letter template, or `SuppressWord` when the pool has nothing to
//! offer. Words the player keeps getting wrong are weighted up so they come
//! back more often; the word a turret just finished is weighted sharply
//! down so back-to-back repeats stay rare.

use std::collections::HashMap;

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use word_siege_core::{normalize_word, Command, Event, SlotId, WordItem, WordTemplate};

/// Knobs for the selection weighting.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionTuning {
    /// Wrong answers above this count stop increasing a word's weight.
    pub max_wrong_weight: u32,
    /// Multiplier applied to the weight of a turret's previous word.
    pub repeat_penalty: f64,
    /// Lower bound on any weight after penalties.
    pub weight_floor: f64,
}

impl Default for SelectionTuning {
    fn default() -> Self {
        Self {
            max_wrong_weight: 3,
            repeat_penalty: 0.2,
            weight_floor: 0.2,
        }
    }
}

/// Pure system pairing turrets with vocabulary words.
pub struct WordSelector {
    pool: Vec<WordItem>,
    tuning: SelectionTuning,
    /// Wrong-answer counts keyed by English text, persisted across battles.
    review: HashMap<String, u32>,
    /// Word currently assigned to each slot, for review bookkeeping.
    assigned: HashMap<SlotId, String>,
    day: u32,
    rng: ChaCha8Rng,
}

impl WordSelector {
    /// Creates a selector over the given pool, restricted to entries whose
    /// day does not exceed `day`.
    #[must_use]
    pub fn new(
        pool: Vec<WordItem>,
        review: HashMap<String, u32>,
        day: u32,
        seed: u64,
        tuning: SelectionTuning,
    ) -> Self {
        Self {
            pool,
            tuning,
            review,
            assigned: HashMap::new(),
            day,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Wrong-answer counts accumulated so far, for persistence.
    #[must_use]
    pub fn review(&self) -> &HashMap<String, u32> {
        &self.review
    }

    /// Reacts to world events, appending selection commands.
    pub fn handle(&mut self, events: &[Event], out_commands: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::WordNeeded {
                    slot,
                    level,
                    min_len,
                    previous,
                    banned,
                } => {
                    // Words handed out earlier in this same batch are not in
                    // the event's banned list yet; merge our own ledger in.
                    let _ = self.assigned.remove(slot);
                    let mut banned = banned.clone();
                    banned.extend(self.assigned.values().cloned());
                    match self.select(*level, *min_len, previous.as_deref(), &banned) {
                        Some((item, template)) => {
                            let _ = self.assigned.insert(*slot, item.en.clone());
                            out_commands.push(Command::AssignWord {
                                slot: *slot,
                                item,
                                template,
                            });
                        }
                        None => out_commands.push(Command::SuppressWord { slot: *slot }),
                    }
                }
                Event::LetterRejected { slot, .. } => {
                    if let Some(word) = self.assigned.get(slot) {
                        *self.review.entry(word.clone()).or_insert(0) += 1;
                    }
                }
                Event::TurretExploded { slot, .. } => {
                    let _ = self.assigned.remove(slot);
                }
                _ => {}
            }
        }
    }

    fn select(
        &mut self,
        level: u32,
        min_len: usize,
        previous: Option<&str>,
        banned: &[String],
    ) -> Option<(WordItem, WordTemplate)> {
        let day = self.day;
        // Entries with fewer than two letters cannot carry a blank, so they
        // never make it into the candidate set.
        let in_day: Vec<&WordItem> = self
            .pool
            .iter()
            .filter(|item| item.day <= day && normalize_word(&item.en).len() >= 2)
            .collect();
        if in_day.is_empty() {
            return None;
        }
        // Each filter falls back to the previous candidate set rather than
        // failing outright, so a crowded battlefield still gets words.
        let unbanned: Vec<&WordItem> = in_day
            .iter()
            .copied()
            .filter(|item| !banned.contains(&item.en))
            .collect();
        let unbanned = if unbanned.is_empty() { in_day } else { unbanned };
        let long_enough: Vec<&WordItem> = unbanned
            .iter()
            .copied()
            .filter(|item| normalize_word(&item.en).len() >= min_len)
            .collect();
        let candidates = if long_enough.is_empty() {
            unbanned
        } else {
            long_enough
        };

        let weights: Vec<f64> = candidates
            .iter()
            .map(|item| {
                let wrong = self.review.get(&item.en).copied().unwrap_or(0);
                let mut weight = f64::from(1 + wrong.min(self.tuning.max_wrong_weight));
                if previous == Some(item.en.as_str()) {
                    weight = (weight * self.tuning.repeat_penalty).max(self.tuning.weight_floor);
                }
                weight
            })
            .collect();
        let distribution = WeightedIndex::new(&weights).ok()?;
        let item = candidates[distribution.sample(&mut self.rng)].clone();
        let template = self.build_template(&item, level)?;
        Some((item, template))
    }

    /// Blanks out `min(level, letters - 1)` randomly chosen letters of the
    /// entry, leaving punctuation and spaces untouched.
    fn build_template(&mut self, item: &WordItem, level: u32) -> Option<WordTemplate> {
        let mut display: Vec<char> = item.en.chars().collect();
        let letter_positions: Vec<usize> = display
            .iter()
            .enumerate()
            .filter(|(_, ch)| ch.is_ascii_alphabetic())
            .map(|(index, _)| index)
            .collect();
        if letter_positions.len() < 2 {
            return None;
        }
        let blanks = (level as usize).min(letter_positions.len() - 1).max(1);
        let mut chosen: Vec<usize> =
            rand::seq::index::sample(&mut self.rng, letter_positions.len(), blanks).into_vec();
        chosen.sort_unstable();
        let blank_indices: Vec<usize> = chosen
            .iter()
            .map(|&letter| letter_positions[letter])
            .collect();
        let expected: Vec<char> = blank_indices
            .iter()
            .map(|&index| display[index].to_ascii_lowercase())
            .collect();
        for &index in &blank_indices {
            display[index] = '_';
        }
        WordTemplate::new(display, blank_indices, expected)
    }
}
