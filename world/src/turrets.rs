//! Plant slots, seed growth, the spelling gate, and fire-sequence
//! bookkeeping.
//!
//! A slot is either empty, growing a seed, or hosting a turret. Turrets are
//! armed by spelling: the word selector binds a word with missing letters,
//! correct letters advance the fill cursor, wrong letters cost durability
//! and lock the turret through a timed reveal. A completed word starts a
//! fire sequence whose shots arrive as scheduled callbacks.

use std::time::Duration;

use word_siege_core::{
    Event, FieldPoint, FillRejection, PlantRejection, SlotId, SlotOccupant, SlotSnapshot,
    TurretId, TurretSnapshot, WeaponKind, WordItem, WordTemplate,
};

use crate::schedule::Callback;
use crate::World;

/// Occupancy of a single plant slot.
#[derive(Debug)]
pub(crate) enum SlotState {
    Empty,
    Seed {
        weapon: WeaponKind,
        planted_at: Duration,
    },
    Turret(Turret),
}

#[derive(Debug)]
pub(crate) struct Slot {
    pub(crate) id: SlotId,
    pub(crate) anchor: FieldPoint,
    pub(crate) state: SlotState,
}

/// A word bound to a turret together with its fill progress.
#[derive(Debug)]
pub(crate) struct BoundWord {
    pub(crate) item: WordItem,
    pub(crate) template: WordTemplate,
    /// Next blank to fill; blanks before it hold their correct letters.
    pub(crate) fill_index: usize,
    /// Wrong letters currently revealed, as display-index/letter pairs.
    pub(crate) wrong: Vec<(usize, char)>,
    /// Whether the full word is showing, either as a memorize-first preview
    /// or as a wrong-letter reveal.
    pub(crate) previewing: bool,
}

impl BoundWord {
    fn new(item: WordItem, template: WordTemplate) -> Self {
        Self {
            item,
            template,
            fill_index: 0,
            wrong: Vec::new(),
            previewing: false,
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.template.blanks() - self.fill_index
    }

    pub(crate) fn expected(&self) -> Option<char> {
        self.template.expected().get(self.fill_index).copied()
    }

    /// Renders the display buffer: filled blanks show their letters, a
    /// full-word reveal shows everything, and otherwise any revealed wrong
    /// letters show in place.
    pub(crate) fn display(&self) -> String {
        let mut chars: Vec<char> = self.template.display().to_vec();
        for (blank, &index) in self.template.blank_indices().iter().enumerate() {
            if self.previewing || blank < self.fill_index {
                chars[index] = self.template.expected()[blank];
            }
        }
        if !self.previewing {
            for &(index, letter) in &self.wrong {
                chars[index] = letter;
            }
        }
        chars.into_iter().collect()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FiringState {
    Idle,
    Active { remaining: u32 },
}

#[derive(Debug)]
pub(crate) struct Turret {
    pub(crate) id: TurretId,
    pub(crate) weapon: WeaponKind,
    pub(crate) level: u32,
    pub(crate) hp: u32,
    pub(crate) word: Option<BoundWord>,
    pub(crate) locked: bool,
    pub(crate) firing: FiringState,
}

impl Turret {
    pub(crate) fn is_firing(&self) -> bool {
        matches!(self.firing, FiringState::Active { .. })
    }

    /// Whether the turret can accept a letter right now.
    pub(crate) fn fillable(&self) -> bool {
        !self.locked
            && !self.is_firing()
            && self
                .word
                .as_ref()
                .map(|word| word.remaining() > 0)
                .unwrap_or(false)
    }

    pub(crate) fn snapshot(&self, slot: SlotId, max_hp: u32, flash_mode: bool) -> TurretSnapshot {
        let (display, gloss, fill_index, blanks_remaining, wrong_indices) = match &self.word {
            Some(word) => (
                word.display(),
                word.item.zh.clone(),
                word.fill_index,
                word.remaining(),
                word.wrong.iter().map(|&(index, _)| index).collect(),
            ),
            None => (String::new(), String::new(), 0, 0, Vec::new()),
        };
        TurretSnapshot {
            slot,
            id: self.id,
            weapon: self.weapon,
            level: self.level,
            hp: self.hp,
            max_hp,
            display,
            gloss,
            fill_index,
            blanks_remaining,
            wrong_indices,
            locked: self.locked,
            flash_mode,
            firing: self.is_firing(),
        }
    }
}

impl Slot {
    pub(crate) fn snapshot(
        &self,
        now: Duration,
        growth: Duration,
        max_hp: u32,
        flash_mode: bool,
    ) -> SlotSnapshot {
        let occupant = match &self.state {
            SlotState::Empty => SlotOccupant::Empty,
            SlotState::Seed { weapon, planted_at } => {
                let elapsed = now.saturating_sub(*planted_at);
                let progress = if growth.is_zero() {
                    1.0
                } else {
                    (elapsed.as_secs_f32() / growth.as_secs_f32()).min(1.0)
                };
                SlotOccupant::Seed {
                    weapon: *weapon,
                    progress,
                }
            }
            SlotState::Turret(turret) => {
                SlotOccupant::Turret(turret.snapshot(self.id, max_hp, flash_mode))
            }
        };
        SlotSnapshot {
            slot: self.id,
            occupant,
        }
    }
}

pub(crate) fn slot_index(world: &World, slot: SlotId) -> Option<usize> {
    world.slots.iter().position(|candidate| candidate.id == slot)
}

pub(crate) fn plant_seed(
    world: &mut World,
    slot: SlotId,
    weapon: WeaponKind,
    events: &mut Vec<Event>,
) {
    if world.outcome.is_some() {
        events.push(Event::PlantRejected {
            slot,
            reason: PlantRejection::BattleOver,
        });
        return;
    }
    let Some(index) = slot_index(world, slot) else {
        events.push(Event::PlantRejected {
            slot,
            reason: PlantRejection::SlotUnknown,
        });
        return;
    };
    if !matches!(world.slots[index].state, SlotState::Empty) {
        events.push(Event::PlantRejected {
            slot,
            reason: PlantRejection::SlotOccupied,
        });
        return;
    }
    world.slots[index].state = SlotState::Seed {
        weapon,
        planted_at: world.now,
    };
    events.push(Event::SeedPlanted { slot, weapon });
}

/// Promotes every seed whose growth time has elapsed into a turret and
/// requests its first word.
pub(crate) fn grow_seeds(world: &mut World, events: &mut Vec<Event>) {
    let growth = Duration::from_millis(world.tuning.spell.growth_ms);
    let mut grown: Vec<usize> = Vec::new();
    for (index, slot) in world.slots.iter().enumerate() {
        if let SlotState::Seed { planted_at, .. } = slot.state {
            if world.now.saturating_sub(planted_at) >= growth {
                grown.push(index);
            }
        }
    }
    for index in grown {
        let SlotState::Seed { weapon, .. } = world.slots[index].state else {
            continue;
        };
        let id = TurretId::new(world.next_turret);
        world.next_turret += 1;
        let slot = world.slots[index].id;
        world.slots[index].state = SlotState::Turret(Turret {
            id,
            weapon,
            level: 1,
            hp: world.tuning.spell.turret_hp,
            word: None,
            locked: false,
            firing: FiringState::Idle,
        });
        events.push(Event::TurretBuilt {
            slot,
            turret: id,
            weapon,
        });
        request_word(world, index, None, events);
    }
}

/// Words currently claimed by turrets other than the one at `exclude`.
fn claimed_words(world: &World, exclude: usize) -> Vec<String> {
    world
        .slots
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != exclude)
        .filter_map(|(_, slot)| match &slot.state {
            SlotState::Turret(turret) => turret.word.as_ref().map(|word| word.item.en.clone()),
            _ => None,
        })
        .collect()
}

/// Emits a `WordNeeded` request for the turret at `index`.
pub(crate) fn request_word(
    world: &mut World,
    index: usize,
    previous: Option<String>,
    events: &mut Vec<Event>,
) {
    let banned = claimed_words(world, index);
    let slot = world.slots[index].id;
    let SlotState::Turret(turret) = &world.slots[index].state else {
        return;
    };
    let level = turret.level;
    let min_len = (level as usize + 1).max(2);
    events.push(Event::WordNeeded {
        slot,
        level,
        min_len,
        previous,
        banned,
    });
}

pub(crate) fn assign_word(
    world: &mut World,
    slot: SlotId,
    item: WordItem,
    template: WordTemplate,
    events: &mut Vec<Event>,
) {
    if world.outcome.is_some() {
        return;
    }
    let Some(index) = slot_index(world, slot) else {
        return;
    };
    let flash_duration = Duration::from_millis(world.tuning.spell.flash_duration_ms);
    let now = world.now;
    let preview = world.flash_mode;
    let SlotState::Turret(turret) = &mut world.slots[index].state else {
        return;
    };
    // A stale assignment for a turret that already holds a word is dropped.
    if turret.word.is_some() || turret.is_firing() {
        return;
    }
    let en = item.en.clone();
    let mut word = BoundWord::new(item, template);
    let turret_id = turret.id;
    if preview {
        word.previewing = true;
        turret.locked = true;
    }
    turret.word = Some(word);
    events.push(Event::WordAssigned { slot, word: en });
    if preview {
        world.schedule.push(
            now + flash_duration,
            Callback::RestoreBlanks {
                slot,
                turret: turret_id,
            },
        );
    }
}

pub(crate) fn suppress_word(world: &mut World, slot: SlotId, events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        return;
    }
    let Some(index) = slot_index(world, slot) else {
        return;
    };
    if matches!(world.slots[index].state, SlotState::Turret(_)) {
        events.push(Event::WordUnavailable { slot });
    }
}

pub(crate) fn fill_letter(world: &mut World, slot: SlotId, letter: char, events: &mut Vec<Event>) {
    let reject = |events: &mut Vec<Event>, reason: FillRejection| {
        events.push(Event::FillRejected { slot, reason });
    };
    if world.outcome.is_some() {
        reject(events, FillRejection::BattleOver);
        return;
    }
    let Some(index) = slot_index(world, slot) else {
        reject(events, FillRejection::SlotUnknown);
        return;
    };
    let SlotState::Turret(turret) = &world.slots[index].state else {
        reject(events, FillRejection::NoTurret);
        return;
    };
    if turret.locked || turret.is_firing() || turret.word.is_none() {
        reject(events, FillRejection::TurretLocked);
        return;
    }
    let word = turret.word.as_ref().filter(|word| word.remaining() > 0);
    let Some(word) = word else {
        reject(events, FillRejection::NoBlankRemaining);
        return;
    };
    let expected = word.expected();
    // The tile is consumed whether or not the letter turns out correct.
    if !world.letters.take(letter) {
        reject(events, FillRejection::LetterUnavailable);
        return;
    }
    if expected == Some(letter) {
        accept_letter(world, index, events);
    } else {
        reject_letter(world, index, letter, events);
    }
}

/// Applies the next correct letter to the turret at `index`.
///
/// Used by regular fills, the key tool, and the baton; callers have already
/// verified the turret is fillable.
pub(crate) fn accept_letter(world: &mut World, index: usize, events: &mut Vec<Event>) {
    world.wrong_streak = 0;
    let slot = world.slots[index].id;
    let SlotState::Turret(turret) = &mut world.slots[index].state else {
        return;
    };
    let Some(word) = turret.word.as_mut() else {
        return;
    };
    let Some(letter) = word.expected() else {
        return;
    };
    word.fill_index += 1;
    let remaining = word.remaining();
    events.push(Event::LetterAccepted {
        slot,
        letter,
        remaining,
    });
    if remaining == 0 {
        complete_word(world, index, events);
    }
}

fn reject_letter(world: &mut World, index: usize, letter: char, events: &mut Vec<Event>) {
    let now = world.now;
    let delay = Duration::from_millis(world.tuning.spell.wrong_reveal_delay_ms);
    let flash_streak = world.tuning.spell.flash_streak;
    let slot = world.slots[index].id;
    let SlotState::Turret(turret) = &mut world.slots[index].state else {
        return;
    };
    let Some(wrong_index) = turret
        .word
        .as_ref()
        .and_then(|word| word.template.blank_indices().get(word.fill_index).copied())
    else {
        return;
    };
    turret.hp = turret.hp.saturating_sub(1);
    let hp_remaining = turret.hp;
    let turret_id = turret.id;
    turret.locked = true;
    events.push(Event::LetterRejected {
        slot,
        letter,
        wrong_index,
        hp_remaining,
    });
    world.wrong_streak += 1;
    if world.wrong_streak >= flash_streak && !world.flash_mode {
        world.flash_mode = true;
        events.push(Event::FlashModeEngaged { slot });
    }
    if hp_remaining == 0 {
        explode_turret(world, index, events);
        return;
    }
    world.schedule.push(
        now + delay,
        Callback::RevealWrong {
            slot,
            turret: turret_id,
            index: wrong_index,
            letter,
        },
    );
}

fn complete_word(world: &mut World, index: usize, events: &mut Vec<Event>) {
    let shots_per_level = world.tuning.firing.shots_per_level;
    let fan_factor = world.tuning.firing.fan_out_shot_factor;
    let now = world.now;
    let slot = world.slots[index].id;
    let SlotState::Turret(turret) = &mut world.slots[index].state else {
        return;
    };
    let Some(word) = &turret.word else {
        return;
    };
    // Finishing a word forgives the mistake streak and its penalty mode.
    world.wrong_streak = 0;
    world.flash_mode = false;
    events.push(Event::WordCompleted {
        slot,
        word: word.item.en.clone(),
    });
    let mut shots = turret.level * shots_per_level;
    if turret.weapon.fans_out() {
        shots *= fan_factor;
    }
    turret.locked = true;
    turret.firing = FiringState::Active { remaining: shots };
    let turret_id = turret.id;
    events.push(Event::FireSequenceStarted { slot, shots });
    world.schedule.push(
        now,
        Callback::FireShot {
            slot,
            turret: turret_id,
        },
    );
}

/// Ends a fire sequence: the turret levels up and requests a new word, or
/// explodes if it was already at the level cap.
pub(crate) fn finish_fire_sequence(world: &mut World, index: usize, events: &mut Vec<Event>) {
    let max_level = world.tuning.spell.max_level;
    let slot = world.slots[index].id;
    let SlotState::Turret(turret) = &mut world.slots[index].state else {
        return;
    };
    turret.firing = FiringState::Idle;
    if turret.level >= max_level {
        explode_turret(world, index, events);
        return;
    }
    turret.level += 1;
    let level = turret.level;
    let previous = turret.word.take().map(|word| word.item.en);
    turret.locked = false;
    events.push(Event::TurretLeveled { slot, level });
    request_word(world, index, previous, events);
}

/// Destroys the turret at `index`, cancelling its pending callbacks.
pub(crate) fn explode_turret(world: &mut World, index: usize, events: &mut Vec<Event>) {
    let slot = world.slots[index].id;
    let SlotState::Turret(turret) = &world.slots[index].state else {
        return;
    };
    let turret_id = turret.id;
    world.schedule.cancel_turret(turret_id);
    world.slots[index].state = SlotState::Empty;
    events.push(Event::TurretExploded {
        slot,
        turret: turret_id,
    });
}

/// Resolves a slot/turret pair from a callback, discarding stale owners.
pub(crate) fn callback_target(world: &World, slot: SlotId, turret: TurretId) -> Option<usize> {
    let index = slot_index(world, slot)?;
    match &world.slots[index].state {
        SlotState::Turret(current) if current.id == turret => Some(index),
        _ => None,
    }
}

pub(crate) fn handle_reveal_wrong(
    world: &mut World,
    slot: SlotId,
    turret: TurretId,
    index: usize,
    letter: char,
) {
    // Mistakes after flash mode engages get the longer memorization window.
    let reveal = if world.flash_mode {
        Duration::from_millis(world.tuning.spell.flash_duration_ms)
    } else {
        Duration::from_millis(world.tuning.spell.wrong_reveal_ms)
    };
    let now = world.now;
    let Some(slot_idx) = callback_target(world, slot, turret) else {
        return;
    };
    let SlotState::Turret(current) = &mut world.slots[slot_idx].state else {
        return;
    };
    if let Some(word) = current.word.as_mut() {
        word.wrong.push((index, letter));
        word.previewing = true;
    }
    world.schedule.push(
        now + reveal,
        Callback::ClearWrong {
            slot,
            turret,
            index,
        },
    );
}

pub(crate) fn handle_clear_wrong(world: &mut World, slot: SlotId, turret: TurretId, index: usize) {
    let Some(slot_idx) = callback_target(world, slot, turret) else {
        return;
    };
    let SlotState::Turret(current) = &mut world.slots[slot_idx].state else {
        return;
    };
    if let Some(word) = current.word.as_mut() {
        word.wrong.retain(|&(wrong_index, _)| wrong_index != index);
        if word.wrong.is_empty() {
            word.previewing = false;
            if !current.is_firing() {
                current.locked = false;
            }
        }
    }
}

pub(crate) fn handle_restore_blanks(world: &mut World, slot: SlotId, turret: TurretId) {
    let Some(slot_idx) = callback_target(world, slot, turret) else {
        return;
    };
    let SlotState::Turret(current) = &mut world.slots[slot_idx].state else {
        return;
    };
    if let Some(word) = current.word.as_mut() {
        word.previewing = false;
        if word.wrong.is_empty() && !current.is_firing() {
            current.locked = false;
        }
    }
}
