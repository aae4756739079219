#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Word Siege engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod tuning;

pub use tuning::BattleTuning;

/// Lowercase alphabet used by the letter queue and word normalization.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Strips a word down to its lowercase letters, dropping spaces and
/// punctuation so that blanks always land on spellable characters.
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(|ch| ch.is_ascii_alphabetic())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Identifier of one of the fixed plant slots on the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(u8);

impl SlotId {
    /// Creates a new slot identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Unique identifier assigned to a turret instance.
///
/// A slot that loses its turret and grows a new one receives a fresh
/// identifier, which is how stale scheduled callbacks are detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurretId(u32);

impl TurretId {
    /// Creates a new turret identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position on the battlefield measured in field units from the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldPoint {
    x: f32,
    y: f32,
}

impl FieldPoint {
    /// Creates a new field point from explicit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate, increasing toward the enemy spawn edge.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate, increasing downward.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance between two field points.
    #[must_use]
    pub fn distance_to(self, other: FieldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns the point advanced `step` units toward `target`.
    ///
    /// If the remaining distance is smaller than `step` the target itself is
    /// returned, so callers can treat equality as arrival.
    #[must_use]
    pub fn step_toward(self, target: FieldPoint, step: f32) -> FieldPoint {
        let distance = self.distance_to(target);
        if distance <= step || distance == 0.0 {
            return target;
        }
        let scale = step / distance;
        FieldPoint {
            x: self.x + (target.x - self.x) * scale,
            y: self.y + (target.y - self.y) * scale,
        }
    }
}

/// Hit points measured in half-point fixed precision.
///
/// All damage application rounds to the nearest half point, so storing
/// health as an integer count of half points keeps the simulation free of
/// floating-point drift.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Health(u32);

impl Health {
    /// Creates a health value from whole hit points.
    #[must_use]
    pub const fn from_points(points: u32) -> Self {
        Self(points * 2)
    }

    /// Creates a health value from a raw half-point count.
    #[must_use]
    pub const fn from_half_points(half_points: u32) -> Self {
        Self(half_points)
    }

    /// Raw half-point count backing the value.
    #[must_use]
    pub const fn half_points(&self) -> u32 {
        self.0
    }

    /// Health expressed as fractional hit points.
    #[must_use]
    pub fn points(&self) -> f32 {
        self.0 as f32 / 2.0
    }

    /// Health rounded to the nearest whole point, halves rounding up.
    #[must_use]
    pub const fn rounded_points(&self) -> u32 {
        (self.0 + 1) / 2
    }

    /// Reports whether no health remains.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtracts damage, saturating at zero.
    #[must_use]
    pub const fn saturating_sub(self, damage: Damage) -> Self {
        Self(self.0.saturating_sub(damage.half_points()))
    }

    /// Adds whole points, used by mid-tier enemy construction.
    #[must_use]
    pub const fn saturating_add_points(self, points: u32) -> Self {
        Self(self.0.saturating_add(points * 2))
    }
}

/// Damage in half-point fixed precision, never below half a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Damage(u32);

impl Damage {
    /// Smallest representable hit: half a point.
    pub const MINIMUM: Damage = Damage(1);

    /// Creates a damage value from whole points, clamped to the minimum.
    #[must_use]
    pub const fn from_points(points: u32) -> Self {
        let half = points * 2;
        Self(if half == 0 { 1 } else { half })
    }

    /// Creates a damage value from a raw half-point count, clamped to the
    /// minimum.
    #[must_use]
    pub const fn from_half_points(half_points: u32) -> Self {
        Self(if half_points == 0 { 1 } else { half_points })
    }

    /// Rounds an arbitrary fractional amount to the nearest half point,
    /// clamping to the half-point minimum.
    #[must_use]
    pub fn from_scaled(amount: f32) -> Self {
        let half = (amount * 2.0).round();
        if half < 1.0 {
            Self(1)
        } else {
            Self(half as u32)
        }
    }

    /// Raw half-point count backing the value.
    #[must_use]
    pub const fn half_points(&self) -> u32 {
        self.0
    }

    /// Damage expressed as fractional points.
    #[must_use]
    pub fn points(&self) -> f32 {
        self.0 as f32 / 2.0
    }

    /// Scales the damage by a ratio, rounding to the nearest half point.
    #[must_use]
    pub fn scaled(self, ratio: f32) -> Self {
        Self::from_scaled(self.points() * ratio)
    }

    /// Halves the damage for a chain hop.
    ///
    /// Returns `None` once the halved amount would fall below one full
    /// point, which is the chain-termination condition.
    #[must_use]
    pub const fn halved(self) -> Option<Self> {
        let half = self.0 / 2;
        if half < 2 {
            None
        } else {
            Some(Self(half))
        }
    }
}

/// Per-turret projectile behaviour variants, named after the seed fruits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Plain single-target shot.
    Pear,
    /// Splash damage around the primary target.
    Apple,
    /// Immobilizes the target for a fixed duration.
    Banana,
    /// Slows the target and lengthens the firing turret's reload.
    Cucumber,
    /// Targets the highest-hp enemy and grazes normals passed in flight.
    Coconut,
    /// Fans damage out across every living enemy at fire time.
    Blueberry,
    /// Chains halved damage between not-yet-hit enemies.
    Grape,
}

impl WeaponKind {
    /// Every weapon kind, in seed-tray order.
    pub const ALL: [WeaponKind; 7] = [
        WeaponKind::Pear,
        WeaponKind::Apple,
        WeaponKind::Banana,
        WeaponKind::Cucumber,
        WeaponKind::Coconut,
        WeaponKind::Blueberry,
        WeaponKind::Grape,
    ];

    /// Reports whether the weapon re-targets the highest-hp enemy rather
    /// than the front-most one.
    #[must_use]
    pub const fn targets_highest_hp(self) -> bool {
        matches!(self, WeaponKind::Coconut)
    }

    /// Reports whether the weapon fans out across all enemies at fire time
    /// and therefore never re-targets in flight.
    #[must_use]
    pub const fn fans_out(self) -> bool {
        matches!(self, WeaponKind::Blueberry)
    }
}

/// Enemy strength classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyTier {
    /// Everyday homework tasks spawned from the hp budget.
    Normal,
    /// Beefed-up tasks mixed into horn waves.
    Mid,
    /// Interval-spawned bosses that gate the win condition.
    Boss,
}

/// Presentation-level movement state derived from an enemy's status timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementState {
    /// Advancing toward the bag zone.
    Walking,
    /// Inside an invulnerable jump window.
    Jumping,
    /// Immobilized by a slip effect.
    Slipping,
    /// Moving at a reduced speed multiplier.
    Slowed,
    /// Dead and falling off the field; no longer participates in combat.
    Falling,
}

/// Purchasable battlefield tools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    /// Destroys whatever seed or turret occupies a slot.
    Remove,
    /// Supplies the next correct letter to a turret.
    Key,
    /// Forces an immediate boss spawn plus a small escort wave.
    Horn,
    /// Auto-completes every fillable turret in one action.
    Baton,
}

/// Terminal battle outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// All bosses were defeated.
    Won,
    /// The bag load reached its limit.
    Lost,
}

/// Distinguishes single words from multi-word phrases in the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordKind {
    /// A single vocabulary word.
    Word,
    /// A multi-word phrase; blanks still land on letters only.
    Phrase,
}

/// One entry of the externally supplied word pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordItem {
    /// Curriculum day the entry belongs to.
    pub day: u32,
    /// English text shown on the turret.
    pub en: String,
    /// Chinese gloss shown alongside the blanks.
    pub zh: String,
    /// Optional entry kind; absent entries are treated as plain words.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<WordKind>,
}

/// Missing-letter template produced by the word selector.
///
/// `display` is the original text with blanked letters replaced by `_`;
/// `blank_indices` are positions into `display` in ascending order, and
/// `expected` holds the letters that belong there, in the same order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordTemplate {
    display: Vec<char>,
    blank_indices: Vec<usize>,
    expected: Vec<char>,
}

impl WordTemplate {
    /// Builds a template, validating that blank indices are strictly
    /// increasing, in range, and paired one-to-one with expected letters.
    #[must_use]
    pub fn new(
        display: Vec<char>,
        blank_indices: Vec<usize>,
        expected: Vec<char>,
    ) -> Option<Self> {
        if blank_indices.len() != expected.len() {
            return None;
        }
        let mut previous: Option<usize> = None;
        for &index in &blank_indices {
            if index >= display.len() {
                return None;
            }
            if let Some(prev) = previous {
                if index <= prev {
                    return None;
                }
            }
            previous = Some(index);
        }
        Some(Self {
            display,
            blank_indices,
            expected,
        })
    }

    /// Display characters with blanks rendered as underscores.
    #[must_use]
    pub fn display(&self) -> &[char] {
        &self.display
    }

    /// Positions of the blanks inside the display buffer.
    #[must_use]
    pub fn blank_indices(&self) -> &[usize] {
        &self.blank_indices
    }

    /// Letters expected at each blank, in blank order.
    #[must_use]
    pub fn expected(&self) -> &[char] {
        &self.expected
    }

    /// Number of blanks the player must fill.
    #[must_use]
    pub fn blanks(&self) -> usize {
        self.blank_indices.len()
    }
}

/// Reasons a seed planting request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantRejection {
    /// The slot identifier does not exist on this battlefield.
    SlotUnknown,
    /// The slot already hosts a seed or turret.
    SlotOccupied,
    /// The battle has already ended.
    BattleOver,
}

/// Reasons a letter fill attempt may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillRejection {
    /// The slot identifier does not exist on this battlefield.
    SlotUnknown,
    /// The slot hosts no turret to fill.
    NoTurret,
    /// The turret is locked by a reveal or a fire sequence.
    TurretLocked,
    /// The turret's word has no remaining blank.
    NoBlankRemaining,
    /// The letter queue holds no tile with that letter.
    LetterUnavailable,
    /// The battle has already ended.
    BattleOver,
}

/// Reasons a tool purchase may be rejected before any state mutates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolRejection {
    /// The coin balance cannot cover the tool's cost.
    InsufficientCoins,
    /// The tool requires a slot target and none (or an unknown one) was given.
    SlotUnknown,
    /// The targeted slot is empty.
    SlotEmpty,
    /// The targeted slot hosts no turret.
    NoTurret,
    /// The targeted turret is locked by a reveal or a fire sequence.
    TurretLocked,
    /// The targeted turret's word has no remaining blank.
    NoBlankRemaining,
    /// A boss is already on the field.
    BossAlive,
    /// Every boss has already been spawned.
    BossCapReached,
    /// No turret is currently eligible for the baton.
    NoEligibleTurret,
    /// The battle has already ended.
    BattleOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a seed of the given weapon kind be planted in a slot.
    PlantSeed {
        /// Slot that should receive the seed.
        slot: SlotId,
        /// Weapon behaviour the grown turret will use.
        weapon: WeaponKind,
    },
    /// Attempts to fill the next blank of a turret with a letter tile.
    FillLetter {
        /// Slot hosting the turret to fill.
        slot: SlotId,
        /// Letter dragged from the letter queue.
        letter: char,
    },
    /// Attempts to purchase and apply a tool.
    UseTool {
        /// Tool being purchased.
        tool: ToolKind,
        /// Slot target for slot-directed tools; ignored by the horn.
        slot: Option<SlotId>,
    },
    /// Binds a freshly selected word and template to a turret.
    AssignWord {
        /// Slot whose turret requested a word.
        slot: SlotId,
        /// Pool entry that was selected.
        item: WordItem,
        /// Missing-letter template built for the entry.
        template: WordTemplate,
    },
    /// Reports that the selector could not produce a word for a turret.
    SuppressWord {
        /// Slot whose word requirement is suppressed.
        slot: SlotId,
    },
    /// Spawns a budgeted enemy at the spawn point.
    SpawnEnemy {
        /// Task name displayed on the enemy.
        name: String,
        /// Starting (and maximum) health.
        health: Health,
        /// Strength class of the enemy.
        tier: EnemyTier,
    },
    /// Spawns the next boss if none is alive and the cap allows it.
    SpawnBoss,
    /// Resets the battle to its starting state.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a seed was planted and is growing.
    SeedPlanted {
        /// Slot hosting the seed.
        slot: SlotId,
        /// Weapon kind the grown turret will use.
        weapon: WeaponKind,
    },
    /// Reports that a planting request was rejected.
    PlantRejected {
        /// Slot provided in the request.
        slot: SlotId,
        /// Specific reason the planting failed.
        reason: PlantRejection,
    },
    /// Confirms that a seed finished growing into a turret.
    TurretBuilt {
        /// Slot hosting the turret.
        slot: SlotId,
        /// Identifier assigned to the turret instance.
        turret: TurretId,
        /// Weapon kind of the turret.
        weapon: WeaponKind,
    },
    /// Asks the word selector to bind a word to a turret.
    WordNeeded {
        /// Slot whose turret needs a word.
        slot: SlotId,
        /// Current turret level, which scales blank count.
        level: u32,
        /// Minimum normalized word length acceptable at this level.
        min_len: usize,
        /// Word the turret just finished, down-weighted to avoid repeats.
        previous: Option<String>,
        /// Words currently bound to other live turrets.
        banned: Vec<String>,
    },
    /// Confirms that a word was bound to a turret.
    WordAssigned {
        /// Slot hosting the turret.
        slot: SlotId,
        /// English text of the bound word.
        word: String,
    },
    /// Reports that the selector had no word available for a turret.
    WordUnavailable {
        /// Slot whose word requirement was suppressed.
        slot: SlotId,
    },
    /// Confirms that a correct letter advanced a turret's fill progress.
    LetterAccepted {
        /// Slot hosting the turret.
        slot: SlotId,
        /// Letter that was accepted.
        letter: char,
        /// Blanks still unfilled after this letter.
        remaining: usize,
    },
    /// Reports that a wrong letter was supplied to a turret.
    LetterRejected {
        /// Slot hosting the turret.
        slot: SlotId,
        /// Letter that was supplied.
        letter: char,
        /// Display index where the wrong letter landed.
        wrong_index: usize,
        /// Turret durability remaining after the self-damage.
        hp_remaining: u32,
    },
    /// Reports that a fill attempt was rejected without touching state.
    FillRejected {
        /// Slot provided in the request.
        slot: SlotId,
        /// Specific reason the fill failed.
        reason: FillRejection,
    },
    /// Announces that repeated mistakes engaged memorize-first mode.
    FlashModeEngaged {
        /// Slot hosting the turret.
        slot: SlotId,
    },
    /// Confirms that a turret completed its word.
    WordCompleted {
        /// Slot hosting the turret.
        slot: SlotId,
        /// English text of the completed word.
        word: String,
    },
    /// Announces the start of a post-completion fire sequence.
    FireSequenceStarted {
        /// Slot hosting the turret.
        slot: SlotId,
        /// Number of shots the sequence will fire.
        shots: u32,
    },
    /// Confirms that a projectile left a turret.
    ProjectileFired {
        /// Slot that fired.
        slot: SlotId,
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Weapon behaviour carried by the projectile.
        weapon: WeaponKind,
        /// Damage the projectile carries.
        damage: Damage,
    },
    /// Reports that a scheduled shot found no enemy to aim at.
    ShotSuppressed {
        /// Slot whose shot fizzled.
        slot: SlotId,
    },
    /// Confirms that a turret advanced a level after a fire sequence.
    TurretLeveled {
        /// Slot hosting the turret.
        slot: SlotId,
        /// New turret level.
        level: u32,
    },
    /// Confirms that a turret was destroyed.
    TurretExploded {
        /// Slot the turret occupied.
        slot: SlotId,
        /// Identifier of the destroyed turret instance.
        turret: TurretId,
    },
    /// Confirms that an enemy entered the field.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Task name displayed on the enemy.
        name: String,
        /// Starting health.
        health: Health,
        /// Strength class.
        tier: EnemyTier,
    },
    /// Confirms that an enemy took damage.
    EnemyDamaged {
        /// Enemy that was hit.
        enemy: EnemyId,
        /// Damage applied after half-point rounding.
        damage: Damage,
        /// Health remaining after the hit.
        remaining: Health,
    },
    /// Reports that a boss converted its Nth hit into a dodge.
    BossDodged {
        /// Boss that dodged.
        enemy: EnemyId,
        /// Cumulative hit count including the dodged hit.
        hit_count: u32,
    },
    /// Confirms that an enemy was killed.
    EnemyKilled {
        /// Enemy that died.
        enemy: EnemyId,
        /// Coins awarded for the kill.
        coins: u64,
    },
    /// Confirms that an enemy reached the bag zone.
    EnemyBagged {
        /// Enemy that reached the bag.
        enemy: EnemyId,
        /// Bag load after accounting for the enemy.
        load: u32,
    },
    /// Announces that a boss was defeated.
    BossDefeated {
        /// Total bosses defeated so far.
        defeated: u32,
    },
    /// Announces the coin balance after any change.
    CoinsChanged {
        /// New coin balance.
        balance: u64,
    },
    /// Confirms that a tool was purchased and applied atomically.
    ToolApplied {
        /// Tool that was applied.
        tool: ToolKind,
        /// Coins spent on the purchase.
        cost: u64,
    },
    /// Reports that a tool purchase was rejected without mutating state.
    ToolRejected {
        /// Tool requested.
        tool: ToolKind,
        /// Specific reason the purchase failed.
        reason: ToolRejection,
    },
    /// Marks a surviving turret's celebration during the win sequence.
    TurretCelebrated {
        /// Slot hosting the celebrating turret.
        slot: SlotId,
    },
    /// Announces that the battle was won; the simulation is now frozen.
    BattleWon,
    /// Announces that the battle was lost; the simulation is now frozen.
    BattleLost,
    /// Confirms a battle restart.
    BattleRestarted,
}

/// Immutable representation of a single turret used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct TurretSnapshot {
    /// Slot hosting the turret.
    pub slot: SlotId,
    /// Identifier of the turret instance.
    pub id: TurretId,
    /// Weapon behaviour of the turret.
    pub weapon: WeaponKind,
    /// Current level in `1..=max`.
    pub level: u32,
    /// Remaining durability.
    pub hp: u32,
    /// Maximum durability.
    pub max_hp: u32,
    /// Display buffer with unfilled blanks rendered as underscores.
    pub display: String,
    /// Chinese gloss of the bound word, empty when no word is bound.
    pub gloss: String,
    /// Next blank position to fill, in `0..=blanks`.
    pub fill_index: usize,
    /// Blanks still unfilled.
    pub blanks_remaining: usize,
    /// Display indices currently highlighted as wrong.
    pub wrong_indices: Vec<usize>,
    /// Whether the turret ignores fill input right now.
    pub locked: bool,
    /// Whether memorize-first mode is engaged.
    pub flash_mode: bool,
    /// Whether a fire sequence is running.
    pub firing: bool,
}

/// Occupant of a plant slot.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotOccupant {
    /// Nothing is planted.
    Empty,
    /// A seed is growing toward turret construction.
    Seed {
        /// Weapon kind the grown turret will use.
        weapon: WeaponKind,
        /// Growth progress in `0.0..=1.0`.
        progress: f32,
    },
    /// A live turret.
    Turret(TurretSnapshot),
}

/// Immutable representation of a single plant slot used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotSnapshot {
    /// Identifier of the slot.
    pub slot: SlotId,
    /// Current occupant.
    pub occupant: SlotOccupant,
}

/// Read-only snapshot describing every plant slot.
#[derive(Clone, Debug, Default)]
pub struct SlotView {
    snapshots: Vec<SlotSnapshot>,
}

impl SlotView {
    /// Creates a new slot view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<SlotSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.slot);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &SlotSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<SlotSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Task name displayed on the enemy.
    pub name: String,
    /// Strength class.
    pub tier: EnemyTier,
    /// Remaining health.
    pub hp: Health,
    /// Maximum health.
    pub max_hp: Health,
    /// Current position on the field.
    pub position: FieldPoint,
    /// Presentation-level movement state.
    pub movement: MovementState,
    /// Projectile hits absorbed so far, dodges included.
    pub hit_count: u32,
}

/// Read-only snapshot describing every enemy on the field.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier of the projectile.
    pub id: ProjectileId,
    /// Weapon behaviour carried by the projectile.
    pub weapon: WeaponKind,
    /// Damage the projectile carries.
    pub damage: Damage,
    /// Current position on the field.
    pub position: FieldPoint,
    /// Slot that fired the projectile.
    pub source: SlotId,
}

/// Read-only snapshot describing every projectile in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Scoreboard counters mirrored by the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Curriculum day the battle draws words from.
    pub day: u32,
    /// Current coin balance.
    pub coins: u64,
    /// Accumulated bag load.
    pub bag_load: u32,
    /// Bag load at which the battle is lost.
    pub bag_limit: u32,
    /// Bosses spawned so far.
    pub bosses_spawned: u32,
    /// Bosses defeated so far.
    pub bosses_defeated: u32,
    /// Whether a boss is currently alive.
    pub boss_alive: bool,
    /// Bosses that must fall for the win.
    pub boss_cap: u32,
    /// Terminal outcome, if the battle has ended.
    pub outcome: Option<Outcome>,
}
