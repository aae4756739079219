//! Battle tuning knobs.
//!
//! Every gameplay constant lives here so that balance work never requires
//! touching simulation code. Defaults reflect the shipped balance pass.

use serde::{Deserialize, Serialize};

use crate::{FieldPoint, Health};

/// Top-level tuning bundle injected into the world at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleTuning {
    /// Battlefield geometry.
    pub field: FieldTuning,
    /// Spelling, growth, and turret durability knobs.
    pub spell: SpellTuning,
    /// Fire-sequence cadence knobs.
    pub firing: FiringTuning,
    /// Per-weapon projectile behaviour knobs.
    pub weapons: WeaponTuning,
    /// Enemy movement and boss behaviour knobs.
    pub enemies: EnemyTuning,
    /// Wave budget and interval knobs.
    pub spawning: SpawnTuning,
    /// Letter queue knobs.
    pub letters: LetterTuning,
    /// Tool pricing.
    pub tools: ToolTuning,
    /// Task and boss rosters.
    pub roster: RosterTuning,
}

impl Default for BattleTuning {
    fn default() -> Self {
        Self {
            field: FieldTuning::default(),
            spell: SpellTuning::default(),
            firing: FiringTuning::default(),
            weapons: WeaponTuning::default(),
            enemies: EnemyTuning::default(),
            spawning: SpawnTuning::default(),
            letters: LetterTuning::default(),
            tools: ToolTuning::default(),
            roster: RosterTuning::default(),
        }
    }
}

/// Battlefield geometry in field units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldTuning {
    /// Field width; enemies spawn near the right edge.
    pub width: f32,
    /// Field height.
    pub height: f32,
    /// Centre of the schoolbag enemies march toward.
    pub bag_center: FieldPoint,
    /// Radius around the bag centre that counts as arrival.
    pub bag_radius: f32,
    /// Point where new enemies appear.
    pub spawn_point: FieldPoint,
    /// Minimum distance an existing enemy must keep from the spawn point
    /// before another enemy may spawn.
    pub spawn_clearance: f32,
    /// Number of plant slots on the field.
    pub slot_count: u8,
    /// Anchor position of each slot, indexed by slot id.
    pub slot_anchors: Vec<FieldPoint>,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 480.0,
            bag_center: FieldPoint::new(70.0, 240.0),
            bag_radius: 30.0,
            spawn_point: FieldPoint::new(780.0, 250.0),
            spawn_clearance: 90.0,
            slot_count: 6,
            slot_anchors: vec![
                FieldPoint::new(220.0, 120.0),
                FieldPoint::new(220.0, 360.0),
                FieldPoint::new(340.0, 120.0),
                FieldPoint::new(340.0, 360.0),
                FieldPoint::new(460.0, 120.0),
                FieldPoint::new(460.0, 360.0),
            ],
        }
    }
}

/// Spelling, growth, and turret durability knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpellTuning {
    /// Time a seed needs to grow into a turret, in milliseconds.
    pub growth_ms: u64,
    /// Durability of a fresh turret; each wrong letter costs one.
    pub turret_hp: u32,
    /// Highest level a turret can reach before exploding on the next
    /// completed word.
    pub max_level: u32,
    /// How long a wrong letter stays highlighted before it is cleared, in
    /// milliseconds.
    pub wrong_reveal_ms: u64,
    /// Lock delay before a wrong letter is revealed, in milliseconds.
    pub wrong_reveal_delay_ms: u64,
    /// Consecutive wrong letters that engage memorize-first mode.
    pub flash_streak: u32,
    /// How long a memorize-first word is shown complete before its blanks
    /// return, in milliseconds.
    pub flash_duration_ms: u64,
}

impl Default for SpellTuning {
    fn default() -> Self {
        Self {
            growth_ms: 1_000,
            turret_hp: 3,
            max_level: 6,
            wrong_reveal_ms: 1_000,
            wrong_reveal_delay_ms: 250,
            flash_streak: 3,
            flash_duration_ms: 1_200,
        }
    }
}

/// Fire-sequence cadence knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiringTuning {
    /// Base gap between consecutive shots, in milliseconds.
    pub base_interval_ms: u64,
    /// Maximum random jitter added to or removed from the base gap, in
    /// milliseconds.
    pub jitter_ms: u64,
    /// Lower clamp on the shot gap, in milliseconds.
    pub min_interval_ms: u64,
    /// Upper clamp on the shot gap, in milliseconds.
    pub max_interval_ms: u64,
    /// Extra reload applied to each cucumber shot, in milliseconds.
    pub slow_self_penalty_ms: u64,
    /// Reload reduction applied to each grape shot, in milliseconds.
    pub chain_self_benefit_ms: u64,
    /// Shots fired per turret level.
    pub shots_per_level: u32,
    /// Multiplier applied to the shot count of fan-out turrets.
    pub fan_out_shot_factor: u32,
}

impl Default for FiringTuning {
    fn default() -> Self {
        Self {
            base_interval_ms: 1_000,
            jitter_ms: 500,
            min_interval_ms: 250,
            max_interval_ms: 2_500,
            slow_self_penalty_ms: 150,
            chain_self_benefit_ms: 100,
            shots_per_level: 3,
            fan_out_shot_factor: 2,
        }
    }
}

/// Per-weapon projectile behaviour knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponTuning {
    /// Projectile flight speed in field units per second.
    pub projectile_speed: f32,
    /// Distance at which a projectile counts as having reached its target.
    pub arrival_slack: f32,
    /// Fraction of the primary damage splashed to nearby enemies.
    pub splash_ratio: f32,
    /// Radius of the splash area in field units.
    pub splash_radius: f32,
    /// Slip duration applied by bananas, in milliseconds.
    pub slip_duration_ms: u64,
    /// Slow duration applied by cucumbers, in milliseconds.
    pub slow_duration_ms: u64,
    /// Speed multiplier applied while slowed.
    pub slow_factor: f32,
    /// Fraction of the primary damage grazed onto enemies a coconut passes.
    pub pierce_ratio: f32,
    /// Lateral distance within which a flying coconut grazes an enemy.
    pub pierce_radius: f32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            projectile_speed: 260.0,
            arrival_slack: 4.0,
            splash_ratio: 1.0 / 3.0,
            splash_radius: 90.0,
            slip_duration_ms: 3_000,
            slow_duration_ms: 5_000,
            slow_factor: 0.7,
            pierce_ratio: 0.1,
            pierce_radius: 18.0,
        }
    }
}

/// Enemy movement and boss behaviour knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    /// Walking speed of normal enemies in field units per second.
    pub normal_speed: f32,
    /// Walking speed of mid-tier enemies.
    pub mid_speed: f32,
    /// Walking speed of bosses.
    pub boss_speed: f32,
    /// Additional speed multiplier per boss already defeated.
    pub clear_speed_boost: f32,
    /// Minimum fall speed of dying enemies in field units per second.
    pub fall_speed_min: f32,
    /// Extra random fall speed added on top of the minimum.
    pub fall_speed_spread: f32,
    /// Distance below the field at which a falling enemy is removed.
    pub fall_removal_margin: f32,
    /// Duration of a boss jump's invulnerability window, in milliseconds.
    pub jump_window_ms: u64,
    /// Lower clamp on the boss jump cooldown, in seconds.
    pub jump_cooldown_floor_s: u64,
    /// Cooldown formula base; healthier bosses jump less often.
    pub jump_cooldown_base_s: f32,
    /// Cooldown formula health coefficient.
    pub jump_cooldown_health_coeff: f32,
    /// Every Nth projectile hit on a boss is converted into a dodge.
    pub boss_dodge_nth: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            normal_speed: 8.0,
            mid_speed: 6.0,
            boss_speed: 5.0,
            clear_speed_boost: 0.05,
            fall_speed_min: 140.0,
            fall_speed_spread: 40.0,
            fall_removal_margin: 120.0,
            jump_window_ms: 900,
            jump_cooldown_floor_s: 2,
            jump_cooldown_base_s: 10.0,
            jump_cooldown_health_coeff: 2.0,
            boss_dodge_nth: 4,
        }
    }
}

/// Wave budget and interval knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnTuning {
    /// Gap between normal spawn attempts, in milliseconds.
    pub interval_ms: u64,
    /// Shortened gap used while the field sits empty past the grace window.
    pub empty_field_interval_ms: u64,
    /// How long the field must stay empty before the shortened gap applies,
    /// in milliseconds.
    pub empty_grace_ms: u64,
    /// Gap between automatic boss spawns, in milliseconds.
    pub boss_interval_ms: u64,
    /// Bosses that must fall for the win.
    pub max_bosses: u32,
    /// Budget accrual in enemy hit points per second at zero bosses
    /// defeated.
    pub budget_rate_base: f32,
    /// Extra accrual per boss defeated, in hit points per second.
    pub budget_rate_per_clear: f32,
    /// Hard cap on the accrual rate, in hit points per second.
    pub budget_rate_cap: f32,
    /// Per-minute hit-point ceiling shared between normal spawns and the
    /// pending boss's health.
    pub max_hp_per_minute: f32,
    /// Bag load at which the battle is lost.
    pub bag_limit: u32,
    /// Extra health range added to mid-tier enemies on top of their task's
    /// base health, in whole points.
    pub mid_bonus_min: u32,
    /// Upper bound of the mid-tier bonus, in whole points.
    pub mid_bonus_max: u32,
    /// Normal escorts included in a horn wave.
    pub horn_escorts: u32,
    /// Mid-tier escorts included in a horn wave.
    pub horn_mid_escorts: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            interval_ms: 5_000,
            empty_field_interval_ms: 1_500,
            empty_grace_ms: 3_000,
            boss_interval_ms: 60_000,
            max_bosses: 8,
            budget_rate_base: 1.0,
            budget_rate_per_clear: 0.5,
            budget_rate_cap: 4.0,
            max_hp_per_minute: 200.0,
            bag_limit: 30,
            mid_bonus_min: 6,
            mid_bonus_max: 9,
            horn_escorts: 2,
            horn_mid_escorts: 1,
        }
    }
}

/// Letter queue knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LetterTuning {
    /// Maximum tiles the queue can hold; drops pause at capacity.
    pub capacity: usize,
    /// Gap between letter tile drops, in milliseconds.
    pub drop_interval_ms: u64,
    /// Probability that a drop is a letter some turret currently needs.
    pub needed_ratio: f64,
    /// Probability that a non-needed drop still comes from a bound word.
    pub bound_ratio: f64,
}

impl Default for LetterTuning {
    fn default() -> Self {
        Self {
            capacity: 18,
            drop_interval_ms: 1_800,
            needed_ratio: 2.0 / 3.0,
            bound_ratio: 0.5,
        }
    }
}

/// Tool pricing in coins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolTuning {
    /// Cost of removing a slot's occupant.
    pub remove_cost: u64,
    /// Cost of a key that fills one correct letter.
    pub key_cost: u64,
    /// Cost of the horn that forces a boss wave.
    pub horn_cost: u64,
    /// Cost of the baton that auto-completes every fillable turret.
    pub baton_cost: u64,
    /// Coins the player starts a fresh battle with.
    pub starting_coins: u64,
}

impl Default for ToolTuning {
    fn default() -> Self {
        Self {
            remove_cost: 5,
            key_cost: 8,
            horn_cost: 10,
            baton_cost: 20,
            starting_coins: 0,
        }
    }
}

/// One entry of the task or boss roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Name displayed on the enemy.
    pub name: String,
    /// Starting health of the enemy.
    pub health: Health,
}

impl TaskSpec {
    fn new(name: &str, points: u32) -> Self {
        Self {
            name: name.to_owned(),
            health: Health::from_points(points),
        }
    }
}

/// Task and boss rosters the scheduler draws from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterTuning {
    /// Normal homework tasks, spent against the hp budget.
    pub tasks: Vec<TaskSpec>,
    /// Boss assignments, consumed in order.
    pub bosses: Vec<TaskSpec>,
}

impl Default for RosterTuning {
    fn default() -> Self {
        Self {
            tasks: vec![
                TaskSpec::new("copy words", 1),
                TaskSpec::new("read aloud", 1),
                TaskSpec::new("flash cards", 1),
                TaskSpec::new("spelling drill", 2),
                TaskSpec::new("fill blanks", 2),
                TaskSpec::new("match pictures", 2),
                TaskSpec::new("copy sentences", 3),
                TaskSpec::new("listen and repeat", 3),
                TaskSpec::new("dictation", 4),
                TaskSpec::new("word quiz", 4),
                TaskSpec::new("make sentences", 4),
                TaskSpec::new("grammar sheet", 5),
                TaskSpec::new("reading log", 5),
                TaskSpec::new("workbook pages", 6),
                TaskSpec::new("oral practice", 6),
                TaskSpec::new("unit review", 7),
                TaskSpec::new("mock test", 8),
                TaskSpec::new("recite text", 8),
            ],
            bosses: vec![
                TaskSpec::new("Monday Quiz", 18),
                TaskSpec::new("Spelling Bee", 24),
                TaskSpec::new("Chapter Test", 30),
                TaskSpec::new("Book Report", 36),
                TaskSpec::new("Midterm Exam", 42),
                TaskSpec::new("Speech Contest", 48),
                TaskSpec::new("Final Review", 54),
                TaskSpec::new("Final Exam", 60),
            ],
        }
    }
}
