#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative battle state.
//!
//! The world owns every slot, enemy, projectile, letter tile, and coin. It
//! mutates exclusively through [`apply`], which executes one command and
//! appends the resulting events to the caller's buffer. Reads go through
//! [`query`], which hands out immutable snapshots. All randomness flows
//! from a single seeded generator, so a battle replayed with the same seed
//! and the same command stream produces the same event stream.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use word_siege_core::{
    normalize_word, BattleTuning, Command, Event, FieldPoint, SlotId, ToolKind, ToolRejection,
};

mod economy;
mod enemies;
mod letters;
mod projectiles;
mod schedule;
mod turrets;

use economy::Economy;
use enemies::Enemy;
use letters::LetterQueue;
use projectiles::Projectile;
use schedule::{Callback, Schedule};
use turrets::{Slot, SlotState};

/// Highest curriculum day the word pool covers.
pub const MAX_DAY: u32 = 21;

/// Authoritative battle state; see the crate docs for the mutation rules.
#[derive(Debug)]
pub struct World {
    pub(crate) tuning: BattleTuning,
    pub(crate) now: Duration,
    pub(crate) day: u32,
    pub(crate) outcome: Option<word_siege_core::Outcome>,
    pub(crate) slots: Vec<Slot>,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) letters: LetterQueue,
    pub(crate) economy: Economy,
    pub(crate) bag_load: u32,
    pub(crate) bosses_spawned: u32,
    pub(crate) bosses_defeated: u32,
    pub(crate) boss_alive: bool,
    pub(crate) wrong_streak: u32,
    pub(crate) flash_mode: bool,
    pub(crate) schedule: Schedule,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) seed: u64,
    pub(crate) next_turret: u32,
    pub(crate) next_enemy: u32,
    pub(crate) next_projectile: u32,
}

impl World {
    /// Creates a fresh battle for the given curriculum day and seed.
    ///
    /// Days outside the curriculum are clamped into `1..=MAX_DAY`.
    #[must_use]
    pub fn new(day: u32, seed: u64, tuning: BattleTuning) -> Self {
        let slots = (0..tuning.field.slot_count)
            .map(|index| Slot {
                id: SlotId::new(index),
                anchor: tuning
                    .field
                    .slot_anchors
                    .get(index as usize)
                    .copied()
                    .unwrap_or(FieldPoint::new(0.0, 0.0)),
                state: SlotState::Empty,
            })
            .collect();
        let starting_coins = tuning.tools.starting_coins;
        Self {
            tuning,
            now: Duration::ZERO,
            day: day.clamp(1, MAX_DAY),
            outcome: None,
            slots,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            letters: LetterQueue::new(),
            economy: Economy::new(starting_coins),
            bag_load: 0,
            bosses_spawned: 0,
            bosses_defeated: 0,
            boss_alive: false,
            wrong_streak: 0,
            flash_mode: false,
            schedule: Schedule::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            next_turret: 0,
            next_enemy: 0,
            next_projectile: 0,
        }
    }
}

/// Executes a command against the world, appending resulting events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => tick(world, dt, out_events),
        Command::PlantSeed { slot, weapon } => {
            turrets::plant_seed(world, slot, weapon, out_events)
        }
        Command::FillLetter { slot, letter } => {
            turrets::fill_letter(world, slot, letter, out_events)
        }
        Command::UseTool { tool, slot } => use_tool(world, tool, slot, out_events),
        Command::AssignWord {
            slot,
            item,
            template,
        } => turrets::assign_word(world, slot, item, template, out_events),
        Command::SuppressWord { slot } => turrets::suppress_word(world, slot, out_events),
        Command::SpawnEnemy { name, health, tier } => {
            enemies::spawn_enemy(world, name, health, tier, out_events)
        }
        Command::SpawnBoss => enemies::spawn_boss(world, out_events),
        Command::Restart => restart(world, out_events),
    }
}

fn tick(world: &mut World, dt: Duration, events: &mut Vec<Event>) {
    world.now += dt;
    events.push(Event::TimeAdvanced { dt });
    if world.outcome.is_some() {
        return;
    }
    turrets::grow_seeds(world, events);

    let (needed, bound) = letter_hints(world);
    let letter_tuning = world.tuning.letters.clone();
    world
        .letters
        .tick(dt, &letter_tuning, &needed, &bound, &mut world.rng);

    enemies::tick_enemies(world, dt, events);
    if world.outcome.is_some() {
        return;
    }
    projectiles::tick_projectiles(world, dt, events);

    while world.outcome.is_none() {
        let Some(callback) = world.schedule.pop_due(world.now) else {
            break;
        };
        match callback {
            Callback::FireShot { slot, turret } => {
                projectiles::handle_fire_shot(world, slot, turret, events)
            }
            Callback::RevealWrong {
                slot,
                turret,
                index,
                letter,
            } => turrets::handle_reveal_wrong(world, slot, turret, index, letter),
            Callback::ClearWrong {
                slot,
                turret,
                index,
            } => turrets::handle_clear_wrong(world, slot, turret, index),
            Callback::RestoreBlanks { slot, turret } => {
                turrets::handle_restore_blanks(world, slot, turret)
            }
        }
    }
}

/// Next-needed and bound-word letters feeding the tile drop bias.
fn letter_hints(world: &World) -> (Vec<char>, Vec<char>) {
    let mut needed = Vec::new();
    let mut bound = Vec::new();
    for slot in &world.slots {
        let SlotState::Turret(turret) = &slot.state else {
            continue;
        };
        if let Some(word) = &turret.word {
            bound.extend(normalize_word(&word.item.en).chars());
            if turret.fillable() {
                if let Some(expected) = word.expected() {
                    needed.push(expected);
                }
            }
        }
    }
    (needed, bound)
}

fn tool_cost(world: &World, tool: ToolKind) -> u64 {
    match tool {
        ToolKind::Remove => world.tuning.tools.remove_cost,
        ToolKind::Key => world.tuning.tools.key_cost,
        ToolKind::Horn => world.tuning.tools.horn_cost,
        ToolKind::Baton => world.tuning.tools.baton_cost,
    }
}

/// Purchases and applies a tool atomically: the entire request is validated
/// before any coin or battlefield state changes.
fn use_tool(world: &mut World, tool: ToolKind, slot: Option<SlotId>, events: &mut Vec<Event>) {
    let reject = |events: &mut Vec<Event>, reason: ToolRejection| {
        events.push(Event::ToolRejected { tool, reason });
    };
    if world.outcome.is_some() {
        reject(events, ToolRejection::BattleOver);
        return;
    }
    let cost = tool_cost(world, tool);

    // Validate the target before touching coins.
    let target_index = match tool {
        ToolKind::Remove => {
            let Some(index) = slot.and_then(|slot| turrets::slot_index(world, slot)) else {
                reject(events, ToolRejection::SlotUnknown);
                return;
            };
            if matches!(world.slots[index].state, SlotState::Empty) {
                reject(events, ToolRejection::SlotEmpty);
                return;
            }
            Some(index)
        }
        ToolKind::Key => {
            let Some(index) = slot.and_then(|slot| turrets::slot_index(world, slot)) else {
                reject(events, ToolRejection::SlotUnknown);
                return;
            };
            let SlotState::Turret(turret) = &world.slots[index].state else {
                reject(events, ToolRejection::NoTurret);
                return;
            };
            if turret.locked || turret.is_firing() || turret.word.is_none() {
                reject(events, ToolRejection::TurretLocked);
                return;
            }
            if turret
                .word
                .as_ref()
                .map(|word| word.remaining() == 0)
                .unwrap_or(true)
            {
                reject(events, ToolRejection::NoBlankRemaining);
                return;
            }
            Some(index)
        }
        ToolKind::Horn => {
            if world.boss_alive {
                reject(events, ToolRejection::BossAlive);
                return;
            }
            if world.bosses_spawned >= world.tuning.spawning.max_bosses {
                reject(events, ToolRejection::BossCapReached);
                return;
            }
            None
        }
        ToolKind::Baton => {
            let any_fillable = world.slots.iter().any(|slot| match &slot.state {
                SlotState::Turret(turret) => turret.fillable(),
                _ => false,
            });
            if !any_fillable {
                reject(events, ToolRejection::NoEligibleTurret);
                return;
            }
            None
        }
    };
    if !world.economy.can_afford(cost) {
        reject(events, ToolRejection::InsufficientCoins);
        return;
    }

    let balance = world.economy.debit(cost);
    events.push(Event::ToolApplied { tool, cost });
    events.push(Event::CoinsChanged { balance });

    match tool {
        ToolKind::Remove => {
            let index = target_index.unwrap_or_default();
            if matches!(world.slots[index].state, SlotState::Turret(_)) {
                turrets::explode_turret(world, index, events);
            } else {
                world.slots[index].state = SlotState::Empty;
            }
        }
        ToolKind::Key => {
            let index = target_index.unwrap_or_default();
            turrets::accept_letter(world, index, events);
        }
        ToolKind::Horn => horn_wave(world, events),
        ToolKind::Baton => {
            for index in 0..world.slots.len() {
                loop {
                    let fillable = match &world.slots[index].state {
                        SlotState::Turret(turret) => turret.fillable(),
                        _ => false,
                    };
                    if !fillable {
                        break;
                    }
                    turrets::accept_letter(world, index, events);
                }
            }
        }
    }
}

/// Horn wave: the next boss plus a small escort of normals and mids.
fn horn_wave(world: &mut World, events: &mut Vec<Event>) {
    use rand::Rng;
    use word_siege_core::EnemyTier;

    enemies::spawn_boss(world, events);
    let spawning = world.tuning.spawning.clone();
    let tasks = world.tuning.roster.tasks.clone();
    if tasks.is_empty() {
        return;
    }
    for _ in 0..spawning.horn_escorts {
        let pick = world.rng.gen_range(0..tasks.len());
        let spec = &tasks[pick];
        enemies::spawn_enemy(
            world,
            spec.name.clone(),
            spec.health,
            EnemyTier::Normal,
            events,
        );
    }
    for _ in 0..spawning.horn_mid_escorts {
        let pick = world.rng.gen_range(0..tasks.len());
        let spec = &tasks[pick];
        let bonus = world
            .rng
            .gen_range(spawning.mid_bonus_min..=spawning.mid_bonus_max);
        enemies::spawn_enemy(
            world,
            spec.name.clone(),
            spec.health.saturating_add_points(bonus),
            EnemyTier::Mid,
            events,
        );
    }
}

/// Resets the battle to its starting state, replaying from the same seed.
fn restart(world: &mut World, events: &mut Vec<Event>) {
    world.now = Duration::ZERO;
    world.outcome = None;
    for slot in &mut world.slots {
        slot.state = SlotState::Empty;
    }
    world.enemies.clear();
    world.projectiles.clear();
    world.letters.reset();
    world.economy.reset();
    world.bag_load = 0;
    world.bosses_spawned = 0;
    world.bosses_defeated = 0;
    world.boss_alive = false;
    world.wrong_streak = 0;
    world.flash_mode = false;
    world.schedule.clear();
    world.rng = ChaCha8Rng::seed_from_u64(world.seed);
    events.push(Event::BattleRestarted);
    events.push(Event::CoinsChanged {
        balance: world.economy.balance(),
    });
}

/// Read-only access to the world's state.
pub mod query {
    use std::time::Duration;

    use word_siege_core::{
        BattleTuning, EnemyView, ProjectileView, Scoreboard, SlotView,
    };

    use crate::World;

    /// Snapshot of every plant slot.
    #[must_use]
    pub fn slots(world: &World) -> SlotView {
        let growth = Duration::from_millis(world.tuning.spell.growth_ms);
        let max_hp = world.tuning.spell.turret_hp;
        SlotView::from_snapshots(
            world
                .slots
                .iter()
                .map(|slot| slot.snapshot(world.now, growth, max_hp, world.flash_mode))
                .collect(),
        )
    }

    /// Snapshot of every enemy on the field.
    #[must_use]
    pub fn enemies(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| enemy.snapshot(world.now))
                .collect(),
        )
    }

    /// Snapshot of every projectile in flight.
    #[must_use]
    pub fn projectiles(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }

    /// HUD counters.
    #[must_use]
    pub fn scoreboard(world: &World) -> Scoreboard {
        Scoreboard {
            day: world.day,
            coins: world.economy.balance(),
            bag_load: world.bag_load,
            bag_limit: world.tuning.spawning.bag_limit,
            bosses_spawned: world.bosses_spawned,
            bosses_defeated: world.bosses_defeated,
            boss_alive: world.boss_alive,
            boss_cap: world.tuning.spawning.max_bosses,
            outcome: world.outcome,
        }
    }

    /// Letter tiles currently waiting in the queue, oldest first.
    #[must_use]
    pub fn letter_tiles(world: &World) -> Vec<char> {
        world.letters.tiles().to_vec()
    }

    /// Current simulation time.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.now
    }

    /// Tuning the world was built with.
    #[must_use]
    pub fn tuning(world: &World) -> &BattleTuning {
        &world.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, query, World};
    use std::time::Duration;
    use word_siege_core::{
        BattleTuning, Command, Event, FillRejection, Health, PlantRejection, SlotId, SlotOccupant,
        ToolKind, ToolRejection, WeaponKind, WordItem, WordTemplate,
    };

    fn test_tuning() -> BattleTuning {
        let mut tuning = BattleTuning::default();
        // Deterministic cadence and instant flight keep scenarios compact.
        tuning.firing.jitter_ms = 0;
        tuning.weapons.projectile_speed = 100_000.0;
        tuning.spell.growth_ms = 100;
        tuning
    }

    fn new_world() -> World {
        World::new(3, 42, test_tuning())
    }

    fn run(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    fn tick_ms(world: &mut World, ms: u64) -> Vec<Event> {
        run(
            world,
            Command::Tick {
                dt: Duration::from_millis(ms),
            },
        )
    }

    fn word_item(en: &str) -> WordItem {
        WordItem {
            day: 1,
            en: en.to_owned(),
            zh: String::new(),
            kind: None,
        }
    }

    /// Template for "cat" with the middle letter blanked.
    fn cat_template() -> WordTemplate {
        WordTemplate::new("c_t".chars().collect(), vec![1], vec!['a'])
            .expect("valid template")
    }

    fn grow_turret(world: &mut World, slot: SlotId, weapon: WeaponKind) {
        let events = run(world, Command::PlantSeed { slot, weapon });
        assert!(matches!(events[0], Event::SeedPlanted { .. }));
        let events = tick_ms(world, 150);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::TurretBuilt { .. })));
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::WordNeeded { .. })));
    }

    #[test]
    fn planting_rejects_occupied_and_unknown_slots() {
        let mut world = new_world();
        let slot = SlotId::new(0);
        let _ = run(
            &mut world,
            Command::PlantSeed {
                slot,
                weapon: WeaponKind::Pear,
            },
        );
        let events = run(
            &mut world,
            Command::PlantSeed {
                slot,
                weapon: WeaponKind::Apple,
            },
        );
        assert_eq!(
            events,
            vec![Event::PlantRejected {
                slot,
                reason: PlantRejection::SlotOccupied,
            }]
        );
        let unknown = SlotId::new(99);
        let events = run(
            &mut world,
            Command::PlantSeed {
                slot: unknown,
                weapon: WeaponKind::Pear,
            },
        );
        assert_eq!(
            events,
            vec![Event::PlantRejected {
                slot: unknown,
                reason: PlantRejection::SlotUnknown,
            }]
        );
    }

    #[test]
    fn seed_growth_reports_progress() {
        let mut world = new_world();
        let slot = SlotId::new(2);
        let _ = run(
            &mut world,
            Command::PlantSeed {
                slot,
                weapon: WeaponKind::Banana,
            },
        );
        let _ = tick_ms(&mut world, 50);
        let view = query::slots(&world);
        let snapshot = view
            .iter()
            .find(|snapshot| snapshot.slot == slot)
            .expect("slot exists");
        match &snapshot.occupant {
            SlotOccupant::Seed { progress, .. } => {
                assert!(*progress > 0.0 && *progress < 1.0);
            }
            other => panic!("expected growing seed, got {other:?}"),
        }
    }

    #[test]
    fn fill_without_tile_is_rejected_without_progress() {
        let mut world = new_world();
        let slot = SlotId::new(0);
        grow_turret(&mut world, slot, WeaponKind::Pear);
        // Two blanks wanting 'a'; the opening alphabet seed holds only one.
        let template = WordTemplate::new(
            "b_n_na".chars().collect(),
            vec![1, 3],
            vec!['a', 'a'],
        )
        .expect("valid template");
        let _ = run(
            &mut world,
            Command::AssignWord {
                slot,
                item: word_item("banana"),
                template,
            },
        );
        let events = run(
            &mut world,
            Command::FillLetter { slot, letter: 'a' },
        );
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::LetterAccepted { remaining: 1, .. })));
        // The seeded 'a' is spent and no new tile has dropped, so the
        // second fill is rejected and progress stands.
        let events = run(
            &mut world,
            Command::FillLetter { slot, letter: 'a' },
        );
        assert_eq!(
            events,
            vec![Event::FillRejected {
                slot,
                reason: FillRejection::LetterUnavailable,
            }]
        );
        let view = query::slots(&world).into_vec();
        let SlotOccupant::Turret(turret) = &view[0].occupant else {
            panic!("turret expected");
        };
        assert_eq!(turret.fill_index, 1);
    }

    #[test]
    fn key_fills_a_letter_without_consuming_a_tile() {
        let mut world = new_world();
        let slot = SlotId::new(0);
        grow_turret(&mut world, slot, WeaponKind::Pear);
        let _ = run(
            &mut world,
            Command::AssignWord {
                slot,
                item: word_item("cat"),
                template: cat_template(),
            },
        );
        // Not affordable yet.
        let events = run(
            &mut world,
            Command::UseTool {
                tool: ToolKind::Key,
                slot: Some(slot),
            },
        );
        assert_eq!(
            events,
            vec![Event::ToolRejected {
                tool: ToolKind::Key,
                reason: ToolRejection::InsufficientCoins,
            }]
        );
        assert_eq!(query::scoreboard(&world).coins, 0);
    }

    #[test]
    fn completing_a_word_starts_a_three_shot_sequence() {
        let mut world = new_world();
        let slot = SlotId::new(0);
        grow_turret(&mut world, slot, WeaponKind::Pear);
        let _ = run(
            &mut world,
            Command::AssignWord {
                slot,
                item: word_item("cat"),
                template: cat_template(),
            },
        );
        let _ = run(
            &mut world,
            Command::SpawnEnemy {
                name: "dictation".to_owned(),
                health: Health::from_points(40),
                tier: word_siege_core::EnemyTier::Normal,
            },
        );
        // Drop tiles until an 'a' is available, then fill it.
        let mut filled = false;
        for _ in 0..40 {
            let _ = tick_ms(&mut world, 1_800);
            if query::letter_tiles(&world).contains(&'a') {
                let events = run(
                    &mut world,
                    Command::FillLetter { slot, letter: 'a' },
                );
                assert!(events.iter().any(|event| matches!(
                    event,
                    Event::WordCompleted { .. }
                )));
                assert!(events.iter().any(|event| matches!(
                    event,
                    Event::FireSequenceStarted { shots: 3, .. }
                )));
                filled = true;
                break;
            }
        }
        assert!(filled, "an 'a' tile should drop eventually");
        // Level 1 fires three shots, then the turret levels up and asks for
        // a fresh word.
        let mut fired = 0;
        let mut leveled = false;
        for _ in 0..20 {
            for event in tick_ms(&mut world, 500) {
                match event {
                    Event::ProjectileFired { .. } => fired += 1,
                    Event::TurretLeveled { level, .. } => {
                        assert_eq!(level, 2);
                        leveled = true;
                    }
                    _ => {}
                }
            }
            if leveled {
                break;
            }
        }
        assert_eq!(fired, 3);
        assert!(leveled);
    }

    #[test]
    fn wrong_letters_cost_durability_and_eventually_destroy_the_turret() {
        let mut world = new_world();
        let slot = SlotId::new(0);
        grow_turret(&mut world, slot, WeaponKind::Pear);
        let _ = run(
            &mut world,
            Command::AssignWord {
                slot,
                item: word_item("cat"),
                template: cat_template(),
            },
        );
        let mut wrongs = 0;
        let mut exploded = false;
        for _ in 0..200 {
            let _ = tick_ms(&mut world, 1_800);
            let tile = query::letter_tiles(&world)
                .iter()
                .copied()
                .find(|&tile| tile != 'a');
            let Some(tile) = tile else { continue };
            let events = run(&mut world, Command::FillLetter { slot, letter: tile });
            for event in events {
                match event {
                    Event::LetterRejected { hp_remaining, .. } => {
                        wrongs += 1;
                        assert_eq!(hp_remaining, 3 - wrongs);
                    }
                    Event::TurretExploded { .. } => exploded = true,
                    _ => {}
                }
            }
            if exploded {
                break;
            }
            // Wait out the reveal lock before the next attempt.
            let _ = tick_ms(&mut world, 1_500);
        }
        assert_eq!(wrongs, 3);
        assert!(exploded);
    }

    #[test]
    fn tool_rejection_leaves_state_untouched() {
        let mut world = new_world();
        let before = query::scoreboard(&world);
        let events = run(
            &mut world,
            Command::UseTool {
                tool: ToolKind::Horn,
                slot: None,
            },
        );
        assert_eq!(
            events,
            vec![Event::ToolRejected {
                tool: ToolKind::Horn,
                reason: ToolRejection::InsufficientCoins,
            }]
        );
        let after = query::scoreboard(&world);
        assert_eq!(before, after);
        assert_eq!(query::enemies(&world).into_vec().len(), 0);
    }

    #[test]
    fn boss_spawns_are_bounded_and_exclusive() {
        let mut world = new_world();
        // First boss spawns; a second request while it lives is ignored.
        let events = run(&mut world, Command::SpawnBoss);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::EnemySpawned { .. })));
        let events = run(&mut world, Command::SpawnBoss);
        assert!(events.is_empty());
        assert_eq!(query::scoreboard(&world).bosses_spawned, 1);
    }

    #[test]
    fn restart_returns_to_the_starting_state() {
        let mut world = new_world();
        let _ = run(&mut world, Command::SpawnBoss);
        let _ = tick_ms(&mut world, 5_000);
        let events = run(&mut world, Command::Restart);
        assert!(events.contains(&Event::BattleRestarted));
        let scoreboard = query::scoreboard(&world);
        assert_eq!(scoreboard.bosses_spawned, 0);
        assert_eq!(scoreboard.bag_load, 0);
        assert!(query::enemies(&world).into_vec().is_empty());
        assert_eq!(query::clock(&world), Duration::ZERO);
        // The letter queue returns to its opening alphabet seed.
        assert_eq!(query::letter_tiles(&world).len(), 26);
    }
}
