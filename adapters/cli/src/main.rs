#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Word Siege battle.
//!
//! Drives the fixed-step loop: tick the world, let the word selector and
//! wave scheduler respond to the event stream, and let a small autoplay
//! routine stand in for the player by planting seeds and dragging letters.
//! Coins and review counts persist to a progress file between runs.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use word_siege_core::{
    BattleTuning, Command, Event, Outcome, SlotId, SlotOccupant, WeaponKind,
};
use word_siege_system_wave_scheduling::WaveScheduler;
use word_siege_system_word_selection::{SelectionTuning, WordSelector};
use word_siege_world::{apply, query, World, MAX_DAY};

mod progress;
mod word_bank;

/// Headless Word Siege battle runner.
#[derive(Debug, Parser)]
#[command(name = "word-siege", about = "Spell words, grow turrets, clear homework.")]
struct Args {
    /// Curriculum day whose words are unlocked.
    #[arg(long, default_value_t = 1)]
    day: u32,
    /// Seed for every random stream in the battle.
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Maximum simulated battle length in seconds.
    #[arg(long, default_value_t = 600)]
    seconds: u64,
    /// Fixed tick size in milliseconds.
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,
    /// JSON word pool; the built-in pool is used when omitted.
    #[arg(long)]
    words: Option<PathBuf>,
    /// Progress file carrying coins and review counts between runs.
    #[arg(long, default_value = "progress.json")]
    progress: PathBuf,
    /// Suppress the per-event log, printing only the final summary.
    #[arg(long)]
    quiet: bool,
}

/// Stand-in player: plants every slot and drags letters it knows are
/// correct, learning the answers from the assignments flowing past it.
#[derive(Default)]
struct Autoplay {
    expected: HashMap<SlotId, Vec<char>>,
    next_weapon: usize,
}

impl Autoplay {
    /// Records the expected letters of assignments on their way to the
    /// world.
    fn observe_commands(&mut self, commands: &[Command]) {
        for command in commands {
            if let Command::AssignWord { slot, template, .. } = command {
                let _ = self.expected.insert(*slot, template.expected().to_vec());
            }
        }
    }

    fn observe_events(&mut self, events: &[Event]) {
        for event in events {
            if let Event::TurretExploded { slot, .. } = event {
                let _ = self.expected.remove(slot);
            }
        }
    }

    /// One decision per frame: plant an empty slot, else fill one letter.
    fn act(&mut self, world: &World, out_commands: &mut Vec<Command>) {
        let slots = query::slots(world);
        for snapshot in slots.iter() {
            if matches!(snapshot.occupant, SlotOccupant::Empty) {
                let weapon = WeaponKind::ALL[self.next_weapon % WeaponKind::ALL.len()];
                self.next_weapon += 1;
                out_commands.push(Command::PlantSeed {
                    slot: snapshot.slot,
                    weapon,
                });
                return;
            }
        }
        let tiles = query::letter_tiles(world);
        for snapshot in slots.iter() {
            let SlotOccupant::Turret(turret) = &snapshot.occupant else {
                continue;
            };
            if turret.locked || turret.firing || turret.blanks_remaining == 0 {
                continue;
            }
            let Some(letter) = self
                .expected
                .get(&snapshot.slot)
                .and_then(|letters| letters.get(turret.fill_index))
                .copied()
            else {
                continue;
            };
            if tiles.contains(&letter) {
                out_commands.push(Command::FillLetter {
                    slot: snapshot.slot,
                    letter,
                });
                return;
            }
        }
    }
}

fn report(now: Duration, event: &Event) {
    let stamp = now.as_secs_f32();
    match event {
        Event::TurretBuilt { slot, weapon, .. } => {
            println!("[{stamp:7.2}s] turret up in slot {} ({weapon:?})", slot.get());
        }
        Event::WordAssigned { slot, word } => {
            println!("[{stamp:7.2}s] slot {} spells \"{word}\"", slot.get());
        }
        Event::WordCompleted { slot, word } => {
            println!("[{stamp:7.2}s] slot {} completed \"{word}\"", slot.get());
        }
        Event::TurretLeveled { slot, level } => {
            println!("[{stamp:7.2}s] slot {} reached level {level}", slot.get());
        }
        Event::TurretExploded { slot, .. } => {
            println!("[{stamp:7.2}s] slot {} turret gone", slot.get());
        }
        Event::EnemySpawned { name, tier, health, .. } => {
            println!(
                "[{stamp:7.2}s] {tier:?} \"{name}\" enters with {:.1} hp",
                health.points()
            );
        }
        Event::EnemyKilled { coins, .. } => {
            println!("[{stamp:7.2}s] enemy down, +{coins} coins");
        }
        Event::EnemyBagged { load, .. } => {
            println!("[{stamp:7.2}s] enemy reached the bag (load {load})");
        }
        Event::BossDefeated { defeated } => {
            println!("[{stamp:7.2}s] boss defeated ({defeated} down)");
        }
        Event::BattleWon => println!("[{stamp:7.2}s] battle won"),
        Event::BattleLost => println!("[{stamp:7.2}s] battle lost"),
        _ => {}
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let day = args.day.clamp(1, MAX_DAY);
    let pool = match &args.words {
        Some(path) => word_bank::load(path).context("loading word pool")?,
        None => word_bank::builtin(),
    };
    let saved = progress::load(&args.progress);

    let mut tuning = BattleTuning::default();
    tuning.tools.starting_coins = saved.coins;
    let mut world = World::new(day, args.seed, tuning.clone());
    let mut selector = WordSelector::new(
        pool,
        saved.review.clone(),
        day,
        args.seed,
        SelectionTuning::default(),
    );
    let mut scheduler = WaveScheduler::new(&tuning, args.seed);
    let mut autoplay = Autoplay::default();

    let dt = Duration::from_millis(args.tick_ms.max(1));
    let frames = (args.seconds * 1_000) / args.tick_ms.max(1);
    let mut events = Vec::new();
    let mut commands = Vec::new();
    for _ in 0..frames {
        events.clear();
        apply(&mut world, Command::Tick { dt }, &mut events);

        commands.clear();
        selector.handle(&events, &mut commands);
        autoplay.observe_commands(&commands);
        let enemies = query::enemies(&world);
        let scoreboard = query::scoreboard(&world);
        scheduler.handle(&events, &enemies, &scoreboard, &mut commands);
        autoplay.act(&world, &mut commands);
        for command in commands.drain(..) {
            apply(&mut world, command, &mut events);
        }
        autoplay.observe_events(&events);

        if !args.quiet {
            let now = query::clock(&world);
            for event in &events {
                report(now, event);
            }
        }
        if query::scoreboard(&world).outcome.is_some() {
            break;
        }
    }

    let scoreboard = query::scoreboard(&world);
    match scoreboard.outcome {
        Some(Outcome::Won) => println!(
            "victory on day {day}: {} bosses cleared, {} coins banked",
            scoreboard.bosses_defeated, scoreboard.coins
        ),
        Some(Outcome::Lost) => println!(
            "defeat on day {day}: bag load {} of {}",
            scoreboard.bag_load, scoreboard.bag_limit
        ),
        None => println!(
            "time up on day {day}: {} of {} bosses, bag load {}",
            scoreboard.bosses_defeated, scoreboard.boss_cap, scoreboard.bag_load
        ),
    }

    progress::save(
        &args.progress,
        &progress::PlayerProgress {
            coins: scoreboard.coins,
            review: selector.review().clone(),
        },
    )
    .context("saving progress")?;
    Ok(())
}
