#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy wave scheduling.
//!
//! Normal spawns are paced by a hit-point budget that accrues with time and
//! accelerates as bosses fall, capped so that the combined pressure of
//! tasks and the pending boss never exceeds the per-minute ceiling. Spawn
//! attempts run on a fixed interval, shortened once the field has sat empty
//! past a grace window, and are deferred while another enemy still crowds
//! the spawn point. Bosses spawn on their own timer, one at a time, until
//! the roster is exhausted.

use std::time::Duration;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use word_siege_core::{
    tuning::{FieldTuning, RosterTuning, SpawnTuning},
    BattleTuning, Command, EnemyTier, EnemyView, Event, MovementState, Scoreboard,
};

/// Pure system deciding when and what to spawn.
pub struct WaveScheduler {
    spawning: SpawnTuning,
    field: FieldTuning,
    roster: RosterTuning,
    /// Accrued spawn budget in enemy hit points.
    budget: f32,
    since_spawn: Duration,
    since_boss: Duration,
    empty_for: Duration,
    rng: ChaCha8Rng,
}

impl WaveScheduler {
    /// Creates a scheduler using the battle's spawn tuning and rosters.
    #[must_use]
    pub fn new(tuning: &BattleTuning, seed: u64) -> Self {
        Self {
            spawning: tuning.spawning.clone(),
            field: tuning.field.clone(),
            roster: tuning.roster.clone(),
            budget: 0.0,
            since_spawn: Duration::ZERO,
            since_boss: Duration::ZERO,
            empty_for: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Reacts to the tick and the current field, appending spawn commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        scoreboard: &Scoreboard,
        out_commands: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    self.advance(*dt, enemies, scoreboard, out_commands)
                }
                Event::BattleRestarted => self.reset(),
                _ => {}
            }
        }
    }

    fn reset(&mut self) {
        self.budget = 0.0;
        self.since_spawn = Duration::ZERO;
        self.since_boss = Duration::ZERO;
        self.empty_for = Duration::ZERO;
    }

    /// Accrual rate, throttled so tasks plus the pending boss stay under
    /// the per-minute ceiling.
    fn accrual_rate(&self, scoreboard: &Scoreboard) -> f32 {
        let ramp = self.spawning.budget_rate_base
            + self.spawning.budget_rate_per_clear * scoreboard.bosses_defeated as f32;
        let pending_boss_hp = self
            .roster
            .bosses
            .get(scoreboard.bosses_spawned as usize)
            .map(|spec| spec.health.points())
            .unwrap_or(0.0);
        let ceiling = ((self.spawning.max_hp_per_minute - pending_boss_hp) / 60.0).max(0.0);
        ramp.min(self.spawning.budget_rate_cap).min(ceiling)
    }

    fn advance(
        &mut self,
        dt: Duration,
        enemies: &EnemyView,
        scoreboard: &Scoreboard,
        out_commands: &mut Vec<Command>,
    ) {
        if scoreboard.outcome.is_some() {
            return;
        }
        self.budget += self.accrual_rate(scoreboard) * dt.as_secs_f32();
        self.since_spawn += dt;
        self.since_boss += dt;

        // Falling corpses are scenery; only live enemies hold the field.
        let field_empty = !enemies
            .iter()
            .any(|enemy| enemy.movement != MovementState::Falling);
        if field_empty {
            self.empty_for += dt;
        } else {
            self.empty_for = Duration::ZERO;
        }

        let interval = if field_empty
            && self.empty_for >= Duration::from_millis(self.spawning.empty_grace_ms)
        {
            Duration::from_millis(self.spawning.empty_field_interval_ms)
        } else {
            Duration::from_millis(self.spawning.interval_ms)
        };

        if self.since_spawn >= interval && self.spawn_clear(enemies) {
            if let Some(spec) = self.pick_affordable() {
                self.budget -= spec.1.points();
                self.since_spawn = Duration::ZERO;
                out_commands.push(Command::SpawnEnemy {
                    name: spec.0,
                    health: spec.1,
                    tier: EnemyTier::Normal,
                });
            }
        }

        if self.since_boss >= Duration::from_millis(self.spawning.boss_interval_ms)
            && !scoreboard.boss_alive
            && scoreboard.bosses_spawned < self.spawning.max_bosses
        {
            self.since_boss = Duration::ZERO;
            out_commands.push(Command::SpawnBoss);
        }
    }

    /// Whether the spawn point is free of crowding enemies.
    fn spawn_clear(&self, enemies: &EnemyView) -> bool {
        !enemies.iter().any(|enemy| {
            enemy.movement != MovementState::Falling
                && enemy.position.distance_to(self.field.spawn_point) < self.field.spawn_clearance
        })
    }

    /// Uniform pick among the tasks the current budget can pay for.
    fn pick_affordable(&mut self) -> Option<(String, word_siege_core::Health)> {
        let affordable: Vec<usize> = self
            .roster
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.health.points() <= self.budget)
            .map(|(index, _)| index)
            .collect();
        if affordable.is_empty() {
            return None;
        }
        let pick = affordable[self.rng.gen_range(0..affordable.len())];
        let spec = &self.roster.tasks[pick];
        Some((spec.name.clone(), spec.health))
    }
}
