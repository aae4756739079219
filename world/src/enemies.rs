//! Enemy spawning, movement, boss behaviour, and the schoolbag.
//!
//! Enemies march from the spawn edge toward the bag centre. Status effects
//! are expiry timestamps checked lazily against the clock. A killed enemy
//! flips into a falling state that keeps it visible but out of combat; an
//! enemy that reaches the bag adds its remaining health to the bag load and
//! despawns in the same tick, so it is never counted twice.

use std::time::Duration;

use rand::Rng;
use word_siege_core::{
    tuning::EnemyTuning, Damage, EnemyId, EnemySnapshot, EnemyTier, Event, FieldPoint, Health,
    MovementState, Outcome,
};

use crate::turrets::SlotState;
use crate::World;

#[derive(Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) name: String,
    pub(crate) tier: EnemyTier,
    pub(crate) hp: Health,
    pub(crate) max_hp: Health,
    pub(crate) position: FieldPoint,
    pub(crate) slip_until: Option<Duration>,
    pub(crate) slow_until: Option<Duration>,
    pub(crate) jump_until: Option<Duration>,
    pub(crate) next_jump_at: Duration,
    /// Set when the enemy dies; falling enemies are out of combat.
    pub(crate) fall_speed: Option<f32>,
    pub(crate) hit_count: u32,
}

impl Enemy {
    pub(crate) fn in_combat(&self) -> bool {
        self.fall_speed.is_none()
    }

    pub(crate) fn jumping(&self, now: Duration) -> bool {
        self.jump_until.map(|until| now < until).unwrap_or(false)
    }

    fn slipping(&self, now: Duration) -> bool {
        self.slip_until.map(|until| now < until).unwrap_or(false)
    }

    fn slowed(&self, now: Duration) -> bool {
        self.slow_until.map(|until| now < until).unwrap_or(false)
    }

    pub(crate) fn movement(&self, now: Duration) -> MovementState {
        if !self.in_combat() {
            MovementState::Falling
        } else if self.jumping(now) {
            MovementState::Jumping
        } else if self.slipping(now) {
            MovementState::Slipping
        } else if self.slowed(now) {
            MovementState::Slowed
        } else {
            MovementState::Walking
        }
    }

    pub(crate) fn snapshot(&self, now: Duration) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            name: self.name.clone(),
            tier: self.tier,
            hp: self.hp,
            max_hp: self.max_hp,
            position: self.position,
            movement: self.movement(now),
            hit_count: self.hit_count,
        }
    }
}

/// Boss jump cooldown: healthier bosses jump less often, clamped to a floor.
pub(crate) fn jump_cooldown(tuning: &EnemyTuning, hp: Health) -> Duration {
    let points = hp.points().max(1.0);
    let seconds =
        (tuning.jump_cooldown_base_s - tuning.jump_cooldown_health_coeff * points.ln()).round();
    Duration::from_secs((seconds as i64).max(tuning.jump_cooldown_floor_s as i64) as u64)
}

pub(crate) fn spawn_enemy(
    world: &mut World,
    name: String,
    health: Health,
    tier: EnemyTier,
    events: &mut Vec<Event>,
) {
    if world.outcome.is_some() {
        return;
    }
    let id = EnemyId::new(world.next_enemy);
    world.next_enemy += 1;
    let next_jump_at = world.now + jump_cooldown(&world.tuning.enemies, health);
    world.enemies.push(Enemy {
        id,
        name: name.clone(),
        tier,
        hp: health,
        max_hp: health,
        position: world.tuning.field.spawn_point,
        slip_until: None,
        slow_until: None,
        jump_until: None,
        next_jump_at,
        fall_speed: None,
        hit_count: 0,
    });
    events.push(Event::EnemySpawned {
        enemy: id,
        name,
        health,
        tier,
    });
}

/// Spawns the next roster boss, if the battle allows one.
pub(crate) fn spawn_boss(world: &mut World, events: &mut Vec<Event>) {
    if world.outcome.is_some()
        || world.boss_alive
        || world.bosses_spawned >= world.tuning.spawning.max_bosses
    {
        return;
    }
    let Some(spec) = world
        .tuning
        .roster
        .bosses
        .get(world.bosses_spawned as usize)
        .cloned()
    else {
        return;
    };
    world.bosses_spawned += 1;
    world.boss_alive = true;
    spawn_enemy(world, spec.name, spec.health, EnemyTier::Boss, events);
}

fn base_speed(tuning: &EnemyTuning, tier: EnemyTier) -> f32 {
    match tier {
        EnemyTier::Normal => tuning.normal_speed,
        EnemyTier::Mid => tuning.mid_speed,
        EnemyTier::Boss => tuning.boss_speed,
    }
}

pub(crate) fn tick_enemies(world: &mut World, dt: Duration, events: &mut Vec<Event>) {
    let now = world.now;
    let step_seconds = dt.as_secs_f32();
    let field = world.tuning.field.clone();
    let enemy_tuning = world.tuning.enemies.clone();
    let slow_factor = world.tuning.weapons.slow_factor;
    let speed_scale = 1.0 + enemy_tuning.clear_speed_boost * world.bosses_defeated as f32;

    let mut removed: Vec<EnemyId> = Vec::new();
    let mut bagged = false;
    for enemy in &mut world.enemies {
        if let Some(fall_speed) = enemy.fall_speed {
            let y = enemy.position.y() + fall_speed * step_seconds;
            enemy.position = FieldPoint::new(enemy.position.x(), y);
            if y > field.height + enemy_tuning.fall_removal_margin {
                removed.push(enemy.id);
            }
            continue;
        }
        if enemy.tier == EnemyTier::Boss && now >= enemy.next_jump_at && !enemy.slipping(now) {
            let window = Duration::from_millis(enemy_tuning.jump_window_ms);
            enemy.jump_until = Some(now + window);
            enemy.next_jump_at = now + window + jump_cooldown(&enemy_tuning, enemy.hp);
        }
        if enemy.slipping(now) {
            continue;
        }
        let mut speed = base_speed(&enemy_tuning, enemy.tier) * speed_scale;
        if enemy.slowed(now) {
            speed *= slow_factor;
        }
        enemy.position = enemy
            .position
            .step_toward(field.bag_center, speed * step_seconds);
        if enemy.position.distance_to(field.bag_center) <= field.bag_radius {
            world.bag_load += enemy.hp.rounded_points();
            events.push(Event::EnemyBagged {
                enemy: enemy.id,
                load: world.bag_load,
            });
            if enemy.tier == EnemyTier::Boss {
                world.boss_alive = false;
            }
            removed.push(enemy.id);
            bagged = true;
        }
    }
    world.enemies.retain(|enemy| !removed.contains(&enemy.id));

    if bagged && world.outcome.is_none() && world.bag_load >= world.tuning.spawning.bag_limit {
        world.outcome = Some(Outcome::Lost);
        world.schedule.clear();
        events.push(Event::BattleLost);
    }
}

pub(crate) fn enemy_index(world: &World, enemy: EnemyId) -> Option<usize> {
    world.enemies.iter().position(|candidate| candidate.id == enemy)
}

/// Applies damage to a living enemy, handling death and win bookkeeping.
pub(crate) fn damage_enemy(
    world: &mut World,
    index: usize,
    damage: Damage,
    events: &mut Vec<Event>,
) {
    let fall_min = world.tuning.enemies.fall_speed_min;
    let fall_spread = world.tuning.enemies.fall_speed_spread;
    let Some(enemy) = world.enemies.get_mut(index) else {
        return;
    };
    if !enemy.in_combat() {
        return;
    }
    enemy.hp = enemy.hp.saturating_sub(damage);
    events.push(Event::EnemyDamaged {
        enemy: enemy.id,
        damage,
        remaining: enemy.hp,
    });
    if !enemy.hp.is_zero() {
        return;
    }
    let coins = u64::from(enemy.max_hp.rounded_points());
    let id = enemy.id;
    let was_boss = enemy.tier == EnemyTier::Boss;
    enemy.fall_speed = Some(fall_min + world.rng.gen::<f32>() * fall_spread);
    events.push(Event::EnemyKilled { enemy: id, coins });
    let balance = world.economy.credit(coins);
    events.push(Event::CoinsChanged { balance });
    if was_boss {
        world.boss_alive = false;
        world.bosses_defeated += 1;
        events.push(Event::BossDefeated {
            defeated: world.bosses_defeated,
        });
        if world.bosses_defeated >= world.tuning.spawning.max_bosses {
            win_battle(world, events);
        }
    }
}

fn win_battle(world: &mut World, events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        return;
    }
    world.outcome = Some(Outcome::Won);
    world.schedule.clear();
    for slot in &world.slots {
        if matches!(slot.state, SlotState::Turret(_)) {
            events.push(Event::TurretCelebrated { slot: slot.id });
        }
    }
    events.push(Event::BattleWon);
}
