//! Projectile launch, flight, and impact resolution.
//!
//! Shots arrive as scheduled callbacks so that firing cadence survives
//! uneven tick sizes. Projectiles home on their target each tick and
//! resolve their weapon's behaviour on arrival: splash, slip, slow, chain
//! hops, or the coconut's in-flight grazing. A target inside a boss jump
//! window consumes the projectile without taking damage.

use std::time::Duration;

use rand::Rng;
use word_siege_core::{
    Damage, EnemyId, Event, FieldPoint, ProjectileId, ProjectileSnapshot, SlotId, TurretId,
    WeaponKind,
};

use crate::enemies::{damage_enemy, enemy_index, jump_cooldown};
use crate::schedule::Callback;
use crate::turrets::{callback_target, finish_fire_sequence, FiringState, SlotState};
use crate::World;

#[derive(Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) weapon: WeaponKind,
    pub(crate) damage: Damage,
    pub(crate) position: FieldPoint,
    pub(crate) source: SlotId,
    pub(crate) target: EnemyId,
    /// Enemies already grazed by a coconut in flight.
    pub(crate) grazed: Vec<EnemyId>,
}

impl Projectile {
    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            weapon: self.weapon,
            damage: self.damage,
            position: self.position,
            source: self.source,
        }
    }
}

/// Front-most living enemy: the one closest to the bag, lowest id breaking
/// ties.
fn front_most(world: &World) -> Option<EnemyId> {
    let bag = world.tuning.field.bag_center;
    world
        .enemies
        .iter()
        .filter(|enemy| enemy.in_combat())
        .min_by(|a, b| {
            a.position
                .distance_to(bag)
                .partial_cmp(&b.position.distance_to(bag))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.cmp(&b.id))
        })
        .map(|enemy| enemy.id)
}

/// Highest-hp living enemy, lowest id breaking ties.
fn highest_hp(world: &World) -> Option<EnemyId> {
    world
        .enemies
        .iter()
        .filter(|enemy| enemy.in_combat())
        .max_by(|a, b| a.hp.cmp(&b.hp).then(b.id.cmp(&a.id)))
        .map(|enemy| enemy.id)
}

fn launch(
    world: &mut World,
    source: SlotId,
    position: FieldPoint,
    weapon: WeaponKind,
    damage: Damage,
    target: EnemyId,
    events: &mut Vec<Event>,
) {
    let id = ProjectileId::new(world.next_projectile);
    world.next_projectile += 1;
    world.projectiles.push(Projectile {
        id,
        weapon,
        damage,
        position,
        source,
        target,
        grazed: Vec::new(),
    });
    events.push(Event::ProjectileFired {
        slot: source,
        projectile: id,
        weapon,
        damage,
    });
}

/// Splits a damage total across `count` targets without creating or losing
/// half-points: every share gets the floor, the remainder tops up the first
/// shares, and zero shares are dropped entirely.
fn split_damage(total: Damage, count: usize) -> Vec<u32> {
    let half_points = total.half_points();
    let count_u32 = count as u32;
    let share = half_points / count_u32;
    let remainder = (half_points % count_u32) as usize;
    (0..count)
        .map(|index| share + u32::from(index < remainder))
        .filter(|&half| half > 0)
        .collect()
}

/// Delivers one shot of an active fire sequence and schedules the next.
pub(crate) fn handle_fire_shot(
    world: &mut World,
    slot: SlotId,
    turret: TurretId,
    events: &mut Vec<Event>,
) {
    let Some(index) = callback_target(world, slot, turret) else {
        return;
    };
    let (weapon, level, remaining) = {
        let SlotState::Turret(current) = &world.slots[index].state else {
            return;
        };
        let FiringState::Active { remaining } = current.firing else {
            return;
        };
        (current.weapon, current.level, remaining)
    };
    let anchor = world.slots[index].anchor;
    let damage = Damage::from_points(level);

    if weapon.fans_out() {
        let targets: Vec<EnemyId> = world
            .enemies
            .iter()
            .filter(|enemy| enemy.in_combat())
            .map(|enemy| enemy.id)
            .collect();
        if targets.is_empty() {
            events.push(Event::ShotSuppressed { slot });
        } else {
            let shares = split_damage(damage, targets.len());
            for (target, half_points) in targets.into_iter().zip(shares) {
                let share = Damage::from_half_points(half_points);
                launch(world, slot, anchor, weapon, share, target, events);
            }
        }
    } else {
        let target = if weapon.targets_highest_hp() {
            highest_hp(world)
        } else {
            front_most(world)
        };
        match target {
            Some(target) => launch(world, slot, anchor, weapon, damage, target, events),
            None => events.push(Event::ShotSuppressed { slot }),
        }
    }

    let remaining = remaining - 1;
    {
        let SlotState::Turret(current) = &mut world.slots[index].state else {
            return;
        };
        current.firing = FiringState::Active { remaining };
    }
    if remaining == 0 {
        finish_fire_sequence(world, index, events);
        return;
    }
    let interval = next_interval(world, weapon);
    let due = world.now + interval;
    world.schedule.push(due, Callback::FireShot { slot, turret });
}

/// Jittered reload for the next shot, with per-weapon adjustments.
fn next_interval(world: &mut World, weapon: WeaponKind) -> Duration {
    let firing = world.tuning.firing.clone();
    let jitter = world.rng.gen_range(0..=firing.jitter_ms * 2) as i64 - firing.jitter_ms as i64;
    let mut millis = (firing.base_interval_ms as i64 + jitter)
        .clamp(firing.min_interval_ms as i64, firing.max_interval_ms as i64);
    match weapon {
        WeaponKind::Cucumber => millis += firing.slow_self_penalty_ms as i64,
        WeaponKind::Grape => millis -= firing.chain_self_benefit_ms as i64,
        _ => {}
    }
    let millis = millis.clamp(firing.min_interval_ms as i64, firing.max_interval_ms as i64);
    Duration::from_millis(millis as u64)
}

pub(crate) fn tick_projectiles(world: &mut World, dt: Duration, events: &mut Vec<Event>) {
    let weapons = world.tuning.weapons.clone();
    let step = weapons.projectile_speed * dt.as_secs_f32();
    let now = world.now;

    let mut projectiles = std::mem::take(&mut world.projectiles);
    projectiles.retain_mut(|projectile| {
        // Re-acquire the target; a dead or despawned target forces a
        // retarget, except for fan-out shards which simply dissipate.
        let target_alive = enemy_index(world, projectile.target)
            .map(|index| world.enemies[index].in_combat())
            .unwrap_or(false);
        if !target_alive {
            if projectile.weapon.fans_out() {
                return false;
            }
            let retarget = if projectile.weapon.targets_highest_hp() {
                highest_hp(world)
            } else {
                front_most(world)
            };
            match retarget {
                Some(target) => projectile.target = target,
                None => return false,
            }
        }

        if projectile.weapon == WeaponKind::Coconut {
            graze_pass(world, projectile, &weapons, events);
        }

        let Some(target_index) = enemy_index(world, projectile.target) else {
            return false;
        };
        let target_position = world.enemies[target_index].position;
        projectile.position = projectile.position.step_toward(target_position, step);
        if projectile.position.distance_to(target_position) > weapons.arrival_slack {
            return true;
        }

        // Arrival.
        if world.enemies[target_index].jumping(now) {
            return false;
        }
        let dodge_nth = world.tuning.enemies.boss_dodge_nth;
        let jump_window = Duration::from_millis(world.tuning.enemies.jump_window_ms);
        let enemy = &mut world.enemies[target_index];
        enemy.hit_count += 1;
        if enemy.tier == word_siege_core::EnemyTier::Boss
            && dodge_nth > 0
            && enemy.hit_count % dodge_nth == 0
        {
            // The dodged hit throws the boss into its jump window.
            enemy.jump_until = Some(now + jump_window);
            enemy.next_jump_at =
                now + jump_window + jump_cooldown(&world.tuning.enemies, enemy.hp);
            events.push(Event::BossDodged {
                enemy: enemy.id,
                hit_count: enemy.hit_count,
            });
            return false;
        }
        resolve_impact(world, projectile, target_index, &weapons, events);
        false
    });
    world.projectiles = projectiles;
}

/// Coconut flight pass: graze every normal-tier enemy the projectile passes
/// close to, each at most once.
fn graze_pass(
    world: &mut World,
    projectile: &mut Projectile,
    weapons: &word_siege_core::tuning::WeaponTuning,
    events: &mut Vec<Event>,
) {
    let graze = projectile.damage.scaled(weapons.pierce_ratio);
    let candidates: Vec<usize> = world
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, enemy)| {
            enemy.in_combat()
                && enemy.tier == word_siege_core::EnemyTier::Normal
                && enemy.id != projectile.target
                && !projectile.grazed.contains(&enemy.id)
                && projectile.position.distance_to(enemy.position) <= weapons.pierce_radius
        })
        .map(|(index, _)| index)
        .collect();
    for index in candidates {
        projectile.grazed.push(world.enemies[index].id);
        damage_enemy(world, index, graze, events);
    }
}

fn resolve_impact(
    world: &mut World,
    projectile: &Projectile,
    target_index: usize,
    weapons: &word_siege_core::tuning::WeaponTuning,
    events: &mut Vec<Event>,
) {
    let now = world.now;
    let impact_point = world.enemies[target_index].position;
    let target_id = world.enemies[target_index].id;
    damage_enemy(world, target_index, projectile.damage, events);

    match projectile.weapon {
        WeaponKind::Apple => {
            let splash = projectile.damage.scaled(weapons.splash_ratio);
            let neighbours: Vec<usize> = world
                .enemies
                .iter()
                .enumerate()
                .filter(|(_, enemy)| {
                    enemy.in_combat()
                        && enemy.id != target_id
                        && enemy.position.distance_to(impact_point) <= weapons.splash_radius
                })
                .map(|(index, _)| index)
                .collect();
            for index in neighbours {
                damage_enemy(world, index, splash, events);
            }
        }
        WeaponKind::Banana => {
            if let Some(enemy) = world
                .enemies
                .get_mut(target_index)
                .filter(|enemy| enemy.in_combat())
            {
                enemy.slip_until = Some(now + Duration::from_millis(weapons.slip_duration_ms));
            }
        }
        WeaponKind::Cucumber => {
            if let Some(enemy) = world
                .enemies
                .get_mut(target_index)
                .filter(|enemy| enemy.in_combat())
            {
                enemy.slow_until = Some(now + Duration::from_millis(weapons.slow_duration_ms));
            }
        }
        WeaponKind::Grape => {
            chain_hops(world, projectile.damage, impact_point, target_id, events);
        }
        WeaponKind::Pear | WeaponKind::Coconut | WeaponKind::Blueberry => {}
    }
}

/// Grape chain: halved damage jumps to the nearest unvisited enemy until
/// the halved amount drops below a full point or no enemies remain.
fn chain_hops(
    world: &mut World,
    impact_damage: Damage,
    mut from: FieldPoint,
    first: EnemyId,
    events: &mut Vec<Event>,
) {
    let mut visited = vec![first];
    let mut hop = impact_damage.halved();
    while let Some(damage) = hop {
        let next = world
            .enemies
            .iter()
            .filter(|enemy| enemy.in_combat() && !visited.contains(&enemy.id))
            .min_by(|a, b| {
                a.position
                    .distance_to(from)
                    .partial_cmp(&b.position.distance_to(from))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.id.cmp(&b.id))
            })
            .map(|enemy| (enemy.id, enemy.position));
        let Some((id, position)) = next else {
            break;
        };
        let Some(index) = enemy_index(world, id) else {
            break;
        };
        damage_enemy(world, index, damage, events);
        visited.push(id);
        from = position;
        hop = damage.halved();
    }
}
