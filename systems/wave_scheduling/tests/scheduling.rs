use std::time::Duration;

use word_siege_core::{BattleTuning, Command, Event, Scoreboard};
use word_siege_system_wave_scheduling::WaveScheduler;
use word_siege_world::{apply, query, World};

/// Runs one frame: tick the world, let the scheduler react to the events
/// and the post-tick field, and apply its commands back.
fn pump(world: &mut World, scheduler: &mut WaveScheduler, dt: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, Command::Tick { dt }, &mut events);
    let enemies = query::enemies(world);
    let scoreboard = query::scoreboard(world);
    let mut commands = Vec::new();
    scheduler.handle(&events, &enemies, &scoreboard, &mut commands);
    for command in commands {
        apply(world, command, &mut events);
    }
    events
}

#[test]
fn the_field_fills_with_tasks_over_time() {
    let tuning = BattleTuning::default();
    let mut world = World::new(1, 21, tuning.clone());
    let mut scheduler = WaveScheduler::new(&tuning, 21);

    let mut spawned = 0;
    for _ in 0..120 {
        for event in pump(&mut world, &mut scheduler, Duration::from_millis(500)) {
            if matches!(event, Event::EnemySpawned { .. }) {
                spawned += 1;
            }
        }
    }
    assert!(spawned >= 2, "expected several spawns in a minute");
    assert_eq!(query::enemies(&world).into_vec().len(), spawned);
}

#[test]
fn the_boss_timer_marches_through_the_roster_one_at_a_time() {
    let tuning = BattleTuning::default();
    let mut world = World::new(1, 21, tuning.clone());
    let mut scheduler = WaveScheduler::new(&tuning, 21);

    // Ninety simulated seconds cross the boss interval exactly once.
    for _ in 0..180 {
        let _ = pump(&mut world, &mut scheduler, Duration::from_millis(500));
    }
    let scoreboard: Scoreboard = query::scoreboard(&world);
    assert_eq!(scoreboard.bosses_spawned, 1);
    assert!(scoreboard.boss_alive);
}
