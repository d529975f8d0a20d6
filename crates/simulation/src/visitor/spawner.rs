use bevy::prelude::*;

use crate::config::ParkConfig;
use crate::sim_rng::SimRng;

use super::{spawn_visitor, Visitor};

/// Releases a visitor into the park every `spawn_interval` seconds until
/// `max_visitors` are walking around.
#[derive(Resource, Debug, Clone)]
pub struct VisitorSpawner {
    pub timer: Timer,
    pub spawned: u32,
}

impl VisitorSpawner {
    pub fn new(interval: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval, TimerMode::Repeating),
            spawned: 0,
        }
    }
}

impl FromWorld for VisitorSpawner {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<ParkConfig>()
            .map(|c| c.visitor.spawn_interval)
            .unwrap_or_else(|| ParkConfig::default().visitor.spawn_interval);
        Self::new(interval)
    }
}

pub fn spawn_visitors(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<ParkConfig>,
    mut spawner: ResMut<VisitorSpawner>,
    mut rng: ResMut<SimRng>,
    visitors: Query<(), With<Visitor>>,
) {
    spawner.timer.tick(time.delta());
    let due = spawner.timer.times_finished_this_tick();
    if due == 0 {
        return;
    }

    let live = visitors.iter().count() as u32;
    let room = config.visitor.max_visitors.saturating_sub(live);
    for _ in 0..due.min(room) {
        if spawn_visitor(&mut commands, &config, &mut *rng).is_none() {
            warn!("park has no entry columns, no visitors can enter");
            return;
        }
        spawner.spawned += 1;
    }
}
