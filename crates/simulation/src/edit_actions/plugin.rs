use bevy::prelude::*;

use super::executor::execute_edit_actions;
use super::result_log::EditResultLog;
use super::EditQueue;
use crate::SimulationSet;

/// Registers the edit queue, result log and executor system.
pub struct EditActionsPlugin;

impl Plugin for EditActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditQueue>();
        app.init_resource::<EditResultLog>();

        app.add_systems(Update, execute_edit_actions.in_set(SimulationSet::Edits));
    }
}
