pub mod actions;
pub mod executor;
pub mod plugin;
pub mod queue;
pub mod result_log;
pub mod results;

pub use actions::*;
pub use executor::{execute_edit_actions, execute_single};
pub use plugin::EditActionsPlugin;
pub use queue::*;
pub use result_log::{EditKind, EditRecord, EditResultLog, HISTORY_LEN};
pub use results::*;
