//! Ordering of the park systems within `Update`.
//!
//! ```text
//! Edits  →  Visitors
//! ```
//!
//! * **Edits** – queued map edits are applied. Navigation is reclassified
//!   inside each edit, so it is consistent again once the phase ends.
//! * **Visitors** – spawning and walking. Visitors only read navigation, so
//!   they always see a topology that no edit is halfway through.
//!
//! Rendering systems run after `Visitors`.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Edits,
    Visitors,
}
