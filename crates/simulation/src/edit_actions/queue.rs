use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::EditAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditSource {
    Player,
    Script,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedEdit {
    pub source: EditSource,
    pub action: EditAction,
}

/// Edits waiting for the next update. Executed in push order.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditQueue {
    pending: Vec<QueuedEdit>,
}

impl EditQueue {
    pub fn push(&mut self, source: EditSource, action: EditAction) {
        self.pending.push(QueuedEdit { source, action });
    }

    pub fn drain(&mut self) -> Vec<QueuedEdit> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile_generator::FloorGroup;
    use crate::tile_map::ItemType;

    #[test]
    fn push_and_drain_preserves_fifo() {
        let mut queue = EditQueue::default();
        queue.push(EditSource::Player, EditAction::HidePreviews);
        queue.push(
            EditSource::Script,
            EditAction::PlaceItem {
                pos: (1, 2),
                item: ItemType::Tree,
            },
        );
        queue.push(
            EditSource::Player,
            EditAction::PlaceTileSpan {
                start: (0, 0),
                end: (4, 0),
                group: FloorGroup::WalkwayOnGrass,
                flipped: false,
            },
        );

        assert_eq!(queue.len(), 3);
        let drained = queue.drain();
        assert!(queue.is_empty());
        assert_eq!(drained[0].action, EditAction::HidePreviews);
        assert_eq!(drained[1].source, EditSource::Script);
        assert!(matches!(drained[2].action, EditAction::PlaceTileSpan { .. }));
    }

    #[test]
    fn queue_serializes_as_json() {
        let mut queue = EditQueue::default();
        queue.push(
            EditSource::Script,
            EditAction::DemolishRect {
                min: (0, 0),
                max: (2, 2),
            },
        );
        let json = serde_json::to_string(&queue).unwrap();
        let restored: EditQueue = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, queue);
    }
}
