//! History of the edits the park applied, newest last.
//!
//! Each record keeps which kind of edit ran, who asked for it and what it did
//! to the map. Scripts read it after an update to learn how many cells a
//! span, item or demolition changed, or why it was refused.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::{EditAction, EditResult, EditSource};

/// Records kept before the oldest is dropped.
pub const HISTORY_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    PlaceTileSpan,
    PreviewTileSpan,
    PlaceItem,
    PreviewItem,
    Demolish,
    PreviewDemolish,
    HidePreviews,
    DeselectAll,
}

impl EditKind {
    pub fn of(action: &EditAction) -> Self {
        match action {
            EditAction::PlaceTileSpan { .. } => EditKind::PlaceTileSpan,
            EditAction::PreviewTileSpan { .. } => EditKind::PreviewTileSpan,
            EditAction::PlaceItem { .. } => EditKind::PlaceItem,
            EditAction::PreviewItem { .. } => EditKind::PreviewItem,
            EditAction::DemolishRect { .. } => EditKind::Demolish,
            EditAction::PreviewDemolish { .. } => EditKind::PreviewDemolish,
            EditAction::HidePreviews => EditKind::HidePreviews,
            EditAction::DeselectAll => EditKind::DeselectAll,
        }
    }

    /// Whether this kind writes to the committed map.
    pub fn commits(self) -> bool {
        matches!(
            self,
            EditKind::PlaceTileSpan | EditKind::PlaceItem | EditKind::Demolish
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    pub kind: EditKind,
    pub source: EditSource,
    pub result: EditResult,
}

impl EditRecord {
    /// Cells the edit changed on the committed map. Previews and refused
    /// edits change none.
    pub fn committed_cells(&self) -> usize {
        if self.kind.commits() {
            self.result.changed()
        } else {
            0
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct EditResultLog {
    records: VecDeque<EditRecord>,
}

impl EditResultLog {
    pub fn record(&mut self, source: EditSource, action: &EditAction, result: EditResult) {
        if self.records.len() == HISTORY_LEN {
            self.records.pop_front();
        }
        self.records.push_back(EditRecord {
            kind: EditKind::of(action),
            source,
            result,
        });
    }

    pub fn last(&self) -> Option<&EditRecord> {
        self.records.back()
    }

    /// The newest `n` records, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &EditRecord> + '_ {
        self.records.iter().skip(self.records.len().saturating_sub(n))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
