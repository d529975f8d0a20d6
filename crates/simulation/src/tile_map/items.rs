//! Placing items (trees, walls) on grass cells.

use bevy::prelude::*;

use crate::tile_generator::FloorGroup;

use super::{ItemCell, ItemType, TileMap, TileMapChange};

/// The reusable preview instance of one item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPreview {
    pub item: ItemType,
    pub pos: IVec2,
    pub visible: bool,
}

impl TileMap {
    /// Whether `item` may be placed at `pos`: a grass cell with no item.
    pub fn can_place_item(&self, pos: IVec2, item: ItemType) -> bool {
        item != ItemType::None
            && self.tile_group_at(pos) == FloorGroup::BASE
            && self.item_type_at(pos) == ItemType::None
    }

    /// Shows the preview of `item` at `pos`. The preview instance for each
    /// item type is created once and moved around afterwards.
    pub fn show_temporary_model(&mut self, pos: IVec2, item: ItemType) -> bool {
        if self.item_preview_key == Some((pos, item)) {
            return self.item_previews.iter().any(|p| p.visible);
        }
        self.hide_temporary_models();
        self.item_preview_key = Some((pos, item));

        if !self.can_place_item(pos, item) {
            return false;
        }
        match self.item_previews.iter_mut().find(|p| p.item == item) {
            Some(preview) => {
                preview.pos = pos;
                preview.visible = true;
            }
            None => self.item_previews.push(ItemPreview {
                item,
                pos,
                visible: true,
            }),
        }
        true
    }

    pub fn place_model(&mut self, pos: IVec2, item: ItemType) -> bool {
        if !self.can_place_item(pos, item) {
            return false;
        }
        self.hide_temporary_models();
        if let Some(cell) = self.items.at_mut(pos) {
            *cell = ItemCell { item, origin: pos };
            self.changes.push(TileMapChange::ItemPlaced(pos, item));
            return true;
        }
        false
    }

    /// Clears the item at `pos`, recording the removal. Returns whether there
    /// was one.
    pub(super) fn clear_item(&mut self, pos: IVec2) -> bool {
        match self.items.at_mut(pos) {
            Some(cell) if cell.item != ItemType::None => {
                *cell = ItemCell::default();
                self.changes.push(TileMapChange::ItemRemoved(pos));
                true
            }
            _ => false,
        }
    }
}
