//! Set of highlighted scene objects.

use std::collections::HashSet;

use bevy::prelude::*;

/// A selectable object on the map: the tile at a cell, or the item on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneObject {
    Tile(IVec2),
    Item(IVec2),
}

impl SceneObject {
    pub fn cell(self) -> IVec2 {
        match self {
            SceneObject::Tile(p) | SceneObject::Item(p) => p,
        }
    }
}

/// What a selection update changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDiff {
    pub deselected: Vec<SceneObject>,
    pub selected: Vec<SceneObject>,
}

impl SelectionDiff {
    pub fn is_empty(&self) -> bool {
        self.deselected.is_empty() && self.selected.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    objects: HashSet<SceneObject>,
}

impl Selection {
    pub fn contains(&self, object: &SceneObject) -> bool {
        self.objects.contains(object)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Replaces the selection with `objects`.
    pub fn select(&mut self, objects: HashSet<SceneObject>) -> SelectionDiff {
        let deselected = self.objects.difference(&objects).copied().collect();
        let selected = objects.difference(&self.objects).copied().collect();
        self.objects = objects;
        SelectionDiff {
            deselected,
            selected,
        }
    }

    pub fn deselect_all(&mut self) -> SelectionDiff {
        SelectionDiff {
            deselected: self.objects.drain().collect(),
            selected: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(cells: &[(i32, i32)]) -> HashSet<SceneObject> {
        cells
            .iter()
            .map(|&(x, y)| SceneObject::Tile(IVec2::new(x, y)))
            .collect()
    }

    fn sorted(mut v: Vec<SceneObject>) -> Vec<IVec2> {
        let mut cells: Vec<IVec2> = v.drain(..).map(SceneObject::cell).collect();
        cells.sort_by_key(|p| (p.x, p.y));
        cells
    }

    #[test]
    fn test_superset_only_selects_new() {
        let mut sel = Selection::default();
        sel.select(tiles(&[(0, 0)]));
        let diff = sel.select(tiles(&[(0, 0), (1, 0)]));
        assert!(diff.deselected.is_empty());
        assert_eq!(sorted(diff.selected), vec![IVec2::new(1, 0)]);
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn test_subset_only_deselects_removed() {
        let mut sel = Selection::default();
        sel.select(tiles(&[(0, 0), (1, 0)]));
        let diff = sel.select(tiles(&[(1, 0)]));
        assert_eq!(sorted(diff.deselected), vec![IVec2::new(0, 0)]);
        assert!(diff.selected.is_empty());
    }

    #[test]
    fn test_disjoint_swaps_everything() {
        let mut sel = Selection::default();
        sel.select(tiles(&[(0, 0), (1, 0)]));
        let diff = sel.select(tiles(&[(5, 5)]));
        assert_eq!(sorted(diff.deselected), vec![IVec2::new(0, 0), IVec2::new(1, 0)]);
        assert_eq!(sorted(diff.selected), vec![IVec2::new(5, 5)]);
        assert!(sel.contains(&SceneObject::Tile(IVec2::new(5, 5))));
    }

    #[test]
    fn test_tile_and_item_on_same_cell_are_distinct() {
        let mut sel = Selection::default();
        let p = IVec2::new(2, 2);
        sel.select([SceneObject::Tile(p)].into_iter().collect());
        let diff = sel.select([SceneObject::Item(p)].into_iter().collect());
        assert_eq!(diff.deselected, vec![SceneObject::Tile(p)]);
        assert_eq!(diff.selected, vec![SceneObject::Item(p)]);
    }

    #[test]
    fn test_deselect_all_empties() {
        let mut sel = Selection::default();
        sel.select(tiles(&[(0, 0), (1, 1)]));
        let diff = sel.deselect_all();
        assert_eq!(diff.deselected.len(), 2);
        assert!(sel.is_empty());
        assert!(sel.deselect_all().is_empty());
    }
}
