use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum EditResult {
    /// `changed` counts placed tiles, removed objects or previewed cells,
    /// depending on the action.
    Success { changed: usize },
    Error(EditError),
}

impl EditResult {
    pub fn is_success(&self) -> bool {
        matches!(self, EditResult::Success { .. })
    }

    pub fn changed(&self) -> usize {
        match self {
            EditResult::Success { changed } => *changed,
            EditResult::Error(_) => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum EditError {
    OutOfBounds,
    /// Only non-base terrain groups can be placed; grass comes back through
    /// demolition.
    InvalidGroup,
    InvalidItem,
    /// The start cell already has the group or hosts an item.
    Refused,
    /// The cell is not bare grass.
    Occupied,
}
