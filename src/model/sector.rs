use serde::{Deserialize, Serialize};

/// Spaces of indentation per hierarchy level in a sector listing.
const INDENT_PER_LEVEL: usize = 4;

/// A selectable sector as supplied by the backend.
///
/// `level` only drives display indentation; `parent_id` is carried through
/// when the backend sends it but nothing in the client walks the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

impl Sector {
    /// Returns the name indented by four spaces per level.
    pub fn display_label(&self) -> String {
        let indent = " ".repeat(self.level as usize * INDENT_PER_LEVEL);
        format!("{indent}{}", self.name)
    }
}

/// Reference to a sector by id, as it appears inside a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectorRef {
    pub id: i64,
}
