use serde::{Deserialize, Serialize};

/// Ordered index of the pieces that make up one stored payload.
///
/// Created once when an upload completes and immutable afterwards; replacing
/// a stored payload means writing a new manifest under a new primary id.
/// Piece ids are opaque transport identifiers and are never reinterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Original payload name, as given at upload time.
    pub file_name: String,
    /// Piece ids in ascending piece-index order. Empty for an empty payload.
    #[serde(default)]
    pub ids: Vec<String>,
}

impl Manifest {
    /// Creates a manifest from a name and ordered piece ids.
    pub fn new(file_name: impl Into<String>, ids: Vec<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ids,
        }
    }

    /// Number of pieces recorded.
    pub fn piece_count(&self) -> usize {
        self.ids.len()
    }
}
