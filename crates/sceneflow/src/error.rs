//! Error types for the screenplay model.
//!
//! Only the registry's editing operations and configuration loading can
//! fail. The adapter never returns errors: irregular input degrades to an
//! empty or cleared state instead.

/// Result type alias for sceneflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when editing a screenplay or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A row position outside the element sequence.
    #[error("row {row} is out of range for a screenplay with {len} elements")]
    RowOutOfRange { row: usize, len: usize },

    /// The element is already part of a live screenplay.
    #[error("element already belongs to a screenplay")]
    ElementOwned,

    /// The element is not part of this screenplay.
    #[error("element does not belong to this screenplay")]
    ElementNotFound,

    /// Adapter configuration could not be parsed.
    #[error("invalid adapter configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Create a row out of range error.
    pub fn row_out_of_range(row: usize, len: usize) -> Self {
        Self::RowOutOfRange { row, len }
    }
}
