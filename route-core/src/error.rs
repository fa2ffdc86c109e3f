use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("at least one node is required")]
    EmptyInput,

    /// Some nodes carry a finite lat/lon pair and others do not.
    #[error("geographic coordinates missing for {missing} of {total} nodes")]
    IncompleteGeoData { missing: usize, total: usize },

    #[error("start index {index} is out of range for {len} nodes")]
    StartOutOfRange { index: usize, len: usize },

    #[error("invalid render config: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    InvalidRoute(String),

    #[error("route JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
