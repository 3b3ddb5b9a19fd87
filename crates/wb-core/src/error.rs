use thiserror::Error;

/// Rejected shape requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The requested type name is not one of the supported shape types.
    #[error("unknown shape type `{0}`")]
    UnknownShapeType(String),
}
