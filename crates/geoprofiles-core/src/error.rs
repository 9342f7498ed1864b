// crates/geoprofiles-core/src/error.rs
use thiserror::Error;

/// Errors raised by the region model, registry, loader and stores.
///
/// Indicator computations do not surface these directly: they are folded into
/// [`DataRetrievalError`](crate::indicator::DataRetrievalError) at the
/// indicator boundary.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("not found: {0}")]
    NotFound(String),

    /// The textual uid did not have the `"{type}:{geoid}"` shape.
    #[error("malformed uid {0:?}: expected \"<geogType>:<globalGeoid>\"")]
    MalformedUid(String),

    /// A kind was registered twice. Only possible while the registry is built.
    #[error("region kind {0:?} is already registered")]
    DuplicateKind(&'static str),

    #[error("unknown region kind {0:?}")]
    UnknownKind(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unsupported spatial reference EPSG:{0}")]
    UnsupportedSrid(u32),

    #[error("geometry error: {0}")]
    Geometry(String),

    /// The backing region storage failed to answer a query.
    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, GeoError>;
