use thiserror::Error;

/// Errors reported by the checked map operations.
///
/// All of them are caller input problems: a failing operation leaves the map
/// exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    /// The key cannot be ordered, not even against itself (e.g. `f64::NAN`).
    #[error("key is not comparable")]
    InvalidKey,
    /// `insert` was called with a key that is already in the map.
    #[error("duplicate key")]
    DuplicateKey,
    /// `get`, `put` or `remove` was called with a key that is not in the map.
    #[error("key not found")]
    KeyNotFound,
}

pub type Result<T, E = MapError> = std::result::Result<T, E>;
