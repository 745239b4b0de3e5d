use crate::domain::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored collection could not be read or parsed
    #[error("deadline storage unavailable: {0:#}")]
    StorageUnavailable(anyhow::Error),
    /// The new snapshot could not be written
    #[error("could not save deadlines: {0:#}")]
    PersistenceFailure(anyhow::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
