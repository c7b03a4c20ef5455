use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy surfaced by the engine.
///
/// Every variant is detected synchronously at the violated precondition and
/// propagated to the caller untouched; the engine never retries or repairs.
/// Callers that need to branch on a condition can downcast an
/// `anyhow::Error` back to this enum.
#[derive(Debug, Error)]
pub enum WitError {
    #[error("not a wit repository, run 'wit init' first")]
    NotInitialized,
    #[error("wit repository already initialized")]
    AlreadyInitialized,
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),
    #[error("path is outside the repository: {0}")]
    PathOutsideRepository(PathBuf),
    #[error("commit not found: {0}")]
    CommitNotFound(String),
    #[error("corrupt metadata file: {0}")]
    CorruptMetadata(String),
}
