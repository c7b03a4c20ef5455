//! User-facing operations
//!
//! One file per operation, each extending [`Repository`] with the
//! orchestration for that command:
//!
//! - `init`: Create the `.wit` control directory and initial metadata
//! - `add`: Copy files into the staging area
//! - `commit`: Record an immutable snapshot of the staging area
//! - `status`: Classify paths across working tree, staging and last commit
//! - `checkout`: Restore the working tree from a recorded snapshot
//!
//! [`Repository`]: crate::areas::repository::Repository

mod add;
mod checkout;
mod commit;
mod init;
mod status;

pub use commit::CommitOutcome;
