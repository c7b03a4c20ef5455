//! Status report types
//!
//! [`StatusReport`] is the plain data result of the status computation: the
//! last commit pointer and three disjoint, lexicographically ordered lists of
//! relative paths. Rendering is the caller's concern; the engine stays
//! presentation-agnostic.

use crate::artifacts::commit_id::CommitId;
use derive_new::new;
use std::path::PathBuf;

/// Result of one status computation.
///
/// The three lists are disjoint: a path identical across working tree,
/// staging and last commit appears in none of them. Each list is sorted by
/// path, so two computations over an unchanged repository compare equal.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StatusReport {
    pub last_commit: Option<CommitId>,
    pub untracked: Vec<PathBuf>,
    pub not_staged: Vec<PathBuf>,
    pub to_be_committed: Vec<PathBuf>,
}

impl StatusReport {
    pub fn is_clean(&self) -> bool {
        self.untracked.is_empty() && self.not_staged.is_empty() && self.to_be_committed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_clean() {
        let report = StatusReport::new(None, vec![], vec![], vec![]);

        assert!(report.is_clean());
    }

    #[test]
    fn report_with_untracked_files_is_dirty() {
        let report = StatusReport::new(
            Some(CommitId::from_raw("deadbeef")),
            vec![PathBuf::from("new.txt")],
            vec![],
            vec![],
        );

        assert!(!report.is_clean());
    }
}
