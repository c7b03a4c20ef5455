//! wit — a tiny snapshot-based version control engine
//!
//! wit tracks a working directory through an explicit staging step, records
//! immutable directory-copy commits under `.wit/images/`, and reports the
//! differences between the working tree, the staging area and the latest
//! commit.
//!
//! The engine is synchronous and single-process: every operation performs
//! blocking filesystem I/O and assumes at most one wit process is touching
//! the repository at a time. Metadata updates are not atomic, so concurrent
//! invocations can corrupt `.wit/metadata.json`.

pub mod areas;
pub mod artifacts;
pub mod commands;
