//! Repository areas
//!
//! The stateful building blocks of a wit repository:
//!
//! - `images`: Append-only snapshot store (`.wit/images`)
//! - `metadata`: Repository-wide metadata record (`.wit/metadata.json`)
//! - `repository`: High-level repository handle and coordination
//! - `staging`: Staging area mirror (`.wit/staging`)
//! - `workspace`: Working tree file system operations

pub mod images;
pub mod metadata;
pub mod repository;
pub mod staging;
pub mod workspace;
