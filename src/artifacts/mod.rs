//! Domain types and algorithms
//!
//! - `commit_id`: Opaque short snapshot identifiers
//! - `errors`: The wit error taxonomy
//! - `ignore`: Ignore patterns and `.witignore` loading
//! - `status`: Status report types

pub mod commit_id;
pub mod errors;
pub mod ignore;
pub mod status;
