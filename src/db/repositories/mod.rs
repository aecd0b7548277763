//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod hookup_repo;

pub use hookup_repo::{HookupRepository, RowLock};
