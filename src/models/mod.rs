//! Domain models
//!
//! Database rows and the response shapes built from them.

pub mod hookup;

pub use hookup::{
    Gender, Hookup, HookupDetails, HookupFilter, HookupPhoto, HookupStatus, HookupWinner,
    SortOrder,
};
