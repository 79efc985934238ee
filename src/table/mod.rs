//! The shared table and its melds.
//!
//! ## Key Types
//!
//! - `Meld`: contiguous tiles in one row with a known start column
//! - `Table`: all melds, plus the placement/removal rules
//! - `MeldValidator`: the legal-shape predicate (`MinLength` by default)

pub mod meld;
#[allow(clippy::module_inception)]
pub mod table;

pub use meld::{Meld, MeldValidator, MinLength};
pub use table::{Table, MAX_COL};

pub use crate::core::GridSize;
