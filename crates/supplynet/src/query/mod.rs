//! Read-only queries over a generated network.
//!
//! All queries take node ids and fail with
//! [`SupplyNetError::NotFound`](crate::SupplyNetError::NotFound) for ids the
//! network does not contain.

mod bom;
mod neighborhood;
mod path;

pub use bom::*;
pub use neighborhood::*;
pub use path::*;
