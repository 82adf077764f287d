//! `stockbridge-core` — shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no I/O, no framework
//! concerns): typed identifiers, the domain error model, fixed-point money,
//! and paging types.

pub mod error;
pub mod id;
pub mod money;
pub mod page;

pub use error::{DomainError, DomainResult};
pub use id::{ProductId, StockRecordId};
pub use money::Price;
pub use page::{Page, PageRequest};
