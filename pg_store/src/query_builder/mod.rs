//! Query builder utilities
//!
//! Typed request objects for every data-access operation. Each request builds
//! a parameterized [`Statement`]; placeholder numbering always goes through
//! [`Params`], so the Nth placeholder is the Nth parameter.

pub mod delete;
pub mod filter;
pub mod insert;
pub mod params;
pub mod select;
pub mod session;
pub mod sql_generation;
pub mod statement;
pub mod update;
pub mod upsert;


pub use delete::Delete;
pub use filter::{Columns, FieldMap, LogicalOperator};
pub use insert::{InsertMany, InsertOne};
pub use params::Params;
pub use select::Select;
pub use session::{SessionColumns, SessionLookup};
pub use statement::Statement;
pub use update::Update;
pub use upsert::{ExpiryRule, ReplaceIfExpired, Upsert};
