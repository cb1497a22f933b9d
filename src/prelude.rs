//! Convenience re-exports for common PgAccess usage
//!
//! # Example
//!
//! ```rust
//! use pgaccess::prelude::*;
//! ```

// Core PgAccess components
pub use crate::core::PgAccess;
pub use crate::errors::PgAccessError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, TableNameConfig};

// Requests, executor and outcomes
pub use pg_store::prelude::*;

// Common external dependencies
pub use async_trait;
pub use serde_json::{json, Value};
pub use sqlx;
pub use sqlx::PgPool;
