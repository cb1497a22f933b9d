//! # PgAccess
//!
//! A generic PostgreSQL data-access layer: typed request builders that render
//! parameterized SQL, a pooled executor that classifies every result into an
//! `Outcome`, transactions that own their connection, and the two session
//! queries an authentication service needs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pgaccess::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Member {
//!     m_name: String,
//!     email: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "auth".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let access = PgAccess::init(&config, TableNameConfig::default()).await?;
//!     let executor = access.executor();
//!
//!     let mut tx = executor.begin_transaction().await?;
//!     let member = FieldMap::new().set("m_name", "alice").set("email", "alice@example.com");
//!     executor.insert_one(&InsertOne::new("members", member), tx.conn()).await?;
//!     tx.commit(None).await?;
//!
//!     let lookup = SessionLookup::new("token", 3600, "phone", "10.0.0.1");
//!     match executor.lookup_member_by_session::<Member>(&lookup, None).await {
//!         Ok(member) => println!("{} <{}>", member.m_name, member.email),
//!         Err(e) if e.kind() == ErrorKind::Unauthorized => println!("please sign in"),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     access.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod prelude;

pub use crate::core::PgAccess;
pub use errors::PgAccessError;

// Re-export the member crates
pub use config;
pub use pg_store;
pub use type_mapping;

pub use async_trait;
pub use sqlx;
