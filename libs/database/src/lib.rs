//! PostgreSQL connection management and repository primitives.
//!
//! Provides a configured SeaORM connector (with retry and migration
//! running) plus the [`BaseRepository`] used by the domain crates'
//! postgres repository implementations.
//!
//! # Examples
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let db = postgres::connect_with_retry(&db_url, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "provhub-api").await?;
//! ```

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};
pub use repository::BaseRepository;
