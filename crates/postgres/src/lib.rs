//! # Postgres
//!
//! This crate provides the storage layer for the hotel booking application:
//! a connection pool, entity row types, a generic repository engine, and a
//! transactional unit of work.

/// Connection pool construction and health checks.
pub mod database;
/// Storage error type.
pub mod error;
/// Filter predicates compiled into WHERE clauses.
pub mod filter;
/// Generic CRUD repository parametrized by an entity descriptor.
pub mod repository;
/// Entity row types and insert/patch payloads.
pub mod types;
/// Transactional unit of work exposing per-entity repositories.
pub mod uow;
/// SQL parameter values and binding.
pub mod value;

pub use error::StoreError;
pub use filter::Filter;
pub use repository::{Field, Payload, Repository, Table};
pub use uow::UnitOfWork;
pub use value::SqlValue;
