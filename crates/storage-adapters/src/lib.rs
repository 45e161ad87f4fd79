//! # storage-adapters
//!
//! Implementations of `PostRepository` plus the boot-time selector that
//! picks one of them for the life of the process.

pub mod bootstrap;
pub mod memory;
#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use bootstrap::{select_repository, StorageOptions};
pub use memory::InMemoryPostRepository;
#[cfg(feature = "db-postgres")]
pub use postgres::PgPostRepository;
