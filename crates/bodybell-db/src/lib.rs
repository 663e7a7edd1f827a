//! Body Bell DB - Catalog persistence
//!
//! Artist and album repositories with a PostgreSQL implementation (SQLx) and
//! an in-memory implementation for local runs and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use bodybell_db::{create_pool, run_migrations, Repositories};
//!
//! let pool = create_pool("postgres://localhost/bodybell").await?;
//! run_migrations(&pool).await?;
//! let repos = Repositories::postgres(pool);
//!
//! let artists = repos.artists.list().await?;
//! ```

pub mod catalog;
pub mod error;
pub mod memory;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;
pub mod seed;

pub use catalog::Repositories;
pub use error::{DbError, DbResult};
pub use memory::{InMemoryAlbumRepository, InMemoryArtistRepository};
pub use pg::{PgAlbumRepository, PgArtistRepository};
pub use pool::{create_pool, run_migrations, DbPool};
pub use repo::*;
pub use seed::{seed_catalog, SeedReport};
