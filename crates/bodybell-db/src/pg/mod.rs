//! PostgreSQL repository implementations

mod album;
mod artist;

pub use album::PgAlbumRepository;
pub use artist::PgArtistRepository;
