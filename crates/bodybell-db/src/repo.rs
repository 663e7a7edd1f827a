//! Repository traits
//!
//! Define async repository interfaces for catalog operations.

use async_trait::async_trait;
use bodybell_types::{
    Album, AlbumId, AlbumPatch, Artist, ArtistId, ArtistPatch, NewAlbum, NewArtist,
};

use crate::error::{DbError, DbResult};

/// Artist repository trait
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    /// Create an artist; the store assigns the id
    async fn create(&self, input: NewArtist) -> DbResult<Artist>;

    /// Create an artist under a caller-chosen id. Returns `None` if the id
    /// is already taken, leaving the existing record untouched.
    async fn insert_with_id(&self, id: &ArtistId, input: NewArtist) -> DbResult<Option<Artist>>;

    /// Find an artist by id
    async fn find(&self, id: &ArtistId) -> DbResult<Option<Artist>>;

    /// Get an artist by id, failing with `NotFound`
    async fn get(&self, id: &ArtistId) -> DbResult<Artist> {
        self.find(id).await?.ok_or(DbError::NotFound)
    }

    /// Merge a patch into an existing artist and refresh `updated_at`
    async fn update(&self, id: &ArtistId, patch: ArtistPatch) -> DbResult<Artist>;

    /// Delete an artist
    async fn delete(&self, id: &ArtistId) -> DbResult<()>;

    /// All artists in store order
    async fn list(&self) -> DbResult<Vec<Artist>>;
}

/// Album repository trait
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    /// Create an album; the store assigns the id
    async fn create(&self, input: NewAlbum) -> DbResult<Album>;

    /// Create an album under a caller-chosen id, `None` if taken
    async fn insert_with_id(&self, id: &AlbumId, input: NewAlbum) -> DbResult<Option<Album>>;

    /// Find an album by id
    async fn find(&self, id: &AlbumId) -> DbResult<Option<Album>>;

    /// Get an album by id, failing with `NotFound`
    async fn get(&self, id: &AlbumId) -> DbResult<Album> {
        self.find(id).await?.ok_or(DbError::NotFound)
    }

    /// Merge a patch into an existing album and refresh `updated_at`
    async fn update(&self, id: &AlbumId, patch: AlbumPatch) -> DbResult<Album>;

    /// Delete an album
    async fn delete(&self, id: &AlbumId) -> DbResult<()>;

    /// All albums in store order
    async fn list(&self) -> DbResult<Vec<Album>>;

    /// Albums referencing the given artist
    async fn list_by_artist(&self, artist_id: &ArtistId) -> DbResult<Vec<Album>>;
}
