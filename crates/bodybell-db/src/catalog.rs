//! Repository bundle and cross-collection reads

use std::collections::HashMap;
use std::sync::Arc;

use bodybell_types::{AlbumId, AlbumWithArtist, Artist, ArtistId, ArtistWithAlbums};
use tracing::warn;

use crate::error::{DbError, DbResult};
use crate::memory::{InMemoryAlbumRepository, InMemoryArtistRepository};
use crate::pg::{PgAlbumRepository, PgArtistRepository};
use crate::repo::{AlbumRepository, ArtistRepository};
use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub artists: Arc<dyn ArtistRepository>,
    pub albums: Arc<dyn AlbumRepository>,
    pool: Option<DbPool>,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            artists: Arc::new(PgArtistRepository::new(pool.clone())),
            albums: Arc::new(PgAlbumRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Process-local repositories; contents are lost on restart
    pub fn in_memory() -> Self {
        Self {
            artists: Arc::new(InMemoryArtistRepository::new()),
            albums: Arc::new(InMemoryAlbumRepository::new()),
            pool: None,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.pool.is_some()
    }

    /// Round-trip to the store
    pub async fn ping(&self) -> DbResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }

    /// An album joined with its artist. A missing artist is a lookup miss.
    pub async fn album_with_artist(&self, id: &AlbumId) -> DbResult<AlbumWithArtist> {
        let album = self.albums.get(id).await?;
        let Some(artist) = self.artists.find(&album.artist_id).await? else {
            warn!(album_id = %album.id, artist_id = %album.artist_id, "album references missing artist");
            return Err(DbError::NotFound);
        };
        Ok(AlbumWithArtist { album, artist })
    }

    /// Every album joined with its artist, skipping albums whose artist is gone
    pub async fn albums_with_artists(&self) -> DbResult<Vec<AlbumWithArtist>> {
        let albums = self.albums.list().await?;
        let artists: HashMap<ArtistId, Artist> = self
            .artists
            .list()
            .await?
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect();

        Ok(albums
            .into_iter()
            .filter_map(|album| match artists.get(&album.artist_id) {
                Some(artist) => Some(AlbumWithArtist {
                    artist: artist.clone(),
                    album,
                }),
                None => {
                    warn!(album_id = %album.id, artist_id = %album.artist_id, "skipping album with missing artist");
                    None
                }
            })
            .collect())
    }

    /// An artist with all albums referencing it
    pub async fn artist_with_albums(&self, id: &ArtistId) -> DbResult<ArtistWithAlbums> {
        let artist = self.artists.get(id).await?;
        let albums = self.albums.list_by_artist(id).await?;
        Ok(ArtistWithAlbums { artist, albums })
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories")
            .field("persistent", &self.is_persistent())
            .finish()
    }
}
