//! PostgreSQL album repository implementation

use async_trait::async_trait;
use bodybell_types::{clock, Album, AlbumId, AlbumPatch, ArtistId, NewAlbum};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::AlbumRow;
use crate::repo::AlbumRepository;

const ALBUM_COLUMNS: &str = "id, name, artist_id, artwork, description, album_links, \
     social_media_links, release_date, created_at, updated_at";

/// PostgreSQL album repository
#[derive(Clone)]
pub struct PgAlbumRepository {
    pool: PgPool,
}

impl PgAlbumRepository {
    /// Create a new album repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlbumRepository for PgAlbumRepository {
    async fn create(&self, input: NewAlbum) -> DbResult<Album> {
        input.validate()?;
        let now = clock::now();

        let sql = format!(
            "INSERT INTO albums (name, artist_id, artwork, description, album_links, \
             social_media_links, release_date, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) \
             RETURNING {ALBUM_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AlbumRow>(&sql)
            .bind(&input.name)
            .bind(input.artist_id.as_str())
            .bind(&input.artwork)
            .bind(&input.description)
            .bind(input.album_links.as_ref().map(Json))
            .bind(input.social_media_links.as_ref().map(Json))
            .bind(input.release_date)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn insert_with_id(&self, id: &AlbumId, input: NewAlbum) -> DbResult<Option<Album>> {
        input.validate()?;
        let now = clock::now();

        let sql = format!(
            "INSERT INTO albums (id, name, artist_id, artwork, description, album_links, \
             social_media_links, release_date, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING {ALBUM_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AlbumRow>(&sql)
            .bind(id.as_str())
            .bind(&input.name)
            .bind(input.artist_id.as_str())
            .bind(&input.artwork)
            .bind(&input.description)
            .bind(input.album_links.as_ref().map(Json))
            .bind(input.social_media_links.as_ref().map(Json))
            .bind(input.release_date)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find(&self, id: &AlbumId) -> DbResult<Option<Album>> {
        let sql = format!("SELECT {ALBUM_COLUMNS} FROM albums WHERE id = $1");
        let row = sqlx::query_as::<_, AlbumRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, id: &AlbumId, patch: AlbumPatch) -> DbResult<Album> {
        let mut album = self.get(id).await?;
        patch.validate()?;
        patch.apply(&mut album, clock::now());

        let sql = format!(
            "UPDATE albums \
             SET name = $2, artist_id = $3, artwork = $4, description = $5, album_links = $6, \
                 social_media_links = $7, release_date = $8, updated_at = $9 \
             WHERE id = $1 \
             RETURNING {ALBUM_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AlbumRow>(&sql)
            .bind(id.as_str())
            .bind(&album.name)
            .bind(album.artist_id.as_str())
            .bind(&album.artwork)
            .bind(&album.description)
            .bind(album.album_links.as_ref().map(Json))
            .bind(album.social_media_links.as_ref().map(Json))
            .bind(album.release_date)
            .bind(album.updated_at)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Into::into).ok_or(DbError::NotFound)
    }

    async fn delete(&self, id: &AlbumId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM albums WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    async fn list(&self) -> DbResult<Vec<Album>> {
        let sql = format!("SELECT {ALBUM_COLUMNS} FROM albums ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, AlbumRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_artist(&self, artist_id: &ArtistId) -> DbResult<Vec<Album>> {
        let sql = format!(
            "SELECT {ALBUM_COLUMNS} FROM albums WHERE artist_id = $1 ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, AlbumRow>(&sql)
            .bind(artist_id.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
