//! PostgreSQL artist repository implementation

use async_trait::async_trait;
use bodybell_types::{clock, Artist, ArtistId, ArtistPatch, NewArtist};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::ArtistRow;
use crate::repo::ArtistRepository;

/// PostgreSQL artist repository
#[derive(Clone)]
pub struct PgArtistRepository {
    pool: PgPool,
}

impl PgArtistRepository {
    /// Create a new artist repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArtistRepository for PgArtistRepository {
    async fn create(&self, input: NewArtist) -> DbResult<Artist> {
        input.validate()?;
        let now = clock::now();

        let row = sqlx::query_as::<_, ArtistRow>(
            r#"
            INSERT INTO artists (name, bio, members, social_media, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, name, bio, members, social_media, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.bio)
        .bind(&input.members)
        .bind(Json(&input.social_media))
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn insert_with_id(&self, id: &ArtistId, input: NewArtist) -> DbResult<Option<Artist>> {
        input.validate()?;
        let now = clock::now();

        let row = sqlx::query_as::<_, ArtistRow>(
            r#"
            INSERT INTO artists (id, name, bio, members, social_media, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT (id) DO NOTHING
            RETURNING id, name, bio, members, social_media, created_at, updated_at
            "#,
        )
        .bind(id.as_str())
        .bind(&input.name)
        .bind(&input.bio)
        .bind(&input.members)
        .bind(Json(&input.social_media))
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find(&self, id: &ArtistId) -> DbResult<Option<Artist>> {
        let row = sqlx::query_as::<_, ArtistRow>(
            r#"
            SELECT id, name, bio, members, social_media, created_at, updated_at
            FROM artists
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, id: &ArtistId, patch: ArtistPatch) -> DbResult<Artist> {
        let mut artist = self.get(id).await?;
        patch.validate()?;
        patch.apply(&mut artist, clock::now());

        // Not transactional: a concurrent delete between the read and this
        // write surfaces as NotFound.
        let row = sqlx::query_as::<_, ArtistRow>(
            r#"
            UPDATE artists
            SET name = $2, bio = $3, members = $4, social_media = $5, updated_at = $6
            WHERE id = $1
            RETURNING id, name, bio, members, social_media, created_at, updated_at
            "#,
        )
        .bind(id.as_str())
        .bind(&artist.name)
        .bind(&artist.bio)
        .bind(&artist.members)
        .bind(Json(&artist.social_media))
        .bind(artist.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Into::into).ok_or(DbError::NotFound)
    }

    async fn delete(&self, id: &ArtistId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    async fn list(&self) -> DbResult<Vec<Artist>> {
        let rows = sqlx::query_as::<_, ArtistRow>(
            r#"
            SELECT id, name, bio, members, social_media, created_at, updated_at
            FROM artists
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
