//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use bodybell_types::{Album, AlbumId, Artist, ArtistId, Links, SocialLinks};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Artist row from the database
#[derive(Debug, Clone, FromRow)]
pub struct ArtistRow {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub members: Vec<String>,
    pub social_media: Json<SocialLinks>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArtistRow> for Artist {
    fn from(row: ArtistRow) -> Self {
        Artist {
            id: ArtistId(row.id),
            name: row.name,
            bio: row.bio,
            members: row.members,
            social_media: row.social_media.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Album row from the database
#[derive(Debug, Clone, FromRow)]
pub struct AlbumRow {
    pub id: String,
    pub name: String,
    pub artist_id: String,
    pub artwork: String,
    pub description: String,
    pub album_links: Option<Json<Links>>,
    pub social_media_links: Option<Json<Links>>,
    pub release_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AlbumRow> for Album {
    fn from(row: AlbumRow) -> Self {
        Album {
            id: AlbumId(row.id),
            name: row.name,
            artist_id: ArtistId(row.artist_id),
            artwork: row.artwork,
            description: row.description,
            album_links: row.album_links.map(|j| j.0),
            social_media_links: row.social_media_links.map(|j| j.0),
            release_date: row.release_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
