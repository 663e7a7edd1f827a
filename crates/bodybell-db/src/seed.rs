//! Sample catalog data

use bodybell_types::{AlbumId, ArtistId, NewAlbum, NewArtist};
use chrono::{TimeZone, Utc};
use tracing::info;

use crate::error::DbResult;
use crate::repo::{AlbumRepository, ArtistRepository};
use crate::Repositories;

pub const SAMPLE_ARTIST_ID: &str = "body-bell-records";
pub const SAMPLE_ALBUM_ID: &str = "first-release";

/// What a seeding run actually wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub artist_created: bool,
    pub album_created: bool,
}

fn sample_artist() -> NewArtist {
    NewArtist {
        name: "Body Bell Records".to_string(),
        bio: "A record label dedicated to experimental and avant-garde music.".to_string(),
        members: vec!["Ben Baker".to_string()],
        social_media: [
            ("instagram", "https://instagram.com/bodybellrecords"),
            ("twitter", "https://twitter.com/bodybellrecords"),
            ("facebook", "https://facebook.com/bodybellrecords"),
            ("youtube", "https://youtube.com/bodybellrecords"),
            ("spotify", "https://open.spotify.com/artist/bodybellrecords"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
    }
}

fn sample_album() -> NewAlbum {
    NewAlbum {
        name: "First Release".to_string(),
        artist_id: ArtistId::new(SAMPLE_ARTIST_ID),
        artwork: "https://bodybellrecords.com/images/album-cover.jpg".to_string(),
        description: "Our first experimental release".to_string(),
        album_links: Some(
            [(
                "spotify".to_string(),
                "https://open.spotify.com/track/1".to_string(),
            )]
            .into_iter()
            .collect(),
        ),
        social_media_links: None,
        release_date: Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now),
    }
}

/// Insert the sample artist and album unless they already exist.
/// Safe to run repeatedly.
pub async fn seed_catalog(repos: &Repositories) -> DbResult<SeedReport> {
    let artist = repos
        .artists
        .insert_with_id(&ArtistId::new(SAMPLE_ARTIST_ID), sample_artist())
        .await?;
    let album = repos
        .albums
        .insert_with_id(&AlbumId::new(SAMPLE_ALBUM_ID), sample_album())
        .await?;

    let report = SeedReport {
        artist_created: artist.is_some(),
        album_created: album.is_some(),
    };
    info!(
        artist_created = report.artist_created,
        album_created = report.album_created,
        "catalog seeded"
    );
    Ok(report)
}
