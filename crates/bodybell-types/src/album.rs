//! Album documents
//!
//! Albums reference their artist by id. The reference is not checked on write;
//! a dangling `artistId` shows up as a lookup miss when joining.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{require_non_blank, validate_links, validate_url};
use crate::{clock, AlbumId, Artist, ArtistId, ValidationError};

/// Platform name -> URL (streaming stores, social profiles)
pub type Links = BTreeMap<String, String>;

/// A release on the label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub artist_id: ArtistId,
    /// Artwork image URL
    pub artwork: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_links: Option<Links>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media_links: Option<Links>,
    pub release_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlbum {
    pub name: String,
    pub artist_id: ArtistId,
    pub artwork: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub album_links: Option<Links>,
    #[serde(default)]
    pub social_media_links: Option<Links>,
    pub release_date: DateTime<Utc>,
}

impl NewAlbum {
    /// Check presence and shape
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("name", &self.name)?;
        require_non_blank("artistId", self.artist_id.as_str())?;
        validate_url("artwork", &self.artwork)?;
        if let Some(links) = &self.album_links {
            validate_links("albumLinks", links)?;
        }
        if let Some(links) = &self.social_media_links {
            validate_links("socialMediaLinks", links)?;
        }
        Ok(())
    }

    /// Build the stored document
    pub fn into_album(self, id: AlbumId, now: DateTime<Utc>) -> Album {
        Album {
            id,
            name: self.name,
            artist_id: self.artist_id,
            artwork: self.artwork,
            description: self.description,
            album_links: self.album_links,
            social_media_links: self.social_media_links,
            release_date: self.release_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for an album
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<ArtistId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_links: Option<Links>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media_links: Option<Links>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
}

impl AlbumPatch {
    /// Check presence and shape of the provided fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_blank("name", name)?;
        }
        if let Some(artist_id) = &self.artist_id {
            require_non_blank("artistId", artist_id.as_str())?;
        }
        if let Some(artwork) = &self.artwork {
            validate_url("artwork", artwork)?;
        }
        if let Some(links) = &self.album_links {
            validate_links("albumLinks", links)?;
        }
        if let Some(links) = &self.social_media_links {
            validate_links("socialMediaLinks", links)?;
        }
        Ok(())
    }

    /// Merge into an existing album and refresh `updatedAt`
    pub fn apply(self, album: &mut Album, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            album.name = name;
        }
        if let Some(artist_id) = self.artist_id {
            album.artist_id = artist_id;
        }
        if let Some(artwork) = self.artwork {
            album.artwork = artwork;
        }
        if let Some(description) = self.description {
            album.description = description;
        }
        if let Some(links) = self.album_links {
            album.album_links = Some(links);
        }
        if let Some(links) = self.social_media_links {
            album.social_media_links = Some(links);
        }
        if let Some(release_date) = self.release_date {
            album.release_date = release_date;
        }
        album.updated_at = clock::advance_past(album.updated_at, now);
    }
}

/// An album joined with its artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumWithArtist {
    #[serde(flatten)]
    pub album: Album,
    pub artist: Artist,
}

/// An artist joined with all of its albums
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistWithAlbums {
    #[serde(flatten)]
    pub artist: Artist,
    pub albums: Vec<Album>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewArtist;
    use serde_json::json;

    fn new_album() -> NewAlbum {
        serde_json::from_value(json!({
            "name": "First Release",
            "artistId": "body-bell-records",
            "artwork": "https://cdn.example.com/first.jpg",
            "description": "Our first experimental release",
            "releaseDate": "2024-03-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_new_album_validates() {
        assert!(new_album().validate().is_ok());
    }

    #[test]
    fn test_new_album_rejects_relative_artwork() {
        let mut album = new_album();
        album.artwork = "/images/album-cover.jpg".to_string();
        assert_eq!(
            album.validate(),
            Err(ValidationError::invalid_url("artwork"))
        );
    }

    #[test]
    fn test_new_album_requires_release_date() {
        let result = serde_json::from_value::<NewAlbum>(json!({
            "name": "x",
            "artistId": "a",
            "artwork": "https://cdn.example.com/x.jpg"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_can_move_album_to_another_artist() {
        let now = clock::now();
        let mut album = new_album().into_album(AlbumId::new("al1"), now);
        let patch = AlbumPatch {
            artist_id: Some(ArtistId::new("other")),
            ..Default::default()
        };
        patch.apply(&mut album, now);
        assert_eq!(album.artist_id.as_str(), "other");
        assert!(album.updated_at > album.created_at);
    }

    #[test]
    fn test_album_with_artist_flattens() {
        let now = clock::now();
        let joined = AlbumWithArtist {
            album: new_album().into_album(AlbumId::new("al1"), now),
            artist: NewArtist::named("Body Bell").into_artist(ArtistId::new("body-bell-records"), now),
        };
        let json = serde_json::to_value(&joined).unwrap();
        assert_eq!(json["id"], "al1");
        assert_eq!(json["artistId"], "body-bell-records");
        assert_eq!(json["artist"]["name"], "Body Bell");
    }
}
