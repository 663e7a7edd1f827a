//! Artist documents

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_util::null_as_default;
use crate::validation::{require_non_blank, validate_links};
use crate::{clock, ArtistId, ValidationError};

/// Platform name -> profile URL
pub type SocialLinks = BTreeMap<String, String>;

/// An artist on the label roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// Assigned by the store on creation, immutable afterwards
    pub id: ArtistId,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub social_media: SocialLinks,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArtist {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub social_media: SocialLinks,
}

impl NewArtist {
    /// Create input with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bio: String::new(),
            members: Vec::new(),
            social_media: SocialLinks::new(),
        }
    }

    /// Check presence and shape
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("name", &self.name)?;
        validate_links("socialMedia", &self.social_media)
    }

    /// Build the stored document; `createdAt` and `updatedAt` are both `now`.
    pub fn into_artist(self, id: ArtistId, now: DateTime<Utc>) -> Artist {
        Artist {
            id,
            name: self.name,
            bio: self.bio,
            members: self.members,
            social_media: self.social_media,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for an artist.
///
/// Omitted fields are left unchanged. `id` and `createdAt` are never patched,
/// so they are not part of this type and are ignored if a client sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialLinks>,
}

impl ArtistPatch {
    /// Check presence and shape of the provided fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_blank("name", name)?;
        }
        if let Some(links) = &self.social_media {
            validate_links("socialMedia", links)?;
        }
        Ok(())
    }

    /// Merge into an existing artist and refresh `updatedAt`
    pub fn apply(self, artist: &mut Artist, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            artist.name = name;
        }
        if let Some(bio) = self.bio {
            artist.bio = bio;
        }
        if let Some(members) = self.members {
            artist.members = members;
        }
        if let Some(social_media) = self.social_media {
            artist.social_media = social_media;
        }
        artist.updated_at = clock::advance_past(artist.updated_at, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Artist {
        NewArtist::named("Body Bell").into_artist(ArtistId::new("a1"), clock::now())
    }

    #[test]
    fn test_new_artist_defaults() {
        let input: NewArtist = serde_json::from_value(json!({ "name": "Test" })).unwrap();
        assert_eq!(input.bio, "");
        assert!(input.members.is_empty());
        assert!(input.social_media.is_empty());
    }

    #[test]
    fn test_null_members_become_empty() {
        let input: NewArtist =
            serde_json::from_value(json!({ "name": "Test", "members": null, "socialMedia": null }))
                .unwrap();
        assert!(input.members.is_empty());
        assert!(input.social_media.is_empty());
    }

    #[test]
    fn test_new_artist_requires_name() {
        assert!(serde_json::from_value::<NewArtist>(json!({ "bio": "b" })).is_err());
        assert_eq!(
            NewArtist::named("  ").validate(),
            Err(ValidationError::Required("name"))
        );
    }

    #[test]
    fn test_new_artist_rejects_bad_social_url() {
        let mut input = NewArtist::named("Test");
        input
            .social_media
            .insert("twitter".to_string(), "@bodybell".to_string());
        assert!(matches!(
            input.validate(),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_into_artist_sets_equal_timestamps() {
        let artist = sample();
        assert_eq!(artist.created_at, artist.updated_at);
    }

    #[test]
    fn test_patch_merges_only_provided_fields() {
        let mut artist = sample();
        artist.members = vec!["Ben Baker".to_string()];
        let before = artist.clone();

        let patch = ArtistPatch {
            name: Some("X".to_string()),
            ..Default::default()
        };
        patch.apply(&mut artist, before.updated_at);

        assert_eq!(artist.name, "X");
        assert_eq!(artist.members, before.members);
        assert_eq!(artist.bio, before.bio);
        assert_eq!(artist.created_at, before.created_at);
        assert!(artist.updated_at > before.updated_at);
    }

    #[test]
    fn test_patch_ignores_immutable_fields() {
        let patch: ArtistPatch = serde_json::from_value(json!({
            "id": "other",
            "createdAt": "2001-01-01T00:00:00Z",
            "bio": "new bio"
        }))
        .unwrap();

        let mut artist = sample();
        let id = artist.id.clone();
        let created_at = artist.created_at;
        patch.apply(&mut artist, clock::now());

        assert_eq!(artist.id, id);
        assert_eq!(artist.created_at, created_at);
        assert_eq!(artist.bio, "new bio");
    }

    #[test]
    fn test_artist_json_uses_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("socialMedia").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
